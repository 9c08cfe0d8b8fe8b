//! The authenticated request gateway: every backend call goes through a
//! [`ServiceClient`], which attaches the bearer token and recovers from an
//! expired token with a single shared refresh.

pub mod client;
pub mod error;
pub mod refresh;
pub mod request;
pub mod transport;

use std::fmt;

pub use client::{Gateway, GatewayParts, ServiceClient, REFRESH_PATH};
pub use error::{ApiError, RefreshError};
pub use refresh::{Outcome, PendingRefresh, RefreshCoordinator, RefreshLease, Ticket};
pub use request::{ApiRequest, RequestOptions};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

/// Backend domains, each with its own base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    User,
    Product,
    Coupon,
    Order,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::User => "user",
            Service::Product => "product",
            Service::Coupon => "coupon",
            Service::Order => "order",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
