use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gateway::Service;

/// Base URLs of the backend services. The general service hosts users,
/// products and orders in most deployments, so the same URL may repeat.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ServicesConfig {
    pub user: String,
    pub product: String,
    pub coupon: String,
    pub order: String,
}

impl ServicesConfig {
    /// Base URL for a service, without a trailing slash.
    pub fn base_url(&self, service: Service) -> &str {
        let url = match service {
            Service::User => &self.user,
            Service::Product => &self.product,
            Service::Coupon => &self.coupon,
            Service::Order => &self.order,
        };
        url.trim_end_matches('/')
    }
}

/// Transport policy shared by every service client.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
    /// Keep and send cookies (the refresh credential travels as a cookie).
    #[serde(default = "default_include_credentials")]
    pub include_credentials: bool,
}

fn default_timeout_in_ms() -> u64 {
    30_000
}

fn default_include_credentials() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_in_ms: default_timeout_in_ms(),
            include_credentials: default_include_credentials(),
        }
    }
}

/// Paths the client navigates to on its own.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct NavigationConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_login_path() -> String {
    "/login".to_string()
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
        }
    }
}

/// How product image URLs from the backend are rewritten for display.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ImageConfig {
    /// Images are served through the same origin as the client; strip the
    /// backend origin so URLs become relative.
    #[serde(default)]
    pub use_proxy: bool,
    #[serde(default = "default_backend_origin")]
    pub backend_origin: String,
}

fn default_backend_origin() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            use_proxy: false,
            backend_origin: default_backend_origin(),
        }
    }
}
