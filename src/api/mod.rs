//! Typed wrappers around the platform's REST endpoints.

pub mod auth;
pub mod coupon;
pub mod order;
pub mod product;

use std::collections::BTreeMap;

pub use auth::{Account, AccountError, AuthApi};
pub use coupon::CouponApi;
pub use order::OrderApi;
pub use product::ProductApi;

/// Query parameters of a list call (page, size, filters).
pub type Params = BTreeMap<String, String>;
