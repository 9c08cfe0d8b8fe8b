//! Wire models shared by the gateway and the platform APIs.

pub mod coupon;
pub mod envelope;
pub mod order;
pub mod page;
pub mod product;
pub mod user;

pub use envelope::ApiResponse;
pub use page::Page;
pub use user::SessionUser;
