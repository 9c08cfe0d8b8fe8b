//! Client-side navigation: where the user currently is, and how the client
//! moves them (the gateway only needs to force the login view).

mod router;

pub use router::{resolve_params, Location, Router, ERROR_PATH, HOME_PATH};

/// Something that knows and can change the current location.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn navigate(&self, target: &str);
}
