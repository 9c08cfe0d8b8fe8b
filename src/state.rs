//! Shared application state.
//!
//! Everything a UI shell needs: the session, the gateway with its service
//! clients, navigation, and the typed platform APIs. Cloning is cheap.

use std::sync::Arc;

use crate::api::{Account, CouponApi, OrderApi, ProductApi};
use crate::config::ConfigV1;
use crate::gateway::Gateway;
use crate::navigation::Router;
use crate::notify::Notifier;
use crate::session::SessionState;
use crate::utils::image_url::transform_image_url;

#[derive(Clone)]
pub struct Platform {
    /// Configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    pub session: Arc<SessionState>,
    pub gateway: Gateway,
    pub router: Arc<Router>,
    pub notifier: Arc<dyn Notifier>,
    pub account: Account,
    pub products: ProductApi,
    pub coupons: CouponApi,
    pub orders: OrderApi,
}

impl Platform {
    pub fn login_path(&self) -> &str {
        &self.config.navigation.login_path
    }

    /// Navigate to a page that needs a signed-in user.
    pub fn go_auth_page(&self, path: &str) -> bool {
        self.router.go_auth_page(path, self.login_path(), &self.session)
    }

    /// Navigate to an admin page.
    pub fn go_admin_page(&self, path: &str) -> bool {
        self.router.go_admin_page(
            path,
            self.login_path(),
            &self.session,
            self.notifier.as_ref(),
        )
    }

    /// Display URL for an image the backend returned.
    pub fn image_url(&self, image_url: &str) -> String {
        transform_image_url(image_url, &self.config.images)
    }
}
