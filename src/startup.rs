//! Builds the platform from configuration.
//!
//! Session storage is opened and the last session restored before the
//! gateway exists, so the first request already carries the stored token.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::api::{Account, CouponApi, OrderApi, ProductApi};
use crate::config::ConfigV1;
use crate::gateway::{Gateway, GatewayParts, ReqwestTransport, Transport, TransportError};
use crate::navigation::{Router, HOME_PATH};
use crate::notify::Notifier;
use crate::session::{create_storage, SessionState, StorageError};
use crate::state::Platform;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Could not open session storage: {0}")]
    Storage(#[from] StorageError),
    #[error("Could not create HTTP client: {0}")]
    Transport(#[from] TransportError),
}

/// Build the platform on the real HTTP stack.
pub fn build_platform(
    config: Arc<ConfigV1>,
    notifier: Arc<dyn Notifier>,
) -> Result<Platform, StartupError> {
    let transport = Arc::new(ReqwestTransport::new(&config.http)?);
    build_platform_with(config, transport, notifier)
}

/// Build the platform on a caller-supplied transport.
pub fn build_platform_with(
    config: Arc<ConfigV1>,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
) -> Result<Platform, StartupError> {
    let storage = create_storage(&config.session)?;
    let session = Arc::new(SessionState::load(storage));
    let router = Arc::new(Router::new(HOME_PATH));

    let gateway = Gateway::new(GatewayParts {
        services: config.services.clone(),
        login_path: config.navigation.login_path.clone(),
        session: session.clone(),
        transport,
        notifier: notifier.clone(),
        navigator: router.clone(),
    });

    info!(
        "Platform ready (authenticated={})",
        session.is_authenticated()
    );

    Ok(Platform {
        account: Account::new(&gateway),
        products: ProductApi::new(&gateway),
        coupons: CouponApi::new(&gateway),
        orders: OrderApi::new(&gateway),
        config,
        session,
        gateway,
        router,
        notifier,
    })
}
