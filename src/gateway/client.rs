use std::sync::Arc;

use http::header::{HeaderValue, AUTHORIZATION};
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use super::error::{ApiError, RefreshError};
use super::refresh::{Outcome, RefreshCoordinator, Ticket};
use super::request::ApiRequest;
use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use super::Service;
use crate::codes;
use crate::config::ServicesConfig;
use crate::models::user::RefreshResponse;
use crate::models::ApiResponse;
use crate::navigation::Navigator;
use crate::notify::Notifier;
use crate::session::SessionState;

pub const REFRESH_PATH: &str = "/api/v1/users/auth/refresh";

/// Everything a [`Gateway`] is built from.
pub struct GatewayParts {
    pub services: ServicesConfig,
    pub login_path: String,
    pub session: Arc<SessionState>,
    pub transport: Arc<dyn Transport>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

struct GatewayInner {
    services: ServicesConfig,
    login_path: String,
    session: Arc<SessionState>,
    coordinator: RefreshCoordinator,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

/// Owns the refresh coordinator shared by all service clients.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

impl Gateway {
    pub fn new(parts: GatewayParts) -> Self {
        info!(
            "Creating gateway (user={}, product={}, coupon={}, order={})",
            parts.services.base_url(Service::User),
            parts.services.base_url(Service::Product),
            parts.services.base_url(Service::Coupon),
            parts.services.base_url(Service::Order)
        );
        Self {
            inner: Arc::new(GatewayInner {
                services: parts.services,
                login_path: parts.login_path,
                session: parts.session,
                coordinator: RefreshCoordinator::new(),
                transport: parts.transport,
                notifier: parts.notifier,
                navigator: parts.navigator,
            }),
        }
    }

    pub fn client(&self, service: Service) -> ServiceClient {
        ServiceClient {
            service,
            inner: self.inner.clone(),
        }
    }

    pub fn user(&self) -> ServiceClient {
        self.client(Service::User)
    }

    pub fn product(&self) -> ServiceClient {
        self.client(Service::Product)
    }

    pub fn coupon(&self) -> ServiceClient {
        self.client(Service::Coupon)
    }

    pub fn order(&self) -> ServiceClient {
        self.client(Service::Order)
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.inner.session
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.inner.coordinator
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.inner.notifier
    }
}

/// Request handle bound to one backend service.
#[derive(Clone)]
pub struct ServiceClient {
    service: Service,
    inner: Arc<GatewayInner>,
}

impl ServiceClient {
    pub fn service(&self) -> Service {
        self.service
    }

    pub fn base_url(&self) -> &str {
        self.inner.services.base_url(self.service)
    }

    /// Send a request and return the success envelope. An expired token is
    /// refreshed once and the request replayed; every other failure is
    /// reported to the user unless the request opted out.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let bearer = self.inner.session.access_token();
        let result = self.dispatch(&request, bearer.as_deref()).await;
        match result {
            Err(e) if e.is_auth_failure() && !request.retried && !request.options.skip_refresh => {
                self.recover(request).await
            }
            result => self.finish(&request, result),
        }
    }

    /// Like [`execute`](Self::execute), decoding the envelope's `data`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let envelope = self.execute(request.clone()).await?;
        envelope.decode_data().map_err(|e| {
            let err = ApiError::Decode(e.to_string());
            self.report(&request, &err);
            err
        })
    }

    /// Refresh the access token now, sharing a refresh that is already
    /// running. On success the new token is stored; on failure the session
    /// is cleared. Nothing is shown to the user either way.
    pub async fn refresh_session(&self) -> Result<String, RefreshError> {
        match self.inner.coordinator.begin() {
            Ticket::Leader(lease) => match self.refresh_token().await {
                Ok(token) => {
                    self.store_token(&token);
                    lease.resolve(token.clone());
                    Ok(token)
                }
                Err(error) => {
                    lease.reject(error.clone());
                    self.clear_session();
                    Err(error)
                }
            },
            Ticket::Queued(pending) => match pending.wait().await {
                Outcome::Resolved(token) => Ok(token),
                Outcome::Rejected(error) => Err(error),
            },
        }
    }

    /// Build the wire request, attaching the bearer token when there is one.
    fn build_http_request(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        if let Some(reason) = request.invalid_reason() {
            return Err(ApiError::Request(reason.to_string()));
        }

        let mut url = Url::parse(&format!("{}{}", self.base_url(), request.path))
            .map_err(|e| ApiError::Request(format!("Invalid URL: {}", e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = bearer {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Request(format!("Invalid bearer token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(HttpRequest {
            method: request.method.clone(),
            url: url.into(),
            headers,
            body: request.body.clone(),
        })
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let http_request = self.build_http_request(request, bearer)?;
        debug!(
            "[{}] {} {} (service={}, retried={})",
            request.id, request.method, request.path, self.service, request.retried
        );
        let response = self
            .inner
            .transport
            .send(http_request)
            .await
            .map_err(|e| match e {
                TransportError::NoResponse(reason) => ApiError::Network(reason),
                TransportError::Build(reason) => ApiError::Request(reason),
            })?;
        classify(response)
    }

    async fn recover(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        match self.inner.coordinator.begin() {
            Ticket::Leader(lease) => {
                request.retried = true;
                info!(
                    event_name = "gateway.refresh.started",
                    event_domain = "gateway",
                    request_id = %request.id,
                    service = self.service.as_str(),
                    "Access token rejected; refreshing"
                );
                match self.refresh_token().await {
                    Ok(token) => {
                        self.store_token(&token);
                        let waiters = lease.resolve(token.clone());
                        info!(
                            event_name = "gateway.refresh.succeeded",
                            event_domain = "gateway",
                            request_id = %request.id,
                            waiters,
                            "Access token refreshed"
                        );
                        self.replay(request, &token).await
                    }
                    Err(error) => {
                        let waiters = lease.reject(error.clone());
                        warn!(
                            event_name = "gateway.refresh.failed",
                            event_domain = "gateway",
                            request_id = %request.id,
                            waiters,
                            "Token refresh failed: {}",
                            error
                        );
                        self.expire_session();
                        Err(ApiError::Refresh(error))
                    }
                }
            }
            Ticket::Queued(pending) => {
                debug!(
                    event_name = "gateway.request.queued",
                    event_domain = "gateway",
                    request_id = %request.id,
                    "Waiting for running token refresh"
                );
                match pending.wait().await {
                    Outcome::Resolved(token) => {
                        request.retried = true;
                        self.replay(request, &token).await
                    }
                    Outcome::Rejected(error) => Err(ApiError::Refresh(error)),
                }
            }
        }
    }

    async fn replay(&self, request: ApiRequest, token: &str) -> Result<ApiResponse, ApiError> {
        debug!(
            event_name = "gateway.request.replayed",
            event_domain = "gateway",
            request_id = %request.id,
            "Replaying request with refreshed token"
        );
        let result = self.dispatch(&request, Some(token)).await;
        self.finish(&request, result)
    }

    /// Exchange the refresh cookie for a new access token. Goes straight to
    /// the transport; its failures are never recovered or reported here.
    async fn refresh_token(&self) -> Result<String, RefreshError> {
        let url = format!(
            "{}{}",
            self.inner.services.base_url(Service::User),
            REFRESH_PATH
        );
        let mut headers = HeaderMap::new();
        if let Some(token) = self.inner.session.access_token() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        let response = self
            .inner
            .transport
            .send(HttpRequest {
                method: Method::POST,
                url,
                headers,
                body: None,
            })
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        let envelope = classify(response).map_err(|e| match e {
            ApiError::Application { status, code, message } => RefreshError::Rejected {
                code: code.unwrap_or_else(|| status.to_string()),
                message,
            },
            other => RefreshError::Transport(other.to_string()),
        })?;

        let refreshed: RefreshResponse = envelope
            .decode_data()
            .map_err(|_| RefreshError::MissingToken)?;
        if refreshed.access_token.is_empty() {
            return Err(RefreshError::MissingToken);
        }
        Ok(refreshed.access_token)
    }

    fn store_token(&self, token: &str) {
        if let Err(e) = self.inner.session.set_access_token(Some(token.to_string())) {
            warn!(
                event_name = "session.persist.failed",
                event_domain = "session",
                "Could not persist refreshed access token: {}",
                e
            );
        }
    }

    fn clear_session(&self) {
        if let Err(e) = self.inner.session.logout() {
            warn!(
                event_name = "session.persist.failed",
                event_domain = "session",
                "Could not clear stored session: {}",
                e
            );
        }
    }

    /// Unrecoverable auth failure: clear the session, tell the user, and
    /// send them to the login view.
    fn expire_session(&self) {
        self.clear_session();
        self.inner.notifier.error(codes::SESSION_EXPIRED_MESSAGE);
        let login_path = self.inner.login_path.as_str();
        if self.inner.navigator.current_path() != login_path {
            self.inner.navigator.navigate(login_path);
        }
    }

    fn finish(
        &self,
        request: &ApiRequest,
        result: Result<ApiResponse, ApiError>,
    ) -> Result<ApiResponse, ApiError> {
        if let Err(e) = &result {
            self.report(request, e);
        }
        result
    }

    fn report(&self, request: &ApiRequest, error: &ApiError) {
        warn!(
            event_name = "gateway.request.failed",
            event_domain = "gateway",
            request_id = %request.id,
            service = self.service.as_str(),
            method = %request.method,
            path = request.path.as_str(),
            "Request failed: {}",
            error
        );
        if request.options.skip_error_modal {
            return;
        }
        self.inner.notifier.error(&error.user_message());
    }
}

/// Turn a raw response into the success envelope or an application error.
fn classify(response: HttpResponse) -> Result<ApiResponse, ApiError> {
    let envelope = serde_json::from_str::<ApiResponse>(&response.body);
    match envelope {
        Ok(envelope) if response.is_success() && envelope.is_success() => Ok(envelope),
        Ok(envelope) => Err(ApiError::Application {
            status: response.status,
            code: Some(envelope.code),
            message: envelope.message,
        }),
        Err(e) if response.is_success() => Err(ApiError::Decode(e.to_string())),
        Err(_) => Err(ApiError::Application {
            status: response.status,
            code: None,
            message: String::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_classify_success_needs_both_status_and_code() {
        assert!(classify(response(200, r#"{"code":"C0000","data":1}"#)).is_ok());

        let err = classify(response(200, r#"{"code":"CP1009","message":"sold out"}"#)).unwrap_err();
        assert_eq!(err.code(), Some("CP1009"));

        let err = classify(response(401, r#"{"code":"C0002","message":""}"#)).unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_classify_non_json_bodies() {
        assert!(matches!(
            classify(response(200, "<html>")),
            Err(ApiError::Decode(_))
        ));
        assert!(matches!(
            classify(response(502, "Bad Gateway")),
            Err(ApiError::Application { status: 502, code: None, .. })
        ));
    }
}
