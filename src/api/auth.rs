use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::gateway::{ApiError, ApiRequest, Gateway, RefreshError, ServiceClient};
use crate::models::user::{
    LoginIdAvailability, LoginRequest, LoginResponse, PasswordChangeRequest, SessionUser,
    SignupRequest,
};
use crate::session::{SessionError, SessionState};

/// Endpoints of the user service.
#[derive(Clone)]
pub struct AuthApi {
    client: ServiceClient,
}

impl AuthApi {
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            client: gateway.user(),
        }
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::post("/api/v1/users/auth/signup").json(request))
            .await
            .map(|_| ())
    }

    pub async fn check_login_id(&self, login_id: &str) -> Result<LoginIdAvailability, ApiError> {
        self.client
            .fetch(ApiRequest::get("/api/v1/users/auth/check-loginid").query("loginId", login_id))
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.client
            .fetch(ApiRequest::post("/api/v1/users/auth/login").json(request))
            .await
    }

    /// A rejected token fails the call; logging out never refreshes.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client
            .execute(
                ApiRequest::post("/api/v1/users/auth/logout")
                    .skip_error_modal()
                    .skip_refresh(),
            )
            .await
            .map(|_| ())
    }

    pub async fn profile(&self) -> Result<SessionUser, ApiError> {
        self.client.fetch(ApiRequest::get("/api/v1/users/profile")).await
    }

    pub async fn change_password(&self, request: &PasswordChangeRequest) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::put("/api/v1/users/password").json(request))
            .await
            .map(|_| ())
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Account actions that keep the session in step with the server.
#[derive(Clone)]
pub struct Account {
    api: AuthApi,
    session: Arc<SessionState>,
}

impl Account {
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            api: AuthApi::new(gateway),
            session: gateway.session().clone(),
        }
    }

    pub fn api(&self) -> &AuthApi {
        &self.api
    }

    /// Log in and store the returned token and user.
    pub async fn login(&self, login_id: &str, password: &str) -> Result<SessionUser, AccountError> {
        let response = self
            .api
            .login(&LoginRequest {
                login_id: login_id.to_string(),
                password: password.to_string(),
            })
            .await?;
        let user = response.user();
        self.session.sign_in(response.access_token, user.clone())?;
        info!(
            event_name = "account.login.succeeded",
            event_domain = "account",
            user_id = user.user_id.as_str(),
            "Logged in"
        );
        Ok(user)
    }

    /// Tell the server (best effort) and drop the local session.
    pub async fn logout(&self) -> Result<(), SessionError> {
        if self.session.is_authenticated() {
            if let Err(e) = self.api.logout().await {
                debug!("Server logout failed; clearing local session anyway: {}", e);
            }
        }
        self.session.logout()
    }

    /// Exchange the refresh cookie for a new access token and store it.
    /// A failed refresh clears the session.
    pub async fn refresh_token(&self) -> Result<String, RefreshError> {
        self.api.client.refresh_session().await
    }

    /// Reload the signed-in user's profile. A failed fetch leaves the
    /// session untouched.
    pub async fn fetch_profile(&self) -> Result<SessionUser, AccountError> {
        let user = self.api.profile().await?;
        if let Err(e) = self.session.set_user(Some(user.clone())) {
            warn!("Profile fetched but not stored: {}", e);
            return Err(e.into());
        }
        Ok(user)
    }

    pub async fn register(&self, request: &SignupRequest) -> Result<(), ApiError> {
        self.api.signup(request).await
    }

    pub async fn check_login_id(&self, login_id: &str) -> Result<LoginIdAvailability, ApiError> {
        self.api.check_login_id(login_id).await
    }
}
