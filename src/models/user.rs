use serde::{Deserialize, Serialize};

/// Role string granting administrative access.
pub const ADMIN_ROLE: &str = "ADMIN";
/// Role string of a regular customer.
pub const USER_ROLE: &str = "USER";

/// The identity kept in the session next to the access token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(alias = "id")]
    pub user_id: String,
    #[serde(alias = "name", default)]
    pub user_name: String,
    #[serde(default)]
    pub role: String,
}

impl SessionUser {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_id: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub role: String,
}

fn bearer() -> String {
    "Bearer".to_string()
}

impl LoginResponse {
    pub fn user(&self) -> SessionUser {
        SessionUser::new(&self.user_id, &self.user_name, &self.role)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub login_id: String,
    pub password: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginIdAvailability {
    pub available: bool,
    #[serde(default)]
    pub message: String,
}

/// Payload of a successful refresh call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}
