use thiserror::Error;

use crate::codes;

/// Why a token refresh did not produce a new access token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("refresh request failed: {0}")]
    Transport(String),
    #[error("refresh rejected by server ({code}): {message}")]
    Rejected { code: String, message: String },
    #[error("refresh response carried no access token")]
    MissingToken,
    #[error("refresh was abandoned before it settled")]
    Abandoned,
}

/// Failure returned to callers of the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A response arrived but it was not a success envelope.
    #[error("request failed with status {status}: {message}")]
    Application {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The request was sent but no response arrived.
    #[error("no response received: {0}")]
    Network(String),
    /// The request could not be built.
    #[error("invalid request: {0}")]
    Request(String),
    /// The session expired and could not be renewed.
    #[error("session expired: {0}")]
    Refresh(RefreshError),
    #[error("unexpected response payload: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Application { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// True for the HTTP 401 + auth-failed combination that triggers a refresh.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Application { status: 401, code: Some(code), .. } if codes::is_token_refresh_needed(code)
        )
    }

    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Application { code, message, .. } => {
                let server_message = Some(message.as_str()).filter(|m| !m.is_empty());
                codes::error_message(code.as_deref(), server_message)
            }
            ApiError::Network(_) => codes::NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Request(_) | ApiError::Decode(_) => codes::REQUEST_ERROR_MESSAGE.to_string(),
            ApiError::Refresh(_) => codes::SESSION_EXPIRED_MESSAGE.to_string(),
        }
    }
}

impl From<RefreshError> for ApiError {
    fn from(e: RefreshError) -> Self {
        ApiError::Refresh(e)
    }
}
