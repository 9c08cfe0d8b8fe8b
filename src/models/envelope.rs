use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codes;

/// The envelope every platform endpoint answers with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T = Value> {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        codes::is_success(&self.code)
    }

    /// True when the application code asks for a token refresh.
    pub fn is_auth_failure(&self) -> bool {
        codes::is_token_refresh_needed(&self.code)
    }
}

impl ApiResponse<Value> {
    /// Decode the `data` payload into a concrete type. A missing payload
    /// decodes as JSON `null`, so `()` and `Option<_>` targets accept it.
    pub fn decode_data<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.unwrap_or(Value::Null))
    }
}
