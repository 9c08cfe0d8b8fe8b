use http::Method;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Per-request behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// The caller shows failures itself; do not notify the user.
    pub skip_error_modal: bool,
    /// An expired token fails the request instead of starting a refresh.
    pub skip_refresh: bool,
}

/// A request against one service, relative to its base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) id: Uuid,
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
    pub(crate) options: RequestOptions,
    /// Set once the request went through a token refresh; it never triggers another.
    pub(crate) retried: bool,
    invalid: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            options: RequestOptions::default(),
            retried: false,
            invalid: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn queries<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach a JSON body. A body that cannot be serialized makes the
    /// request fail before it is sent.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => self.invalid = Some(format!("Could not serialize request body: {}", e)),
        }
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn skip_error_modal(mut self) -> Self {
        self.options.skip_error_modal = true;
        self
    }

    pub fn skip_refresh(mut self) -> Self {
        self.options.skip_refresh = true;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }

    pub(crate) fn invalid_reason(&self) -> Option<&str> {
        self.invalid.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_builder_collects_query_and_body() {
        let request = ApiRequest::post("/api/v1/orders")
            .query("page", 0)
            .queries([("size", "20")])
            .json(&json!({ "productId": "p1" }))
            .skip_error_modal();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "20".to_string())
            ]
        );
        assert_eq!(request.body, Some(json!({ "productId": "p1" })));
        assert!(request.options.skip_error_modal);
        assert!(!request.options.skip_refresh);
        assert!(!request.is_retried());
    }

    #[test]
    fn test_unserializable_body_marks_request_invalid() {
        // JSON object keys must be strings.
        let mut body = BTreeMap::new();
        body.insert(vec![1u8], "x");
        let request = ApiRequest::put("/x").json(&body);
        assert!(request.invalid_reason().is_some());
    }
}
