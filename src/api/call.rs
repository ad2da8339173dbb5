use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Which backend deployment serves a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Gateway for auth, users, orders, menus, reports and delivery.
    Core,
    /// Stand-alone payments service.
    Payments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Json,
    /// PDF reports and other downloads.
    Binary,
}

/// A transport-neutral description of one REST request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub service: Service,
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub expect: Expect,
    pub authenticated: bool,
}

impl ApiCall {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            service: Service::Core,
            method,
            segments: segments.into_iter().map(|s| s.as_ref().to_string()).collect(),
            query: Vec::new(),
            body: None,
            expect: Expect::Json,
            authenticated: true,
        }
    }

    pub fn get<I: IntoIterator<Item = S>, S: AsRef<str>>(segments: I) -> Self {
        Self::new(Method::Get, segments)
    }

    pub fn post<I: IntoIterator<Item = S>, S: AsRef<str>>(segments: I) -> Self {
        Self::new(Method::Post, segments)
    }

    pub fn put<I: IntoIterator<Item = S>, S: AsRef<str>>(segments: I) -> Self {
        Self::new(Method::Put, segments)
    }

    pub fn delete<I: IntoIterator<Item = S>, S: AsRef<str>>(segments: I) -> Self {
        Self::new(Method::Delete, segments)
    }

    pub fn payments(mut self) -> Self {
        self.service = Service::Payments;
        self
    }

    pub fn binary(mut self) -> Self {
        self.expect = Expect::Binary;
        self
    }

    /// Sent without the `Authorization` header.
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// `/api/orders/o-1/status`, used for logging and assertions.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Empty,
    Json(Value),
    /// Non-JSON text, e.g. `Driver registered`.
    Text(String),
    Bytes(Vec<u8>),
}

impl ApiBody {
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            ApiBody::Empty => Value::Null,
            ApiBody::Json(value) => value,
            ApiBody::Text(text) => Value::String(text),
            ApiBody::Bytes(bytes) => serde_json::from_slice(&bytes)?,
        };
        Ok(serde_json::from_value(value)?)
    }

    pub fn bytes(self) -> Result<Vec<u8>, ApiError> {
        match self {
            ApiBody::Empty => Ok(Vec::new()),
            ApiBody::Bytes(bytes) => Ok(bytes),
            ApiBody::Text(text) => Ok(text.into_bytes()),
            ApiBody::Json(value) => Err(ApiError::Decode(format!(
                "expected a binary body, got JSON {}",
                value
            ))),
        }
    }

    /// Human-readable acknowledgement text, if the server sent any.
    pub fn message(&self) -> Option<String> {
        match self {
            ApiBody::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            ApiBody::Json(Value::String(text)) => Some(text.clone()),
            ApiBody::Json(value) => value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_status_update_call() {
        let call = ApiCall::put(["api", "orders", "o-1", "status"]).query("status", "CONFIRMED");
        assert_eq!(call.method, Method::Put);
        assert_eq!(call.path(), "/api/orders/o-1/status");
        assert_eq!(call.query_value("status"), Some("CONFIRMED"));
        assert!(call.authenticated);
        assert_eq!(call.service, Service::Core);
    }

    #[test]
    fn empty_body_decodes_as_unit_or_option() {
        let unit: () = ApiBody::Empty.json().unwrap();
        assert_eq!(unit, ());
        let missing: Option<String> = ApiBody::Empty.json().unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn message_reads_text_or_json() {
        assert_eq!(ApiBody::Text("Driver registered".into()).message().as_deref(), Some("Driver registered"));
        assert_eq!(ApiBody::Json(json!({"message": "ok"})).message().as_deref(), Some("ok"));
        assert_eq!(ApiBody::Empty.message(), None);
    }

    #[test]
    fn json_body_is_not_bytes() {
        assert!(ApiBody::Json(json!({})).bytes().is_err());
    }
}
