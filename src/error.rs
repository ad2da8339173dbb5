use thiserror::Error;

const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable. Please try again later.";

/// Failure of a single backend call, classified by HTTP status.
///
/// `Display` is the message shown to the user, so status variants carry the
/// server-provided text verbatim.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{}", UNAVAILABLE_MESSAGE)]
    ServiceUnavailable,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Could not encode request: {0}")]
    Encode(String),
    #[error("Operation not supported: {0}")]
    Unsupported(String),
    #[error("Gateway communication error: {0}")]
    Gateway(String),
}

impl ApiError {
    /// Builds the error for a non-success response.
    ///
    /// The message is the body's `error` field, then `message`, then
    /// `Error: <reason>`.
    pub fn from_response(status: u16, reason: &str, body: &[u8]) -> Self {
        let message = server_message(body).unwrap_or_else(|| format!("Error: {}", reason));
        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            503 => ApiError::ServiceUnavailable,
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Status { status, message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::ServiceUnavailable => Some(503),
            ApiError::Server { status, .. } | ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The session is no longer accepted; the user has to sign in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn unsupported(resource: &str, operation: &str) -> Self {
        ApiError::Unsupported(format!("{} does not support {}", resource, operation))
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("Menu entry not found: {0}")]
    NotFound(String),
    #[error("Menu validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("No payment recorded for order {0}")]
    NotFound(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    #[error("Account validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReportError {
    #[error("The server returned an empty report")]
    EmptyReport,
    #[error("Could not save report: {0}")]
    Io(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RestaurantError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    #[error("No location recorded yet")]
    NoLocation,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_field_then_message() {
        let err = ApiError::from_response(400, "Bad Request", br#"{"error":"Invalid status","message":"x"}"#);
        assert_eq!(err, ApiError::BadRequest("Invalid status".into()));

        let err = ApiError::from_response(500, "Internal Server Error", br#"{"message":"db down"}"#);
        assert_eq!(err.to_string(), "db down");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn falls_back_to_status_text() {
        let err = ApiError::from_response(403, "Forbidden", b"<html>nope</html>");
        assert_eq!(err, ApiError::Forbidden("Error: Forbidden".into()));
    }

    #[test]
    fn unavailable_has_fixed_message() {
        let err = ApiError::from_response(503, "Service Unavailable", br#"{"error":"ignored"}"#);
        assert_eq!(err.to_string(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn only_401_requires_login() {
        assert!(ApiError::from_response(401, "Unauthorized", b"").requires_login());
        assert!(!ApiError::from_response(403, "Forbidden", b"").requires_login());
        assert!(!ApiError::Network("refused".into()).requires_login());
    }

    #[test]
    fn domain_errors_display_api_message_verbatim() {
        let err = OrderError::from(ApiError::BadRequest("Cannot confirm a cancelled order".into()));
        assert_eq!(err.to_string(), "Cannot confirm a cancelled order");
    }
}
