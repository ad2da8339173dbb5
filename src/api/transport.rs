use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::call::{ApiBody, ApiCall, Expect, Method, Service};
use super::session::{BearerToken, Session};
use crate::app_system::ApiConfig;
use crate::error::ApiError;

/// Executes [`ApiCall`]s against the backend.
///
/// The resource gateways and the service clients only see this trait, so tests
/// can swap in a recording stub.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, call: ApiCall) -> Result<ApiBody, ApiError>;
}

/// `reqwest`-backed transport for the two backend deployments.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    core_url: Url,
    payments_url: Url,
    token: Option<BearerToken>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            core_url: parse_base(&config.core_url)?,
            payments_url: parse_base(&config.payments_url)?,
            token: None,
        })
    }

    /// A copy of this transport that authenticates as `session`.
    /// The connection pool is shared.
    pub fn with_session(&self, session: &Session) -> Self {
        Self {
            token: Some(session.token.clone()),
            ..self.clone()
        }
    }

    fn url_for(&self, call: &ApiCall) -> Result<Url, ApiError> {
        let mut url = match call.service {
            Service::Core => self.core_url.clone(),
            Service::Payments => self.payments_url.clone(),
        };
        let base = url.to_string();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Encode(format!("{} cannot be a base URL", base)))?;
            segments.pop_if_empty().extend(&call.segments);
        }
        if !call.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&call.query);
        }
        Ok(url)
    }
}

fn parse_base(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|e| ApiError::Encode(format!("Invalid base URL {}: {}", raw, e)))
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, call), fields(method = ?call.method, path = %call.path()))]
    async fn execute(&self, call: ApiCall) -> Result<ApiBody, ApiError> {
        let url = self.url_for(&call)?;
        let method = match call.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if call.authenticated {
            match &self.token {
                Some(token) => request = request.header(AUTHORIZATION, token.header_value()),
                None => debug!("No session; sending without Authorization"),
            }
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        debug!("Sending request");
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("json"));
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown error");
            let error = ApiError::from_response(status.as_u16(), reason, &bytes);
            warn!(status = status.as_u16(), error = %error, "Request rejected");
            return Err(error);
        }

        debug!(status = status.as_u16(), bytes = bytes.len(), "Response received");
        decode_body(call.expect, is_json, bytes.to_vec())
    }
}

fn decode_body(expect: Expect, is_json: bool, bytes: Vec<u8>) -> Result<ApiBody, ApiError> {
    if bytes.is_empty() {
        return Ok(ApiBody::Empty);
    }
    match expect {
        Expect::Binary => Ok(ApiBody::Bytes(bytes)),
        Expect::Json => match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(ApiBody::Json(value)),
            Err(e) if is_json => Err(ApiError::Decode(e.to_string())),
            Err(_) => Ok(ApiBody::Text(String::from_utf8_lossy(&bytes).into_owned())),
        },
    }
}
