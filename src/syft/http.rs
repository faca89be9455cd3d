//! JSON-over-HTTP dispatcher for node API calls.

use crate::syft::{
    call::{CallRequest, SigningKey, SyftCall},
    error::CallError,
    APP_USER_AGENT,
};
use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, error, info_span, Instrument};
use ulid::Ulid;
use url::Url;

pub const API_CALL_PATH: &str = "/api/v2/api_call";
pub const SIGNATURE_HEADER: &str = "X-Syft-Signature";
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const SYFT_ERROR_FQN: &str = "syft.service.response.SyftError";

type HmacSha256 = Hmac<Sha256>;

#[derive(Serialize)]
struct ApiCall<'a> {
    path: &'a str,
    args: [Value; 0],
    kwargs: Value,
    node_uid: Option<&'a str>,
    blocking: bool,
}

pub struct HttpDispatcher {
    client: Client,
    endpoint: Url,
    node_id: Option<String>,
    signing_key: Option<SigningKey>,
}

impl HttpDispatcher {
    /// # Errors
    /// Returns an error if `base_url` cannot be parsed, uses an unsupported
    /// scheme, or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, CallError> {
        let endpoint = endpoint_url(base_url)?;

        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            endpoint,
            node_id: None,
            signing_key: None,
        })
    }

    /// Node uid used when a request does not name one.
    #[must_use]
    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    /// Key used when a request does not carry one.
    #[must_use]
    pub fn with_signing_key(mut self, signing_key: SigningKey) -> Self {
        self.signing_key = Some(signing_key);
        self
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl std::fmt::Debug for HttpDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDispatcher")
            .field("endpoint", &self.endpoint.as_str())
            .field("node_id", &self.node_id)
            .field("signing_key", &self.signing_key)
            .finish_non_exhaustive()
    }
}

/// Resolve the api call endpoint under `base_url`, keeping any path prefix
/// the node is mounted under.
/// # Errors
/// Returns an error if `base_url` cannot be parsed or is not http(s).
pub fn endpoint_url(base_url: &str) -> Result<Url, CallError> {
    let mut url = Url::parse(base_url)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(CallError::Request(format!(
                "Error parsing URL: unsupported scheme {scheme}"
            )))
        }
    }

    let prefix = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{prefix}{API_CALL_PATH}"));
    url.set_query(None);
    url.set_fragment(None);

    debug!("endpoint URL: {}", url);

    Ok(url)
}

/// base64 HMAC-SHA256 of `body` keyed with the signing key.
fn sign(signing_key: &SigningKey, body: &[u8]) -> Result<String, CallError> {
    let mut mac = HmacSha256::new_from_slice(signing_key.expose().as_bytes())
        .map_err(|e| CallError::Request(e.to_string()))?;
    mac.update(body);

    Ok(Base64::encode_string(&mac.finalize().into_bytes()))
}

fn error_message(json_response: &Value) -> String {
    json_response
        .get("detail")
        .or_else(|| json_response.get("message"))
        .or_else(|| json_response.get("errors").and_then(|v| v.get(0)))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Send one api call and map the node's answer to a value or an error.
async fn exchange(builder: RequestBuilder, path: &str) -> Result<Value, CallError> {
    let response = builder.send().await?;

    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(&bytes).map_or_else(
            |_| String::from_utf8_lossy(&bytes).trim().to_string(),
            |json_response| error_message(&json_response),
        );

        error!("{} failed: {} - {}", path, status, message);

        return Err(CallError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let json_response: Value = serde_json::from_slice(&bytes)?;

    if json_response.get("fqn").and_then(Value::as_str) == Some(SYFT_ERROR_FQN) {
        let message = json_response
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        error!("{} rejected by node: {}", path, message);

        return Err(CallError::Remote(message));
    }

    debug!("{} succeeded", path);

    Ok(json_response)
}

#[async_trait]
impl SyftCall for HttpDispatcher {
    async fn call(&self, request: CallRequest<'_>) -> Result<Value, CallError> {
        let path = request.path;

        let api_call = ApiCall {
            path,
            args: [],
            kwargs: request.payload,
            node_uid: request.node_id.or(self.node_id.as_deref()),
            blocking: true,
        };
        let body =
            serde_json::to_vec(&api_call).map_err(|e| CallError::Request(e.to_string()))?;

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(REQUEST_ID_HEADER, Ulid::new().to_string());

        if let Some(signing_key) = request.signing_key.or(self.signing_key.as_ref()) {
            builder = builder.header(SIGNATURE_HEADER, sign(signing_key, &body)?);
        }

        let span = info_span!(
            "syft.call",
            http.method = "POST",
            path = path,
            url = %self.endpoint
        );

        exchange(builder.body(body), path).instrument(span).await
    }
}
