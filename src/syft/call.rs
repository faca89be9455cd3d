//! The remote call primitive: send a named operation with a payload, get back
//! the decoded response or an error.

use crate::syft::error::CallError;
use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Key used to sign calls on behalf of a user.
#[derive(Clone)]
pub struct SigningKey(SecretString);

impl SigningKey {
    /// Raw key bytes are carried in their base64 text form.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(SecretString::from(Base64::encode_string(bytes)))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for SigningKey {
    fn from(key: String) -> Self {
        Self(SecretString::from(key))
    }
}

impl From<&str> for SigningKey {
    fn from(key: &str) -> Self {
        Self::from(key.to_string())
    }
}

impl From<SecretString> for SigningKey {
    fn from(key: SecretString) -> Self {
        Self(key)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

/// One remote operation. `node_id` and `signing_key` override whatever
/// defaults the dispatcher carries.
#[derive(Debug)]
pub struct CallRequest<'a> {
    pub path: &'a str,
    pub payload: Value,
    pub node_id: Option<&'a str>,
    pub signing_key: Option<&'a SigningKey>,
}

impl<'a> CallRequest<'a> {
    #[must_use]
    pub fn new(path: &'a str, payload: Value) -> Self {
        Self {
            path,
            payload,
            node_id: None,
            signing_key: None,
        }
    }

    /// # Errors
    /// Returns an error if `payload` cannot be represented as JSON.
    pub fn with_payload<P: Serialize + ?Sized>(
        path: &'a str,
        payload: &P,
    ) -> Result<Self, CallError> {
        let payload =
            serde_json::to_value(payload).map_err(|e| CallError::Request(e.to_string()))?;
        Ok(Self::new(path, payload))
    }

    #[must_use]
    pub fn node_id(mut self, node_id: &'a str) -> Self {
        self.node_id = Some(node_id);
        self
    }

    #[must_use]
    pub fn signing_key(mut self, signing_key: &'a SigningKey) -> Self {
        self.signing_key = Some(signing_key);
        self
    }
}

#[async_trait]
pub trait SyftCall: Send + Sync {
    /// Perform one round trip.
    /// # Errors
    /// Returns an error if the call cannot be sent, the node rejects it, or the
    /// response cannot be decoded.
    async fn call(&self, request: CallRequest<'_>) -> Result<Value, CallError>;
}
