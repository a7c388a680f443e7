//! Client-side failure taxonomy.
//!
//! Board diffs that find no placement are not errors and never show up here;
//! they fall back to a plain redraw.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a response (offline, CORS, aborted).
    #[error("network failure calling {endpoint}: {message}")]
    Network {
        endpoint: &'static str,
        message: String,
    },
    #[error("{endpoint} answered with HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    /// Response body was not a valid game snapshot.
    #[error("malformed response from {endpoint}: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
    #[error("dom: {0}")]
    Dom(String),
    #[error("invalid client config: {0}")]
    Config(#[from] serde_json::Error),
}

impl ClientError {
    pub fn dom(what: impl Into<String>) -> Self {
        ClientError::Dom(what.into())
    }
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        ClientError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<ClientError> for JsValue {
    fn from(err: ClientError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
