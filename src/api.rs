//! HTTP client for the rules server.
//!
//! `GET /api/state`, `POST /api/play` (form field `col`), `POST /api/reset` and
//! `POST /api/set_mode` (JSON `{"mode": tag}`) all answer with a full
//! [`GameState`]. Failures are returned as-is; retrying is never this layer's
//! call.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use reqwasm::http::{Request, Response};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::engine::GameApi;
use crate::error::ClientError;
use crate::state::{Column, GameState, Mode};

const STATE: &str = "/api/state";
const PLAY: &str = "/api/play";
const RESET: &str = "/api/reset";
const SET_MODE: &str = "/api/set_mode";

#[derive(Serialize)]
struct SetModeBody {
    mode: &'static str,
}

/// Form-encoded body for `/api/play`.
pub fn play_form_body(column: Column) -> String {
    format!("col={}", column.index())
}

pub fn set_mode_body(mode: Mode) -> String {
    // Serializing a struct of one &str cannot fail.
    serde_json::to_string(&SetModeBody { mode: mode.tag() }).unwrap_or_default()
}

/// Decode a response body, naming the endpoint in any error.
pub fn decode_state(endpoint: &'static str, body: &str) -> Result<GameState, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode {
        endpoint,
        message: e.to_string(),
    })
}

#[derive(Clone, Debug)]
pub struct HttpApi {
    config: ClientConfig,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint_url(path)
    }

    async fn finish(
        endpoint: &'static str,
        sent: Result<Response, reqwasm::Error>,
    ) -> Result<GameState, ClientError> {
        let resp = sent.map_err(|e| ClientError::Network {
            endpoint,
            message: e.to_string(),
        })?;
        if !resp.ok() {
            return Err(ClientError::Status {
                endpoint,
                status: resp.status(),
            });
        }
        let body = resp.text().await.map_err(|e| ClientError::Network {
            endpoint,
            message: e.to_string(),
        })?;
        decode_state(endpoint, &body)
    }
}

impl GameApi for HttpApi {
    fn fetch_state(&self) -> LocalBoxFuture<'_, Result<GameState, ClientError>> {
        async move {
            let sent = Request::get(&self.url(STATE)).send().await;
            Self::finish(STATE, sent).await
        }
        .boxed_local()
    }

    fn play(&self, column: Column) -> LocalBoxFuture<'_, Result<GameState, ClientError>> {
        async move {
            let sent = Request::post(&self.url(PLAY))
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(play_form_body(column))
                .send()
                .await;
            Self::finish(PLAY, sent).await
        }
        .boxed_local()
    }

    fn reset(&self) -> LocalBoxFuture<'_, Result<GameState, ClientError>> {
        async move {
            let sent = Request::post(&self.url(RESET)).send().await;
            Self::finish(RESET, sent).await
        }
        .boxed_local()
    }

    fn set_mode(&self, mode: Mode) -> LocalBoxFuture<'_, Result<GameState, ClientError>> {
        async move {
            let sent = Request::post(&self.url(SET_MODE))
                .header("Content-Type", "application/json")
                .body(set_mode_body(mode))
                .send()
                .await;
            Self::finish(SET_MODE, sent).await
        }
        .boxed_local()
    }
}
