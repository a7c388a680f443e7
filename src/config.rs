//! Client configuration. Every field has a default, so the host page only
//! passes what it wants to override, e.g. `{"api_base": "http://localhost:8080"}`.

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::error::ClientError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for `/api/*` paths. Empty means same origin.
    pub api_base: String,
    /// Ceiling on a drop animation when `transitionend` never fires.
    pub drop_timeout_ms: u32,
    pub disc_size_px: f64,
    /// Vertical start of the transient disc relative to the board top.
    pub drop_start_offset_px: f64,
    pub log_level: String,
    /// Show the game mode selector and label.
    pub mode_aware: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            drop_timeout_ms: 800,
            disc_size_px: 64.0,
            drop_start_offset_px: -100.0,
            log_level: "info".to_string(),
            mode_aware: true,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Absolute or origin-relative URL for an api path such as `/api/state`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Unknown level names fall back to `info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::INFO)
    }
}
