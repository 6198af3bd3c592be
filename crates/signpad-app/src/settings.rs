//! Shell configuration: which DOM elements to bind, plus the widget settings.

use serde::{Deserialize, Serialize};
use signpad_core::{ConfigError, SignpadConfig};

/// Id of an optional `<script type="application/json">` element holding an
/// [`AppConfig`] document.
pub const CONFIG_ELEMENT_ID: &str = "signpad-config";

/// Ids of the elements the widget binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub canvas: String,
    pub undo: String,
    pub redo: String,
    pub clear: String,
    pub download: String,
    pub share: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "canvas".to_string(),
            undo: "undo".to_string(),
            redo: "redo".to_string(),
            clear: "clear".to_string(),
            download: "download-jpg".to_string(),
            share: "share-btn".to_string(),
        }
    }
}

/// Everything the shell needs to mount a widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub signpad: SignpadConfig,
    pub elements: ElementIds,
}

impl AppConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.signpad.validate()?;
        Ok(config)
    }

    /// Config embedded in the page, falling back to defaults when it is
    /// absent or unusable.
    pub fn from_page(embedded: Option<&str>) -> Self {
        match embedded.map(str::trim).filter(|json| !json.is_empty()) {
            None => Self::default(),
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("Ignoring page config: {}", e);
                Self::default()
            }),
        }
    }
}
