use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use flowmark_types::Color;

use crate::error::{SdkError, SdkResult};
use crate::resolution::{UNKNOWN_COLOR, UNKNOWN_LABEL};

/// Settings for a [`Session`](crate::Session), usually read from
/// `flowmark.toml`. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the forest document is stored.
    pub store_path: PathBuf,
    /// Seed and persist the default workflows when the store is empty.
    pub seed_defaults: bool,
    /// Label shown for markers that resolve to nothing.
    pub unknown_label: String,
    /// Color shown for markers that resolve to nothing.
    pub unknown_color: Color,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("flowmark.json"),
            seed_defaults: true,
            unknown_label: UNKNOWN_LABEL.to_string(),
            unknown_color: Color::new(UNKNOWN_COLOR),
        }
    }
}

impl SessionConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(toml: &str) -> SdkResult<Self> {
        toml::from_str(toml).map_err(|e| SdkError::Config(format!("failed to parse config: {e}")))
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> SdkResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SdkError::Config(format!("failed to read config file '{}': {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Render as TOML, for writing a starter file.
    pub fn to_toml_string(&self) -> SdkResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SdkError::Config(format!("failed to serialize config: {e}")))
    }
}
