use std::path::Path;

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::marker::MarkerModule;

/// Settings a host can embed in its own build configuration.
///
/// ```toml
/// marker-module = "node_modules/inlay/index.d.ts"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct InlayConfig {
    /// Path of the declaration file whose functions are inlined.
    pub marker_module: MarkerModule,
}

impl InlayConfig {
    pub fn new(marker_module: MarkerModule) -> Self {
        Self { marker_module }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).wrap_err("invalid inlay configuration")
    }

    /// Load the configuration from a TOML file. A relative marker module path is taken relative
    /// to the directory of that file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.marker_module = MarkerModule::new(dir.join(config.marker_module.path()));
        }
        Ok(config)
    }
}
