//! TOML configuration selecting and parameterizing the prediction backend.
//!
//! ```toml
//! strategy = "local"
//!
//! [remote]
//! endpoint = "https://example.org/predict"
//! timeout_secs = 20
//!
//! [local]
//! model_path = "models/wildflowers.onnx"
//! input_size = 299
//! ```

use crate::classifier::DEFAULT_ENDPOINT;
use crate::error::{Error, Result};
use crate::normalize::MODEL_INPUT_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Which classifier backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: String,
    /// Request timeout; absent keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub model_path: PathBuf,
    pub input_size: u32,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/wildflowers.onnx"),
            input_size: MODEL_INPUT_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub strategy: Strategy,
    pub remote: RemoteConfig,
    pub local: LocalConfig,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: AppConfig = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a config file that must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            _ => Self::load(path),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.remote.endpoint.trim().is_empty() {
            return Err(Error::Config("remote.endpoint must not be empty".to_string()));
        }
        if self.local.input_size == 0 {
            return Err(Error::Config("local.input_size must be positive".to_string()));
        }
        Ok(())
    }
}
