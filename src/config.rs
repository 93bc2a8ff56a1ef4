//! Configuration file.
//!
//! Read from `--config <path>` or, when absent, from
//! `<config_dir>/corefview/config.toml` if that file exists. Every key is
//! optional:
//!
//! ```toml
//! addr = "127.0.0.1:8501"
//! model = "medium"
//! lexicon_dir = "/usr/share/corefview/lexicons"
//!
//! [defaults]
//! greedyness = 0.5
//! max_dist = 50
//! max_dist_match = 500
//! ```
//!
//! Command-line flags override file values.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::coref::CorefParams;
use crate::form::validate_params;
use crate::model::ModelSize;
use crate::{Error, Result};

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Listen address for `serve`
    pub addr: String,
    /// Model size used by the form handler
    pub model: ModelSize,
    /// Directory with `<size>.json` lexicon extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_dir: Option<PathBuf>,
    /// Initial slider values
    pub defaults: CorefParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            model: ModelSize::default(),
            lexicon_dir: None,
            defaults: CorefParams::default(),
        }
    }
}

impl Config {
    /// `<config_dir>/corefview/config.toml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("corefview").join("config.toml"))
    }

    /// Load from `path`, or from [`Config::default_path`] when it exists, or
    /// fall back to built-in defaults.
    ///
    /// # Errors
    ///
    /// `Error::Config` if an explicit path cannot be read, or any file fails
    /// to parse or validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match Self::default_path() {
                Some(p) if p.is_file() => Self::from_file(&p),
                _ => {
                    log::debug!("[Config] No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load and validate one file.
    ///
    /// # Errors
    ///
    /// `Error::Config` on read, parse, or validation failure.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_toml(&raw)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
        log::info!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    ///
    /// # Errors
    ///
    /// `Error::Config` on parse or validation failure.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// `Error::Config` if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Check the listen address and slider defaults.
    ///
    /// # Errors
    ///
    /// `Error::Config` naming the bad value.
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        validate_params(&self.defaults).map_err(|e| Error::config(format!("[defaults] {e}")))
    }

    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// `Error::Config` if `addr` is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.addr
            .parse()
            .map_err(|e| Error::config(format!("invalid addr '{}': {e}", self.addr)))
    }
}
