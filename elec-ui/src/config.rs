//! Application configuration.
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags. Every key is optional:
//!
//! ```toml
//! locale = "ja"
//!
//! [area_check]
//! backend = "http"
//! endpoint = "http://127.0.0.1:3030/api/area-check"
//! timeout_ms = 3000
//!
//! [logging]
//! level = "debug"
//! file = "electric-sim.log"
//! stdout = false
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use elec_core::{CheckerConfig, Locale};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub locale: Locale,
    pub area_check: AreaCheckSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AreaCheckSection {
    /// Registered checker backend name (`local` or `http`).
    pub backend: String,
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
}

impl Default for AreaCheckSection {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            endpoint: None,
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Any `EnvFilter` directive; `RUST_LOG` applies when unset.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: None,
            file: None,
            stdout: true,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub locale: Option<Locale>,
    pub backend: Option<String>,
    pub endpoint: Option<String>,
    pub log_level: Option<String>,
    pub quiet: bool,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults when no file is given.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(
        &mut self,
        overrides: Overrides,
    ) {
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        if let Some(backend) = overrides.backend {
            self.area_check.backend = backend;
        }
        if let Some(endpoint) = overrides.endpoint {
            self.area_check.endpoint = Some(endpoint);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = Some(level);
        }
        if overrides.quiet {
            self.logging.stdout = false;
        }
    }

    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            backend: self.area_check.backend.clone(),
            endpoint: self.area_check.endpoint.clone(),
            timeout: Duration::from_millis(self.area_check.timeout_ms),
            locale: self.locale,
        }
    }
}
