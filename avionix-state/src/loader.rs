// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Resolution of the configuration document.

use crate::config::Configuration;
use avionix_core::{AvionixError, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Why a configuration document could not be turned into a [`Configuration`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Syntax of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Json,
    Toml,
}

impl ConfigFormat {
    /// TOML for a `.toml` extension, JSON otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    pub fn parse(self, text: &str) -> std::result::Result<Configuration, ConfigError> {
        match self {
            Self::Json => Ok(Configuration::from_json_str(text)?),
            Self::Toml => Ok(Configuration::from_toml_str(text)?),
        }
    }
}

/// Where the configuration document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Inline { text: String, format: ConfigFormat },
    #[cfg(feature = "remote")]
    Remote(String),
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline { format, .. } => format!("inline {format:?}"),
            #[cfg(feature = "remote")]
            Self::Remote(url) => url.clone(),
        }
    }

    async fn fetch(&self) -> std::result::Result<Configuration, ConfigError> {
        match self {
            Self::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ConfigError::Io {
                        path: path.clone(),
                        source,
                    })?;
                ConfigFormat::from_path(path).parse(&text)
            }
            Self::Inline { text, format } => format.parse(text),
            #[cfg(feature = "remote")]
            Self::Remote(url) => {
                let http = |source: reqwest::Error| ConfigError::Http {
                    url: url.clone(),
                    source,
                };
                let text = reqwest::get(url.as_str())
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(http)?
                    .text()
                    .await
                    .map_err(http)?;
                ConfigFormat::from_path(Path::new(url)).parse(&text)
            }
        }
    }
}

/// Loads a [`Configuration`] once, with a built-in fallback.
///
/// There is no retry: each call to [`load`](Self::load) makes exactly one attempt.
///
/// ```no_run
/// use avionix_state::ConfigLoader;
///
/// # #[tokio::main]
/// # async fn main() {
/// let config = ConfigLoader::from_file("simvars.json").load().await;
/// assert!(!config.variables.is_empty());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    source: ConfigSource,
}

impl ConfigLoader {
    pub fn new(source: ConfigSource) -> Self {
        Self { source }
    }

    /// Format is picked from the file extension.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(ConfigSource::File(path.into()))
    }

    pub fn from_json(text: impl Into<String>) -> Self {
        Self::new(ConfigSource::Inline {
            text: text.into(),
            format: ConfigFormat::Json,
        })
    }

    pub fn from_toml(text: impl Into<String>) -> Self {
        Self::new(ConfigSource::Inline {
            text: text.into(),
            format: ConfigFormat::Toml,
        })
    }

    #[cfg(feature = "remote")]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(ConfigSource::Remote(url.into()))
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// # Errors
    /// [`AvionixError::ConfigUnavailable`] wrapping the underlying [`ConfigError`].
    pub async fn try_load(&self) -> Result<Configuration> {
        self.source
            .fetch()
            .await
            .map_err(|error| AvionixError::config_unavailable(self.source.describe(), error))
    }

    /// Load the configuration, or [`Configuration::fallback`] if that fails.
    pub async fn load(&self) -> Configuration {
        match self.try_load().await {
            Ok(config) => {
                info!(
                    source = %self.source.describe(),
                    variables = config.variables.len(),
                    interval_ms = config.interval_ms,
                    "configuration loaded"
                );
                config
            }
            Err(error) => {
                let reason = std::error::Error::source(&error)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                warn!(%error, %reason, "using fallback configuration");
                Configuration::fallback()
            }
        }
    }
}
