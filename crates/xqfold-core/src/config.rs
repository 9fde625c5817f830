//! Runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid config.

use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("arithmetic.decimal_scale must be at most {max}, got {found}")]
    DecimalScaleOutOfRange { found: u32, max: u32 },
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub arithmetic: ArithmeticConfig,
    pub metrics: MetricsConfig,
}

impl Config {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&src)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let found = self.arithmetic.decimal_scale;
        if found > ArithmeticConfig::MAX_DECIMAL_SCALE {
            return Err(ConfigError::DecimalScaleOutOfRange {
                found,
                max: ArithmeticConfig::MAX_DECIMAL_SCALE,
            });
        }

        Ok(())
    }
}

///
/// ArithmeticConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ArithmeticConfig {
    /// Fractional digits kept by `xs:decimal` division.
    pub decimal_scale: u32,
}

impl ArithmeticConfig {
    pub const DEFAULT_DECIMAL_SCALE: u32 = 18;
    pub const MAX_DECIMAL_SCALE: u32 = 28;
}

impl Default for ArithmeticConfig {
    fn default() -> Self {
        Self {
            decimal_scale: Self::DEFAULT_DECIMAL_SCALE,
        }
    }
}

///
/// MetricsConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
