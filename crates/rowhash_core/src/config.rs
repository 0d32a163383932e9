// config.rs: step settings and their host-facing tag form
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Load-time configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid seed value {value:?}: {source}")]
    InvalidSeed {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// The three settings as the host persists them: string-valued tags under
/// their fixed names. A missing `seedValue` reads as `-1`, which seed
/// normalization later maps to the fixed default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigTags {
    pub in_field: String,
    pub out_field: String,
    pub seed_value: Option<String>,
}

/// Immutable step configuration. Fixed for the lifetime of a transform
/// instance; every row operation only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashConfig {
    pub in_field: String,
    pub out_field: String,
    pub seed_value: i64,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            in_field: String::new(),
            out_field: String::new(),
            seed_value: 0,
        }
    }
}

impl HashConfig {
    pub fn new(in_field: impl Into<String>, out_field: impl Into<String>, seed_value: i64) -> Self {
        Self {
            in_field: in_field.into(),
            out_field: out_field.into(),
            seed_value,
        }
    }

    /// Parse the host's tag form. The seed tag must hold a base-10 integer.
    pub fn from_tags(tags: &ConfigTags) -> Result<Self, ConfigError> {
        let raw = tags.seed_value.as_deref().unwrap_or("-1");
        let seed_value = raw.trim().parse::<i64>().map_err(|source| ConfigError::InvalidSeed {
            value: raw.to_string(),
            source,
        })?;
        Ok(Self {
            in_field: tags.in_field.clone(),
            out_field: tags.out_field.clone(),
            seed_value,
        })
    }

    pub fn to_tags(&self) -> ConfigTags {
        ConfigTags {
            in_field: self.in_field.clone(),
            out_field: self.out_field.clone(),
            seed_value: Some(self.seed_value.to_string()),
        }
    }
}
