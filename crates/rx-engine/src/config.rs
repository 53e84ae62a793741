//! Engine configuration, resolved once at startup.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "default-size": 320, "cache-capacity": 0, "rarity": { "rare": 0.8 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::rarity::RarityPolicy;

/// Canvas edge used by thumbnails and cards.
pub const DEFAULT_SIZE: u32 = 200;
/// Canvas edge used by the full prescription view.
pub const PRESCRIPTION_SIZE: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EngineConfig {
    /// Size used when a request doesn't name one.
    pub default_size: u32,
    pub prescription_size: u32,
    /// Upper bound on any requested canvas edge.
    pub max_size: u32,
    /// Rendered artworks kept in memory; 0 disables memoization.
    pub cache_capacity: usize,
    pub rarity: RarityPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_SIZE,
            prescription_size: PRESCRIPTION_SIZE,
            max_size: 4096,
            cache_capacity: 64,
            rarity: RarityPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| EngineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.max_size == 0 {
            return Err(EngineError::InvalidConfig("max-size must be positive".into()));
        }
        for (name, size) in [("default-size", self.default_size), ("prescription-size", self.prescription_size)] {
            if size == 0 || size > self.max_size {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be between 1 and max-size ({}), got {size}",
                    self.max_size
                )));
            }
        }
        self.rarity.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|e| panic!("{e}"));
        file.write_all(json.as_bytes()).unwrap_or_else(|e| panic!("{e}"));
        file
    }

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_size, 200);
        assert_eq!(config.prescription_size, 600);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(r#"{ "default-size": 320, "rarity": { "rare": 0.8 } }"#);
        let config = EngineConfig::from_json_file(file.path()).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(config.default_size, 320);
        assert_eq!(config.prescription_size, PRESCRIPTION_SIZE);
        assert!((config.rarity.rare - 0.8).abs() < f64::EPSILON);
        assert!((config.rarity.uncommon - RarityPolicy::default().uncommon).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = EngineConfig::from_json_file("/nonexistent/rx-art.json");
        assert!(matches!(err, Err(EngineError::ConfigRead { .. })));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let file = write_config("{ default-size: ");
        assert!(matches!(EngineConfig::from_json_file(file.path()), Err(EngineError::ConfigParse { .. })));

        let unknown = write_config(r#"{ "colour": "red" }"#);
        assert!(matches!(EngineConfig::from_json_file(unknown.path()), Err(EngineError::ConfigParse { .. })));
    }

    #[test]
    fn invalid_values_rejected() {
        let too_big = EngineConfig { default_size: 5000, ..EngineConfig::default() };
        assert!(matches!(too_big.validate(), Err(EngineError::InvalidConfig(_))));

        let zero = EngineConfig { prescription_size: 0, ..EngineConfig::default() };
        assert!(zero.validate().is_err());

        let file = write_config(r#"{ "rarity": { "uncommon": 0.9, "rare": 0.5 } }"#);
        assert!(matches!(
            EngineConfig::from_json_file(file.path()),
            Err(EngineError::InvalidRarityPolicy(_))
        ));
    }
}
