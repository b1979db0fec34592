use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::DEFAULT_BOARD_SIZE;
use crate::error::ConfigError;
use crate::types::Color;

/// Largest edge that still has a column letter in A..Z.
pub const MAX_BOARD_SIZE: usize = 26;

/// Move picker used for the engine-driven side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    First,
    #[default]
    Random,
}

/// Engine configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OthelloConfig {
    pub board_size: usize,
    /// Side played by the engine; `None` means both sides are driven externally.
    pub engine_side: Option<Color>,
    pub engine: EngineKind,
    pub seed: Option<u64>,
}

impl Default for OthelloConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            engine_side: None,
            engine: EngineKind::default(),
            seed: None,
        }
    }
}

impl OthelloConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: OthelloConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_board_size(self.board_size)
    }
}

/// Board edges must be even, leave room for the four center stones and have a
/// column letter for every column.
pub fn validate_board_size(size: usize) -> Result<(), ConfigError> {
    if size < 4 {
        return Err(ConfigError::Validation(
            "board_size must be at least 4".into(),
        ));
    }
    if size % 2 != 0 {
        return Err(ConfigError::Validation("board_size must be even".into()));
    }
    if size > MAX_BOARD_SIZE {
        return Err(ConfigError::Validation(format!(
            "board_size must be at most {MAX_BOARD_SIZE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = OthelloConfig::default();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.engine_side, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml() {
        let config = OthelloConfig::from_toml_str(
            r#"
            board_size = 10
            engine_side = "black"
            engine = "first"
            seed = 99
            "#,
        )
        .unwrap();

        assert_eq!(config.board_size, 10);
        assert_eq!(config.engine_side, Some(Color::Black));
        assert_eq!(config.engine, EngineKind::First);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = OthelloConfig::from_toml_str("engine_side = \"white\"").unwrap();

        assert_eq!(config.board_size, 8);
        assert_eq!(config.engine, EngineKind::Random);
        assert_eq!(config.engine_side, Some(Color::White));
    }

    #[test]
    fn test_invalid_sizes_fail_validation() {
        for size in [0, 2, 5, 28] {
            let toml = format!("board_size = {size}");
            let err = OthelloConfig::from_toml_str(&toml).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)), "size {size}");
        }
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = OthelloConfig::from_toml_str("board_size = \"eight\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = Path::new("definitely/not/here/othello.toml");

        assert!(matches!(
            OthelloConfig::load(path),
            Err(ConfigError::FileRead { .. })
        ));
        assert_eq!(
            OthelloConfig::load_or_default(path).unwrap(),
            OthelloConfig::default()
        );
    }
}
