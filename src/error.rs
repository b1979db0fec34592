use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur when decoding or restoring a saved match.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot data too short: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("invalid snapshot magic (expected OTHS)")]
    BadMagic,

    #[error("unsupported snapshot version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },

    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("failed to parse snapshot payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported board size {0} (must be even, between 4 and 26)")]
    BoardSize(usize),

    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("player record for {expected} carries color {actual}")]
    PlayerColor {
        expected: crate::types::Color,
        actual: crate::types::Color,
    },

    #[error("round number must start at 1")]
    Round,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("board_size must be even".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: board_size must be even"
        );
    }

    #[test]
    fn test_snapshot_error_display() {
        let err = SnapshotError::ChecksumMismatch {
            expected: 0xdead_beef,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "CRC32 mismatch: expected 0xdeadbeef, got 0x00000001"
        );
        assert_eq!(
            SnapshotError::CellCount {
                expected: 64,
                actual: 63
            }
            .to_string(),
            "expected 64 cells, got 63"
        );
    }
}
