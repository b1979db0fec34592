//! Saved matches.
//!
//! Binary layout (little-endian):
//!
//! | offset | size | field                 |
//! |--------|------|-----------------------|
//! | 0      | 4    | magic `OTHS`          |
//! | 4      | 4    | format version        |
//! | 8      | 4    | payload length        |
//! | 12     | 4    | CRC32 of the payload  |
//! | 16     | n    | JSON payload          |

use serde::{Deserialize, Serialize};

use crate::board::Occupancy;
use crate::config::validate_board_size;
use crate::error::SnapshotError;
use crate::player::Player;
use crate::types::Color;

const MAGIC: &[u8; 4] = b"OTHS";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 16;

/// Everything needed to resume a match exactly where it stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub size: usize,
    pub cells: Vec<Occupancy>,
    pub round: u32,
    pub passes: u32,
    pub active: Color,
    pub transcript: String,
    pub black: Player,
    pub white: Player,
    pub finished: bool,
    pub result_recorded: bool,
}

impl MatchSnapshot {
    /// Checks dimensions and player records.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if validate_board_size(self.size).is_err() {
            return Err(SnapshotError::BoardSize(self.size));
        }
        let expected = self.size * self.size;
        if self.cells.len() != expected {
            return Err(SnapshotError::CellCount {
                expected,
                actual: self.cells.len(),
            });
        }
        for (expected, player) in [(Color::Black, &self.black), (Color::White, &self.white)] {
            if player.color() != expected {
                return Err(SnapshotError::PlayerColor {
                    expected,
                    actual: player.color(),
                });
            }
        }
        if self.round == 0 {
            return Err(SnapshotError::Round);
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let payload = serde_json::to_vec(self)?;
        let crc = crc32fast::hash(&payload);

        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&payload);
        Ok(out)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.len() < HEADER_SIZE {
            return Err(SnapshotError::Truncated {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }
        if &data[0..4] != MAGIC {
            return Err(SnapshotError::BadMagic);
        }

        let version = read_u32_le(data, 4);
        if version != VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                expected: VERSION,
                actual: version,
            });
        }

        let payload_len = read_u32_le(data, 8) as usize;
        let expected_crc = read_u32_le(data, 12);
        let payload = &data[HEADER_SIZE..];
        if payload.len() != payload_len {
            return Err(SnapshotError::Truncated {
                expected: HEADER_SIZE + payload_len,
                actual: data.len(),
            });
        }

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(SnapshotError::ChecksumMismatch {
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        let snapshot: MatchSnapshot = serde_json::from_slice(payload)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// Callers guarantee `offset + 4 <= data.len()`.
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Othello;
    use crate::types::Step;

    fn mid_game() -> Othello {
        let mut game = Othello::new(8).unwrap();
        game.new_game();
        assert!(matches!(game.advance(2, 3), Step::Moved { .. }));
        assert!(matches!(game.advance(2, 2), Step::Moved { .. }));
        game
    }

    fn reseal(bytes: &mut [u8]) {
        let crc = crc32fast::hash(&bytes[HEADER_SIZE..]);
        bytes[12..16].copy_from_slice(&crc.to_le_bytes());
    }

    #[test]
    fn bytes_restore_into_an_identical_match() {
        let game = mid_game();
        let bytes = game.snapshot().to_bytes().unwrap();

        let decoded = MatchSnapshot::from_bytes(&bytes).unwrap();
        let mut restored = Othello::new(8).unwrap();
        restored.restore(&decoded).unwrap();

        assert_eq!(decoded, game.snapshot());
        assert_eq!(restored.view(), game.view());
        assert_eq!(restored.transcript(), "C4C3");
    }

    #[test]
    fn from_bytes_rejects_invalid_magic() {
        let mut bytes = mid_game().snapshot().to_bytes().unwrap();
        bytes[0] = b'X';

        assert!(matches!(
            MatchSnapshot::from_bytes(&bytes),
            Err(SnapshotError::BadMagic)
        ));
    }

    #[test]
    fn from_bytes_rejects_unsupported_version() {
        let mut bytes = mid_game().snapshot().to_bytes().unwrap();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());

        let err = MatchSnapshot::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn from_bytes_rejects_crc_mismatch() {
        let mut bytes = mid_game().snapshot().to_bytes().unwrap();
        let last = bytes.len() - 2;
        bytes[last] ^= 0x01;

        assert!(matches!(
            MatchSnapshot::from_bytes(&bytes),
            Err(SnapshotError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn from_bytes_rejects_truncated_data() {
        let bytes = mid_game().snapshot().to_bytes().unwrap();

        assert!(matches!(
            MatchSnapshot::from_bytes(&bytes[..10]),
            Err(SnapshotError::Truncated { .. })
        ));
        assert!(matches!(
            MatchSnapshot::from_bytes(&bytes[..bytes.len() - 1]),
            Err(SnapshotError::Truncated { .. })
        ));
    }

    #[test]
    fn from_bytes_rejects_malformed_payload() {
        let mut bytes = mid_game().snapshot().to_bytes().unwrap();
        bytes[HEADER_SIZE] = b'[';
        reseal(&mut bytes);

        assert!(matches!(
            MatchSnapshot::from_bytes(&bytes),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn validate_rejects_inconsistent_dimensions() {
        let mut snapshot = mid_game().snapshot();
        snapshot.cells.pop();
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::CellCount {
                expected: 64,
                actual: 63
            })
        ));

        let mut snapshot = mid_game().snapshot();
        snapshot.size = 7;
        assert!(matches!(snapshot.validate(), Err(SnapshotError::BoardSize(7))));

        let mut snapshot = mid_game().snapshot();
        snapshot.size = 28;
        snapshot.cells = vec![Occupancy::Empty; 28 * 28];
        assert!(matches!(snapshot.validate(), Err(SnapshotError::BoardSize(28))));
    }

    #[test]
    fn restore_rejects_swapped_players() {
        let mut snapshot = mid_game().snapshot();
        std::mem::swap(&mut snapshot.black, &mut snapshot.white);

        let mut game = Othello::new(8).unwrap();
        assert!(matches!(
            game.restore(&snapshot),
            Err(SnapshotError::PlayerColor { .. })
        ));
        assert_eq!(game.status(), crate::types::MatchStatus::NotStarted);
    }
}
