//! Errors raised while building a world.

use crate::error::{ErrorSeverity, PackError};

use super::common::UnitId;

/// Errors produced by world setup (scenario loading, editor tooling).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("unit {0} already exists")]
    DuplicateUnit(UnitId),

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("tile {x},{y} is already occupied")]
    TileOccupied { x: i32, y: i32 },

    #[error("unit {unit} has negative hp ({hp}/{max_hp})")]
    NegativeHp { unit: UnitId, hp: i32, max_hp: i32 },
}

impl PackError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateUnit(_) | Self::TileOccupied { .. } | Self::NegativeHp { .. } => {
                ErrorSeverity::Validation
            }
            Self::UnitNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateUnit(_) => "STATE_DUPLICATE_UNIT",
            Self::UnitNotFound(_) => "STATE_UNIT_NOT_FOUND",
            Self::TileOccupied { .. } => "STATE_TILE_OCCUPIED",
            Self::NegativeHp { .. } => "STATE_NEGATIVE_HP",
        }
    }
}
