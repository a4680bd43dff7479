//! Action application errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, PackError};
use crate::state::{ItemUid, Position, SkillUid, UnitId};

/// Errors raised when an action cannot be applied to the world.
///
/// A failed action changes nothing and is not recorded in the log.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("{0} not found")]
    ItemNotFound(ItemUid),

    #[error("{0} not found")]
    SkillNotFound(SkillUid),

    #[error("skill `{0}` is not in the catalog")]
    UnknownSkill(String),

    #[error("unit {unit} does not hold skill `{nid}`")]
    SkillNotHeld { unit: UnitId, nid: String },

    #[error("tile {0} is occupied")]
    Occupied(Position),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl PackError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_) | Self::ItemNotFound(_) | Self::SkillNotFound(_) => {
                ErrorSeverity::Internal
            }
            Self::UnknownSkill(_) | Self::SkillNotHeld { .. } => ErrorSeverity::Validation,
            Self::Occupied(_) => ErrorSeverity::Recoverable,
            Self::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "ACTION_UNIT_NOT_FOUND",
            Self::ItemNotFound(_) => "ACTION_ITEM_NOT_FOUND",
            Self::SkillNotFound(_) => "ACTION_SKILL_NOT_FOUND",
            Self::UnknownSkill(_) => "ACTION_UNKNOWN_SKILL",
            Self::SkillNotHeld { .. } => "ACTION_SKILL_NOT_HELD",
            Self::Occupied(_) => "ACTION_OCCUPIED",
            Self::Oracle(e) => e.error_code(),
        }
    }
}
