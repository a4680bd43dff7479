use crate::error::{ErrorSeverity, PackError};
use crate::state::{ItemUid, UnitId};

/// Structural problems with a combat request, detected before any hook runs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("unit {0} not found")]
    UnknownUnit(UnitId),

    #[error("{item} is not held by unit {unit}")]
    ItemNotHeld { unit: UnitId, item: ItemUid },

    #[error("unit {0} cannot fight itself")]
    SelfTarget(UnitId),

    #[error("{requested} strikes requested, at most {max} allowed")]
    TooManyStrikes { requested: usize, max: u32 },
}

impl PackError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => "COMBAT_UNKNOWN_UNIT",
            Self::ItemNotHeld { .. } => "COMBAT_ITEM_NOT_HELD",
            Self::SelfTarget(_) => "COMBAT_SELF_TARGET",
            Self::TooManyStrikes { .. } => "COMBAT_TOO_MANY_STRIKES",
        }
    }
}
