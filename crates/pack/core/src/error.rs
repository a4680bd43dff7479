//! Common error infrastructure for pack-core.
//!
//! Domain-specific errors (`ActionError`, `CombatError`, `EvalError`, ...)
//! live next to the code that raises them and implement [`PackError`].
//!
//! Nothing in the pack is fatal to the host: hook-level failures degrade to
//! "effect does not apply" plus a log line. Severity exists so callers can
//! choose the log level and decide whether a whole combat request is bad.

use crate::state::{Position, UnitId};

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The effect could not apply this time (blocked tile, nothing to steal).
    Recoverable,

    /// The request itself is malformed (unknown unit, unknown item).
    Validation,

    /// Unexpected inconsistency between the pack and host state.
    Internal,

    /// A required collaborator is missing.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Unit that triggered the error (if applicable).
    pub unit: Option<UnitId>,

    /// Position where the error occurred (if applicable).
    pub position: Option<Position>,

    /// Action log position at the time of error.
    pub log_position: usize,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(log_position: usize) -> Self {
        Self {
            unit: None,
            position: None,
            log_position,
        }
    }

    #[must_use]
    pub const fn with_unit(mut self, unit: UnitId) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Common trait for all pack-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Callers build an [`ErrorContext`] when they log a rejected action
pub trait PackError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant (metrics, tests).
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
