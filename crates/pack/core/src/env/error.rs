use crate::error::{ErrorSeverity, PackError};

/// Raised when a hook needs a collaborator the host did not provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("map oracle not available")]
    MapNotAvailable,

    #[error("catalog oracle not available")]
    CatalogNotAvailable,

    #[error("expression evaluator not available")]
    EvaluatorNotAvailable,

    #[error("rng oracle not available")]
    RngNotAvailable,
}

impl PackError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            Self::CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            Self::EvaluatorNotAvailable => "ORACLE_EVALUATOR_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
