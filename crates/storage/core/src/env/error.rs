//! Oracle access errors.

use crate::error::{ErrorSeverity, StorageFault};

/// Errors that occur when accessing oracles.
///
/// A missing oracle is a wiring bug in the host, never a data problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("DataOracle not available")]
    DataNotAvailable,

    #[error("TextOracle not available")]
    TextNotAvailable,

    #[error("MenuOracle not available")]
    MenuNotAvailable,
}

impl StorageFault for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DataNotAvailable => "ORACLE_DATA_NOT_AVAILABLE",
            Self::TextNotAvailable => "ORACLE_TEXT_NOT_AVAILABLE",
            Self::MenuNotAvailable => "ORACLE_MENU_NOT_AVAILABLE",
        }
    }
}
