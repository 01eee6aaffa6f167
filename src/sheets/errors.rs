//! # Sheet Query Errors
//!
//! Closed error taxonomy for the search and stats path. Conversion to an
//! HTTP status happens only at the REST boundary.

use thiserror::Error;

use crate::backend::BackendError;

/// Result type for sheet query operations
pub type SheetResult<T> = Result<T, SheetError>;

/// Sheet query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// No session, or the session could not be verified
    #[error("Authentication required")]
    Unauthenticated,

    /// Aggregate query produced no data
    #[error("Not found")]
    NotFound,

    /// Any other failure, with a diagnostic message
    #[error("{0}")]
    Internal(String),
}

impl SheetError {
    /// Create an internal error from anything printable
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Diagnostic detail, present only for internal failures
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Internal(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<BackendError> for SheetError {
    fn from(err: BackendError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_becomes_internal() {
        let err = SheetError::from(BackendError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        });
        assert!(matches!(err, SheetError::Internal(_)));
        assert!(err.details().unwrap().contains("upstream unavailable"));
    }

    #[test]
    fn test_details_only_for_internal() {
        assert_eq!(SheetError::Unauthenticated.details(), None);
        assert_eq!(SheetError::NotFound.details(), None);
        assert_eq!(SheetError::internal("boom").details(), Some("boom"));
    }
}
