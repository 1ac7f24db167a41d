//! Caller-facing error taxonomy.

use thiserror::Error;

use agrirent_core::DomainError;
use agrirent_ledger::LedgerError;
use agrirent_registry::RegistryError;

/// Error surfaced by coordinator operations.
///
/// Revision conflicts never escape raw: losing the optimistic race is
/// reported as [`ReservationError::ItemUnavailable`], indistinguishable from
/// the item having been flagged unavailable before the request — in both
/// cases the caller should re-search rather than retry blindly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// Referenced item or booking does not exist. Permanent.
    #[error("not found")]
    NotFound,

    /// The item is flagged unavailable, or another request won the race.
    /// Permanent for this attempt; the caller may re-search.
    #[error("item unavailable")]
    ItemUnavailable,

    /// Caller is not authorized for this operation. Permanent.
    #[error("forbidden")]
    Forbidden,

    /// Booking state machine violation — indicates a caller bug.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// A precondition failed before any state was touched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Identifier reuse during registration.
    #[error("already exists")]
    AlreadyExists,

    /// Registry or ledger unreachable. The whole operation is safe to
    /// retry: no partial state persists past rollback.
    #[error("transient failure: {0}")]
    Transient(String),
}

impl From<RegistryError> for ReservationError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::NotFound => ReservationError::NotFound,
            RegistryError::AlreadyExists => ReservationError::AlreadyExists,
            RegistryError::RevisionConflict { .. } => ReservationError::ItemUnavailable,
            RegistryError::Backend(msg) => ReservationError::Transient(msg),
        }
    }
}

impl From<LedgerError> for ReservationError {
    fn from(value: LedgerError) -> Self {
        match value {
            LedgerError::NotFound => ReservationError::NotFound,
            LedgerError::DuplicateEntry => ReservationError::AlreadyExists,
            LedgerError::InvalidTransition { from, to } => {
                ReservationError::InvalidTransition(format!("{from} -> {to}"))
            }
            LedgerError::Backend(msg) => ReservationError::Transient(msg),
        }
    }
}

impl From<DomainError> for ReservationError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                ReservationError::Validation(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrirent_core::{ExpectedRevision, Revision};

    #[test]
    fn revision_conflict_is_reported_as_unavailable() {
        let err = RegistryError::RevisionConflict {
            expected: ExpectedRevision::Exact(Revision::INITIAL),
            actual: Revision::new(2),
        };
        assert_eq!(ReservationError::from(err), ReservationError::ItemUnavailable);
    }

    #[test]
    fn backend_failures_are_transient() {
        let registry = RegistryError::Backend("down".to_string());
        let ledger = LedgerError::Backend("down".to_string());
        assert!(matches!(
            ReservationError::from(registry),
            ReservationError::Transient(_)
        ));
        assert!(matches!(
            ReservationError::from(ledger),
            ReservationError::Transient(_)
        ));
    }
}
