//! Booking ledger boundary.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use agrirent_core::{BookingId, ItemId, UserId};

use crate::booking::{BookingEntry, BookingStatus};

/// Booking ledger operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No entry with the given identifier.
    #[error("booking not found")]
    NotFound,

    /// An entry with the same identifier was already appended.
    #[error("booking already recorded")]
    DuplicateEntry,

    /// The requested status change is not permitted by the state machine,
    /// or the entry is not currently in the expected `from` status.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// The backing store is unreachable or unusable.
    #[error("ledger backend unavailable: {0}")]
    Backend(String),
}

/// Append-style store of booking entries.
///
/// `update_status` is the gatekeeper of the booking state machine: it takes
/// the transition as an explicit `(from, to)` pair so a repeated completion
/// fails with [`LedgerError::InvalidTransition`] instead of silently
/// succeeding.
pub trait BookingLedger: Send + Sync {
    /// Append a new entry. Fails with `DuplicateEntry` on identifier reuse.
    fn append(&self, entry: BookingEntry) -> Result<BookingId, LedgerError>;

    /// Fetch an entry by id.
    fn get(&self, id: BookingId) -> Result<BookingEntry, LedgerError>;

    /// Transition an entry from `from` to `to`, recording `at` as the close
    /// timestamp when `to` is terminal.
    fn update_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        at: DateTime<Utc>,
    ) -> Result<(), LedgerError>;

    /// The Active entry referencing an item, if any. By the coordinator's
    /// guarantee there is at most one.
    fn find_active_for_item(&self, item_id: ItemId) -> Result<Option<BookingEntry>, LedgerError>;

    /// Entries requested by one user ("rented by me" projection).
    fn list_by_requester(&self, requester_id: UserId) -> Result<Vec<BookingEntry>, LedgerError>;

    /// Entries against one owner's items ("rented out by me" projection).
    fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<BookingEntry>, LedgerError>;
}

impl<L> BookingLedger for Arc<L>
where
    L: BookingLedger + ?Sized,
{
    fn append(&self, entry: BookingEntry) -> Result<BookingId, LedgerError> {
        (**self).append(entry)
    }

    fn get(&self, id: BookingId) -> Result<BookingEntry, LedgerError> {
        (**self).get(id)
    }

    fn update_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        at: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        (**self).update_status(id, from, to, at)
    }

    fn find_active_for_item(&self, item_id: ItemId) -> Result<Option<BookingEntry>, LedgerError> {
        (**self).find_active_for_item(item_id)
    }

    fn list_by_requester(&self, requester_id: UserId) -> Result<Vec<BookingEntry>, LedgerError> {
        (**self).list_by_requester(requester_id)
    }

    fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<BookingEntry>, LedgerError> {
        (**self).list_by_owner(owner_id)
    }
}
