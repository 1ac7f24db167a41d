use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use agrirent_core::{BookingId, ItemId, UserId};

use crate::booking::{BookingEntry, BookingStatus};
use crate::store::{BookingLedger, LedgerError};

/// In-memory booking ledger.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryBookingLedger {
    entries: RwLock<HashMap<BookingId, BookingEntry>>,
}

impl InMemoryBookingLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingLedger for InMemoryBookingLedger {
    fn append(&self, entry: BookingEntry) -> Result<BookingId, LedgerError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| LedgerError::Backend("lock poisoned".to_string()))?;

        let id = entry.id_typed();
        if entries.contains_key(&id) {
            return Err(LedgerError::DuplicateEntry);
        }
        entries.insert(id, entry);
        Ok(id)
    }

    fn get(&self, id: BookingId) -> Result<BookingEntry, LedgerError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| LedgerError::Backend("lock poisoned".to_string()))?;

        entries.get(&id).cloned().ok_or(LedgerError::NotFound)
    }

    fn update_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        at: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| LedgerError::Backend("lock poisoned".to_string()))?;

        let entry = entries.get_mut(&id).ok_or(LedgerError::NotFound)?;

        // Report the actual current status, not the caller's claim.
        if entry.status() != from || !from.can_transition_to(to) {
            return Err(LedgerError::InvalidTransition {
                from: entry.status(),
                to,
            });
        }

        entry.close(to, at);
        Ok(())
    }

    fn find_active_for_item(&self, item_id: ItemId) -> Result<Option<BookingEntry>, LedgerError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| LedgerError::Backend("lock poisoned".to_string()))?;

        Ok(entries
            .values()
            .find(|e| e.item_id() == item_id && e.is_active())
            .cloned())
    }

    fn list_by_requester(&self, requester_id: UserId) -> Result<Vec<BookingEntry>, LedgerError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| LedgerError::Backend("lock poisoned".to_string()))?;

        Ok(entries
            .values()
            .filter(|e| e.requester_id() == requester_id)
            .cloned()
            .collect())
    }

    fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<BookingEntry>, LedgerError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| LedgerError::Backend("lock poisoned".to_string()))?;

        Ok(entries
            .values()
            .filter(|e| e.owner_id() == owner_id)
            .cloned()
            .collect())
    }
}
