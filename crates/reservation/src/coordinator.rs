//! Reservation coordinator: the only writer of item availability and
//! booking status.
//!
//! `request_booking` is a single logical transaction over two stores with no
//! transactional backend underneath. The ordering is what makes it safe:
//! the version-checked `set_availability` write is the serialization point,
//! and the ledger append only happens after that write succeeds. If the
//! append then fails, the availability flip is compensated best-effort and
//! the reconciliation sweep covers the remainder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use agrirent_core::{BookingId, BookingPeriod, ExpectedRevision, ItemId, Money, UserId};
use agrirent_ledger::{BookingEntry, BookingLedger, BookingStatus, NewBooking};
use agrirent_registry::{Item, ItemFilter, ItemStore, RegisterItem};

use crate::error::ReservationError;
use crate::retry::RetryPolicy;

/// Command: reserve an item for an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub item_id: ItemId,
    pub requester_id: UserId,
    pub period: BookingPeriod,
    /// When the request was made; also the "today" used for the
    /// no-past-bookings check, so callers and tests stay deterministic.
    pub requested_at: DateTime<Utc>,
}

/// Successful outcome of [`ReservationCoordinator::request_booking`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
    pub item_id: ItemId,
    pub period: BookingPeriod,
    /// Fixed at request time from the freshly read item; earlier quotes are
    /// not honored.
    pub cost: Money,
}

/// Command: owner signs off that the equipment came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteBooking {
    pub booking_id: BookingId,
    pub caller_id: UserId,
    pub completed_at: DateTime<Utc>,
}

/// Coordinates bookings across an item store and a booking ledger.
pub struct ReservationCoordinator<S, L> {
    items: S,
    ledger: L,
    read_retry: RetryPolicy,
}

impl<S, L> ReservationCoordinator<S, L>
where
    S: ItemStore,
    L: BookingLedger,
{
    pub fn new(items: S, ledger: L) -> Self {
        Self {
            items,
            ledger,
            read_retry: RetryPolicy::registry_reads(),
        }
    }

    pub fn with_retry_policy(items: S, ledger: L, read_retry: RetryPolicy) -> Self {
        Self {
            items,
            ledger,
            read_retry,
        }
    }

    /// Register a piece of equipment for rental.
    pub fn register_item(&self, cmd: RegisterItem) -> Result<Item, ReservationError> {
        let item = Item::register(cmd)?;
        self.items.insert(item.clone())?;
        info!(item_id = %item.id_typed(), owner_id = %item.owner_id(), "item registered");
        Ok(item)
    }

    /// Reserve an item for the requested period.
    ///
    /// At most one Active booking can exist per item: of two concurrent
    /// requests for the same item, exactly one wins the version-checked
    /// availability write; the other observes `ItemUnavailable`.
    pub fn request_booking(
        &self,
        req: BookingRequest,
    ) -> Result<BookingConfirmation, ReservationError> {
        // Preconditions, checked before any store is touched. `end >= start`
        // already held at BookingPeriod construction.
        let today = req.requested_at.date_naive();
        if req.period.starts_before(today) {
            return Err(ReservationError::Validation(
                "booking cannot start in the past".to_string(),
            ));
        }

        let item = self.read_retry.run(|| self.items.get(req.item_id))?;
        if !item.is_available() {
            return Err(ReservationError::ItemUnavailable);
        }

        let cost = item
            .daily_rate()
            .checked_mul_days(req.period.inclusive_days())
            .ok_or_else(|| {
                ReservationError::Validation("booking cost overflows".to_string())
            })?;

        // The serialization point. A revision conflict means another request
        // won the race; do not retry — the caller may re-issue against the
        // new state. From<RegistryError> translates the conflict to
        // ItemUnavailable.
        self.items.set_availability(
            req.item_id,
            false,
            ExpectedRevision::Exact(item.revision()),
        )?;

        let booking_id = BookingId::new();
        let entry = BookingEntry::active(NewBooking {
            booking_id,
            item_id: req.item_id,
            requester_id: req.requester_id,
            owner_id: item.owner_id(),
            period: req.period,
            cost,
            occurred_at: req.requested_at,
        });

        if let Err(append_err) = self.ledger.append(entry) {
            self.rollback_availability(req.item_id);
            return Err(ReservationError::Transient(format!(
                "ledger append failed: {append_err}"
            )));
        }

        info!(
            booking_id = %booking_id,
            item_id = %req.item_id,
            requester_id = %req.requester_id,
            cost = %cost,
            "booking confirmed"
        );

        Ok(BookingConfirmation {
            booking_id,
            item_id: req.item_id,
            period: req.period,
            cost,
        })
    }

    /// Close a booking and reopen the item's availability.
    ///
    /// Only the owner recorded on the entry at creation time may complete
    /// it. Reopening availability is best-effort: if it fails, the entry is
    /// already Completed and the item stays flagged unavailable until the
    /// reconciliation sweep repairs it.
    pub fn complete_booking(&self, cmd: CompleteBooking) -> Result<(), ReservationError> {
        let entry = self.ledger.get(cmd.booking_id)?;

        if entry.owner_id() != cmd.caller_id {
            return Err(ReservationError::Forbidden);
        }

        self.ledger.update_status(
            cmd.booking_id,
            BookingStatus::Active,
            BookingStatus::Completed,
            cmd.completed_at,
        )?;

        if let Err(reopen_err) = self.items.set_availability(
            entry.item_id(),
            true,
            ExpectedRevision::Any,
        ) {
            warn!(
                item_id = %entry.item_id(),
                error = %reopen_err,
                "failed to reopen availability after completion; leaving item for reconciliation"
            );
        }

        info!(booking_id = %cmd.booking_id, item_id = %entry.item_id(), "booking completed");
        Ok(())
    }

    /// Read-only projection of available items matching the filter.
    ///
    /// No consistency requirement stronger than "reasonably recent".
    pub fn list_available(&self, filter: &ItemFilter) -> Result<Vec<Item>, ReservationError> {
        let items = self.read_retry.run(|| self.items.list())?;
        Ok(items
            .into_iter()
            .filter(|item| item.is_available() && filter.matches(item))
            .collect())
    }

    /// Best-effort compensation after a failed ledger append. `Any` skips
    /// the revision check: we hold the item (we just flipped it off), and a
    /// repair must not fail on the bumped revision.
    fn rollback_availability(&self, item_id: ItemId) {
        match self.items.set_availability(item_id, true, ExpectedRevision::Any) {
            Ok(_) => {
                info!(item_id = %item_id, "availability rolled back after ledger failure");
            }
            Err(rollback_err) => {
                warn!(
                    item_id = %item_id,
                    error = %rollback_err,
                    "availability rollback failed; leaving item for reconciliation"
                );
            }
        }
    }

    pub fn items(&self) -> &S {
        &self.items
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}
