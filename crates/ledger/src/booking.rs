use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrirent_core::{BookingId, BookingPeriod, Entity, ItemId, Money, UserId};

/// Booking lifecycle status.
///
/// `Active` is the only non-terminal state. Legal transitions:
/// Active→Completed (owner sign-off) and Active→Cancelled (creation
/// rollback). Terminal entries are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BookingStatus::Active)
    }

    /// Whether the state machine permits `self → to`.
    pub fn can_transition_to(self, to: BookingStatus) -> bool {
        matches!(
            (self, to),
            (BookingStatus::Active, BookingStatus::Completed)
                | (BookingStatus::Active, BookingStatus::Cancelled)
        )
    }
}

impl core::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Data for a booking entry about to be appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub booking_id: BookingId,
    pub item_id: ItemId,
    pub requester_id: UserId,
    /// Owner of the item at creation time; completion authorization checks
    /// against this copy, not against the live item.
    pub owner_id: UserId,
    pub period: BookingPeriod,
    pub cost: Money,
    pub occurred_at: DateTime<Utc>,
}

/// One reservation attempt and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingEntry {
    id: BookingId,
    item_id: ItemId,
    requester_id: UserId,
    owner_id: UserId,
    period: BookingPeriod,
    cost: Money,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    /// Set when the entry reaches a terminal status.
    closed_at: Option<DateTime<Utc>>,
}

impl BookingEntry {
    /// Create an entry in `Active` status.
    pub fn active(data: NewBooking) -> Self {
        Self {
            id: data.booking_id,
            item_id: data.item_id,
            requester_id: data.requester_id,
            owner_id: data.owner_id,
            period: data.period,
            cost: data.cost,
            status: BookingStatus::Active,
            created_at: data.occurred_at,
            closed_at: None,
        }
    }

    pub fn id_typed(&self) -> BookingId {
        self.id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn requester_id(&self) -> UserId {
        self.requester_id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn period(&self) -> BookingPeriod {
        self.period
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Move to a terminal status. Ledger-internal; the state machine check
    /// lives in [`crate::BookingLedger::update_status`].
    pub(crate) fn close(&mut self, to: BookingStatus, at: DateTime<Utc>) {
        self.status = to;
        self.closed_at = Some(at);
    }
}

impl Entity for BookingEntry {
    type Id = BookingId;

    fn id(&self) -> &BookingId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn active_is_the_only_non_terminal_status() {
        assert!(!BookingStatus::Active.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
    }

    #[test]
    fn new_entries_are_active_and_open() {
        let entry = BookingEntry::active(NewBooking {
            booking_id: BookingId::new(),
            item_id: ItemId::new(),
            requester_id: UserId::new(),
            owner_id: UserId::new(),
            period: BookingPeriod::new(
                "2026-09-01".parse().unwrap(),
                "2026-09-03".parse().unwrap(),
            )
            .unwrap(),
            cost: Money::from_rupees(300),
            occurred_at: Utc::now(),
        });

        assert!(entry.is_active());
        assert_eq!(entry.closed_at(), None);
    }

    fn any_status() -> impl Strategy<Value = BookingStatus> {
        prop_oneof![
            Just(BookingStatus::Active),
            Just(BookingStatus::Completed),
            Just(BookingStatus::Cancelled),
        ]
    }

    proptest! {
        /// Property: the only legal transitions leave `Active` for a terminal
        /// status; nothing leaves or re-enters a terminal state.
        #[test]
        fn only_active_to_terminal_transitions_are_legal(
            from in any_status(),
            to in any_status(),
        ) {
            let legal = from.can_transition_to(to);
            let expected = from == BookingStatus::Active && to.is_terminal();
            prop_assert_eq!(legal, expected);
        }
    }
}
