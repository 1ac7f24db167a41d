//! `agrirent-reservation` — the reservation coordinator.
//!
//! The coordinator owns every transition of item availability and booking
//! status; the registry and ledger behind it are passive stores. A booking
//! request is one logical transaction built on optimistic concurrency: read
//! the item, conditionally flip its availability against the revision just
//! read, then append the ledger entry, compensating on failure. This gives
//! the core guarantee: **at most one Active booking per item at any time**.

pub mod coordinator;
pub mod error;
pub mod reconciliation;
pub mod retry;


pub use coordinator::{
    BookingConfirmation, BookingRequest, CompleteBooking, ReservationCoordinator,
};
pub use error::ReservationError;
pub use reconciliation::{sweep, SweepReport};
pub use retry::RetryPolicy;
