//! `agrirent-ledger` — append-style record of booking intents.
//!
//! Every reservation attempt that wins the availability race lands here as an
//! Active [`BookingEntry`]; the entry then moves through a strict state
//! machine (Active→Completed on owner sign-off, Active→Cancelled on creation
//! rollback) enforced by the [`BookingLedger`] boundary.

pub mod booking;
pub mod in_memory;
pub mod store;

pub use booking::{BookingEntry, BookingStatus, NewBooking};
pub use in_memory::InMemoryBookingLedger;
pub use store::{BookingLedger, LedgerError};
