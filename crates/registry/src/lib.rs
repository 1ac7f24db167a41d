//! `agrirent-registry` — canonical state of rentable equipment.
//!
//! Holds the [`Item`] entity (owner, category, region, daily rate,
//! availability, revision), search filters, and the [`ItemStore`] repository
//! boundary with its in-memory implementation. Items are mutated only through
//! the reservation coordinator; `set_availability` is the single
//! version-checked write that serializes concurrent bookings.

pub mod in_memory;
pub mod item;
pub mod store;

pub use in_memory::InMemoryItemStore;
pub use item::{Item, ItemFilter, RegisterItem, Region};
pub use store::{ItemStore, RegistryError};
