//! `agrirent-core` — domain foundation for the reservation core.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the domain error model, revision tokens for
//! optimistic concurrency, money, and inclusive booking periods.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod period;
pub mod revision;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BookingId, ItemId, UserId};
pub use money::Money;
pub use period::BookingPeriod;
pub use revision::{ExpectedRevision, Revision};
pub use value_object::ValueObject;
