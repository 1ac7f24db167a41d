//! Value object trait: equality by value, not identity.

/// Marker trait for immutable domain values compared by their attributes
/// (`Money`, `BookingPeriod`, regions) rather than by identity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
