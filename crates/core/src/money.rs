//! Money as an amount in the smallest currency unit.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// An amount of money in paise (smallest currency unit).
///
/// Arithmetic is checked; a booking whose cost would overflow is rejected
/// rather than silently wrapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_paise(paise: u64) -> Self {
        Self(paise)
    }

    /// Whole-rupee convenience constructor.
    pub const fn from_rupees(rupees: u64) -> Self {
        Self(rupees * 100)
    }

    pub const fn paise(self) -> u64 {
        self.0
    }

    /// Total for a per-day rate over an inclusive day count.
    pub fn checked_mul_days(self, days: u64) -> Option<Money> {
        self.0.checked_mul(days).map(Money)
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "₹{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplies_rate_by_day_count() {
        let rate = Money::from_rupees(100);
        assert_eq!(rate.checked_mul_days(3), Some(Money::from_rupees(300)));
    }

    #[test]
    fn overflow_is_detected() {
        assert_eq!(Money::from_paise(u64::MAX).checked_mul_days(2), None);
    }

    #[test]
    fn displays_in_rupees() {
        assert_eq!(Money::from_paise(12_345).to_string(), "₹123.45");
        assert_eq!(Money::from_paise(5).to_string(), "₹0.05");
    }
}
