//! Inclusive booking periods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// An inclusive date range: the item is rented on both the start and the end
/// day, so a single-day booking has `start == end` and counts as one day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl BookingPeriod {
    /// Construct a period, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if end < start {
            return Err(DomainError::validation(
                "end date cannot be before start date",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// True when the period begins before the given day (past-dated).
    pub fn starts_before(&self, day: NaiveDate) -> bool {
        self.start < day
    }

    /// Number of chargeable days, counting both endpoints.
    pub fn inclusive_days(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }
}

impl ValueObject for BookingPeriod {}
