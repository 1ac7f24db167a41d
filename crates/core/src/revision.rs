//! Revision tokens for optimistic concurrency.
//!
//! Every mutation of an item bumps its revision. Writers supply the revision
//! they last read; a stale expectation is how a lost race is detected without
//! holding any lock.

use serde::{Deserialize, Serialize};

/// Monotonically increasing revision of a stored record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Revision assigned to a freshly registered record.
    pub const INITIAL: Revision = Revision(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The revision after one more mutation.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for Revision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Optimistic concurrency expectation supplied with a conditional write.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedRevision {
    /// Skip the revision check (compensation paths, repairs).
    Any,
    /// Require the record to be at an exact revision.
    Exact(Revision),
}

impl ExpectedRevision {
    pub fn matches(self, actual: Revision) -> bool {
        match self {
            ExpectedRevision::Any => true,
            ExpectedRevision::Exact(expected) => expected == actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_matches_only_same_revision() {
        let expected = ExpectedRevision::Exact(Revision::new(3));
        assert!(expected.matches(Revision::new(3)));
        assert!(!expected.matches(Revision::new(4)));
    }

    #[test]
    fn any_matches_everything() {
        assert!(ExpectedRevision::Any.matches(Revision::INITIAL));
        assert!(ExpectedRevision::Any.matches(Revision::new(999)));
    }

    #[test]
    fn next_increments() {
        assert_eq!(Revision::INITIAL.next(), Revision::new(2));
    }
}
