//! Item repository boundary.
//!
//! The registry is a passive store: nothing here decides whether a booking is
//! allowed. `set_availability` is the one conditional write — it carries the
//! revision the caller last read and fails with [`RegistryError::RevisionConflict`]
//! when that revision is stale, which is how a lost booking race surfaces.

use std::sync::Arc;

use thiserror::Error;

use agrirent_core::{ExpectedRevision, ItemId, Revision, UserId};

use crate::item::Item;

/// Item store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No item with the given identifier.
    #[error("item not found")]
    NotFound,

    /// An item with the same identifier is already registered.
    #[error("item already registered")]
    AlreadyExists,

    /// The supplied revision expectation was stale (someone else wrote first).
    #[error("revision conflict: expected {expected:?}, found {actual}")]
    RevisionConflict {
        expected: ExpectedRevision,
        actual: Revision,
    },

    /// The backing store is unreachable or unusable. Safe to retry reads.
    #[error("registry backend unavailable: {0}")]
    Backend(String),
}

/// Canonical store of rentable items.
///
/// Implementations must apply `set_availability` atomically with respect to
/// concurrent calls on the same item: check the expectation, flip the flag,
/// and bump the revision as one step.
pub trait ItemStore: Send + Sync {
    /// Register a new item. Fails with `AlreadyExists` on identifier reuse.
    fn insert(&self, item: Item) -> Result<(), RegistryError>;

    /// Fetch an item by id.
    fn get(&self, id: ItemId) -> Result<Item, RegistryError>;

    /// Conditionally flip an item's availability.
    ///
    /// Returns the revision after the write. Fails with `RevisionConflict`
    /// when `expected` no longer matches the stored revision.
    fn set_availability(
        &self,
        id: ItemId,
        available: bool,
        expected: ExpectedRevision,
    ) -> Result<Revision, RegistryError>;

    /// All items, in no particular order.
    fn list(&self) -> Result<Vec<Item>, RegistryError>;

    /// Items registered by one owner (dashboard projection).
    fn list_owned_by(&self, owner_id: UserId) -> Result<Vec<Item>, RegistryError>;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn insert(&self, item: Item) -> Result<(), RegistryError> {
        (**self).insert(item)
    }

    fn get(&self, id: ItemId) -> Result<Item, RegistryError> {
        (**self).get(id)
    }

    fn set_availability(
        &self,
        id: ItemId,
        available: bool,
        expected: ExpectedRevision,
    ) -> Result<Revision, RegistryError> {
        (**self).set_availability(id, available, expected)
    }

    fn list(&self) -> Result<Vec<Item>, RegistryError> {
        (**self).list()
    }

    fn list_owned_by(&self, owner_id: UserId) -> Result<Vec<Item>, RegistryError> {
        (**self).list_owned_by(owner_id)
    }
}
