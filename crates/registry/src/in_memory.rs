use std::collections::HashMap;
use std::sync::RwLock;

use agrirent_core::{Entity, ExpectedRevision, ItemId, Revision, UserId};

use crate::item::Item;
use crate::store::{ItemStore, RegistryError};

/// In-memory item store.
///
/// Intended for tests/dev. The `RwLock` write section makes the
/// check-flip-bump of `set_availability` atomic per process.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<HashMap<ItemId, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for InMemoryItemStore {
    fn insert(&self, item: Item) -> Result<(), RegistryError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RegistryError::Backend("lock poisoned".to_string()))?;

        let id = *item.id();
        if items.contains_key(&id) {
            return Err(RegistryError::AlreadyExists);
        }
        items.insert(id, item);
        Ok(())
    }

    fn get(&self, id: ItemId) -> Result<Item, RegistryError> {
        let items = self
            .items
            .read()
            .map_err(|_| RegistryError::Backend("lock poisoned".to_string()))?;

        items.get(&id).cloned().ok_or(RegistryError::NotFound)
    }

    fn set_availability(
        &self,
        id: ItemId,
        available: bool,
        expected: ExpectedRevision,
    ) -> Result<Revision, RegistryError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RegistryError::Backend("lock poisoned".to_string()))?;

        let item = items.get_mut(&id).ok_or(RegistryError::NotFound)?;

        if !expected.matches(item.revision()) {
            return Err(RegistryError::RevisionConflict {
                expected,
                actual: item.revision(),
            });
        }

        item.apply_availability(available);
        Ok(item.revision())
    }

    fn list(&self) -> Result<Vec<Item>, RegistryError> {
        let items = self
            .items
            .read()
            .map_err(|_| RegistryError::Backend("lock poisoned".to_string()))?;

        Ok(items.values().cloned().collect())
    }

    fn list_owned_by(&self, owner_id: UserId) -> Result<Vec<Item>, RegistryError> {
        let items = self
            .items
            .read()
            .map_err(|_| RegistryError::Backend("lock poisoned".to_string()))?;

        Ok(items
            .values()
            .filter(|item| item.owner_id() == owner_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{RegisterItem, Region};
    use agrirent_core::Money;
    use chrono::Utc;

    fn seeded_item() -> Item {
        Item::register(RegisterItem {
            item_id: ItemId::new(),
            owner_id: UserId::new(),
            name: "Rotavator".to_string(),
            category: "Rotavators".to_string(),
            region: Region::new("Punjab", "Ludhiana"),
            daily_rate: Money::from_rupees(800),
            image_urls: vec![],
            occurred_at: Utc::now(),
        })
        .unwrap()
    }

    #[test]
    fn insert_then_get_round_trips() {
        let store = InMemoryItemStore::new();
        let item = seeded_item();
        let id = item.id_typed();

        store.insert(item.clone()).unwrap();
        assert_eq!(store.get(id).unwrap(), item);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let store = InMemoryItemStore::new();
        let item = seeded_item();

        store.insert(item.clone()).unwrap();
        assert_eq!(store.insert(item), Err(RegistryError::AlreadyExists));
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = InMemoryItemStore::new();
        assert_eq!(store.get(ItemId::new()), Err(RegistryError::NotFound));
    }

    #[test]
    fn conditional_write_bumps_revision() {
        let store = InMemoryItemStore::new();
        let item = seeded_item();
        let id = item.id_typed();
        store.insert(item).unwrap();

        let rev = store
            .set_availability(id, false, ExpectedRevision::Exact(Revision::INITIAL))
            .unwrap();
        assert_eq!(rev, Revision::INITIAL.next());

        let stored = store.get(id).unwrap();
        assert!(!stored.is_available());
        assert_eq!(stored.revision(), rev);
    }

    #[test]
    fn stale_expectation_is_a_revision_conflict() {
        let store = InMemoryItemStore::new();
        let item = seeded_item();
        let id = item.id_typed();
        store.insert(item).unwrap();

        store
            .set_availability(id, false, ExpectedRevision::Exact(Revision::INITIAL))
            .unwrap();

        // Second writer still holds the initial revision.
        let err = store
            .set_availability(id, false, ExpectedRevision::Exact(Revision::INITIAL))
            .unwrap_err();
        assert!(matches!(err, RegistryError::RevisionConflict { .. }));
    }

    #[test]
    fn any_expectation_skips_the_check() {
        let store = InMemoryItemStore::new();
        let item = seeded_item();
        let id = item.id_typed();
        store.insert(item).unwrap();

        store
            .set_availability(id, false, ExpectedRevision::Exact(Revision::INITIAL))
            .unwrap();
        store
            .set_availability(id, true, ExpectedRevision::Any)
            .unwrap();

        assert!(store.get(id).unwrap().is_available());
    }

    #[test]
    fn list_owned_by_filters_on_owner() {
        let store = InMemoryItemStore::new();
        let mine = seeded_item();
        let owner = mine.owner_id();
        store.insert(mine).unwrap();
        store.insert(seeded_item()).unwrap();

        let owned = store.list_owned_by(owner).unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].owner_id(), owner);
        assert_eq!(store.list().unwrap().len(), 2);
    }
}
