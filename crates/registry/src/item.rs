use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrirent_core::{
    DomainError, DomainResult, Entity, ItemId, Money, Revision, UserId, ValueObject,
};

/// Where a piece of equipment is located (state + district).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub state: String,
    pub district: String,
}

impl Region {
    pub fn new(state: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
        }
    }
}

impl ValueObject for Region {}

/// A rentable piece of equipment.
///
/// Invariant: `available == false` exactly when an active booking references
/// this item. The flag and the revision are mutated only through
/// [`crate::ItemStore::set_availability`]; the revision bumps on every
/// mutation so stale writers lose the optimistic race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    owner_id: UserId,
    name: String,
    category: String,
    region: Region,
    /// Rate charged per inclusive rental day.
    daily_rate: Money,
    /// Public blob-store URLs; opaque to reservation logic.
    image_urls: Vec<String>,
    available: bool,
    revision: Revision,
    created_at: DateTime<Utc>,
}

/// Command: register a piece of equipment for rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterItem {
    pub item_id: ItemId,
    pub owner_id: UserId,
    pub name: String,
    pub category: String,
    pub region: Region,
    pub daily_rate: Money,
    pub image_urls: Vec<String>,
    pub occurred_at: DateTime<Utc>,
}

impl Item {
    /// Validate a registration command and produce the initial item state.
    ///
    /// New items start available at [`Revision::INITIAL`].
    pub fn register(cmd: RegisterItem) -> DomainResult<Self> {
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if cmd.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        if cmd.region.state.trim().is_empty() || cmd.region.district.trim().is_empty() {
            return Err(DomainError::validation("region must name state and district"));
        }

        Ok(Self {
            id: cmd.item_id,
            owner_id: cmd.owner_id,
            name: cmd.name,
            category: cmd.category,
            region: cmd.region,
            daily_rate: cmd.daily_rate,
            image_urls: cmd.image_urls,
            available: true,
            revision: Revision::INITIAL,
            created_at: cmd.occurred_at,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn daily_rate(&self) -> Money {
        self.daily_rate
    }

    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flip availability and bump the revision. Store-internal; callers go
    /// through the version-checked `set_availability`.
    pub(crate) fn apply_availability(&mut self, available: bool) {
        self.available = available;
        self.revision = self.revision.next();
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// Search criteria for available equipment.
///
/// All fields are conjunctive; `None` means "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub max_daily_rate: Option<Money>,
    pub state: Option<String>,
    pub district: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(category) = &self.category {
            if item.category() != category {
                return false;
            }
        }
        if let Some(max) = self.max_daily_rate {
            if item.daily_rate() > max {
                return false;
            }
        }
        if let Some(state) = &self.state {
            if item.region().state != *state {
                return false;
            }
        }
        if let Some(district) = &self.district {
            if item.region().district != *district {
                return false;
            }
        }
        true
    }
}
