//! Stationary targets that hold resources
//!
//! A target's capability "shape" is a closed set of three cases:
//!
//! - **Store**: sum-based capacity shared by every resource type
//! - **SingleResource**: tracks exactly one resource (e.g. an energy-only holder)
//! - **MultiCapacity**: each resource type has its own capacity slot
//!
//! Capability probes return `None` when a target cannot hold the resource
//! asked about; callers decide how to report that.

use crate::models::position::Position;
use crate::models::resource::{ResourceSelector, ResourceType, Store};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One named capacity slot of a multi-capacity holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub amount: i64,
    pub capacity: i64,
}

/// Capability shape of a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TargetKind {
    Store {
        capacity: i64,
        store: Store,
    },
    SingleResource {
        resource: ResourceType,
        amount: i64,
        capacity: i64,
    },
    MultiCapacity {
        slots: BTreeMap<ResourceType, Slot>,
    },
}

/// A fixed world entity capable of holding resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Stable reference (e.g. `"storage-1"`)
    pub id: String,

    /// Scheduling domain this target belongs to
    pub domain: String,

    pub pos: Position,

    pub kind: TargetKind,

    /// Eligible as an intermediate detour stop
    #[serde(default)]
    pub is_buffer: bool,

    /// Resources lying loose (dropped piles, remains): withdraw-only
    #[serde(default)]
    pub loose: bool,
}

impl Target {
    pub fn new(id: impl Into<String>, domain: impl Into<String>, pos: Position, kind: TargetKind) -> Self {
        Self {
            id: id.into(),
            domain: domain.into(),
            pos,
            kind,
            is_buffer: false,
            loose: false,
        }
    }

    /// A store-like target with the given capacity and contents
    pub fn store(id: impl Into<String>, domain: impl Into<String>, pos: Position, capacity: i64, store: Store) -> Self {
        Self::new(id, domain, pos, TargetKind::Store { capacity, store })
    }

    /// A single-resource holder
    pub fn single(
        id: impl Into<String>,
        domain: impl Into<String>,
        pos: Position,
        resource: ResourceType,
        amount: i64,
        capacity: i64,
    ) -> Self {
        Self::new(
            id,
            domain,
            pos,
            TargetKind::SingleResource {
                resource,
                amount,
                capacity,
            },
        )
    }

    pub fn as_buffer(mut self) -> Self {
        self.is_buffer = true;
        self
    }

    pub fn as_loose(mut self) -> Self {
        self.loose = true;
        self
    }

    pub fn is_store_like(&self) -> bool {
        matches!(self.kind, TargetKind::Store { .. })
    }

    pub fn is_single_resource(&self) -> bool {
        matches!(self.kind, TargetKind::SingleResource { .. })
    }

    /// Capacity available to `resource`, if the target can hold it at all
    pub fn capacity_for(&self, resource: &ResourceType) -> Option<i64> {
        match &self.kind {
            TargetKind::Store { capacity, .. } => Some(*capacity),
            TargetKind::SingleResource {
                resource: held,
                capacity,
                ..
            } => (held == resource).then_some(*capacity),
            TargetKind::MultiCapacity { slots } => slots.get(resource).map(|slot| slot.capacity),
        }
    }

    /// Amount of `resource` currently held, if the target can hold it at all
    pub fn amount_of(&self, resource: &ResourceType) -> Option<i64> {
        match &self.kind {
            TargetKind::Store { store, .. } => Some(store.get(resource)),
            TargetKind::SingleResource {
                resource: held,
                amount,
                ..
            } => (held == resource).then_some(*amount),
            TargetKind::MultiCapacity { slots } => slots.get(resource).map(|slot| slot.amount),
        }
    }

    /// Everything the target holds, as a store view
    pub fn holdings(&self) -> Store {
        match &self.kind {
            TargetKind::Store { store, .. } => store.clone(),
            TargetKind::SingleResource { resource, amount, .. } => {
                let mut store = Store::new();
                store.set(resource.clone(), *amount);
                store
            }
            TargetKind::MultiCapacity { slots } => {
                let mut store = Store::new();
                for (resource, slot) in slots {
                    store.set(resource.clone(), slot.amount);
                }
                store
            }
        }
    }

    pub fn total_capacity(&self) -> i64 {
        match &self.kind {
            TargetKind::Store { capacity, .. } => *capacity,
            TargetKind::SingleResource { capacity, .. } => *capacity,
            TargetKind::MultiCapacity { slots } => slots.values().map(|slot| slot.capacity).sum(),
        }
    }

    /// Capacity bound used when forecasting a request for `selector`
    pub fn capacity_for_selector(&self, selector: &ResourceSelector) -> i64 {
        match selector {
            ResourceSelector::Single(resource) => self.capacity_for(resource).unwrap_or(0),
            ResourceSelector::All => self.total_capacity(),
        }
    }

    /// Amount of `selector` a carrier could pick up here
    pub fn available_for(&self, selector: &ResourceSelector) -> i64 {
        match selector {
            ResourceSelector::Single(resource) => self.amount_of(resource).unwrap_or(0),
            ResourceSelector::All => self.holdings().total(),
        }
    }

    /// Room left for `selector` to be dropped off here
    pub fn free_space_for(&self, selector: &ResourceSelector) -> i64 {
        let free = match (&self.kind, selector) {
            (TargetKind::Store { capacity, store }, _) => capacity - store.total(),
            (_, ResourceSelector::All) => self.total_capacity() - self.holdings().total(),
            (_, ResourceSelector::Single(resource)) => {
                match (self.capacity_for(resource), self.amount_of(resource)) {
                    (Some(capacity), Some(amount)) => capacity - amount,
                    _ => 0,
                }
            }
        };
        free.max(0)
    }
}
