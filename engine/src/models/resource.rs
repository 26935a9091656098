//! Resource types and resource containers
//!
//! Targets and carriers hold resources in integer units (`Store`). Projected
//! cargo after a commitment completes may be fractional (`Cargo`), because
//! `all`-type withdrawals are split proportionally across resource types.
//!
//! # Critical Invariants
//!
//! 1. All containers are `BTreeMap`-backed so iteration order is deterministic
//! 2. Stored quantities are never negative

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the primary energy-equivalent resource
pub const ENERGY: &str = "energy";

/// A concrete resource type (e.g. `"energy"`, `"power"`, `"H"`)
///
/// # Example
/// ```
/// use logistics_network_core::ResourceType;
///
/// let energy = ResourceType::energy();
/// assert!(energy.is_primary());
/// assert!(!ResourceType::new("H").is_primary());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The primary energy-equivalent unit
    pub fn energy() -> Self {
        Self(ENERGY.to_string())
    }

    pub fn power() -> Self {
        Self("power".to_string())
    }

    pub fn ghodium() -> Self {
        Self("G".to_string())
    }

    pub fn is_primary(&self) -> bool {
        self.0 == ENERGY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Which resource a request concerns
///
/// `All` is only legal for output requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceSelector {
    Single(ResourceType),
    All,
}

impl ResourceSelector {
    pub fn energy() -> Self {
        ResourceSelector::Single(ResourceType::energy())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ResourceSelector::All)
    }

    /// The concrete resource, if this is not `All`
    pub fn single(&self) -> Option<&ResourceType> {
        match self {
            ResourceSelector::Single(resource) => Some(resource),
            ResourceSelector::All => None,
        }
    }
}

impl Default for ResourceSelector {
    fn default() -> Self {
        Self::energy()
    }
}

impl fmt::Display for ResourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceSelector::Single(resource) => write!(f, "{}", resource),
            ResourceSelector::All => f.write_str("all"),
        }
    }
}

/// Integer resource holdings, keyed by resource type
///
/// # Example
/// ```
/// use logistics_network_core::{ResourceType, Store};
///
/// let store = Store::from_pairs([("energy", 300), ("H", 50)]);
/// assert_eq!(store.total(), 350);
/// assert_eq!(store.get(&ResourceType::new("O")), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store(BTreeMap<ResourceType, i64>);

impl Store {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        let mut store = Self::new();
        for (name, amount) in pairs {
            store.set(ResourceType::new(name), amount);
        }
        store
    }

    /// Amount held of a resource (0 when absent)
    pub fn get(&self, resource: &ResourceType) -> i64 {
        self.0.get(resource).copied().unwrap_or(0)
    }

    /// Set the held amount; non-positive amounts remove the entry
    pub fn set(&mut self, resource: ResourceType, amount: i64) {
        if amount > 0 {
            self.0.insert(resource, amount);
        } else {
            self.0.remove(&resource);
        }
    }

    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Resources held in positive quantity, in resource order
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceType, i64)> {
        self.0.iter().filter(|(_, &amount)| amount > 0).map(|(r, &a)| (r, a))
    }

    /// The only resource held, if exactly one resource is present
    pub fn sole_resource(&self) -> Option<&ResourceType> {
        let mut held = self.iter();
        match (held.next(), held.next()) {
            (Some((resource, _)), None) => Some(resource),
            _ => None,
        }
    }

    pub fn to_cargo(&self) -> Cargo {
        Cargo(self.iter().map(|(r, a)| (r.clone(), a as f64)).collect())
    }
}

/// Fractional resource amounts, used for predicted carrier cargo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cargo(BTreeMap<ResourceType, f64>);

impl Cargo {
    pub fn get(&self, resource: &ResourceType) -> f64 {
        self.0.get(resource).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, resource: ResourceType, amount: f64) {
        self.0.insert(resource, amount);
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceType, f64)> {
        self.0.iter().map(|(r, &a)| (r, a))
    }
}
