//! Plain-data world snapshot
//!
//! A `Colony` holds the targets and carriers of one scheduling domain as they
//! are at the start of a cycle. Path distances are computed on demand over the
//! optional terrain and memoized for the lifetime of the snapshot.

use crate::models::{Carrier, Position, Target};
use crate::world::terrain::Terrain;
use crate::world::LogisticsWorld;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

/// Path length reported when no route exists
pub const UNREACHABLE: u32 = u32::MAX / 4;

/// World snapshot of a single scheduling domain
///
/// # Example
/// ```
/// use logistics_network_core::{Carrier, Colony, LogisticsWorld, Position};
///
/// let colony = Colony::new("W1N1")
///     .with_carrier(Carrier::new("hauler-1", Position::new(0, 0), 100));
/// assert_eq!(colony.carriers().len(), 1);
/// assert_eq!(colony.path_distance(Position::new(0, 0), Position::new(3, 4)), 4);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Colony {
    pub domain: String,

    #[serde(default)]
    pub targets: Vec<Target>,

    #[serde(default)]
    pub carriers: Vec<Carrier>,

    /// Without terrain, path distance falls back to range
    #[serde(default)]
    pub terrain: Option<Terrain>,

    #[serde(skip)]
    path_cache: RefCell<HashMap<(Position, Position), u32>>,
}

impl Colony {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_carrier(mut self, carrier: Carrier) -> Self {
        self.carriers.push(carrier);
        self
    }

    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = Some(terrain);
        self.path_cache.borrow_mut().clear();
        self
    }

    pub fn carrier(&self, id: &str) -> Option<&Carrier> {
        self.carriers.iter().find(|carrier| carrier.id == id)
    }

    pub fn carrier_mut(&mut self, id: &str) -> Option<&mut Carrier> {
        self.carriers.iter_mut().find(|carrier| carrier.id == id)
    }

    /// Number of memoized path lengths
    pub fn cached_paths(&self) -> usize {
        self.path_cache.borrow().len()
    }
}

impl LogisticsWorld for Colony {
    fn path_distance(&self, a: Position, b: Position) -> u32 {
        let Some(terrain) = &self.terrain else {
            return a.range_to(b);
        };
        if let Some(&cached) = self.path_cache.borrow().get(&(a, b)) {
            return cached;
        }
        let distance = terrain.shortest_path(a, b).unwrap_or(UNREACHABLE);
        let mut cache = self.path_cache.borrow_mut();
        cache.insert((a, b), distance);
        cache.insert((b, a), distance);
        distance
    }

    fn carriers(&self) -> &[Carrier] {
        &self.carriers
    }

    fn target(&self, target_ref: &str) -> Option<&Target> {
        self.targets.iter().find(|target| target.id == target_ref)
    }

    fn buffers(&self) -> Vec<&Target> {
        self.targets.iter().filter(|target| target.is_buffer).collect()
    }
}
