//! World interface consumed by the logistics network
//!
//! The network does not own agents, targets or path data. Everything it needs
//! to know about the world comes through `LogisticsWorld`, borrowed for the
//! duration of each call.
//!
//! `Colony` is a plain-data implementation used by the scenario runner, the
//! CLI and the tests.

pub mod colony;
pub mod terrain;

use crate::models::{Carrier, Position, Target};

pub use colony::Colony;
pub use terrain::Terrain;

/// Travel-time and capability interface of a scheduling domain
pub trait LogisticsWorld {
    /// Fast heuristic distance
    fn range(&self, a: Position, b: Position) -> u32 {
        a.range_to(b)
    }

    /// Exact travel distance; expected to be memoized by the implementor
    fn path_distance(&self, a: Position, b: Position) -> u32;

    /// Carriers managed in this domain, in roster order
    fn carriers(&self) -> &[Carrier];

    fn target(&self, target_ref: &str) -> Option<&Target>;

    /// Targets eligible as detour stops
    fn buffers(&self) -> Vec<&Target>;

    /// Carriers currently committed to `target_ref`, optionally excluding one
    fn carriers_targeting(&self, target_ref: &str, excluding: Option<&str>) -> Vec<&Carrier> {
        self.carriers()
            .iter()
            .filter(|carrier| carrier.is_targeting(target_ref))
            .filter(|carrier| Some(carrier.id.as_str()) != excluding)
            .collect()
    }
}
