//! Bounded grid terrain with breadth-first path lengths

use crate::models::Position;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Rectangular walkable grid; `walls` are impassable tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub walls: BTreeSet<Position>,
}

impl Terrain {
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: BTreeSet::new(),
        }
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(walls);
        self
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Length of the shortest 8-connected path, `None` when unreachable
    ///
    /// Endpoints may be walls (targets are usually solid); only intermediate
    /// tiles must be walkable.
    ///
    /// # Example
    /// ```
    /// use logistics_network_core::{Position, Terrain};
    ///
    /// let terrain = Terrain::open(10, 10)
    ///     .with_walls((0..9).map(|y| Position::new(4, y)));
    /// // Must walk around the wall through row 9
    /// assert_eq!(terrain.shortest_path(Position::new(2, 0), Position::new(6, 0)), Some(18));
    /// ```
    pub fn shortest_path(&self, from: Position, to: Position) -> Option<u32> {
        if !self.in_bounds(from) || !self.in_bounds(to) {
            return None;
        }
        if from == to {
            return Some(0);
        }

        let mut visited = HashSet::new();
        let mut frontier = VecDeque::new();
        visited.insert(from);
        frontier.push_back((from, 0u32));

        while let Some((pos, dist)) = frontier.pop_front() {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let next = Position::new(pos.x + dx, pos.y + dy);
                    if next == to {
                        return Some(dist + 1);
                    }
                    if !self.in_bounds(next) || self.walls.contains(&next) || !visited.insert(next) {
                        continue;
                    }
                    frontier.push_back((next, dist + 1));
                }
            }
        }
        None
    }
}
