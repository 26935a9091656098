//! Grid positions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tile position in the scheduling domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (diagonal moves cost one tick)
    ///
    /// # Example
    /// ```
    /// use logistics_network_core::Position;
    ///
    /// assert_eq!(Position::new(0, 0).range_to(Position::new(3, -5)), 5);
    /// ```
    pub fn range_to(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
