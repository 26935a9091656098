//! Carrier (transporter) model
//!
//! A carrier is a mobile agent with a finite multi-resource cargo hold. The
//! network never moves carriers; it only reads their state to forecast when
//! and where they become free.

use crate::models::position::Position;
use crate::models::resource::Store;
use serde::{Deserialize, Serialize};

/// What a carrier is currently doing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    /// Estimated ticks until the first manifest position is reached
    #[serde(default)]
    pub eta: Option<u32>,

    /// Remaining target positions, in visiting order
    #[serde(default)]
    pub manifest: Vec<Position>,

    /// Reference of the target the carrier is assigned to
    #[serde(default)]
    pub target: Option<String>,
}

/// A mobile carrier agent
///
/// # Example
/// ```
/// use logistics_network_core::{Carrier, Position, Store};
///
/// let carrier = Carrier::new("hauler-1", Position::new(10, 10), 800)
///     .with_carry(Store::from_pairs([("energy", 200)]));
/// assert_eq!(carrier.free_capacity(), 600);
/// assert!(carrier.is_idle());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: String,
    pub pos: Position,
    pub capacity: i64,
    #[serde(default)]
    pub carry: Store,
    #[serde(default)]
    pub commitment: Option<Commitment>,
}

impl Carrier {
    pub fn new(id: impl Into<String>, pos: Position, capacity: i64) -> Self {
        Self {
            id: id.into(),
            pos,
            capacity,
            carry: Store::new(),
            commitment: None,
        }
    }

    pub fn with_carry(mut self, carry: Store) -> Self {
        self.carry = carry;
        self
    }

    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = Some(commitment);
        self
    }

    pub fn is_idle(&self) -> bool {
        self.commitment.is_none()
    }

    pub fn free_capacity(&self) -> i64 {
        self.capacity - self.carry.total()
    }

    /// Reference of the target this carrier is committed to, if any
    pub fn target_ref(&self) -> Option<&str> {
        self.commitment.as_ref().and_then(|c| c.target.as_deref())
    }

    pub fn is_targeting(&self, target_ref: &str) -> bool {
        self.target_ref() == Some(target_ref)
    }
}
