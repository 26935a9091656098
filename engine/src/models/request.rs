//! Logistics requests
//!
//! Sign convention: a positive `amount` is an input request (the target has a
//! deficit), a negative `amount` is an output request (the target has a
//! surplus). `d_amount_dt` always carries the same sign as `amount`.

use crate::models::position::Position;
use crate::models::resource::ResourceSelector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Insertion-ordered request identifier, unique within a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub usize);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered deficit or surplus at a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,

    /// Reference of the requesting target
    pub target: String,

    /// Position of the requesting target
    pub pos: Position,

    /// Signed amount (positive = input, negative = output)
    pub amount: i64,

    pub resource: ResourceSelector,

    /// Rate at which the deficit/surplus grows, same sign as `amount`
    pub d_amount_dt: f64,

    /// Priority multiplier applied to throughput scores
    pub multiplier: f64,
}

impl Request {
    pub fn is_input(&self) -> bool {
        self.amount > 0
    }

    pub fn is_output(&self) -> bool {
        self.amount < 0
    }
}

/// Optional parameters when registering a request
///
/// Unset fields fall back to: energy, multiplier 1, no growth, and an amount
/// resolved from the target's current state. `d_amount_dt` is always given as
/// a positive rate; its sign follows the request direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub amount: Option<i64>,
    pub d_amount_dt: Option<f64>,
    pub resource: Option<ResourceSelector>,
    pub multiplier: Option<f64>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn d_amount_dt(mut self, rate: f64) -> Self {
        self.d_amount_dt = Some(rate);
        self
    }

    pub fn resource(mut self, resource: ResourceSelector) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }
}
