//! Per-cycle memoization
//!
//! Owned by exactly one `LogisticsNetwork`; cleared on `refresh` and
//! selectively on `invalidate_carrier`.

use crate::models::{Cargo, Position, RequestId};
use std::collections::HashMap;

/// When and where a carrier becomes free of its current commitment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Availability {
    pub ticks: u32,
    pub position: Position,
}

#[derive(Debug, Clone, Default)]
pub struct CycleCache {
    availability: HashMap<String, Availability>,
    predicted_cargo: HashMap<String, Cargo>,
    change_rate: HashMap<(RequestId, String), f64>,
}

impl CycleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn availability(&self, carrier: &str) -> Option<Availability> {
        self.availability.get(carrier).copied()
    }

    pub fn store_availability(&mut self, carrier: &str, availability: Availability) {
        self.availability.insert(carrier.to_string(), availability);
    }

    pub fn predicted_cargo(&self, carrier: &str) -> Option<&Cargo> {
        self.predicted_cargo.get(carrier)
    }

    pub fn store_predicted_cargo(&mut self, carrier: &str, cargo: Cargo) {
        self.predicted_cargo.insert(carrier.to_string(), cargo);
    }

    pub fn change_rate(&self, request: RequestId, carrier: &str) -> Option<f64> {
        self.change_rate.get(&(request, carrier.to_string())).copied()
    }

    pub fn store_change_rate(&mut self, request: RequestId, carrier: &str, rate: f64) {
        self.change_rate.insert((request, carrier.to_string()), rate);
    }

    /// Forget everything derived from `carrier`'s state
    pub fn invalidate_carrier(&mut self, carrier: &str) {
        self.availability.remove(carrier);
        self.predicted_cargo.remove(carrier);
        self.change_rate.retain(|(_, id), _| id != carrier);
    }

    pub fn clear(&mut self) {
        self.availability.clear();
        self.predicted_cargo.clear();
        self.change_rate.clear();
    }

    /// Number of memoized pair rates
    pub fn rate_entries(&self) -> usize {
        self.change_rate.len()
    }
}
