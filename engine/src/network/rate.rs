//! Throughput scoring and preference lists
//!
//! Both sides of the matching are ranked by the same scalar: the best
//! achievable `multiplier × quantity / duration` over a pair's route choices.

use crate::models::{Carrier, Request, RequestId};
use crate::network::cache::CycleCache;
use crate::network::Planner;
use crate::world::LogisticsWorld;
use tracing::trace;

/// Priority-weighted resource moved per tick
///
/// Non-increasing in `duration`, non-decreasing in `quantity` (for a
/// non-negative multiplier). `epsilon` floors the duration.
///
/// # Example
/// ```
/// use logistics_network_core::network::rate::throughput;
///
/// assert_eq!(throughput(1.0, 80.0, 4.0, 0.1), 20.0);
/// assert_eq!(throughput(2.0, 1.0, 0.0, 0.1), 20.0);
/// ```
pub fn throughput(multiplier: f64, quantity: f64, duration: f64, epsilon: f64) -> f64 {
    multiplier * quantity / duration.max(epsilon)
}

impl<W: LogisticsWorld + ?Sized> Planner<'_, W> {
    /// Best throughput `carrier` can achieve on `request`, memoized per pair
    pub fn resource_change_rate(&self, cache: &mut CycleCache, carrier: &Carrier, request: &Request) -> f64 {
        if let Some(rate) = cache.change_rate(request.id, &carrier.id) {
            return rate;
        }
        let epsilon = self.config.minimum_duration_epsilon;
        let rate = self
            .buffer_choices(cache, carrier, request)
            .iter()
            .map(|choice| throughput(request.multiplier, choice.quantity, choice.duration, epsilon))
            .reduce(f64::max)
            .unwrap_or(0.0);
        trace!(carrier = %carrier.id, request = %request.id, rate, "resource change rate");
        cache.store_change_rate(request.id, &carrier.id, rate);
        rate
    }

    /// Requests ordered by descending rate for `carrier` (ties keep registration order)
    pub fn carrier_preferences(&self, cache: &mut CycleCache, carrier: &Carrier) -> Vec<RequestId> {
        let mut scored: Vec<(f64, RequestId)> = self
            .registry
            .requests()
            .iter()
            .map(|request| (self.resource_change_rate(cache, carrier, request), request.id))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, id)| id).collect()
    }

    /// Carriers ordered by descending rate for `request` (ties keep roster order)
    pub fn request_preferences(&self, cache: &mut CycleCache, request: &Request, carriers: &[&Carrier]) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = carriers
            .iter()
            .map(|carrier| (self.resource_change_rate(cache, carrier, request), carrier.id.as_str()))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, id)| id.to_string()).collect()
    }
}
