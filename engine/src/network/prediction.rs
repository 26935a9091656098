//! Availability and carry prediction
//!
//! Forecasts, for a busy carrier, how many ticks remain until its current
//! commitment is done, where it will be standing, and what it will be
//! carrying at that moment.

use crate::models::{Cargo, Carrier, Position, ResourceSelector};
use crate::network::cache::{Availability, CycleCache};
use crate::network::Planner;
use crate::world::LogisticsWorld;

impl<W: LogisticsWorld + ?Sized> Planner<'_, W> {
    /// Ticks until `carrier` is free and where it will be, memoized per cycle
    pub fn next_availability(&self, cache: &mut CycleCache, carrier: &Carrier) -> Availability {
        if let Some(availability) = cache.availability(&carrier.id) {
            return availability;
        }
        let availability = self.compute_next_availability(carrier);
        cache.store_availability(&carrier.id, availability);
        availability
    }

    fn compute_next_availability(&self, carrier: &Carrier) -> Availability {
        let Some(commitment) = &carrier.commitment else {
            return Availability {
                ticks: 0,
                position: carrier.pos,
            };
        };

        let (mut ticks, mut position, remaining) = match commitment.eta.filter(|&eta| eta > 0) {
            // Known ETA covers the first leg of the manifest
            Some(eta) => match commitment.manifest.split_first() {
                Some((&first, rest)) => (eta, first, rest),
                None => (eta, carrier.pos, &[][..]),
            },
            None => (0, carrier.pos, commitment.manifest.as_slice()),
        };
        for &next in remaining {
            ticks = ticks.saturating_add(self.approximate_path(position, next));
            position = next;
        }
        Availability { ticks, position }
    }

    /// `ceil(heuristic × range)`, the stand-in for a path length
    fn approximate_path(&self, from: Position, to: Position) -> u32 {
        (self.config.heuristic_multiplier * self.world.range(from, to) as f64).ceil() as u32
    }

    /// Cargo `carrier` will hold once its current commitment completes
    pub fn predicted_carrier_cargo(&self, cache: &mut CycleCache, carrier: &Carrier) -> Cargo {
        if let Some(cargo) = cache.predicted_cargo(&carrier.id) {
            return cargo.clone();
        }
        let cargo = self.compute_predicted_cargo(cache, carrier);
        cache.store_predicted_cargo(&carrier.id, cargo.clone());
        cargo
    }

    fn compute_predicted_cargo(&self, cache: &mut CycleCache, carrier: &Carrier) -> Cargo {
        let mut cargo = carrier.carry.to_cargo();
        let Some(request) = carrier.target_ref().and_then(|target| self.registry.for_target(target)) else {
            return cargo;
        };

        let remaining = carrier.free_capacity().max(0) as f64;
        // Carrier does the complement of what the request needs
        let delta = -self.predicted_request_amount(cache, carrier, request, None);

        match &request.resource {
            ResourceSelector::All => {
                let Some(target) = self.world.target(&request.target) else {
                    return cargo;
                };
                let holdings = target.holdings();
                let total = holdings.total() as f64;
                if total <= 0.0 {
                    return cargo;
                }
                for (resource, held) in holdings.iter() {
                    let share = held as f64 / total;
                    let projected = (cargo.get(resource) + delta * share).clamp(0.0, remaining);
                    cargo.set(resource.clone(), projected);
                }
            }
            ResourceSelector::Single(resource) => {
                let projected = (cargo.get(resource) + delta).clamp(0.0, remaining);
                cargo.set(resource.clone(), projected);
            }
        }
        cargo
    }
}
