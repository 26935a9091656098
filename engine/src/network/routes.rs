//! Route evaluation
//!
//! For a (carrier, request) pair, forecast the amount the carrier will find
//! on arrival and enumerate the candidate routes: going straight to the
//! target, or detouring through one buffer first (to pick up what it lacks
//! for an input, or to drop off what is in the way for an output).
//!
//! Only single-buffer detours are considered.

use crate::models::{Carrier, Request, Target};
use crate::network::cache::{Availability, CycleCache};
use crate::network::Planner;
use crate::world::LogisticsWorld;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One way of serving a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteChoice {
    /// Absolute amount of resource moved
    pub quantity: f64,

    /// Ticks needed to execute the route
    pub duration: f64,

    /// Reference of the first stop (the request target itself when direct)
    pub via: String,
}

impl<W: LogisticsWorld + ?Sized> Planner<'_, W> {
    /// Effective request amount `carrier` will see on arrival
    ///
    /// Accounts for the target filling or draining on the way (`d_amount_dt`)
    /// and for other carriers already heading there. Input results are in
    /// `[0, capacity]`, output results in `[-capacity, 0]`.
    pub fn predicted_request_amount(
        &self,
        cache: &mut CycleCache,
        carrier: &Carrier,
        request: &Request,
        availability: Option<Availability>,
    ) -> f64 {
        let Availability { ticks, position } =
            availability.unwrap_or_else(|| self.next_availability(cache, carrier));
        let eta = ticks as f64 + self.config.heuristic_multiplier * self.world.range(position, request.pos) as f64;
        let predicted = request.amount as f64 + request.d_amount_dt * eta;

        let capacity = self
            .world
            .target(&request.target)
            .map(|target| target.capacity_for_selector(&request.resource) as f64);
        let others = self.world.carriers_targeting(&request.target, Some(&carrier.id));

        if request.amount > 0 {
            let predicted = capacity.map_or(predicted, |capacity| predicted.min(capacity));
            let influx: i64 = match request.resource.single() {
                Some(resource) => others.iter().map(|other| other.carry.get(resource)).sum(),
                None => 0,
            };
            (predicted - influx as f64).max(0.0)
        } else {
            let predicted = capacity.map_or(predicted, |capacity| predicted.max(-capacity));
            let outflux: i64 = others.iter().map(|other| other.free_capacity().max(0)).sum();
            (predicted + outflux as f64).min(0.0)
        }
    }

    /// Candidate routes for `carrier` to serve `request`
    pub fn buffer_choices(&self, cache: &mut CycleCache, carrier: &Carrier, request: &Request) -> Vec<RouteChoice> {
        let availability = self.next_availability(cache, carrier);
        let amount = self.predicted_request_amount(cache, carrier, request, Some(availability));
        // Already heading there: what it holds now is what it will arrive with
        let cargo = if carrier.is_targeting(&request.target) {
            carrier.carry.to_cargo()
        } else {
            self.predicted_carrier_cargo(cache, carrier)
        };

        let capacity = carrier.capacity as f64;
        let loaded = cargo.total();
        let mut choices = vec![RouteChoice {
            quantity: 0.0,
            duration: availability.ticks as f64
                + self.config.heuristic_multiplier * self.world.range(availability.position, request.pos) as f64,
            via: request.target.clone(),
        }];

        if amount > 0.0 {
            let Some(resource) = request.resource.single() else {
                warn!(request = %request.id, target = %request.target, "'all' resource type on an input request, no routes");
                return Vec::new();
            };
            let carried = cargo.get(resource).max(0.0);
            choices[0].quantity = amount.min(carried);
            if carried >= amount || loaded >= capacity {
                return choices;
            }
            for buffer in self.detour_buffers(request) {
                let available = buffer.available_for(&request.resource) as f64;
                choices.push(RouteChoice {
                    quantity: amount.min(capacity).min(available).max(0.0),
                    duration: self.detour_duration(availability, buffer, request),
                    via: buffer.id.clone(),
                });
            }
        } else if amount < 0.0 {
            let wanted = -amount;
            let free = (capacity - loaded).max(0.0);
            choices[0].quantity = wanted.min(free);
            if free >= wanted || loaded <= 0.0 {
                return choices;
            }
            for buffer in self.detour_buffers(request) {
                let space = buffer.free_space_for(&request.resource) as f64;
                choices.push(RouteChoice {
                    quantity: wanted.min(capacity).min(space).max(0.0),
                    duration: self.detour_duration(availability, buffer, request),
                    via: buffer.id.clone(),
                });
            }
        } else {
            return Vec::new();
        }
        choices
    }

    fn detour_buffers<'r>(&'r self, request: &'r Request) -> impl Iterator<Item = &'r Target> + 'r {
        self.world
            .buffers()
            .into_iter()
            .filter(move |buffer| buffer.id != request.target)
    }

    fn detour_duration(&self, availability: Availability, buffer: &Target, request: &Request) -> f64 {
        self.config.heuristic_multiplier * self.world.range(availability.position, buffer.pos) as f64
            + self.world.path_distance(buffer.pos, request.pos) as f64
            + availability.ticks as f64
    }
}
