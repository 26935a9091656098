//! Logistics network
//!
//! Partners resource requests with carriers once per cycle. The cycle has two
//! phases:
//!
//! ```text
//! 1. Build: consumers register input/output requests
//! 2. Match: on first read, every carrier/request pair is scored and a
//!    stable matching is computed and memoized
//! ```
//!
//! `refresh` starts the next cycle from nothing. Between the two phases the
//! only outside mutation is `invalidate_cache`, called after the consumer
//! commits a carrier to a request.
//!
//! # Example
//!
//! ```rust
//! use logistics_network_core::{
//!     Carrier, Colony, LogisticsNetwork, Position, RequestOptions, ResourceType, Target,
//! };
//!
//! let spawn = Target::single("spawn", "W1N1", Position::new(5, 0), ResourceType::energy(), 220, 300);
//! let world = Colony::new("W1N1")
//!     .with_target(spawn.clone())
//!     .with_carrier(Carrier::new("hauler", Position::new(0, 0), 100)
//!         .with_carry(logistics_network_core::Store::from_pairs([("energy", 100)])));
//!
//! let mut network = LogisticsNetwork::with_defaults("W1N1");
//! let id = network.request_input(&spawn, RequestOptions::new()).unwrap();
//! assert_eq!(network.request(id).unwrap().amount, 80);
//!
//! let matching = network.compute_matching(&world);
//! assert_eq!(matching.request_for("hauler"), Some(id));
//! ```

pub mod cache;
pub mod diagnostics;
pub mod prediction;
pub mod rate;
pub mod registry;
pub mod routes;

use crate::config::NetworkConfig;
use crate::error::{ConfigError, RequestError};
use crate::matching::stable_match;
use crate::models::{Cargo, Carrier, Request, RequestId, RequestOptions, ResourceSelector, Target};
use crate::world::LogisticsWorld;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

pub use cache::{Availability, CycleCache};
pub use registry::RequestRegistry;
pub use routes::RouteChoice;

/// Read-only view used to score pairs
///
/// Borrows the world, configuration and registry for one computation; the
/// cache is passed in explicitly by the owning network.
pub struct Planner<'a, W: LogisticsWorld + ?Sized> {
    pub world: &'a W,
    pub config: &'a NetworkConfig,
    pub registry: &'a RequestRegistry,
}

impl<'a, W: LogisticsWorld + ?Sized> Planner<'a, W> {
    pub fn new(world: &'a W, config: &'a NetworkConfig, registry: &'a RequestRegistry) -> Self {
        Self {
            world,
            config,
            registry,
        }
    }

    /// Carriers large enough to take part in matching, in roster order
    pub fn participants(&self) -> Vec<&'a Carrier> {
        self.world
            .carriers()
            .iter()
            .filter(|carrier| carrier.capacity >= self.config.min_capacity_to_participate)
            .collect()
    }

    /// Stable matching of participating carriers to registered requests
    pub fn stable_matching(&self, cache: &mut CycleCache) -> Matching {
        let carriers = self.participants();

        let carrier_prefs: Vec<(String, Vec<RequestId>)> = carriers
            .iter()
            .map(|carrier| (carrier.id.clone(), self.carrier_preferences(cache, carrier)))
            .collect();
        let request_prefs: Vec<(RequestId, Vec<String>)> = self
            .registry
            .requests()
            .iter()
            .map(|request| (request.id, self.request_preferences(cache, request, &carriers)))
            .collect();

        let assignments = stable_match(&carrier_prefs, &request_prefs);
        let unmatched = carriers
            .iter()
            .filter(|carrier| !assignments.contains_key(&carrier.id))
            .map(|carrier| carrier.id.clone())
            .collect();
        Matching {
            assignments,
            unmatched_carriers: unmatched,
        }
    }
}

/// Result of one cycle's stable matching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    /// Carrier id → assigned request
    pub assignments: BTreeMap<String, RequestId>,

    /// Participating carriers left without a request, in roster order
    pub unmatched_carriers: Vec<String>,
}

impl Matching {
    pub fn request_for(&self, carrier: &str) -> Option<RequestId> {
        self.assignments.get(carrier).copied()
    }

    pub fn matched_requests(&self) -> BTreeSet<RequestId> {
        self.assignments.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Per-domain logistics network
///
/// Owns the cycle's requests, cache and memoized matching. Carriers, targets
/// and buffers are borrowed from a `LogisticsWorld` on each call.
#[derive(Debug, Clone)]
pub struct LogisticsNetwork {
    domain: String,
    config: NetworkConfig,
    registry: RequestRegistry,
    cache: CycleCache,
    matching: Option<Matching>,
}

impl LogisticsNetwork {
    /// Create a network for `domain`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate.
    pub fn new(domain: impl Into<String>, config: NetworkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            domain: domain.into(),
            config,
            registry: RequestRegistry::new(),
            cache: CycleCache::new(),
            matching: None,
        })
    }

    pub fn with_defaults(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            config: NetworkConfig::default(),
            registry: RequestRegistry::new(),
            cache: CycleCache::new(),
            matching: None,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Discard all per-cycle state
    pub fn refresh(&mut self) {
        self.registry.clear();
        self.cache.clear();
        self.matching = None;
    }

    pub fn requests(&self) -> &[Request] {
        self.registry.requests()
    }

    pub fn request(&self, id: RequestId) -> Option<&Request> {
        self.registry.get(id)
    }

    /// Latest request registered for a target
    pub fn request_for_target(&self, target_ref: &str) -> Option<&Request> {
        self.registry.for_target(target_ref)
    }

    /// Request resources to be deposited into `target`
    ///
    /// Returns `None` (and logs) when the request is rejected.
    pub fn request_input(&mut self, target: &Target, opts: RequestOptions) -> Option<RequestId> {
        let result = self.registry.register_input(&self.domain, target, opts);
        self.finish_registration("input", target, result)
    }

    /// Request resources to be withdrawn from `target`
    pub fn request_output(&mut self, target: &Target, opts: RequestOptions) -> Option<RequestId> {
        let result = self.registry.register_output(&self.config, target, opts);
        self.finish_registration("output", target, result)
    }

    /// One output request per non-energy resource held by `target`
    pub fn request_output_minerals(&mut self, target: &Target, opts: RequestOptions) -> Vec<RequestId> {
        RequestRegistry::minerals_of(target)
            .into_iter()
            .filter_map(|resource| {
                let opts = opts.clone().resource(ResourceSelector::Single(resource));
                self.request_output(target, opts)
            })
            .collect()
    }

    fn finish_registration(
        &mut self,
        direction: &str,
        target: &Target,
        result: Result<registry::Registered, RequestError>,
    ) -> Option<RequestId> {
        match result {
            Ok(registered) => {
                if let Some(warning) = registered.warning {
                    warn!(target = %target.id, "{}; amount defaults to 0", warning);
                }
                if self.matching.is_some() {
                    warn!(target = %target.id, "request registered after matching was computed");
                }
                if let Some(request) = self.registry.get(registered.id) {
                    debug!(
                        id = %request.id,
                        target = %request.target,
                        resource = %request.resource,
                        amount = request.amount,
                        "registered {} request",
                        direction
                    );
                }
                Some(registered.id)
            }
            Err(RequestError::BelowPickupThreshold { amount, threshold, .. }) => {
                debug!(target = %target.id, amount, threshold, "loose resources not worth collecting");
                None
            }
            Err(e) => {
                warn!(target = %target.id, "dropping {} request: {}", direction, e);
                None
            }
        }
    }

    /// Stable matching for this cycle, computed on first call
    pub fn compute_matching<W: LogisticsWorld + ?Sized>(&mut self, world: &W) -> &Matching {
        if self.matching.is_none() {
            let planner = Planner::new(world, &self.config, &self.registry);
            let matching = planner.stable_matching(&mut self.cache);
            info!(
                domain = %self.domain,
                requests = self.registry.len(),
                matched = matching.len(),
                unmatched_carriers = matching.unmatched_carriers.len(),
                "computed stable matching"
            );
            self.matching = Some(matching);
        }
        self.matching.get_or_insert_with(Matching::default)
    }

    /// Memoized matching, if already computed this cycle
    pub fn cached_matching(&self) -> Option<&Matching> {
        self.matching.as_ref()
    }

    /// Forget cached predictions for `carrier` after it was committed to `request`
    pub fn invalidate_cache(&mut self, carrier: &str, request: RequestId) {
        debug!(carrier, request = %request, "invalidating carrier cache");
        self.cache.invalidate_carrier(carrier);
    }

    pub fn next_availability<W: LogisticsWorld + ?Sized>(&mut self, world: &W, carrier: &Carrier) -> Availability {
        Planner::new(world, &self.config, &self.registry).next_availability(&mut self.cache, carrier)
    }

    pub fn predicted_carrier_cargo<W: LogisticsWorld + ?Sized>(&mut self, world: &W, carrier: &Carrier) -> Cargo {
        Planner::new(world, &self.config, &self.registry).predicted_carrier_cargo(&mut self.cache, carrier)
    }

    /// `None` if `request` is not registered this cycle
    pub fn predicted_request_amount<W: LogisticsWorld + ?Sized>(
        &mut self,
        world: &W,
        carrier: &Carrier,
        request: RequestId,
    ) -> Option<f64> {
        let request = self.registry.get(request)?;
        Some(Planner::new(world, &self.config, &self.registry).predicted_request_amount(
            &mut self.cache,
            carrier,
            request,
            None,
        ))
    }

    pub fn buffer_choices<W: LogisticsWorld + ?Sized>(
        &mut self,
        world: &W,
        carrier: &Carrier,
        request: RequestId,
    ) -> Vec<RouteChoice> {
        let Some(request) = self.registry.get(request) else {
            return Vec::new();
        };
        Planner::new(world, &self.config, &self.registry).buffer_choices(&mut self.cache, carrier, request)
    }

    /// 0 if `request` is not registered this cycle
    pub fn resource_change_rate<W: LogisticsWorld + ?Sized>(
        &mut self,
        world: &W,
        carrier: &Carrier,
        request: RequestId,
    ) -> f64 {
        let Some(request) = self.registry.get(request) else {
            return 0.0;
        };
        Planner::new(world, &self.config, &self.registry).resource_change_rate(&mut self.cache, carrier, request)
    }
}
