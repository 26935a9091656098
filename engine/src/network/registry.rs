//! Request registry
//!
//! Accumulates the input and output requests of one cycle. Requests get
//! insertion-ordered ids; the target index maps a target reference to the most
//! recent request registered for it.
//!
//! # Amount resolution
//!
//! When a caller does not give an explicit amount, it is derived from the
//! target's capability shape:
//!
//! | Shape            | Input                          | Output                     |
//! |------------------|--------------------------------|----------------------------|
//! | Store            | capacity − total held          | held of type (or total)    |
//! | SingleResource   | capacity − amount (own type)   | amount (own type)          |
//! | MultiCapacity    | slot capacity − slot amount    | slot amount                |
//!
//! Anything else is unresolvable and yields 0.

use crate::config::NetworkConfig;
use crate::error::RequestError;
use crate::models::{Request, RequestId, RequestOptions, ResourceSelector, ResourceType, Target};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct RequestRegistry {
    requests: Vec<Request>,
    by_target: HashMap<String, RequestId>,
}

/// Outcome of a registration that went through, possibly with a degraded amount
#[derive(Debug)]
pub struct Registered {
    pub id: RequestId,
    pub warning: Option<RequestError>,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn get(&self, id: RequestId) -> Option<&Request> {
        self.requests.get(id.0)
    }

    /// Latest request registered for `target_ref`
    pub fn for_target(&self, target_ref: &str) -> Option<&Request> {
        self.by_target.get(target_ref).and_then(|&id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
        self.by_target.clear();
    }

    fn push(&mut self, target: &Target, amount: i64, resource: ResourceSelector, d_amount_dt: f64, multiplier: f64) -> RequestId {
        let id = RequestId(self.requests.len());
        self.requests.push(Request {
            id,
            target: target.id.clone(),
            pos: target.pos,
            amount,
            resource,
            d_amount_dt,
            multiplier,
        });
        self.by_target.insert(target.id.clone(), id);
        id
    }

    /// Register a deficit at `target`
    pub fn register_input(&mut self, domain: &str, target: &Target, opts: RequestOptions) -> Result<Registered, RequestError> {
        if target.domain != domain {
            return Err(RequestError::OutOfDomain {
                target: target.id.clone(),
                target_domain: target.domain.clone(),
                domain: domain.to_string(),
            });
        }
        let resource = match opts.resource.unwrap_or_default() {
            ResourceSelector::All => {
                return Err(RequestError::AllResourceOnInput {
                    target: target.id.clone(),
                })
            }
            ResourceSelector::Single(resource) => resource,
        };
        if target.loose {
            return Err(RequestError::InputToLooseTarget {
                target: target.id.clone(),
            });
        }

        let selector = ResourceSelector::Single(resource.clone());
        let (amount, warning) = match explicit_amount(target, &selector, opts.amount) {
            Some(amount) => (amount, None),
            None => match input_amount(target, &resource) {
                Ok(amount) => (amount, None),
                Err(e) => (0, Some(e)),
            },
        };
        let id = self.push(
            target,
            amount,
            selector,
            opts.d_amount_dt.unwrap_or(0.0),
            opts.multiplier.unwrap_or(1.0),
        );
        Ok(Registered { id, warning })
    }

    /// Register a surplus at `target`; amount and rate are stored negated
    pub fn register_output(
        &mut self,
        config: &NetworkConfig,
        target: &Target,
        opts: RequestOptions,
    ) -> Result<Registered, RequestError> {
        let mut resource = opts.resource.unwrap_or_default();
        if resource.is_all() {
            let holdings = target.holdings();
            if let Some(sole) = holdings.sole_resource() {
                resource = ResourceSelector::Single(sole.clone());
            } else if holdings.is_empty() {
                resource = ResourceSelector::energy();
            }
        }

        let (amount, warning) = match explicit_amount(target, &resource, opts.amount) {
            Some(amount) => (amount, None),
            None => match output_amount(target, &resource) {
                Ok(amount) => (amount, None),
                Err(e) => (0, Some(e)),
            },
        };
        if target.loose && amount < config.min_free_resource_worth_collecting {
            return Err(RequestError::BelowPickupThreshold {
                target: target.id.clone(),
                amount,
                threshold: config.min_free_resource_worth_collecting,
            });
        }

        let id = self.push(
            target,
            -amount,
            resource,
            opts.d_amount_dt.map_or(0.0, |rate| -rate),
            opts.multiplier.unwrap_or(1.0),
        );
        Ok(Registered { id, warning })
    }

    /// Non-energy resources `target` holds in positive quantity
    pub fn minerals_of(target: &Target) -> Vec<ResourceType> {
        target
            .holdings()
            .iter()
            .filter(|(resource, _)| !resource.is_primary())
            .map(|(resource, _)| resource.clone())
            .collect()
    }
}

/// A caller-supplied amount, clamped to what `target` can hold
///
/// Non-positive amounts count as unset and are resolved from the target.
fn explicit_amount(target: &Target, selector: &ResourceSelector, amount: Option<i64>) -> Option<i64> {
    amount
        .filter(|&amount| amount > 0)
        .map(|amount| amount.min(target.capacity_for_selector(selector).max(0)))
}

/// Room left at `target` for `resource`, floored at 0
pub fn input_amount(target: &Target, resource: &ResourceType) -> Result<i64, RequestError> {
    if target.loose {
        return Err(unresolved(target, resource.as_str(), "input"));
    }
    if target.is_store_like() {
        return Ok((target.total_capacity() - target.holdings().total()).max(0));
    }
    match (target.capacity_for(resource), target.amount_of(resource)) {
        (Some(capacity), Some(amount)) => Ok((capacity - amount).max(0)),
        _ => Err(unresolved(target, resource.as_str(), "input")),
    }
}

/// Amount of `selector` currently held at `target`
pub fn output_amount(target: &Target, selector: &ResourceSelector) -> Result<i64, RequestError> {
    match selector {
        ResourceSelector::All => {
            if target.is_store_like() {
                Ok(target.holdings().total())
            } else {
                Err(RequestError::AllResourceOnNonStore {
                    target: target.id.clone(),
                })
            }
        }
        ResourceSelector::Single(resource) => target
            .amount_of(resource)
            .map(|amount| amount.max(0))
            .ok_or_else(|| unresolved(target, resource.as_str(), "output")),
    }
}

fn unresolved(target: &Target, resource: &str, direction: &'static str) -> RequestError {
    RequestError::UnresolvedAmount {
        target: target.id.clone(),
        resource: resource.to_string(),
        direction,
    }
}
