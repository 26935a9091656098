//! Error types
//!
//! Request registration never fails from the caller's point of view: a
//! `RequestError` is logged at the registry boundary and the request is
//! dropped or its amount resolves to 0. Only construction-time problems
//! (bad configuration, malformed scenario input) are returned as errors.

use thiserror::Error;

/// Reasons a request could not be registered as asked
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("'all' resource type can only be used for output requests (target {target})")]
    AllResourceOnInput { target: String },

    #[error("'all' resource type needs a store-like target, {target} holds several resources")]
    AllResourceOnNonStore { target: String },

    #[error("{target} is in domain {target_domain}, outside {domain}")]
    OutOfDomain {
        target: String,
        target_domain: String,
        domain: String,
    },

    #[error("{target} holds loose resources and cannot take input")]
    InputToLooseTarget { target: String },

    #[error("could not determine {direction} amount of {resource} for {target}")]
    UnresolvedAmount {
        target: String,
        resource: String,
        direction: &'static str,
    },

    #[error("{target} holds {amount}, below the pickup threshold {threshold}")]
    BelowPickupThreshold {
        target: String,
        amount: i64,
        threshold: i64,
    },
}

/// Configuration validation error
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("heuristic_multiplier must be positive and finite, got {0}")]
    InvalidHeuristicMultiplier(f64),

    #[error("minimum_duration_epsilon must be positive and finite, got {0}")]
    InvalidDurationEpsilon(f64),

    #[error("{field} must not be negative, got {value}")]
    NegativeThreshold { field: &'static str, value: i64 },

    #[error("invalid config JSON: {0}")]
    Parse(String),
}

/// Errors raised while loading or running a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
