//! Logistics Network Core - Rust Engine
//!
//! Per-cycle assignment of mobile carriers to resource-transfer requests,
//! with deterministic execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Target, Carrier, Request, Store)
//! - **world**: Interface to the simulated world, plus a plain-data snapshot
//! - **network**: Request registry, prediction, route evaluation, scoring
//! - **matching**: Domain-free stable matching (Gale–Shapley)
//! - **report**: Serializable cycle summary with digest
//! - **scenario**: JSON scenario runner
//!
//! # Critical Invariants
//!
//! 1. Positive request amounts are inputs, negative amounts are outputs
//! 2. Every cycle starts from nothing (`refresh`); nothing carries over
//! 3. Same registrations + same world produce the same matching
//! 4. No public cycle operation fails: bad requests are logged and dropped

// Module declarations
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod network;
pub mod report;
pub mod scenario;
pub mod world;

// Re-exports for convenience
pub use config::NetworkConfig;
pub use error::{ConfigError, RequestError, ScenarioError};
pub use models::{
    Cargo, Carrier, Commitment, Position, Request, RequestId, RequestOptions, ResourceSelector, ResourceType, Slot,
    Store, Target, TargetKind,
};
pub use network::{Availability, LogisticsNetwork, Matching, RouteChoice};
pub use report::CycleReport;
pub use scenario::{RequestKind, RequestSpec, Scenario};
pub use world::{Colony, LogisticsWorld, Terrain};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn logistics_network_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::plan_cycle, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::summarize_cycle, m)?)?;
    Ok(())
}
