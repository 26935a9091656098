//! Scenario runner
//!
//! A scenario is a JSON document describing one cycle: the world snapshot,
//! optional configuration overrides, and the requests to register in order.
//!
//! ```json
//! {
//!   "config": { "heuristic_multiplier": 1.1 },
//!   "world": {
//!     "domain": "W1N1",
//!     "targets": [ { "id": "spawn", "domain": "W1N1", "pos": {"x": 5, "y": 0},
//!                    "kind": { "shape": "single_resource", "resource": "energy",
//!                              "amount": 0, "capacity": 300 } } ],
//!     "carriers": [ { "id": "hauler", "pos": {"x": 0, "y": 0}, "capacity": 100,
//!                     "carry": {"energy": 100} } ]
//!   },
//!   "requests": [ { "kind": "input", "target": "spawn" } ]
//! }
//! ```

use crate::config::NetworkConfig;
use crate::error::ScenarioError;
use crate::models::RequestOptions;
use crate::network::LogisticsNetwork;
use crate::report::CycleReport;
use crate::world::{Colony, LogisticsWorld};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Input,
    Output,
    OutputMinerals,
}

/// One registration call, replayed in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    pub kind: RequestKind,
    pub target: String,
    #[serde(flatten)]
    pub options: RequestOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: NetworkConfig,
    pub world: Colony,
    #[serde(default)]
    pub requests: Vec<RequestSpec>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a network for the world's domain and register every request
    ///
    /// Requests naming an unknown target are skipped with a warning.
    pub fn build_network(&self) -> Result<LogisticsNetwork, ScenarioError> {
        let mut network = LogisticsNetwork::new(self.world.domain.clone(), self.config.clone())?;
        self.register(&mut network);
        Ok(network)
    }

    /// Register this scenario's requests into an existing network
    pub fn register(&self, network: &mut LogisticsNetwork) {
        for spec in &self.requests {
            let Some(target) = self.world.target(&spec.target) else {
                warn!(target = %spec.target, "scenario request names an unknown target");
                continue;
            };
            let options = spec.options.clone();
            match spec.kind {
                RequestKind::Input => {
                    network.request_input(target, options);
                }
                RequestKind::Output => {
                    network.request_output(target, options);
                }
                RequestKind::OutputMinerals => {
                    network.request_output_minerals(target, options);
                }
            }
        }
    }

    /// Run one full cycle and report the result
    pub fn run(&self) -> Result<CycleReport, ScenarioError> {
        let mut network = self.build_network()?;
        Ok(network.report(&self.world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_scenario_runs() {
        let json = r#"{
            "world": {
                "domain": "W1N1",
                "targets": [ { "id": "spawn", "domain": "W1N1", "pos": {"x": 5, "y": 0},
                               "kind": { "shape": "single_resource", "resource": "energy",
                                         "amount": 0, "capacity": 300 } } ],
                "carriers": [ { "id": "hauler", "pos": {"x": 0, "y": 0}, "capacity": 100,
                                "carry": {"energy": 100} } ]
            },
            "requests": [ { "kind": "input", "target": "spawn" } ]
        }"#;
        let report = Scenario::from_json(json).unwrap().run().unwrap();
        assert_eq!(report.requests.len(), 1);
        assert_eq!(report.requests[0].amount, 300);
        assert_eq!(report.target_for("hauler"), Some("spawn"));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let scenario = Scenario {
            config: NetworkConfig {
                minimum_duration_epsilon: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(scenario.run(), Err(ScenarioError::Config(_))));
    }

    #[test]
    fn test_unknown_target_is_skipped() {
        let json = r#"{
            "world": { "domain": "W1N1" },
            "requests": [ { "kind": "output", "target": "ghost", "amount": 50 } ]
        }"#;
        let report = Scenario::from_json(json).unwrap().run().unwrap();
        assert!(report.requests.is_empty());
    }
}
