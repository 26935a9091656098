//! PyO3 bindings
//!
//! Python drives whole cycles through JSON scenarios; see `scenario` for the
//! document format.
//!
//! # Example (from Python)
//!
//! ```python
//! from logistics_network_core import plan_cycle
//!
//! report = json.loads(plan_cycle(json.dumps(scenario)))
//! print(report["assignments"])
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::scenario::Scenario;

fn load(scenario_json: &str) -> PyResult<Scenario> {
    Scenario::from_json(scenario_json).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Run one cycle and return the cycle report as JSON
#[pyfunction]
pub fn plan_cycle(scenario_json: &str) -> PyResult<String> {
    let report = load(scenario_json)?
        .run()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    report
        .to_json_pretty()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Run one cycle and return the human-readable request and matching tables
#[pyfunction]
pub fn summarize_cycle(scenario_json: &str) -> PyResult<String> {
    let scenario = load(scenario_json)?;
    let mut network = scenario
        .build_network()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let mut out = network.summarize(&scenario.world);
    out.push_str(&network.summarize_matching(&scenario.world));
    Ok(out)
}
