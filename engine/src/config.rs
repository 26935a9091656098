//! Network configuration
//!
//! Every tunable of the logistics network lives here. All fields have
//! defaults, so a partial JSON document is a valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables of the logistics network
///
/// # Example
/// ```
/// use logistics_network_core::NetworkConfig;
///
/// let config = NetworkConfig::from_json(r#"{"heuristic_multiplier": 1.5}"#).unwrap();
/// assert_eq!(config.heuristic_multiplier, 1.5);
/// assert_eq!(config.minimum_duration_epsilon, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Range × this ≈ path length, except in pathological terrain
    pub heuristic_multiplier: f64,

    /// Carriers smaller than this do not take part in matching
    pub min_capacity_to_participate: i64,

    /// Loose resources below this amount are not worth a pickup request
    pub min_free_resource_worth_collecting: i64,

    /// Floor on route duration when computing throughput
    pub minimum_duration_epsilon: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            heuristic_multiplier: 1.1,
            min_capacity_to_participate: 0,
            min_free_resource_worth_collecting: 200,
            minimum_duration_epsilon: 0.1,
        }
    }
}

impl NetworkConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: NetworkConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.heuristic_multiplier.is_finite() && self.heuristic_multiplier > 0.0) {
            return Err(ConfigError::InvalidHeuristicMultiplier(self.heuristic_multiplier));
        }
        if !(self.minimum_duration_epsilon.is_finite() && self.minimum_duration_epsilon > 0.0) {
            return Err(ConfigError::InvalidDurationEpsilon(self.minimum_duration_epsilon));
        }
        if self.min_capacity_to_participate < 0 {
            return Err(ConfigError::NegativeThreshold {
                field: "min_capacity_to_participate",
                value: self.min_capacity_to_participate,
            });
        }
        if self.min_free_resource_worth_collecting < 0 {
            return Err(ConfigError::NegativeThreshold {
                field: "min_free_resource_worth_collecting",
                value: self.min_free_resource_worth_collecting,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(NetworkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_multiplier() {
        let config = NetworkConfig {
            heuristic_multiplier: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidHeuristicMultiplier(0.0)));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let result = NetworkConfig::from_json(r#"{"min_capacity_to_participate": -1}"#);
        assert!(matches!(
            result,
            Err(ConfigError::NegativeThreshold {
                field: "min_capacity_to_participate",
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(NetworkConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
