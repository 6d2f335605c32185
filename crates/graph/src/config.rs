use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Tuning knobs for the ranking pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Probability of following an edge instead of teleporting (0 < d < 1)
    pub damping_factor: f64,

    /// Fixed number of synchronous ranking rounds
    pub iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 500,
        }
    }
}

impl EngineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.damping_factor > 0.0 && self.damping_factor < 1.0) {
            return Err(GraphError::invalid_config(format!(
                "damping_factor ({}) must be within (0, 1)",
                self.damping_factor
            )));
        }

        if self.iterations == 0 {
            return Err(GraphError::invalid_config("iterations must be > 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.damping_factor, 0.85);
        assert_eq!(config.iterations, 500);
    }

    #[test]
    fn rejects_out_of_range_damping() {
        for damping_factor in [0.0, 1.0, -0.2, f64::NAN] {
            let config = EngineConfig {
                damping_factor,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted {damping_factor}");
        }
    }

    #[test]
    fn rejects_zero_iterations() {
        let config = EngineConfig {
            iterations: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfig(_))
        ));
    }
}
