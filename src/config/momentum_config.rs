//! Momentum thresholds and report display limits.
//!
//! Read from the optional `[momentum]` table of the configuration file.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Momentum configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    // Day-over-day classification
    pub gain_ratio: f64,
    pub loss_ratio: f64,

    // Spike detection
    pub spike_ratio: f64,
    pub baseline_days: u32,

    // Report table sizes
    pub max_gaining: usize,
    pub max_stable: usize,
    pub max_losing: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            gain_ratio: 1.2,
            loss_ratio: 0.8,
            spike_ratio: 3.0,
            baseline_days: 30,
            max_gaining: 10,
            max_stable: 10,
            max_losing: 5,
        }
    }
}

impl MomentumConfig {
    pub fn validate(&self) -> Result<()> {
        if self.gain_ratio.is_nan() || self.gain_ratio < 1.0 {
            bail!("momentum.gain_ratio must be >= 1.0, got {}", self.gain_ratio);
        }
        if self.loss_ratio.is_nan() || self.loss_ratio <= 0.0 || self.loss_ratio > 1.0 {
            bail!(
                "momentum.loss_ratio must be in (0.0, 1.0], got {}",
                self.loss_ratio
            );
        }
        if self.spike_ratio.is_nan() || self.spike_ratio <= 0.0 {
            bail!("momentum.spike_ratio must be > 0.0, got {}", self.spike_ratio);
        }
        if self.baseline_days == 0 {
            bail!("momentum.baseline_days must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_momentum_config_defaults() {
        let config = MomentumConfig::default();
        assert_eq!(config.gain_ratio, 1.2);
        assert_eq!(config.loss_ratio, 0.8);
        assert_eq!(config.spike_ratio, 3.0);
        assert_eq!(config.baseline_days, 30);
        assert_eq!(
            (config.max_gaining, config.max_stable, config.max_losing),
            (10, 10, 5)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let config: MomentumConfig = toml::from_str("spike_ratio = 4.0").unwrap();
        assert_eq!(config.spike_ratio, 4.0);
        assert_eq!(config.gain_ratio, 1.2);
    }

    #[test]
    fn test_invalid_ratios_rejected() {
        let config = MomentumConfig {
            loss_ratio: 1.5,
            ..MomentumConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MomentumConfig {
            gain_ratio: f64::NAN,
            ..MomentumConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
