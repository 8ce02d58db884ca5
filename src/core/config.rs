//! Physiology configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use crate::core::error::{BodyError, Result};

/// Configuration for the health and physiology systems
///
/// These values have been tuned against the breathing and circulation
/// pacing. Changing them shifts how quickly creatures suffocate or recover.
#[derive(Debug, Clone)]
pub struct HealthConfig {
    // === RESPIRATION ===
    /// Breaths per minute for a healthy creature
    ///
    /// At 60, one breath occurs every second of simulated time.
    /// A frequency of 0 disables breathing entirely (interval becomes
    /// effectively infinite).
    pub breath_frequency: f32,

    /// Oxygen added to the circulatory reservoir per breath
    ///
    /// At 0.4 per breath with a 10.0 buffer cap, a fully depleted
    /// reservoir refills in 25 breaths (~25 seconds at default frequency).
    pub oxygen_intake: f32,

    /// Maximum oxygen the circulatory reservoir will accept
    ///
    /// Breaths taken while the reservoir is above this level take in
    /// nothing; the breath still happens (chest movement, audible cue).
    pub max_oxygen_buffer: f32,

    // === BREATHING CLASSIFICATION ===
    /// Safety margin factor for comfortable breathing
    ///
    /// Breathing is Nice when available oxygen exceeds the summed need
    /// times this factor, Difficult when it merely exceeds the need,
    /// Suffocating otherwise. At 1.5, a creature needing 50 units
    /// breathes comfortably only above 75 available.
    pub safe_oxygen_factor: f32,

    // === DAMAGE ===
    /// Default damage capacity of a body layer
    ///
    /// Layers report destroyed once accumulated damage reaches this.
    /// Circulatory layers override it per part (small parts bleed out
    /// from far less).
    pub default_layer_capacity: f32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            breath_frequency: 60.0,
            oxygen_intake: 0.4,
            max_oxygen_buffer: 10.0,
            safe_oxygen_factor: 1.5,
            default_layer_capacity: 100.0,
        }
    }
}

impl HealthConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.breath_frequency < 0.0 {
            return Err(BodyError::InvalidConfig(format!(
                "breath_frequency ({}) must be >= 0",
                self.breath_frequency
            )));
        }

        if self.oxygen_intake <= 0.0 {
            return Err(BodyError::InvalidConfig(
                "oxygen_intake must be positive".into(),
            ));
        }

        // A factor below 1.0 would classify breathing as Nice while the
        // creature is already short of oxygen
        if self.safe_oxygen_factor < 1.0 {
            return Err(BodyError::InvalidConfig(format!(
                "safe_oxygen_factor ({}) must be >= 1.0",
                self.safe_oxygen_factor
            )));
        }

        if self.default_layer_capacity <= 0.0 {
            return Err(BodyError::InvalidConfig(
                "default_layer_capacity must be positive".into(),
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<HealthConfig> = OnceLock::new();

/// Get the global health config (initializes with defaults if not set)
pub fn config() -> &'static HealthConfig {
    CONFIG.get_or_init(HealthConfig::default)
}

/// Set the global health config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: HealthConfig) -> std::result::Result<(), HealthConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(HealthConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unsafe_oxygen_factor_rejected() {
        let cfg = HealthConfig {
            safe_oxygen_factor: 0.5,
            ..HealthConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(BodyError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_frequency_rejected() {
        let cfg = HealthConfig {
            breath_frequency: -1.0,
            ..HealthConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(BodyError::InvalidConfig(_))));
    }
}
