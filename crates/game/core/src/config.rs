/// Game configuration constants and tunable parameters.
///
/// Compile-time constants fix the formulas; runtime fields are the knobs a
/// content file may override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of inventory slots before the most-used item is evicted.
    pub inventory_capacity: usize,
    /// Number of skills that can be remembered before one is forgotten.
    pub skill_capacity: usize,
    /// Resistance gained by every enemy each time the favourite attack is recomputed.
    pub adaptation_rate: f64,
    /// Ceiling for any enemy resistance.
    pub max_resistance: f64,
}

impl GameConfig {
    // ===== skill formula =====
    pub const MASTERY_PER_USE: u8 = 2;
    pub const MAX_MASTERY: u8 = 100;
    pub const MIN_EFFECTIVENESS: f64 = 10.0;
    pub const MAX_USAGE_PENALTY: f64 = 50.0;
    pub const DEFAULT_SKILL_COOLDOWN_MS: u64 = 1000;
    pub const DEFAULT_SKILL_ENERGY_COST: u32 = 10;

    // ===== resource depletion =====
    /// Cumulative uses after which a resource reads as fully depleted.
    pub const USES_FOR_FULL_DEPLETION: u32 = 10;
    pub const MAX_DEPLETION: u32 = 100;
    /// Depletion points rolled back by a single regeneration, whatever its amount.
    pub const REGENERATION_RECOVERY: u32 = 10;

    // ===== enemy defaults =====
    pub const DEFAULT_ENEMY_HEALTH: f64 = 100.0;
    pub const DEFAULT_ENEMY_DAMAGE: f64 = 10.0;
    pub const DEFAULT_ENEMY_SPEED: f64 = 100.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 3;
    pub const DEFAULT_SKILL_CAPACITY: usize = 4;
    pub const DEFAULT_ADAPTATION_RATE: f64 = 0.05;
    pub const DEFAULT_MAX_RESISTANCE: f64 = 0.8;

    pub fn new() -> Self {
        Self {
            inventory_capacity: Self::DEFAULT_INVENTORY_CAPACITY,
            skill_capacity: Self::DEFAULT_SKILL_CAPACITY,
            adaptation_rate: Self::DEFAULT_ADAPTATION_RATE,
            max_resistance: Self::DEFAULT_MAX_RESISTANCE,
        }
    }

    pub fn with_capacities(inventory_capacity: usize, skill_capacity: usize) -> Self {
        Self {
            inventory_capacity,
            skill_capacity,
            ..Self::new()
        }
    }

    /// Checks every runtime field against the bounds the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, capacity) in [
            ("inventory_capacity", self.inventory_capacity),
            ("skill_capacity", self.skill_capacity),
        ] {
            if capacity == 0 {
                return Err(ConfigError::CapacityOutOfRange { field, capacity });
            }
        }

        Self::validate_adaptation(self.adaptation_rate, self.max_resistance)
    }

    /// Both adaptation knobs must be ratios in `[0, 1]`.
    pub fn validate_adaptation(
        adaptation_rate: f64,
        max_resistance: f64,
    ) -> Result<(), ConfigError> {
        for (field, value) in [
            ("adaptation_rate", adaptation_rate),
            ("max_resistance", max_resistance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RatioOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be at least 1, got {capacity}")]
    CapacityOutOfRange { field: &'static str, capacity: usize },

    #[error("{field} must be within [0, 1], got {value}")]
    RatioOutOfRange { field: &'static str, value: f64 },
}

impl crate::error::GameError for ConfigError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CapacityOutOfRange { .. } => "CONFIG_CAPACITY_OUT_OF_RANGE",
            Self::RatioOutOfRange { .. } => "CONFIG_RATIO_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.inventory_capacity, 3);
        assert_eq!(config.skill_capacity, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = GameConfig::with_capacities(0, 4);
        assert_eq!(
            config.validate(),
            Err(ConfigError::CapacityOutOfRange {
                field: "inventory_capacity",
                capacity: 0,
            })
        );
    }

    #[test]
    fn large_capacities_are_valid() {
        assert!(GameConfig::with_capacities(64, 128).validate().is_ok());
    }

    #[test]
    fn resistance_ceiling_above_one_is_rejected() {
        let config = GameConfig {
            max_resistance: 1.5,
            ..GameConfig::new()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RatioOutOfRange {
                field: "max_resistance",
                ..
            })
        ));
    }

    #[test]
    fn negative_or_nan_adaptation_rate_is_rejected() {
        assert!(matches!(
            GameConfig::validate_adaptation(-0.05, 0.8),
            Err(ConfigError::RatioOutOfRange {
                field: "adaptation_rate",
                ..
            })
        ));
        assert!(GameConfig::validate_adaptation(f64::NAN, 0.8).is_err());
        assert!(GameConfig::validate_adaptation(0.0, 1.0).is_ok());
    }
}
