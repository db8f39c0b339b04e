//! Tuning knobs for the battle engine.
//!
//! `BattleConfig::default()` reproduces the standard rules exactly. A config
//! file only needs to name the values it overrides; everything else falls
//! back to the defaults.

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_LEVEL: u8 = 100;
pub const DEFAULT_EXP_PER_LEVEL: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    pub critical_chance: f64,
    pub critical_multiplier: f64,
    pub stab_multiplier: f64,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            critical_chance: 1.0 / 16.0,
            critical_multiplier: 1.5,
            stab_multiplier: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub base_rate: f64,
    /// Weight of missing HP (0..1 ratio) in the capture rate.
    pub hp_weight: f64,
    pub min_rate: f64,
    pub max_rate: f64,
    /// Item bonus at or above which a capture is guaranteed.
    pub guaranteed_bonus: u16,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.1,
            hp_weight: 0.4,
            min_rate: 0.05,
            max_rate: 0.9,
            guaranteed_bonus: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeConfig {
    pub base_rate: f64,
    pub speed_divisor: f64,
    /// Added per previous failed attempt in the same battle.
    pub attempt_bonus: f64,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.5,
            speed_divisor: 100.0,
            attempt_bonus: 0.1,
            min_rate: 0.1,
            max_rate: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub max_level: u8,
    pub exp_per_level: u32,
    pub damage: DamageConfig,
    pub capture: CaptureConfig,
    pub escape: EscapeConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            exp_per_level: DEFAULT_EXP_PER_LEVEL,
            damage: DamageConfig::default(),
            capture: CaptureConfig::default(),
            escape: EscapeConfig::default(),
        }
    }
}

impl BattleConfig {
    /// Parse and validate a config from RON text.
    pub fn from_ron_str(text: &str) -> ConfigResult<Self> {
        let config: BattleConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a RON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_level == 0 {
            return Err(invalid("max_level", "must be at least 1".to_string()));
        }
        check_probability("damage.critical_chance", self.damage.critical_chance)?;
        check_positive("damage.critical_multiplier", self.damage.critical_multiplier)?;
        check_positive("damage.stab_multiplier", self.damage.stab_multiplier)?;

        check_probability("capture.base_rate", self.capture.base_rate)?;
        check_range("capture", self.capture.min_rate, self.capture.max_rate)?;

        check_probability("escape.base_rate", self.escape.base_rate)?;
        check_positive("escape.speed_divisor", self.escape.speed_divisor)?;
        check_range("escape", self.escape.min_rate, self.escape.max_rate)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}

fn check_probability(field: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{} is outside 0..=1", value)))
    }
}

fn check_positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{} must be positive", value)))
    }
}

fn check_range(field: &'static str, min: f64, max: f64) -> ConfigResult<()> {
    check_probability(field, min)?;
    check_probability(field, max)?;
    if min > max {
        return Err(invalid(field, format!("min_rate {} exceeds max_rate {}", min, max)));
    }
    Ok(())
}
