//! Single-attack damage resolution.

use crate::config::DamageConfig;
use schema::GhostType;
use serde::{Deserialize, Serialize};

/// Everything the damage formula reads about one attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageParams {
    pub move_power: u8,
    pub move_type: GhostType,
    pub attacker_attack: u16,
    pub attacker_type: GhostType,
    pub attacker_level: u8,
    pub defender_defense: u16,
    pub defender_type: GhostType,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub damage: u16,
    pub is_critical: bool,
    pub effectiveness: f64,
}

/// Calculate damage with the standard tuning. `critical_roll` defaults to a
/// fresh uniform draw.
pub fn calculate_damage(params: &DamageParams, critical_roll: Option<f64>) -> DamageResult {
    calculate_damage_with(&DamageConfig::default(), params, critical_roll)
}

/// Floors after every multiplicative step, in this order:
/// base formula, STAB, type effectiveness, critical hit, then a floor of 1.
/// A 0x matchup short-circuits to zero damage and can never be critical.
pub fn calculate_damage_with(
    config: &DamageConfig,
    params: &DamageParams,
    critical_roll: Option<f64>,
) -> DamageResult {
    let effectiveness = GhostType::type_effectiveness(params.move_type, params.defender_type);
    if effectiveness == 0.0 {
        return DamageResult {
            damage: 0,
            is_critical: false,
            effectiveness,
        };
    }

    let level = params.attacker_level as f64;
    let power = params.move_power as f64;
    let attack = params.attacker_attack as f64;
    let defense = params.defender_defense.max(1) as f64;

    let base = (((2.0 * level / 5.0 + 2.0) * power * attack / defense) / 50.0 + 2.0).floor();

    let mut damage = if params.move_type == params.attacker_type {
        (base * config.stab_multiplier).floor()
    } else {
        base
    };

    damage = (damage * effectiveness).floor();

    let roll = critical_roll.unwrap_or_else(rand::random::<f64>);
    let is_critical = roll < config.critical_chance;
    if is_critical {
        damage = (damage * config.critical_multiplier).floor();
    }

    DamageResult {
        damage: damage.clamp(1.0, u16::MAX as f64) as u16,
        is_critical,
        effectiveness,
    }
}
