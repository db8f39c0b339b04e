use crate::config::EscapeConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EscapeAttempt {
    pub success: bool,
    pub rate: f64,
}

/// Flee probability with the standard tuning.
/// Formula: rate = 0.5 + (my_speed - enemy_speed) / 100 + attempts * 0.1, clamped to [0.1, 0.9].
/// `attempts` counts earlier tries in the same battle.
pub fn calculate_escape_rate(my_speed: u16, enemy_speed: u16, attempts: u32) -> f64 {
    escape_rate_with(&EscapeConfig::default(), my_speed, enemy_speed, attempts)
}

pub fn escape_rate_with(
    config: &EscapeConfig,
    my_speed: u16,
    enemy_speed: u16,
    attempts: u32,
) -> f64 {
    let speed_diff = my_speed as f64 - enemy_speed as f64;
    let rate = config.base_rate
        + speed_diff / config.speed_divisor
        + attempts as f64 * config.attempt_bonus;
    rate.clamp(config.min_rate, config.max_rate)
}

/// Roll an escape. `random` defaults to a fresh uniform draw; success iff roll < rate.
pub fn attempt_escape(
    my_speed: u16,
    enemy_speed: u16,
    attempts: u32,
    random: Option<f64>,
) -> EscapeAttempt {
    let roll = random.unwrap_or_else(rand::random::<f64>);
    attempt_escape_with(&EscapeConfig::default(), my_speed, enemy_speed, attempts, roll)
}

pub fn attempt_escape_with(
    config: &EscapeConfig,
    my_speed: u16,
    enemy_speed: u16,
    attempts: u32,
    roll: f64,
) -> EscapeAttempt {
    let rate = escape_rate_with(config, my_speed, enemy_speed, attempts);
    EscapeAttempt {
        success: roll < rate,
        rate,
    }
}
