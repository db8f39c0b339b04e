use crate::config::CaptureConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureAttempt {
    pub success: bool,
    pub rate: f64,
}

/// Capture probability with the standard tuning.
/// Formula: rate = 0.1 + (1 - hp/max_hp) * 0.4 + item_bonus / 100, clamped to [0.05, 0.9].
/// An item bonus of 100 or more always captures.
pub fn calculate_capture_rate(current_hp: u16, max_hp: u16, item_bonus: u16) -> f64 {
    capture_rate_with(&CaptureConfig::default(), current_hp, max_hp, item_bonus)
}

pub fn capture_rate_with(
    config: &CaptureConfig,
    current_hp: u16,
    max_hp: u16,
    item_bonus: u16,
) -> f64 {
    if item_bonus >= config.guaranteed_bonus {
        return 1.0;
    }

    // A zero max HP can only come from a malformed snapshot; treat it as full health.
    let hp_ratio = if max_hp == 0 {
        1.0
    } else {
        (current_hp as f64 / max_hp as f64).clamp(0.0, 1.0)
    };

    let rate = config.base_rate + (1.0 - hp_ratio) * config.hp_weight + item_bonus as f64 / 100.0;
    rate.clamp(config.min_rate, config.max_rate)
}

/// Roll a capture. `random` defaults to a fresh uniform draw; success iff roll < rate.
pub fn attempt_capture(
    current_hp: u16,
    max_hp: u16,
    item_bonus: u16,
    random: Option<f64>,
) -> CaptureAttempt {
    let roll = random.unwrap_or_else(rand::random::<f64>);
    attempt_capture_with(&CaptureConfig::default(), current_hp, max_hp, item_bonus, roll)
}

pub fn attempt_capture_with(
    config: &CaptureConfig,
    current_hp: u16,
    max_hp: u16,
    item_bonus: u16,
    roll: f64,
) -> CaptureAttempt {
    let rate = capture_rate_with(config, current_hp, max_hp, item_bonus);
    CaptureAttempt {
        success: roll < rate,
        rate,
    }
}

/// Get a descriptive capture chance category for display purposes
pub fn get_capture_rate_description(rate: f64) -> &'static str {
    match rate {
        r if r >= 1.0 => "Guaranteed",
        r if r >= 0.7 => "Very Good",
        r if r >= 0.5 => "Good",
        r if r >= 0.3 => "Fair",
        r if r >= 0.15 => "Poor",
        _ => "Very Poor",
    }
}
