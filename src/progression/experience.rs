//! Experience awards and the cubic level curve.

use crate::config::{DEFAULT_EXP_PER_LEVEL, DEFAULT_MAX_LEVEL};
use serde::{Deserialize, Serialize};

pub const MAX_LEVEL: u8 = DEFAULT_MAX_LEVEL;

/// Outcome of adding experience to a ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceGain {
    pub new_level: u8,
    pub new_exp: u32,
    pub leveled_up: bool,
    pub levels_gained: u8,
}

/// Experience awarded for defeating a ghost of `defeated_level`.
pub fn calculate_exp_gain(defeated_level: u8) -> u32 {
    calculate_exp_gain_with(defeated_level, DEFAULT_EXP_PER_LEVEL)
}

pub fn calculate_exp_gain_with(defeated_level: u8, exp_per_level: u32) -> u32 {
    defeated_level as u32 * exp_per_level
}

/// Cumulative experience required to reach `level`.
/// Level 1 is free; every other level costs level^3.
pub fn get_exp_for_level(level: u8) -> u32 {
    if level <= 1 {
        0
    } else {
        (level as u32).pow(3)
    }
}

/// Highest level whose threshold `total_exp` meets, capped at `max_level`.
pub fn get_level_from_exp(total_exp: u32, max_level: u8) -> u8 {
    let mut level = 1u8;
    while level < max_level && get_exp_for_level(level + 1) <= total_exp {
        level += 1;
    }
    level
}

/// Add `gained` experience. Experience always accumulates, even at the level
/// cap; the level never decreases and never passes `max_level`.
pub fn add_experience(level: u8, exp: u32, gained: u32, max_level: u8) -> ExperienceGain {
    let new_exp = exp.saturating_add(gained);
    let new_level = get_level_from_exp(new_exp, max_level).max(level);
    let levels_gained = new_level - level;

    ExperienceGain {
        new_level,
        new_exp,
        leveled_up: levels_gained > 0,
        levels_gained,
    }
}
