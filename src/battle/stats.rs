use crate::battle::state::{BattleGhostState, StatType, MAX_STAT_STAGE, MIN_STAT_STAGE};

/// Calculate effective attack including stat stages
pub fn effective_attack(ghost: &BattleGhostState) -> u16 {
    effective_stat(ghost, StatType::Attack)
}

/// Calculate effective defense including stat stages
pub fn effective_defense(ghost: &BattleGhostState) -> u16 {
    effective_stat(ghost, StatType::Defense)
}

/// Calculate effective speed including stat stages
pub fn effective_speed(ghost: &BattleGhostState) -> u16 {
    effective_stat(ghost, StatType::Speed)
}

fn effective_stat(ghost: &BattleGhostState, stat: StatType) -> u16 {
    let base = match stat {
        StatType::Attack => ghost.ghost.stats.attack,
        StatType::Defense => ghost.ghost.stats.defense,
        StatType::Speed => ghost.ghost.stats.speed,
    };
    apply_stat_stage_multiplier(base, ghost.stat_modifiers.get(stat))
}

/// Apply stat stage multipliers
/// Stages range from -6 to +6
/// Negative stages: (2 / (2 + |stage|))
/// Positive stages: ((2 + stage) / 2)
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    let clamped_stage = stage.clamp(MIN_STAT_STAGE, MAX_STAT_STAGE);

    if clamped_stage == 0 {
        return base_stat;
    }

    let multiplier = if clamped_stage < 0 {
        2.0 / (2.0 + (-clamped_stage) as f64)
    } else {
        (2.0 + clamped_stage as f64) / 2.0
    };

    ((base_stat as f64) * multiplier).round() as u16
}
