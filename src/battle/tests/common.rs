use crate::battle::engine::BattleEngine;
use crate::battle::state::{BattleGhostState, BattleState, RandomValues, TurnRng};
use crate::ghost::{GhostStats, OwnedGhost, OwnedMove};
use crate::master_data::MasterData;
use crate::progression::get_exp_for_level;

const SAMPLE_DATA: &str = include_str!("../../../data/master_data.ron");

/// The master data shipped in `data/master_data.ron`.
pub fn sample_data() -> MasterData {
    match MasterData::from_ron_str(SAMPLE_DATA) {
        Ok(data) => data,
        Err(err) => panic!("Failed to load sample master data: {}", err),
    }
}

/// A builder for creating test ghost snapshots with fixed, easy-to-follow stats.
///
/// # Example
/// ```ignore
/// let ghost = TestGhostBuilder::new("emberling", 10)
///     .with_stats(50, 50, 60)
///     .with_move("tackle", 35)
///     .with_hp(12)
///     .build();
/// ```
pub struct TestGhostBuilder {
    species_id: String,
    level: u8,
    experience: Option<u32>,
    stats: GhostStats,
    moves: Vec<OwnedMove>,
    current_hp: Option<u16>,
}

impl TestGhostBuilder {
    /// Creates a new builder for a given species and level.
    /// Defaults: 40 max HP, 50 attack, 50 defense, 50 speed, no moves.
    pub fn new(species_id: &str, level: u8) -> Self {
        Self {
            species_id: species_id.to_string(),
            level,
            experience: None,
            stats: GhostStats {
                hp: 40,
                attack: 50,
                defense: 50,
                speed: 50,
            },
            moves: Vec::new(),
            current_hp: None,
        }
    }

    pub fn with_stats(mut self, attack: u16, defense: u16, speed: u16) -> Self {
        self.stats.attack = attack;
        self.stats.defense = defense;
        self.stats.speed = speed;
        self
    }

    pub fn with_max_hp(mut self, max_hp: u16) -> Self {
        self.stats.hp = max_hp;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.experience = Some(experience);
        self
    }

    /// Adds a move with full PP.
    pub fn with_move(self, move_id: &str, pp: u8) -> Self {
        self.with_move_pp(move_id, pp, pp)
    }

    pub fn with_move_pp(mut self, move_id: &str, current_pp: u8, max_pp: u8) -> Self {
        self.moves.push(OwnedMove {
            move_id: move_id.to_string(),
            current_pp,
            max_pp,
        });
        self
    }

    pub fn build(self) -> OwnedGhost {
        OwnedGhost {
            id: format!("test_{}", self.species_id),
            species_id: self.species_id,
            level: self.level,
            experience: self
                .experience
                .unwrap_or_else(|| get_exp_for_level(self.level)),
            current_hp: self.current_hp.unwrap_or(self.stats.hp),
            max_hp: self.stats.hp,
            stats: self.stats,
            moves: self.moves,
        }
    }

    pub fn build_battle_state(self, name: &str) -> BattleGhostState {
        BattleGhostState::new(self.build(), name.to_string())
    }
}

/// Rolls that never crit and never tie-break in anyone's favour by surprise.
pub fn no_crit_rolls() -> RandomValues {
    RandomValues {
        player_critical: Some(0.99),
        enemy_critical: Some(0.99),
        speed_tie: Some(0.0),
        enemy_move: Some(0.0),
        ..RandomValues::default()
    }
}

pub fn rng_with(values: RandomValues) -> TurnRng {
    TurnRng::new_for_test(values)
}

/// Emberling (fire, speed 60) with Tackle and Ember.
pub fn default_player() -> TestGhostBuilder {
    TestGhostBuilder::new("emberling", 10)
        .with_stats(50, 50, 60)
        .with_move("tackle", 35)
        .with_move("ember", 25)
}

/// Hushling (normal, speed 40) with Tackle.
pub fn default_enemy() -> TestGhostBuilder {
    TestGhostBuilder::new("hushling", 10)
        .with_stats(50, 50, 40)
        .with_move("tackle", 35)
}

/// Starts a battle through the engine so the opening narration is present.
pub fn create_test_battle(
    engine: &BattleEngine,
    player: OwnedGhost,
    enemy: OwnedGhost,
) -> BattleState {
    engine.start_battle(player, enemy)
}
