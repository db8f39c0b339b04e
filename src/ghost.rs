use crate::master_data::MasterDataSource;
use crate::progression::get_exp_for_level;
use schema::{BaseStats, GhostSpecies, MoveData};
use serde::{Deserialize, Serialize};

/// A ghost never knows more than this many moves.
pub const MAX_MOVES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedMove {
    pub move_id: String,
    pub current_pp: u8,
    pub max_pp: u8,
}

/// Calculated stats for a ghost at its current level. Unlike base stats these
/// can exceed 255 at high levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

/// Snapshot of a ghost owned by a player (or generated for an encounter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedGhost {
    pub id: String,
    pub species_id: String,
    pub level: u8,
    pub experience: u32,
    pub current_hp: u16,
    pub max_hp: u16,
    pub stats: GhostStats,
    pub moves: Vec<OwnedMove>, // at most MAX_MOVES
}

impl OwnedMove {
    /// Create a new move instance with max PP
    pub fn new(move_data: &MoveData) -> Self {
        OwnedMove {
            move_id: move_data.id.clone(),
            current_pp: move_data.pp,
            max_pp: move_data.pp,
        }
    }

    pub fn has_pp(&self) -> bool {
        self.current_pp > 0
    }

    /// Use the move (decrease PP)
    pub fn use_pp(&mut self) -> bool {
        if self.current_pp > 0 {
            self.current_pp -= 1;
            true
        } else {
            false
        }
    }

    /// Restore PP
    pub fn restore_pp(&mut self, amount: u8) {
        self.current_pp = self.current_pp.saturating_add(amount).min(self.max_pp);
    }
}

impl OwnedGhost {
    /// Create a fresh ghost at `level` with full HP and the most recent moves
    /// its species knows at that level. Learnset moves missing from the
    /// master data are skipped.
    pub fn new(
        id: impl Into<String>,
        species: &GhostSpecies,
        level: u8,
        data: &dyn MasterDataSource,
    ) -> Self {
        let stats = Self::calculate_stats(&species.base_stats, level);

        let known = species.moves_known_at(level);
        let start = known.len().saturating_sub(MAX_MOVES);
        let moves = known[start..]
            .iter()
            .filter_map(|move_id| match data.move_data(move_id) {
                Some(move_data) => Some(OwnedMove::new(move_data)),
                None => {
                    tracing::warn!(species = %species.id, move_id, "learnset move missing from master data");
                    None
                }
            })
            .collect();

        OwnedGhost {
            id: id.into(),
            species_id: species.id.clone(),
            level,
            experience: get_exp_for_level(level),
            current_hp: stats.hp,
            max_hp: stats.hp,
            stats,
            moves,
        }
    }

    /// Calculate stats from base stats and level
    /// HP = floor(2 * Base * Level / 100) + Level + 10
    /// Other = floor(2 * Base * Level / 100) + 5
    pub fn calculate_stats(base_stats: &BaseStats, level: u8) -> GhostStats {
        let scaled = |base: u8| (2 * base as u32 * level as u32 / 100) as u16;

        GhostStats {
            hp: scaled(base_stats.hp) + level as u16 + 10,
            attack: scaled(base_stats.attack) + 5,
            defense: scaled(base_stats.defense) + 5,
            speed: scaled(base_stats.speed) + 5,
        }
    }

    /// Recompute stats for the current level. Current HP rises (or falls) by
    /// the change in max HP and stays within bounds.
    pub fn recalculate_stats(&mut self, base_stats: &BaseStats) {
        let stats = Self::calculate_stats(base_stats, self.level);
        let hp_delta = stats.hp as i32 - self.max_hp as i32;

        self.stats = stats;
        self.max_hp = stats.hp.max(1);
        self.current_hp = (self.current_hp as i32 + hp_delta).clamp(0, self.max_hp as i32) as u16;
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn knows_move(&self, move_id: &str) -> bool {
        self.moves.iter().any(|m| m.move_id == move_id)
    }

    /// Add a move if a slot is free. Returns false when all slots are taken
    /// or the move is already known.
    pub fn learn_move(&mut self, move_data: &MoveData) -> bool {
        if self.moves.len() >= MAX_MOVES || self.knows_move(&move_data.id) {
            return false;
        }
        self.moves.push(OwnedMove::new(move_data));
        true
    }
}
