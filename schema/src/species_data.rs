use crate::GhostType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn total(&self) -> u16 {
        self.hp as u16 + self.attack as u16 + self.defense as u16 + self.speed as u16
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnsetEntry {
    pub level: u8,
    pub move_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostSpecies {
    pub id: String,
    pub name: String,
    pub ghost_type: GhostType,
    pub base_stats: BaseStats,
    pub learnset: Vec<LearnsetEntry>, // level-up moves, any order
    #[serde(default)]
    pub description: String,
}

impl GhostSpecies {
    /// Move ids learned at or below `level`, in learn order.
    pub fn moves_known_at(&self, level: u8) -> Vec<&str> {
        let mut entries: Vec<&LearnsetEntry> =
            self.learnset.iter().filter(|e| e.level <= level).collect();
        entries.sort_by_key(|e| e.level);
        entries.into_iter().map(|e| e.move_id.as_str()).collect()
    }
}
