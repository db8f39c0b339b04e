use crate::GhostType;
use serde::{Deserialize, Serialize};

/// Immutable master record for a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: String,
    pub name: String,
    pub move_type: GhostType,
    pub power: u8,    // 0-250, 0 for moves that deal no damage
    pub accuracy: u8, // 0-100
    pub pp: u8,       // 1-40
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores up to `amount` HP on the active ghost.
    Heal { amount: u16 },
    /// Capture device; `bonus` is a percentage added to the capture rate.
    /// A bonus of 100 or more never fails.
    Capture { bonus: u16 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
}
