// Ghost Adventure Schema - Shared master-data definitions
// This crate holds the static, read-only records the battle engine consumes:
// elemental types and their matchup chart, species, moves and items.

// Re-export the main types
pub use ghost_types::*;
pub use move_data::*;
pub use species_data::*;

pub mod ghost_types;
pub mod move_data;
pub mod species_data;
