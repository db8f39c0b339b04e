//! Ghost Adventure Battle Engine
//!
//! Turn-based combat for a monster-collecting game: type matchups, damage,
//! capture and escape odds, turn order, experience, and the phase state
//! machine that carries one wild encounter from start to finish. The engine
//! is a plain in-process library; it consumes ghost snapshots and master data
//! and hands back updated snapshots.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod ghost;
pub mod master_data;
pub mod progression;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, GhostSpecies, GhostType, ItemData, ItemKind, LearnsetEntry, MoveData,
};

// --- From this crate's modules (`src/`) ---

// Battle engine and state.
pub use battle::engine::{BattleEngine, BattleSettlement, PlayerAction, TurnResult};
pub use battle::state::{
    BattleEvent, BattleGhostState, BattlePhase, BattleState, EndReason, RandomValues, Side,
    TurnRng,
};

// Runtime snapshots and data access.
pub use config::BattleConfig;
pub use ghost::{OwnedGhost, OwnedMove};
pub use master_data::{MasterData, MasterDataSource};

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleError, BattleResult, ConfigError, ConfigResult, MasterDataError,
    MasterDataResult,
};
