use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Ghost Adventure battle engine.
///
/// In-battle conditions (an empty move slot, an unknown item, acting after the
/// battle is over) are reported as battle events, never through this type.
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Error related to master data loading or lookup
    #[error("master data error: {0}")]
    MasterData(#[from] MasterDataError),
    /// Error related to engine configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Error related to the battle lifecycle
    #[error("battle error: {0}")]
    Battle(#[from] BattleError),
}

/// Errors related to master data operations
#[derive(Debug, Error)]
pub enum MasterDataError {
    #[error("failed to read master data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed master data: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("species {species} learns unknown move {move_id}")]
    UnknownLearnsetMove { species: String, move_id: String },
}

/// Errors related to loading and validating a `BattleConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors raised at the battle boundary (never mid-turn)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("battle is still active; it cannot be settled yet")]
    BattleStillActive,
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using MasterDataError
pub type MasterDataResult<T> = Result<T, MasterDataError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
