//! Error types for the rlbook crate

use thiserror::Error;

/// Main error type for the rlbook crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("cell ({row}, {col}) is out of bounds for a {dim}x{dim} board")]
    CellOutOfBounds { row: usize, col: usize, dim: usize },

    #[error("board dimension must be at least 1")]
    InvalidDimension,

    #[error("board '{board}' is not part of the enumerated state space")]
    UnknownState { board: String },

    #[error("state '{board}' has no legal moves")]
    NoValidMoves { board: String },

    #[error("agent '{agent}' has not observed a state yet")]
    NoCurrentState { agent: String },

    #[error("agent playing {expected:?} proposed a move for {got:?}")]
    WrongMover {
        expected: crate::tictactoe::Player,
        got: crate::tictactoe::Player,
    },

    #[error("no value table trained for {role:?}")]
    MissingValueTable { role: crate::tictactoe::Player },

    #[error("value table has {got} entries but the state space has {expected}")]
    ValueTableMismatch { expected: usize, got: usize },

    #[error("unsupported value table format version {got} (expected {expected})")]
    UnsupportedVersion { expected: u32, got: u32 },

    #[error("move source exhausted before a legal move was chosen")]
    MoveSourceExhausted,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("worker pool is shutting down; job rejected")]
    PoolShutDown,

    #[error("failed to spawn worker thread: {source}")]
    WorkerSpawn {
        #[source]
        source: std::io::Error,
    },

    #[error("trial {index} panicked: {message}")]
    TrialPanicked { index: usize, message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to encode MessagePack: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("failed to decode MessagePack: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
