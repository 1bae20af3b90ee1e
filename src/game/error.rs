use thiserror::Error;

/// Errors that prevent a session from being built.
///
/// Collisions and a full board are not errors: they end the game through
/// [`EndReason`](super::EndReason).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("grid {width}x{height} is too small; both sides must be at least {min}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("no safe spawn cell on a {width}x{height} rail map")]
    NoSpawnPoint { width: usize, height: usize },

    #[error("rail map expects {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
}
