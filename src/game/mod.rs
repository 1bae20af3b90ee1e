//! Core game logic for rail snake
//!
//! Everything here is free of I/O, timers and rendering. A host drives a
//! [`GameSession`] by forwarding direction requests and calling its tick hooks.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod power_up;
pub mod rail;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{EndReason, GameEngine, StepInfo, StepResult};
pub use error::GameError;
pub use food::spawn_food;
pub use power_up::PowerUp;
pub use rail::{Exits, RailMap};
pub use session::{GameSession, SessionPhase, Snapshot, TickOutcome};
pub use state::{GameState, Position, Snake};
