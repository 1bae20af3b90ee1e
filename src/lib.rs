//! Rail Snake - snake confined to a generated rail network
//!
//! This library provides:
//! - Core game logic and the tick-driven session (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Per-run statistics (metrics module)
//! - Execution modes (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
