// Library-Root: Board-Glue für den Ping-Pong-Scorer
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von scorer-core
pub use scorer_core::{Scoreboard, ScoreboardConfig, StripError, StripWriter};
