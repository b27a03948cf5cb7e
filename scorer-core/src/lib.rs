//! Scorer Core - Spielregeln, Rendering und Animationen
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Game State Machine, den Pixel-Renderer und die
//! Animationen als Pure Functions über einen injizierten Pixel-Buffer.

#![no_std]

pub mod animation;
pub mod color;
pub mod config;
pub mod game;
pub mod input;
pub mod render;
pub mod scoreboard;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use animation::{
    AnimationStatus, StartupAnimation, StartupStep, animate_serve_change, animate_victory,
};
pub use config::{
    AnimationTiming, ConfigError, DeuceStyle, DisplayConfig, FirstServerPolicy, Pulse, Rules,
    ScoreboardConfig,
};
pub use game::{GamePhase, MatchState, Player, ScoreOutcome, serving_player, winning_player};
pub use input::{Button, Controls};
pub use render::{Layout, Renderer, color_for_point};
pub use scoreboard::{EventOutcome, FrameOutcome, Scoreboard};
pub use traits::{StripError, StripWriter};
pub use types::{InputEvent, ScoreSnapshot, player_number};
