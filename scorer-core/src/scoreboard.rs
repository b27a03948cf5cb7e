//! Scoreboard: verbindet Eingaben, Spielzustand und Darstellung
//!
//! Ein Tick des Control-Loops:
//! 1. `handle()` für jedes Eingabe-Event
//! 2. `render_frame()` schreibt den Buffer passend zur Phase
//! 3. Aufrufer flusht den Buffer auf den Strip
//!
//! Zustand und Buffer gehören dem Loop; hier gibt es keine Globals.

use rgb::RGB8;

use crate::animation::{StartupAnimation, animate_serve_change, animate_victory};
use crate::config::{ConfigError, ScoreboardConfig};
use crate::game::{GamePhase, MatchState, Player, ScoreOutcome};
use crate::render::Renderer;
use crate::types::{InputEvent, ScoreSnapshot};

/// Ergebnis eines Eingabe-Events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventOutcome {
    /// Punkt gezählt
    Scored(Player, ScoreOutcome),
    /// Punkt zurückgenommen
    Undone(Player),
    /// Spiel zurückgesetzt
    Reset,
    /// Neues Spiel nach Spielende gestartet
    NewGame,
    /// Event ohne Wirkung (ungültiger Spieler, falsche Phase, Sperrzeit)
    Ignored,
}

/// Was ein Frame getan hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameOutcome {
    /// Normale Ansicht (Spiel, Idle oder Endstand)
    Steady,
    /// Eine Animation läuft
    Animating,
    /// Aufschlagwechsel-Animation beendet, zurück im Spiel
    ServeHandover(Player),
}

pub struct Scoreboard {
    config: ScoreboardConfig,
    state: MatchState,
}

impl Scoreboard {
    /// Erstellt das Scoreboard; ungültige Konfiguration wird abgelehnt
    pub fn new(config: ScoreboardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = MatchState::new(config.rules);
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot::from_state(&self.state)
    }

    /// Neue Startup-Sequenz mit der Konfiguration dieses Scoreboards
    pub fn startup_animation(&self) -> StartupAnimation {
        StartupAnimation::new(&self.config)
    }

    /// Verarbeitet ein Eingabe-Event
    ///
    /// Nach Spielende startet ein Punkt-Tastendruck erst nach der Sperrzeit
    /// ein neues Spiel; vorher wird er ignoriert.
    pub fn handle(&mut self, event: InputEvent, now_ms: u64) -> EventOutcome {
        match event {
            InputEvent::PointScored(index) => {
                let Ok(player) = Player::try_from(index) else {
                    return EventOutcome::Ignored;
                };

                if self.state.phase() == GamePhase::GameOver {
                    return self.try_new_game(now_ms);
                }

                match self.state.add_point(player, now_ms) {
                    ScoreOutcome::Ignored => EventOutcome::Ignored,
                    outcome => EventOutcome::Scored(player, outcome),
                }
            }
            InputEvent::UndoPoint(index) => match Player::try_from(index) {
                Ok(player) if self.state.remove_point(player, now_ms) => EventOutcome::Undone(player),
                _ => EventOutcome::Ignored,
            },
            InputEvent::ResetGame => {
                self.state.reset();
                EventOutcome::Reset
            }
        }
    }

    fn try_new_game(&mut self, now_ms: u64) -> EventOutcome {
        let since = now_ms.saturating_sub(self.state.phase_entered_at());
        if since > u64::from(self.config.timing.new_game_lockout_ms) {
            self.state.new_game();
            EventOutcome::NewGame
        } else {
            EventOutcome::Ignored
        }
    }

    /// Rendert einen Frame passend zur aktuellen Phase
    ///
    /// Beendet die Aufschlagwechsel-Animation selbst, sobald sie fertig ist.
    pub fn render_frame(&mut self, now_ms: u64, pixels: &mut [RGB8]) -> FrameOutcome {
        let renderer = Renderer::new(&self.config.display);

        match self.state.phase() {
            GamePhase::Playing => {
                renderer.render_steady(&self.state, pixels, now_ms);
                FrameOutcome::Steady
            }
            GamePhase::ServeChange => {
                let status = animate_serve_change(&self.config, &self.state, pixels, now_ms);
                if status.is_complete() {
                    self.state.finish_serve_change();
                    renderer.render_steady(&self.state, pixels, now_ms);
                    FrameOutcome::ServeHandover(self.state.serving_player())
                } else {
                    FrameOutcome::Animating
                }
            }
            GamePhase::GameOver => {
                let status = animate_victory(&self.config, &self.state, pixels, now_ms);
                if status.is_complete() {
                    renderer.render_game_over(&self.state, pixels, now_ms);
                    FrameOutcome::Steady
                } else {
                    FrameOutcome::Animating
                }
            }
        }
    }
}
