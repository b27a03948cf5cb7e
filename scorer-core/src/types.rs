//! Core Types für die Spielstand-Anzeige
//!
//! Datenstrukturen ohne Hardware-Dependencies

use crate::game::{MatchState, Player};

/// Eingabe-Event vom Tasten-Collaborator
///
/// Spieler-Indizes bleiben roh (`u8`): ungültige Indizes werden vom
/// Scoreboard still ignoriert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Punkt für Spieler (0 = links, 1 = rechts)
    PointScored(u8),
    /// Punkt zurücknehmen (Korrektur)
    UndoPoint(u8),
    /// Spiel zurücksetzen (beide Tasten lang gedrückt)
    ResetGame,
}

/// Momentaufnahme des Spielstands für Log-Ausgaben
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSnapshot {
    pub score: [u16; 2],
    pub serving: Player,
    pub deuce: bool,
    pub winner: Option<Player>,
}

impl ScoreSnapshot {
    pub fn from_state(state: &MatchState) -> Self {
        Self {
            score: state.score(),
            serving: state.serving_player(),
            deuce: state.is_deuce(),
            winner: state.winner(),
        }
    }
}

/// Spielernummer wie auf dem Gerät beschriftet (1 oder 2)
pub fn player_number(player: Player) -> u8 {
    player.index() as u8 + 1
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for InputEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            InputEvent::PointScored(player) => defmt::write!(fmt, "PointScored(P{})", player.wrapping_add(1)),
            InputEvent::UndoPoint(player) => defmt::write!(fmt, "UndoPoint(P{})", player.wrapping_add(1)),
            InputEvent::ResetGame => defmt::write!(fmt, "ResetGame"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ScoreSnapshot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Score: P1={} P2={} | Serve: P{}",
            self.score[0],
            self.score[1],
            player_number(self.serving)
        );
        if self.deuce {
            defmt::write!(fmt, " [DEUCE]");
        }
        if let Some(winner) = self.winner {
            defmt::write!(fmt, " >>> WINNER: P{} <<<", player_number(winner));
        }
    }
}
