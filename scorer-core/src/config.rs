//! Konfiguration für Spielregeln, Darstellung und Animations-Timing
//!
//! Alle Werte sind pro laufender Instanz konstant. Die `Default`-Werte
//! entsprechen dem ausgelieferten Gerät (21-Punkte-Spiel, 144 LEDs).

use heapless::Vec;
use rgb::RGB8;

use crate::game::Player;

/// Maximale Anzahl konfigurierbarer Farbbänder
pub const MAX_BANDS: usize = 8;

/// Anzahl Punkte pro Farbband
pub const POINTS_PER_BAND: u16 = 5;

// ============================================================================
// Farben
// ============================================================================

pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
pub const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};
pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
pub const GREEN: RGB8 = RGB8 { r: 0, g: 128, b: 0 };
pub const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 255 };
pub const YELLOW: RGB8 = RGB8 { r: 255, g: 255, b: 0 };
pub const ORANGE_RED: RGB8 = RGB8 { r: 255, g: 69, b: 0 };

// ============================================================================
// Fehler
// ============================================================================

/// Inkonsistente Konfiguration, wird vor dem Start abgelehnt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Strip hat keine LEDs
    EmptyStrip,
    /// Score-Bereiche und Aufschlag-LEDs beider Spieler überlappen
    OverlappingSides,
    /// Kein Platz für die separate Vorteils-LED
    NoRoomForAdvantageCell,
    /// Ein Regel-Intervall oder Punktewert ist 0
    ZeroRule,
    /// Keine Farbbänder konfiguriert
    NoBands,
    /// Frame-Periode, Frame-Anzahl oder Schweiflänge ist 0
    ZeroTiming,
    /// Puls-Hüllkurve mit min > max
    InvertedPulse,
}

// ============================================================================
// Spielregeln
// ============================================================================

/// Wer das nächste Spiel eröffnet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FirstServerPolicy {
    /// Immer derselbe Spieler
    Fixed(Player),
    /// Abwechselnd zum vorherigen Spiel
    Alternate,
    /// Verlierer des vorherigen Spiels schlägt auf
    LoserServes,
}

impl FirstServerPolicy {
    /// Aufschläger nach explizitem Reset
    pub fn opening_server(self) -> Player {
        match self {
            FirstServerPolicy::Fixed(player) => player,
            FirstServerPolicy::Alternate | FirstServerPolicy::LoserServes => Player::One,
        }
    }

    /// Aufschläger für das Folgespiel
    pub fn next_server(self, previous_first: Player, winner: Option<Player>) -> Player {
        match self {
            FirstServerPolicy::Fixed(player) => player,
            FirstServerPolicy::Alternate => previous_first.opponent(),
            FirstServerPolicy::LoserServes => match winner {
                Some(winner) => winner.opponent(),
                None => previous_first.opponent(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    pub points_to_win: u16,
    /// Aufschlagwechsel alle N Punkte im normalen Spiel
    pub serve_switch_every: u16,
    /// Aufschlagwechsel alle N Punkte im Deuce
    pub deuce_switch_every: u16,
    /// Deuce gilt, sobald beide Spieler diesen Stand erreicht haben
    pub deuce_threshold: u16,
    pub win_by: u16,
    pub first_server: FirstServerPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            points_to_win: 21,
            serve_switch_every: 5,
            deuce_switch_every: 2,
            deuce_threshold: 20,
            win_by: 2,
            first_server: FirstServerPolicy::Alternate,
        }
    }
}

// ============================================================================
// Darstellung
// ============================================================================

/// Sinus-Puls innerhalb einer Helligkeits-Hüllkurve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pulse {
    /// Schläge pro Minute
    pub bpm: u8,
    pub min: u8,
    pub max: u8,
}

/// Visuelle Markierung des Vorteils im Deuce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeuceStyle {
    /// Score-LEDs des zurückliegenden Spielers werden gedimmt
    DimTrailing,
    /// Äußerste Score-LED des Führenden pulsiert
    PulseAdvantage,
    /// Separate LED neben der Aufschlag-LED des Führenden
    AdvantageCell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    pub total_cells: usize,
    pub cells_per_side: usize,
    /// Globale Helligkeit im Betrieb (0-255)
    pub brightness: u8,
    /// Farben für Punkte 1-5, 6-10, ... (letztes Band sättigt)
    pub bands: Vec<RGB8, MAX_BANDS>,
    pub background: RGB8,
    pub serve_color: RGB8,
    pub serve_pulse: Pulse,
    pub deuce_style: DeuceStyle,
    pub deuce_color: RGB8,
    pub deuce_dim: u8,
    pub loser_dim: u8,
    pub serve_anim_color: RGB8,
    pub serve_trail_len: u8,
    pub victory_flash_color: RGB8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut bands = Vec::new();
        for color in [BLUE, GREEN, YELLOW, ORANGE_RED, RED] {
            // MAX_BANDS >= 5
            let _ = bands.push(color);
        }

        Self {
            total_cells: 144,
            cells_per_side: 21,
            brightness: 80,
            bands,
            background: BLACK,
            serve_color: WHITE,
            serve_pulse: Pulse {
                bpm: 20,
                min: 40,
                max: 255,
            },
            deuce_style: DeuceStyle::DimTrailing,
            deuce_color: RED,
            deuce_dim: 60,
            loser_dim: 40,
            serve_anim_color: WHITE,
            serve_trail_len: 3,
            victory_flash_color: WHITE,
        }
    }
}

// ============================================================================
// Animations-Timing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationTiming {
    pub frame_period_ms: u32,
    pub serve_change_frames: u32,
    pub victory_duration_ms: u32,
    /// Sperrzeit nach Spielende, bevor ein Tastendruck ein neues Spiel startet
    pub new_game_lockout_ms: u32,
    pub startup_step_ms: u32,
    pub startup_hold_ms: u32,
    pub startup_fade_step: u8,
    pub startup_fade_ms: u32,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            frame_period_ms: 50,
            serve_change_frames: 30,
            victory_duration_ms: 8000,
            new_game_lockout_ms: 3000,
            startup_step_ms: 10,
            startup_hold_ms: 500,
            startup_fade_step: 5,
            startup_fade_ms: 15,
        }
    }
}

// ============================================================================
// Gesamt-Konfiguration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreboardConfig {
    pub rules: Rules,
    pub display: DisplayConfig,
    pub timing: AnimationTiming,
}

impl ScoreboardConfig {
    /// Prüft die Konfiguration auf Inkonsistenzen
    ///
    /// Muss vor dem Start des Control-Loops laufen; die Per-Frame-Logik
    /// verlässt sich auf eine gültige Konfiguration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        let display = &self.display;
        let timing = &self.timing;

        if display.total_cells == 0 {
            return Err(ConfigError::EmptyStrip);
        }
        if 2 * display.cells_per_side + 2 > display.total_cells {
            return Err(ConfigError::OverlappingSides);
        }
        if display.deuce_style == DeuceStyle::AdvantageCell
            && 2 * display.cells_per_side + 4 > display.total_cells
        {
            return Err(ConfigError::NoRoomForAdvantageCell);
        }
        if rules.points_to_win == 0
            || rules.serve_switch_every == 0
            || rules.deuce_switch_every == 0
            || rules.win_by == 0
        {
            return Err(ConfigError::ZeroRule);
        }
        if display.bands.is_empty() {
            return Err(ConfigError::NoBands);
        }
        if timing.frame_period_ms == 0
            || timing.serve_change_frames == 0
            || display.serve_trail_len == 0
        {
            return Err(ConfigError::ZeroTiming);
        }
        if display.serve_pulse.min > display.serve_pulse.max {
            return Err(ConfigError::InvertedPulse);
        }
        Ok(())
    }

    /// Gleiches Setup mit anderer Strip-Länge
    pub fn with_total_cells(mut self, total_cells: usize) -> Self {
        self.display.total_cells = total_cells;
        self
    }
}
