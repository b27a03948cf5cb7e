//! Pixel Renderer: bildet den Spielzustand auf den LED-Buffer ab
//!
//! Layout (ein Strip quer über die Tischmitte):
//!
//! ```text
//! [P1 Score 0..] [S1] [------ Lücke ------] [S2] [..0 P2 Score]
//!  ^ LED 0                                          LED N-1 ^
//! ```
//!
//! Spieler 1 wächst vom linken Rand nach innen, Spieler 2 vom rechten.
//! `S1`/`S2` sind die Aufschlag-LEDs direkt hinter dem Score-Bereich.

use rgb::RGB8;

use crate::color::{beat_sin8, nscale8};
use crate::config::{DeuceStyle, DisplayConfig, POINTS_PER_BAND};
use crate::game::{MatchState, Player};

/// Zellpositionen auf dem Strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    total: usize,
    per_side: usize,
}

impl Layout {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            total: display.total_cells,
            per_side: display.cells_per_side,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn per_side(&self) -> usize {
        self.per_side
    }

    /// Zelle des `i`-ten Punktes (0-basiert) eines Spielers
    pub fn score_cell(&self, player: Player, i: usize) -> usize {
        match player {
            Player::One => i,
            Player::Two => self.total - 1 - i,
        }
    }

    /// Aufschlag-LED direkt hinter dem Score-Bereich
    pub fn serve_cell(&self, player: Player) -> usize {
        match player {
            Player::One => self.per_side,
            Player::Two => self.total - self.per_side - 1,
        }
    }

    /// Separate Vorteils-LED neben der Aufschlag-LED
    pub fn advantage_cell(&self, player: Player) -> usize {
        match player {
            Player::One => self.per_side + 1,
            Player::Two => self.total - self.per_side - 2,
        }
    }

    /// Lücke zwischen den Score-Bereichen (inklusive Aufschlag-LEDs)
    pub fn gap(&self) -> (usize, usize) {
        (self.per_side, self.total - self.per_side - 1)
    }
}

/// Farbe für den Punkt mit 0-basiertem Index
///
/// Punkte 1-5 nutzen Band 0, 6-10 Band 1, usw. Das letzte Band sättigt.
pub fn color_for_point(bands: &[RGB8], point_index: usize) -> RGB8 {
    let Some(last) = bands.len().checked_sub(1) else {
        return RGB8::default();
    };
    let group = (point_index / usize::from(POINTS_PER_BAND)).min(last);
    bands[group]
}

pub(crate) fn set(pixels: &mut [RGB8], idx: usize, color: RGB8) {
    if let Some(cell) = pixels.get_mut(idx) {
        *cell = color;
    }
}

fn dim(pixels: &mut [RGB8], idx: usize, scale: u8) {
    if let Some(cell) = pixels.get_mut(idx) {
        *cell = nscale8(*cell, scale);
    }
}

/// Renderer für die stehenden Ansichten (Spiel, Idle, Spielende)
pub struct Renderer<'a> {
    display: &'a DisplayConfig,
    layout: Layout,
}

impl<'a> Renderer<'a> {
    pub fn new(display: &'a DisplayConfig) -> Self {
        Self {
            display,
            layout: Layout::new(display),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn clear(&self, pixels: &mut [RGB8]) {
        pixels.fill(self.display.background);
    }

    /// Zeichnet die Score-Bereiche beider Spieler inkl. Deuce-Markierung
    pub fn render_score(&self, state: &MatchState, pixels: &mut [RGB8], now_ms: u64) {
        for player in Player::BOTH {
            for i in 0..self.layout.per_side {
                set(
                    pixels,
                    self.layout.score_cell(player, i),
                    self.display.background,
                );
            }

            let lit = self.lit_cells(state, player);
            for i in 0..lit {
                set(
                    pixels,
                    self.layout.score_cell(player, i),
                    color_for_point(&self.display.bands, i),
                );
            }
        }

        if state.is_deuce() {
            self.render_deuce(state, pixels, now_ms);
        }
    }

    fn lit_cells(&self, state: &MatchState, player: Player) -> usize {
        usize::from(state.score_of(player)).min(self.layout.per_side)
    }

    fn render_deuce(&self, state: &MatchState, pixels: &mut [RGB8], now_ms: u64) {
        let Some(leader) = state.leader() else {
            return;
        };

        match self.display.deuce_style {
            DeuceStyle::DimTrailing => {
                let trailing = leader.opponent();
                for i in 0..self.layout.per_side {
                    dim(
                        pixels,
                        self.layout.score_cell(trailing, i),
                        self.display.deuce_dim,
                    );
                }
            }
            DeuceStyle::PulseAdvantage => {
                let lit = self.lit_cells(state, leader);
                if lit > 0 {
                    let color = nscale8(self.display.deuce_color, self.pulse(now_ms));
                    set(pixels, self.layout.score_cell(leader, lit - 1), color);
                }
            }
            DeuceStyle::AdvantageCell => {
                set(
                    pixels,
                    self.layout.advantage_cell(leader),
                    self.display.deuce_color,
                );
            }
        }
    }

    fn pulse(&self, now_ms: u64) -> u8 {
        let pulse = self.display.serve_pulse;
        beat_sin8(pulse.bpm, now_ms, pulse.min, pulse.max)
    }

    /// Pulsierende Aufschlag-LED auf der Seite des Aufschlägers
    pub fn render_serve_indicator(&self, state: &MatchState, pixels: &mut [RGB8], now_ms: u64) {
        for player in Player::BOTH {
            set(
                pixels,
                self.layout.serve_cell(player),
                self.display.background,
            );
        }

        let color = nscale8(self.display.serve_color, self.pulse(now_ms));
        set(
            pixels,
            self.layout.serve_cell(state.serving_player()),
            color,
        );
    }

    /// Normale Ansicht: Score + Aufschlag
    pub fn render_playing(&self, state: &MatchState, pixels: &mut [RGB8], now_ms: u64) {
        self.clear(pixels);
        self.render_score(state, pixels, now_ms);
        self.render_serve_indicator(state, pixels, now_ms);
    }

    /// "Bereit"-Ansicht vor dem ersten Punkt: nur die Aufschlag-LED
    pub fn render_idle(&self, state: &MatchState, pixels: &mut [RGB8], now_ms: u64) {
        self.clear(pixels);
        self.render_serve_indicator(state, pixels, now_ms);
    }

    /// Idle oder normale Ansicht, je nach Punktestand
    pub fn render_steady(&self, state: &MatchState, pixels: &mut [RGB8], now_ms: u64) {
        if state.total_points() == 0 {
            self.render_idle(state, pixels, now_ms);
        } else {
            self.render_playing(state, pixels, now_ms);
        }
    }

    /// Endstand: Score-LEDs des Verlierers gedimmt
    pub fn render_game_over(&self, state: &MatchState, pixels: &mut [RGB8], now_ms: u64) {
        self.clear(pixels);
        self.render_score(state, pixels, now_ms);

        if let Some(winner) = state.winner() {
            let loser = winner.opponent();
            for i in 0..self.layout.per_side {
                dim(
                    pixels,
                    self.layout.score_cell(loser, i),
                    self.display.loser_dim,
                );
            }
        }
    }
}
