//! Spielzustand: Punkte, Aufschlagrotation, Sieg-Erkennung
//!
//! Reine Logik ohne I/O. Zeitstempel kommen als Millisekunden vom Aufrufer.

use crate::config::Rules;

/// Spieler 1 (linke Seite) oder Spieler 2 (rechte Seite)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn from_parity(value: u32) -> Player {
        if value % 2 == 0 { Player::One } else { Player::Two }
    }
}

impl core::convert::TryFrom<u8> for Player {
    type Error = ();

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Player::One),
            1 => Ok(Player::Two),
            _ => Err(()),
        }
    }
}

/// Modus der State Machine, steuert den Render-Dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePhase {
    /// Normales Spiel
    Playing,
    /// Aufschlagwechsel-Animation läuft
    ServeChange,
    /// Spiel entschieden, Sieges-Animation
    GameOver,
}

/// Ergebnis von [`MatchState::add_point`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScoreOutcome {
    /// Punkt nicht gezählt (falsche Phase)
    Ignored,
    NoChange,
    ServeChanged,
    GameEnded,
}

impl ScoreOutcome {
    pub fn serve_changed(self) -> bool {
        self == ScoreOutcome::ServeChanged
    }
}

/// Berechnet den Aufschläger aus dem Punktestand
///
/// Pure Function: wird nach jeder Änderung neu ausgewertet, nie inkrementell
/// mitgeführt. Dadurch stimmt der Aufschlag auch nach einem Undo wieder.
pub fn serving_player(score: [u16; 2], first_server: Player, rules: &Rules) -> Player {
    let total = u32::from(score[0]) + u32::from(score[1]);
    let first = first_server.index() as u32;

    if !is_deuce_score(score, rules) {
        let serve_block = total / u32::from(rules.serve_switch_every);
        Player::from_parity(first + serve_block)
    } else {
        let points_before_deuce = u32::from(rules.deuce_threshold) * 2;
        let blocks_before_deuce = points_before_deuce / u32::from(rules.serve_switch_every);
        let deuce_points = total - points_before_deuce;
        let deuce_blocks = deuce_points / u32::from(rules.deuce_switch_every);
        Player::from_parity(first + blocks_before_deuce + deuce_blocks)
    }
}

/// Sieger eines Spielstands, `None` solange das Spiel offen ist
pub fn winning_player(score: [u16; 2], rules: &Rules) -> Option<Player> {
    let deuce = is_deuce_score(score, rules);
    Player::BOTH.into_iter().find(|&player| {
        let own = score[player.index()];
        let other = score[player.opponent().index()];
        own >= rules.points_to_win && (!deuce || own.saturating_sub(other) >= rules.win_by)
    })
}

fn is_deuce_score(score: [u16; 2], rules: &Rules) -> bool {
    score[0] >= rules.deuce_threshold && score[1] >= rules.deuce_threshold
}

/// Zustand eines laufenden Spiels
///
/// Gehört dem Control-Loop; wird nur über die Methoden hier verändert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    rules: Rules,
    score: [u16; 2],
    serving: Player,
    first_server: Player,
    phase: GamePhase,
    phase_entered_at: u64,
}

impl MatchState {
    pub fn new(rules: Rules) -> Self {
        let first_server = rules.first_server.opening_server();
        Self {
            rules,
            score: [0, 0],
            serving: first_server,
            first_server,
            phase: GamePhase::Playing,
            phase_entered_at: 0,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn score(&self) -> [u16; 2] {
        self.score
    }

    pub fn score_of(&self, player: Player) -> u16 {
        self.score[player.index()]
    }

    pub fn serving_player(&self) -> Player {
        self.serving
    }

    pub fn first_server(&self) -> Player {
        self.first_server
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Zeitpunkt (ms) des letzten Wechsels nach ServeChange oder GameOver
    pub fn phase_entered_at(&self) -> u64 {
        self.phase_entered_at
    }

    pub fn total_points(&self) -> u32 {
        u32::from(self.score[0]) + u32::from(self.score[1])
    }

    /// Setzt das Spiel zurück (expliziter Reset)
    pub fn reset(&mut self) {
        self.start(self.rules.first_server.opening_server());
    }

    /// Startet das Folgespiel nach einem Sieg gemäß Aufschlag-Policy
    pub fn new_game(&mut self) {
        let next = self
            .rules
            .first_server
            .next_server(self.first_server, self.winner());
        self.start(next);
    }

    fn start(&mut self, first_server: Player) {
        self.score = [0, 0];
        self.first_server = first_server;
        self.serving = first_server;
        self.phase = GamePhase::Playing;
        self.phase_entered_at = 0;
    }

    /// Zählt einen Punkt
    ///
    /// Ein Sieg beendet das Spiel sofort; ein gleichzeitiger Aufschlagwechsel
    /// wird dann nicht mehr gemeldet.
    pub fn add_point(&mut self, player: Player, now_ms: u64) -> ScoreOutcome {
        if self.phase != GamePhase::Playing {
            return ScoreOutcome::Ignored;
        }

        let slot = &mut self.score[player.index()];
        *slot = slot.saturating_add(1);

        let previous = self.serving;
        self.serving = serving_player(self.score, self.first_server, &self.rules);

        if self.is_game_won() {
            self.enter(GamePhase::GameOver, now_ms);
            return ScoreOutcome::GameEnded;
        }

        if self.serving != previous {
            self.enter(GamePhase::ServeChange, now_ms);
            return ScoreOutcome::ServeChanged;
        }

        ScoreOutcome::NoChange
    }

    /// Nimmt einen Punkt zurück (Korrektur)
    ///
    /// Gibt `false` zurück, wenn der Spieler keine Punkte hat.
    /// Die Phase folgt danach der Siegbedingung: `GameOver` genau dann,
    /// wenn der Stand entschieden ist. Das gilt in beide Richtungen, denn
    /// ein Undo kann Deuce auflösen (21:20 -> 21:19).
    pub fn remove_point(&mut self, player: Player, now_ms: u64) -> bool {
        let slot = &mut self.score[player.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;

        self.serving = serving_player(self.score, self.first_server, &self.rules);
        match (self.phase, self.is_game_won()) {
            (GamePhase::GameOver, false) => self.phase = GamePhase::Playing,
            (GamePhase::Playing | GamePhase::ServeChange, true) => {
                self.enter(GamePhase::GameOver, now_ms)
            }
            _ => {}
        }
        true
    }

    /// Animation beendet: zurück ins normale Spiel
    pub fn finish_serve_change(&mut self) {
        if self.phase == GamePhase::ServeChange {
            self.phase = GamePhase::Playing;
        }
    }

    fn enter(&mut self, phase: GamePhase, now_ms: u64) {
        self.phase = phase;
        self.phase_entered_at = now_ms;
    }

    pub fn is_deuce(&self) -> bool {
        is_deuce_score(self.score, &self.rules)
    }

    pub fn is_game_won(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        winning_player(self.score, &self.rules)
    }

    /// Führender Spieler, `None` bei Gleichstand
    pub fn leader(&self) -> Option<Player> {
        match self.score[0].cmp(&self.score[1]) {
            core::cmp::Ordering::Greater => Some(Player::One),
            core::cmp::Ordering::Less => Some(Player::Two),
            core::cmp::Ordering::Equal => None,
        }
    }
}
