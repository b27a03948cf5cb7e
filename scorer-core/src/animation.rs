//! Animationen: Aufschlagwechsel, Sieg, Startup-Test
//!
//! Jede Animation ist eine Funktion der verstrichenen Zeit seit
//! `phase_entered_at` und wird pro Tick neu ausgewertet. Gleiche Zeit,
//! gleiches Bild - damit lassen sich alle Frames mit synthetischer Uhr testen.

use rgb::RGB8;

use crate::color::{map_range, nscale8, rainbow};
use crate::config::{AnimationTiming, ScoreboardConfig};
use crate::game::{MatchState, Player};
use crate::render::{Renderer, set};

/// Fortschritt einer zeitbasierten Animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationStatus {
    Running,
    Complete,
}

impl AnimationStatus {
    pub fn is_complete(self) -> bool {
        self == AnimationStatus::Complete
    }
}

fn elapsed_ms(state: &MatchState, now_ms: u64) -> u64 {
    now_ms.saturating_sub(state.phase_entered_at())
}

/// Aufschlagwechsel: Lauflicht durch die Lücke zum neuen Aufschläger
///
/// Läuft `serve_change_frames` Frames à `frame_period_ms`. Im letzten
/// Aufruf (`Complete`) bleibt der Buffer unverändert.
pub fn animate_serve_change(
    config: &ScoreboardConfig,
    state: &MatchState,
    pixels: &mut [RGB8],
    now_ms: u64,
) -> AnimationStatus {
    let timing = &config.timing;
    let display = &config.display;

    let total_frames = i32::try_from(timing.serve_change_frames).unwrap_or(i32::MAX);
    let frame64 = elapsed_ms(state, now_ms) / u64::from(timing.frame_period_ms);
    let frame = i32::try_from(frame64).unwrap_or(i32::MAX);
    if frame >= total_frames {
        return AnimationStatus::Complete;
    }

    let renderer = Renderer::new(display);
    renderer.clear(pixels);
    renderer.render_score(state, pixels, now_ms);

    let (gap_start, gap_end) = renderer.layout().gap();
    let gap_size = (gap_end - gap_start + 1) as i32;

    // Sweep in Richtung der Aufschlag-LED des neuen Aufschlägers,
    // der Schweif zeigt zurück
    let (sweep_pos, trail_dir) = match state.serving_player() {
        Player::Two => (map_range(frame, 0, total_frames, 0, gap_size - 1), -1),
        Player::One => (map_range(frame, 0, total_frames, gap_size - 1, 0), 1),
    };

    let trail_len = i32::from(display.serve_trail_len);
    let fade_per_cell = 240 / trail_len;
    for t in 0..trail_len {
        let offset = sweep_pos + t * trail_dir;
        if (0..gap_size).contains(&offset) {
            let brightness = (255 - t * fade_per_cell) as u8;
            set(
                pixels,
                gap_start + offset as usize,
                nscale8(display.serve_anim_color, brightness),
            );
        }
    }

    // Neue Aufschlag-LED blinkt mit
    if (frame / 3) % 2 == 0 {
        renderer.render_serve_indicator(state, pixels, now_ms);
    }

    AnimationStatus::Running
}

/// Sieges-Animation: laufender Regenbogen, Score des Siegers blinkt
///
/// Zeitbegrenzt (`victory_duration_ms`), nicht Frame-begrenzt.
pub fn animate_victory(
    config: &ScoreboardConfig,
    state: &MatchState,
    pixels: &mut [RGB8],
    now_ms: u64,
) -> AnimationStatus {
    let timing = &config.timing;
    let elapsed = elapsed_ms(state, now_ms);
    if elapsed > u64::from(timing.victory_duration_ms) {
        return AnimationStatus::Complete;
    }

    let frame = elapsed / u64::from(timing.frame_period_ms);
    let shift = (frame.wrapping_mul(8) & 0xFF) as usize;
    for (i, pixel) in pixels.iter_mut().enumerate() {
        let hue = (i.wrapping_mul(7).wrapping_add(shift) & 0xFF) as u8;
        *pixel = rainbow(hue, 255, 200);
    }

    if let Some(winner) = state.winner() {
        if (frame / 5) % 2 == 0 {
            let renderer = Renderer::new(&config.display);
            let layout = renderer.layout();
            let lit = usize::from(state.score_of(winner)).min(layout.per_side());
            for i in 0..lit {
                set(
                    pixels,
                    layout.score_cell(winner, i),
                    config.display.victory_flash_color,
                );
            }
        }
    }

    AnimationStatus::Running
}

/// Ein Schritt der Startup-Sequenz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StartupStep {
    /// Globale Helligkeit für diesen Schritt
    pub brightness: u8,
    /// Wartezeit nach dem Flush
    pub hold_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartupStage {
    Sweep(usize),
    Fade(u8),
    Finish,
    Done,
}

/// Startup-Test: Regenbogen LED für LED, halten, ausblenden, löschen
///
/// Blockierend gedacht: der Aufrufer flusht nach jedem Schritt und wartet
/// `hold_ms`, bevor er den nächsten Schritt holt. Nach dem letzten Schritt
/// ist der Buffer leer und die Betriebshelligkeit wieder aktiv.
#[derive(Debug, Clone)]
pub struct StartupAnimation {
    stage: StartupStage,
    brightness: u8,
    background: RGB8,
    timing: AnimationTiming,
}

impl StartupAnimation {
    pub fn new(config: &ScoreboardConfig) -> Self {
        Self {
            stage: StartupStage::Sweep(0),
            brightness: config.display.brightness,
            background: config.display.background,
            timing: config.timing,
        }
    }

    /// Schreibt den nächsten Schritt in den Buffer, `None` wenn fertig
    pub fn next_step(&mut self, pixels: &mut [RGB8]) -> Option<StartupStep> {
        let len = pixels.len();
        match self.stage {
            StartupStage::Sweep(i) if i < len => {
                let hue = (i * 256 / len) as u8;
                pixels[i] = rainbow(hue, 255, 180);
                self.stage = StartupStage::Sweep(i + 1);
                Some(self.step(self.brightness, self.timing.startup_step_ms))
            }
            StartupStage::Sweep(_) => {
                self.stage = StartupStage::Fade(self.brightness);
                Some(self.step(self.brightness, self.timing.startup_hold_ms))
            }
            StartupStage::Fade(level) => {
                self.stage = if level == 0 {
                    StartupStage::Finish
                } else {
                    StartupStage::Fade(level.saturating_sub(self.timing.startup_fade_step.max(1)))
                };
                Some(self.step(level, self.timing.startup_fade_ms))
            }
            StartupStage::Finish => {
                pixels.fill(self.background);
                self.stage = StartupStage::Done;
                Some(self.step(self.brightness, 0))
            }
            StartupStage::Done => None,
        }
    }

    fn step(&self, brightness: u8, hold_ms: u32) -> StartupStep {
        StartupStep {
            brightness,
            hold_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BLACK, FirstServerPolicy, Rules, WHITE};

    const CELLS: usize = 60;

    fn config() -> ScoreboardConfig {
        let mut config = ScoreboardConfig::default().with_total_cells(CELLS);
        config.rules = Rules {
            first_server: FirstServerPolicy::Fixed(Player::One),
            ..Rules::default()
        };
        config
    }

    fn serve_change_state(config: &ScoreboardConfig, at_ms: u64) -> MatchState {
        let mut state = MatchState::new(config.rules);
        for _ in 0..4 {
            state.add_point(Player::One, 0);
        }
        state.add_point(Player::One, at_ms);
        state
    }

    #[test]
    fn test_serve_change_completes_after_all_frames() {
        let config = config();
        let state = serve_change_state(&config, 10_000);
        let mut pixels = [BLACK; CELLS];

        for elapsed in (0..1500u64).step_by(16) {
            let status = animate_serve_change(&config, &state, &mut pixels, 10_000 + elapsed);
            assert_eq!(status, AnimationStatus::Running, "elapsed {}", elapsed);
        }
        assert_eq!(
            animate_serve_change(&config, &state, &mut pixels, 11_499),
            AnimationStatus::Running
        );
        assert_eq!(
            animate_serve_change(&config, &state, &mut pixels, 11_500),
            AnimationStatus::Complete
        );
    }

    #[test]
    fn test_serve_change_trail_stays_in_gap() {
        let config = config();
        let state = serve_change_state(&config, 0);
        let renderer = Renderer::new(&config.display);
        let (start, end) = renderer.layout().gap();

        for frame in 0..30u64 {
            let mut pixels = [BLACK; CELLS];
            animate_serve_change(&config, &state, &mut pixels, frame * 50);

            let lit_in_gap = (start..=end).filter(|&i| pixels[i] != BLACK).count();
            assert!(lit_in_gap >= 1, "frame {}", frame);
            // Score-Bereich bleibt der normale Score
            assert_eq!(pixels[4], config.display.bands[0]);
            assert_eq!(pixels[5], BLACK);
        }
    }

    #[test]
    fn test_serve_change_sweeps_toward_new_server() {
        let config = config();
        // Spieler 2 übernimmt -> Lauflicht von links nach rechts
        let state = serve_change_state(&config, 0);
        assert_eq!(state.serving_player(), Player::Two);
        let (start, _) = Renderer::new(&config.display).layout().gap();

        // Frames 3..5 und 9..11: Aufschlag-LED dunkel, nur der Schweif
        let head_at = |now_ms: u64| {
            let mut pixels = [BLACK; CELLS];
            animate_serve_change(&config, &state, &mut pixels, now_ms);
            (start..CELLS).find(|&i| pixels[i] == WHITE)
        };

        assert_eq!(head_at(150), Some(start + 1));
        assert_eq!(head_at(1350), Some(start + 15));
    }

    #[test]
    fn test_serve_change_is_deterministic() {
        let config = config();
        let state = serve_change_state(&config, 500);
        let mut a = [BLACK; CELLS];
        let mut b = [WHITE; CELLS];

        animate_serve_change(&config, &state, &mut a, 1234);
        animate_serve_change(&config, &state, &mut b, 1234);

        assert_eq!(a, b);
    }

    fn won_state(config: &ScoreboardConfig, at_ms: u64) -> MatchState {
        let mut state = MatchState::new(config.rules);
        for _ in 0..21 {
            state.add_point(Player::Two, at_ms);
            state.finish_serve_change();
        }
        state
    }

    #[test]
    fn test_victory_time_bounded() {
        let config = config();
        let state = won_state(&config, 2_000);
        assert_eq!(state.winner(), Some(Player::Two));
        let mut pixels = [BLACK; CELLS];

        assert_eq!(
            animate_victory(&config, &state, &mut pixels, 2_000),
            AnimationStatus::Running
        );
        assert_eq!(
            animate_victory(&config, &state, &mut pixels, 10_000),
            AnimationStatus::Running
        );
        assert_eq!(
            animate_victory(&config, &state, &mut pixels, 10_001),
            AnimationStatus::Complete
        );
    }

    #[test]
    fn test_victory_flashes_winner() {
        let config = config();
        let state = won_state(&config, 0);
        let mut pixels = [BLACK; CELLS];

        // Frame 0..4: Blitz an
        animate_victory(&config, &state, &mut pixels, 0);
        assert!((0..21).all(|i| pixels[CELLS - 1 - i] == WHITE));

        // Frame 5..9: nur Regenbogen
        animate_victory(&config, &state, &mut pixels, 250);
        assert!((0..21).any(|i| pixels[CELLS - 1 - i] != WHITE));
    }

    #[test]
    fn test_startup_sequence() {
        let config = config();
        let mut startup = StartupAnimation::new(&config);
        let mut pixels = [BLACK; CELLS];

        for i in 0..CELLS {
            let step = startup.next_step(&mut pixels);
            assert_eq!(
                step,
                Some(StartupStep {
                    brightness: 80,
                    hold_ms: 10
                })
            );
            assert_ne!(pixels[i], BLACK);
        }

        assert_eq!(
            startup.next_step(&mut pixels),
            Some(StartupStep {
                brightness: 80,
                hold_ms: 500
            })
        );

        let mut levels = [0u8; 17];
        for level in levels.iter_mut() {
            let step = startup.next_step(&mut pixels).unwrap();
            assert_eq!(step.hold_ms, 15);
            *level = step.brightness;
        }
        assert_eq!(levels[0], 80);
        assert_eq!(levels[16], 0);
        assert!(levels.windows(2).all(|w| w[0] > w[1]));

        let last = startup.next_step(&mut pixels).unwrap();
        assert_eq!(last.brightness, 80);
        assert!(pixels.iter().all(|p| *p == BLACK));
        assert_eq!(startup.next_step(&mut pixels), None);
    }
}
