//! Property Tests für Spielregeln, Eingabe und Farb-Mathematik

use proptest::prelude::*;
use rgb::RGB8;
use scorer_core::color::{beat_sin8, scale8};
use scorer_core::config::{BLACK, BLUE, RED};
use scorer_core::{
    Controls, EventOutcome, FirstServerPolicy, GamePhase, InputEvent, MatchState, Player,
    Renderer, Rules, ScoreOutcome, Scoreboard, ScoreboardConfig, color_for_point, serving_player,
    winning_player,
};

fn player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::One), Just(Player::Two)]
}

fn rules() -> impl Strategy<Value = Rules> {
    prop_oneof![
        Just(FirstServerPolicy::Fixed(Player::One)),
        Just(FirstServerPolicy::Fixed(Player::Two)),
        Just(FirstServerPolicy::Alternate),
        Just(FirstServerPolicy::LoserServes),
    ]
    .prop_map(|first_server| Rules {
        first_server,
        ..Rules::default()
    })
}

/// Spielt eine Punktfolge; Animationen werden sofort beendet
fn play(rules: Rules, points: &[Player]) -> MatchState {
    let mut state = MatchState::new(rules);
    for (t, &p) in points.iter().enumerate() {
        state.add_point(p, t as u64);
        state.finish_serve_change();
    }
    state
}

proptest! {
    #[test]
    fn serve_always_matches_formula(rules in rules(), points in prop::collection::vec(player(), 0..80)) {
        let mut state = MatchState::new(rules);
        for &p in &points {
            state.add_point(p, 0);
            state.finish_serve_change();
            prop_assert_eq!(
                state.serving_player(),
                serving_player(state.score(), state.first_server(), &rules)
            );
        }
    }

    #[test]
    fn same_points_same_state(rules in rules(), points in prop::collection::vec(player(), 0..80)) {
        prop_assert_eq!(play(rules, &points), play(rules, &points));
    }

    #[test]
    fn add_then_undo_restores_score_and_serve(
        rules in rules(),
        points in prop::collection::vec(player(), 0..40),
        extra in player(),
    ) {
        let mut state = play(rules, &points);
        prop_assume!(state.phase() == GamePhase::Playing);

        let before_score = state.score();
        let before_serve = state.serving_player();

        state.add_point(extra, 0);
        prop_assert!(state.remove_point(extra, 0));

        prop_assert_eq!(state.score(), before_score);
        prop_assert_eq!(state.serving_player(), before_serve);
        prop_assert_ne!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn game_over_freezes_score(rules in rules(), points in prop::collection::vec(player(), 0..120)) {
        let mut state = MatchState::new(rules);
        let mut final_state: Option<MatchState> = None;

        for &p in &points {
            let outcome = state.add_point(p, 0);
            state.finish_serve_change();

            match final_state.clone() {
                Some(frozen) => {
                    prop_assert_eq!(outcome, ScoreOutcome::Ignored);
                    prop_assert_eq!(&state, &frozen);
                    prop_assert_eq!(state.phase(), GamePhase::GameOver);
                }
                None if outcome == ScoreOutcome::GameEnded => {
                    prop_assert!(state.winner().is_some());
                    final_state = Some(state.clone());
                }
                None => {
                    prop_assert!(state.winner().is_none());
                }
            }
        }
    }

    #[test]
    fn invalid_events_change_nothing(
        points in prop::collection::vec(0u8..2, 0..30),
        bad in 2u8..=255,
        now in 0u64..100_000,
    ) {
        let mut board = Scoreboard::new(ScoreboardConfig::default()).unwrap();
        for (t, &p) in points.iter().enumerate() {
            board.handle(InputEvent::PointScored(p), t as u64);
        }
        let before = board.state().clone();

        prop_assert_eq!(board.handle(InputEvent::PointScored(bad), now), EventOutcome::Ignored);
        prop_assert_eq!(board.handle(InputEvent::UndoPoint(bad), now), EventOutcome::Ignored);
        prop_assert_eq!(board.state(), &before);
    }

    #[test]
    fn undo_at_zero_is_noop(rules in rules(), player in player()) {
        let mut state = MatchState::new(rules);
        let before = state.clone();
        prop_assert!(!state.remove_point(player, 0));
        prop_assert!(!state.remove_point(player, 0));
        prop_assert_eq!(state, before);
    }

    #[test]
    fn win_is_monotonic(
        rules in rules(),
        a in 0u16..60,
        b in 0u16..60,
        extra in 0u16..100,
    ) {
        let score = [a, b];
        if let Some(winner) = winning_player(score, &rules) {
            let mut more = score;
            more[winner.index()] += extra;
            prop_assert_eq!(winning_player(more, &rules), Some(winner));
        }
    }

    #[test]
    fn undo_keeps_phase_in_step_with_win(
        rules in rules(),
        points in prop::collection::vec(player(), 0..80),
        undos in prop::collection::vec(player(), 0..10),
    ) {
        let mut state = play(rules, &points);
        for (t, &p) in undos.iter().enumerate() {
            state.remove_point(p, t as u64);
            state.finish_serve_change();
            prop_assert_eq!(
                state.phase() == GamePhase::GameOver,
                state.winner().is_some()
            );
        }
    }

    #[test]
    fn winner_leads_by_margin(points in prop::collection::vec(player(), 0..120)) {
        let rules = Rules::default();
        let state = play(rules, &points);
        if let Some(winner) = state.winner() {
            let own = state.score_of(winner);
            let other = state.score_of(winner.opponent());
            prop_assert!(own >= rules.points_to_win);
            prop_assert!(own - other >= rules.win_by);
        }
    }

    #[test]
    fn released_buttons_never_produce_events(times in prop::collection::vec(0u64..10_000, 1..50)) {
        let mut controls = Controls::new(250, 3000);
        let mut sorted = times;
        sorted.sort_unstable();
        for now in sorted {
            prop_assert!(controls.poll([false, false], now).is_empty());
        }
    }

    #[test]
    fn band_color_saturates(idx in 0usize..1000) {
        let bands = [BLUE, RED];
        let expected = if idx < 5 { BLUE } else { RED };
        prop_assert_eq!(color_for_point(&bands, idx), expected);
    }

    #[test]
    fn pulse_stays_in_envelope(bpm in 1u8..=255, now in 0u64..10_000_000, a: u8, b: u8) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let value = beat_sin8(bpm, now, min, max);
        prop_assert!(value >= min && value <= max);
    }

    #[test]
    fn scale8_never_brightens(value: u8, scale: u8) {
        prop_assert!(scale8(value, scale) <= value);
    }

    #[test]
    fn render_is_pure(points in prop::collection::vec(player(), 0..60), now in 0u64..100_000) {
        let config = ScoreboardConfig::default();
        let state = play(config.rules, &points);
        let renderer = Renderer::new(&config.display);

        let mut first = [BLACK; 144];
        let mut second = [RGB8 { r: 1, g: 2, b: 3 }; 144];
        renderer.render_steady(&state, &mut first, now);
        renderer.render_steady(&state, &mut second, now);
        prop_assert_eq!(first, second);
    }
}
