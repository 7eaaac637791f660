//! Session tests - DAS, pause/focus/reset/mode handling and presenter diffs

use stacker::core::FeedEntry;
use stacker::engine::{LevelInfo, Presenter, RenderSurface, Session, SessionConfig};
use stacker::types::{BoardState, Control, GameMode, PieceKind, VisualTag};

/// Presenter that records what it was sent.
#[derive(Default)]
struct Recorder {
    paints: usize,
    score: Option<u64>,
    level: Option<LevelInfo>,
    states: Vec<BoardState>,
    statistics: Vec<Option<String>>,
    feed_pushes: usize,
}

impl RenderSurface for Recorder {
    fn paint(&mut self, _row: usize, _col: usize, _tag: Option<VisualTag>) {
        self.paints += 1;
    }
}

impl Presenter for Recorder {
    fn show_score(&mut self, score: u64) {
        self.score = Some(score);
    }

    fn show_feed(&mut self, _feed: &[FeedEntry]) {
        self.feed_pushes += 1;
    }

    fn show_level(&mut self, level: LevelInfo) {
        self.level = Some(level);
    }

    fn show_state(&mut self, state: BoardState) {
        self.states.push(state);
    }

    fn show_statistics(&mut self, report: Option<&str>) {
        self.statistics.push(report.map(str::to_owned));
    }
}

/// A session with a T at its spawn anchor.
fn session_with_t(config: SessionConfig) -> Session {
    let mut session = Session::new(config, 99);
    session.frame();
    assert!(session.board().falling().is_some());
    assert!(session.board_mut().spawn_kind(PieceKind::T));
    session
}

/// A session whose next spawn is blocked, run until it dies.
fn topped_out_session() -> Session {
    let mut session = session_with_t(SessionConfig::default());
    session.key_down(Control::HardDrop);
    session.key_up(Control::HardDrop);
    for col in 0..10 {
        session
            .board_mut()
            .grid_mut()
            .occupy(1, col, VisualTag::Mino(PieceKind::S));
    }
    for _ in 0..3 {
        session.frame();
    }
    assert_eq!(session.board().state(), BoardState::Dead);
    session
}

fn falling_col(session: &Session) -> Option<i8> {
    session.board().falling().map(|p| p.col)
}

// ============== Auto-Repeat ==============

#[test]
fn test_held_move_repeats_after_das() {
    let mut session = session_with_t(SessionConfig::default());
    assert_eq!(falling_col(&session), Some(3));

    assert!(session.key_down(Control::MoveLeft));
    assert_eq!(falling_col(&session), Some(2));

    for _ in 0..13 {
        session.frame();
        assert_eq!(falling_col(&session), Some(2));
    }
    session.frame();
    assert_eq!(falling_col(&session), Some(1));
    session.frame();
    assert_eq!(falling_col(&session), Some(1));
    session.frame();
    assert_eq!(falling_col(&session), Some(0));

    // Against the wall the repeats keep failing quietly.
    for _ in 0..4 {
        session.frame();
    }
    assert_eq!(falling_col(&session), Some(0));
}

#[test]
fn test_key_down_while_held_is_ignored() {
    let mut session = session_with_t(SessionConfig::default());
    assert!(session.key_down(Control::MoveRight));
    assert!(!session.key_down(Control::MoveRight));
    assert_eq!(falling_col(&session), Some(4));

    session.key_up(Control::MoveRight);
    assert!(!session.is_pressed(Control::MoveRight));
    for _ in 0..20 {
        session.frame();
    }
    assert_eq!(falling_col(&session), Some(4));
}

#[test]
fn test_hard_drop_does_not_repeat() {
    let mut session = session_with_t(SessionConfig::default());
    assert!(session.key_down(Control::HardDrop));
    let locked = session.board().score();
    assert!(locked > 0);
    for _ in 0..30 {
        session.frame();
    }
    // One lock only: the next piece is still falling near the top.
    assert!(session.board().falling().is_some_and(|p| p.row < 5));
}

#[test]
fn test_gameplay_controls_ignored_while_paused() {
    let mut session = session_with_t(SessionConfig::default());
    assert!(!session.key_down(Control::Pause));
    assert_eq!(session.board().state(), BoardState::Paused);
    assert!(!session.key_down(Control::MoveLeft));
    assert_eq!(falling_col(&session), Some(3));
}

// ============== Pause, Focus, Reset ==============

#[test]
fn test_focus_loss_pauses_on_next_frame() {
    let mut session = session_with_t(SessionConfig::default());
    session.key_down(Control::SoftDrop);
    session.set_focused(false);
    assert!(!session.is_pressed(Control::SoftDrop));
    assert_eq!(session.board().state(), BoardState::Playing);

    session.frame();
    assert_eq!(session.board().state(), BoardState::Paused);

    // Regaining focus does not resume on its own.
    session.set_focused(true);
    session.frame();
    assert_eq!(session.board().state(), BoardState::Paused);
    session.control(Control::Pause);
    assert_eq!(session.board().state(), BoardState::Playing);
}

#[test]
fn test_reset_pauses_then_restarts_at_starting_gravity() {
    let config = SessionConfig {
        gravity: 3,
        ..SessionConfig::default()
    };
    let mut session = session_with_t(config);
    session.key_down(Control::HardDrop);
    assert!(session.board().score() > 0);
    // Pretend the player levelled up along the way.
    session.board_mut().config(Some(9), true, None);

    session.key_down(Control::Reset);
    assert_eq!(session.board().state(), BoardState::Paused);
    assert_eq!(session.board().gravity(), 9);

    session.key_up(Control::Reset);
    session.key_down(Control::Reset);
    assert_eq!(session.board().gravity(), 3);
    assert_eq!(session.board().score(), 0);
    assert!(session.board().falling().is_none());
    assert_eq!(session.board().grid().occupied_count(), 0);
    // A paused game stays paused across the re-init.
    assert_eq!(session.board().state(), BoardState::Paused);
}

#[test]
fn test_reset_revives_dead_game() {
    let mut session = topped_out_session();
    session.key_down(Control::Reset);
    assert_eq!(session.board().state(), BoardState::Playing);
    assert_eq!(session.board().grid().occupied_count(), 0);
}

// ============== Mode & Gravity ==============

#[test]
fn test_mode_toggle_pauses_then_flips() {
    let config = SessionConfig {
        gravity: 4,
        ..SessionConfig::default()
    };
    let mut session = session_with_t(config);
    session.key_down(Control::Mode);
    assert_eq!(session.board().state(), BoardState::Paused);
    assert_eq!(session.board().mode(), GameMode::Marathon);

    session.key_up(Control::Mode);
    session.key_down(Control::Mode);
    assert_eq!(session.board().mode(), GameMode::Infinite);
    assert_eq!(session.board().gravity(), 0);
    assert_eq!(session.config().mode, GameMode::Infinite);

    // The new starting gravity is 0: reset keeps it there.
    session.key_up(Control::Mode);
    session.key_down(Control::Mode);
    assert_eq!(session.board().mode(), GameMode::Marathon);
    session.key_down(Control::Reset);
    assert_eq!(session.board().gravity(), 0);
}

#[test]
fn test_gravity_changes_only_in_infinite_mode() {
    let mut session = Session::new(SessionConfig::default(), 5);
    assert!(!session.set_gravity(5));
    // Rejected in marathon without touching the game.
    assert_eq!(session.board().state(), BoardState::Playing);
    assert!(!session.nudge_gravity(1));
    assert_eq!(session.board().gravity(), 0);

    let config = SessionConfig {
        mode: GameMode::Infinite,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, 5);
    assert!(session.set_gravity(7));
    assert_eq!(session.board().gravity(), 7);
    assert_eq!(session.board().frames_per_tick(), 16);
    assert_eq!(session.board().state(), BoardState::Paused);

    assert!(session.nudge_gravity(1));
    assert_eq!(session.board().gravity(), 8);
    assert!(!session.set_gravity(30));
    assert_eq!(session.board().gravity(), 8);

    assert!(session.set_gravity(29));
    assert!(!session.nudge_gravity(1));
    assert!(session.set_gravity(0));
    assert!(!session.nudge_gravity(-1));
}

#[test]
fn test_ghost_toggle_keeps_gravity() {
    let config = SessionConfig {
        gravity: 6,
        ..SessionConfig::default()
    };
    let mut session = session_with_t(config);
    assert!(session.board().ghost().is_some());

    session.toggle_ghost();
    assert_eq!(session.board().state(), BoardState::Paused);
    assert!(!session.board().ghost_enabled());
    assert!(session.board().ghost().is_none());
    assert_eq!(session.board().gravity(), 6);
    assert!(!session.config().ghost);
}

// ============== Presenting ==============

#[test]
fn test_statistics_open_and_close() {
    let mut session = session_with_t(SessionConfig::default());
    let mut out = Recorder::default();
    session.present(&mut out);
    assert!(out.statistics.is_empty());

    session.key_down(Control::Statistics);
    assert!(session.statistics_open());
    assert_eq!(session.board().state(), BoardState::Paused);
    session.present(&mut out);
    let report = out.statistics.last().cloned().flatten().unwrap();
    assert!(report.contains("t-spin zero"));

    // Resuming dismisses the report.
    session.key_down(Control::Pause);
    assert!(!session.statistics_open());
    session.present(&mut out);
    assert_eq!(out.statistics.last(), Some(&None));
    assert_eq!(out.states.last(), Some(&BoardState::Playing));
}

#[test]
fn test_restart_after_game_over_closes_statistics() {
    let mut session = topped_out_session();
    let mut out = Recorder::default();

    session.key_down(Control::Statistics);
    assert!(session.statistics_open());
    assert_eq!(session.board().state(), BoardState::Dead);
    session.present(&mut out);
    assert!(matches!(out.statistics.last(), Some(Some(_))));

    session.key_down(Control::Reset);
    assert_eq!(session.board().state(), BoardState::Playing);
    assert!(!session.statistics_open());
    for _ in 0..5 {
        session.on_frame(&mut out);
    }
    assert_eq!(out.statistics.last(), Some(&None));
    assert!(session.board().falling().is_some());
}

#[test]
fn test_mode_flip_after_game_over_closes_statistics() {
    let mut session = topped_out_session();
    let mut out = Recorder::default();

    session.key_down(Control::Statistics);
    session.present(&mut out);
    assert!(matches!(out.statistics.last(), Some(Some(_))));

    session.key_down(Control::Mode);
    assert_eq!(session.board().mode(), GameMode::Infinite);
    assert_eq!(session.board().state(), BoardState::Playing);
    assert!(!session.statistics_open());
    session.present(&mut out);
    assert_eq!(out.statistics.last(), Some(&None));
}

#[test]
fn test_reset_while_paused_keeps_statistics_open() {
    let mut session = session_with_t(SessionConfig::default());
    session.key_down(Control::Statistics);
    session.key_down(Control::Reset);
    assert_eq!(session.board().state(), BoardState::Paused);
    assert!(session.statistics_open());
}

#[test]
fn test_present_pushes_only_changes() {
    let mut session = session_with_t(SessionConfig::default());
    let mut out = Recorder::default();
    session.present(&mut out);
    assert_eq!(out.paints, 23 * 10);
    assert_eq!(out.score, Some(0));
    assert_eq!(out.feed_pushes, 1);
    assert_eq!(out.states, vec![BoardState::Playing]);

    let mut out = Recorder::default();
    session.present(&mut out);
    assert_eq!(out.paints, 0);
    assert_eq!(out.score, None);

    // Piece and ghost each change four cells.
    session.key_down(Control::MoveLeft);
    session.present(&mut out);
    assert_eq!(out.paints, 8);
    assert_eq!(out.feed_pushes, 0);

    session.invalidate();
    let mut out = Recorder::default();
    session.present(&mut out);
    assert_eq!(out.paints, 23 * 10);
    assert_eq!(out.statistics, vec![None]);
}

#[test]
fn test_lock_pushes_score_and_level() {
    let mut session = session_with_t(SessionConfig::default());
    let mut out = Recorder::default();
    session.present(&mut out);

    session.key_down(Control::HardDrop);
    session.on_frame(&mut out);
    assert_eq!(out.score, Some(session.board().score()));
    let level = out.level.unwrap();
    assert_eq!(level.gravity, 0);
    assert_eq!(level.left_lines, 10);
    assert_eq!(level.mode, GameMode::Marathon);
}
