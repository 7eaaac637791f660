//! Session controller - one game plus the controls around it
//!
//! The session owns the [`Board`] and the set of controls currently held
//! down. Each frame it animates the board and then auto-repeats held
//! movement controls (delayed auto shift). Everything else (pause, reset,
//! statistics, mode, gravity, ghost) is dispatched on key-down.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::core::Board;
use crate::presenter::Presenter;
use crate::settings::SessionConfig;
use crate::sync::SurfaceSync;
use crate::types::{BoardState, Control, GameMode, Turn, MAX_GRAVITY};

/// Upper bound on simultaneously held controls (one slot per control).
const MAX_PRESSED: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pressed {
    control: Control,
    /// Frames held, reset to the after-DAS value on each repeat
    frames: u32,
}

#[derive(Debug)]
pub struct Session {
    board: Board,
    config: SessionConfig,
    /// Gravity a marathon reset returns to
    start_gravity: u8,
    pressing: ArrayVec<Pressed, MAX_PRESSED>,
    focused: bool,
    statistics_open: bool,
    /// Statistics view change not yet pushed to the presenter
    statistics_dirty: bool,
    sync: SurfaceSync,
}

impl Session {
    pub fn new(config: SessionConfig, seed: u32) -> Self {
        let mut board = Board::new(seed);
        board.config(Some(config.gravity), config.ghost, Some(config.mode));
        board.init();
        info!(
            seed,
            gravity = config.gravity,
            mode = config.mode.as_str(),
            ghost = config.ghost,
            "session started"
        );
        Self {
            board,
            start_gravity: config.gravity,
            config,
            pressing: ArrayVec::new(),
            focused: true,
            statistics_open: false,
            statistics_dirty: false,
            sync: SurfaceSync::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for fixtures and tools.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.pressing.iter().any(|p| p.control == control)
    }

    pub fn statistics_open(&self) -> bool {
        self.statistics_open
    }

    /// The statistics report, while the statistics view is open.
    pub fn statistics_report(&self) -> Option<String> {
        self.statistics_open
            .then(|| self.board.statistics().to_string())
    }

    /// Run one frame and push the resulting changes to `out`.
    pub fn on_frame<P: Presenter + ?Sized>(&mut self, out: &mut P) {
        self.frame();
        self.present(out);
    }

    /// Run one frame without presenting.
    pub fn frame(&mut self) {
        self.board.animate();
        if self.board.state() != BoardState::Playing {
            return;
        }
        if !self.focused {
            debug!("focus lost");
            self.toggle_pause();
            return;
        }

        let das = self.config.das_frames;
        let after_das = self.config.after_das_frames;
        let mut due: ArrayVec<Control, MAX_PRESSED> = ArrayVec::new();
        for pressed in self.pressing.iter_mut() {
            if !pressed.control.repeats() {
                continue;
            }
            pressed.frames += 1;
            if pressed.frames >= das {
                pressed.frames = after_das;
                due.push(pressed.control);
            }
        }
        for control in due {
            self.control(control);
        }
    }

    /// Push board and statistics changes to `out`.
    pub fn present<P: Presenter + ?Sized>(&mut self, out: &mut P) {
        self.sync.flush(&self.board, out);
        if self.statistics_dirty {
            self.statistics_dirty = false;
            let report = self.statistics_report();
            out.show_statistics(report.as_deref());
        }
    }

    /// Force the next `present` to push the full state.
    pub fn invalidate(&mut self) {
        self.sync.invalidate();
        self.statistics_dirty = true;
    }

    /// A control went down. Ignored while it is already held.
    ///
    /// Returns true if a gameplay control was applied to the board.
    pub fn key_down(&mut self, control: Control) -> bool {
        if self.is_pressed(control) || self.pressing.is_full() {
            return false;
        }
        self.pressing.push(Pressed { control, frames: 0 });
        self.control(control)
    }

    pub fn key_up(&mut self, control: Control) {
        self.pressing.retain(|p| p.control != control);
    }

    /// Drop every held control.
    pub fn release_all(&mut self) {
        self.pressing.clear();
    }

    /// Host focus changed. Losing focus pauses a playing game on the next frame.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.pressing.clear();
        }
    }

    /// Dispatch a control once.
    ///
    /// Returns true if a gameplay control was applied (gameplay controls act
    /// only while playing).
    pub fn control(&mut self, control: Control) -> bool {
        match control {
            Control::Pause => self.toggle_pause(),
            Control::Reset => self.reset(),
            Control::Statistics => {
                self.pressing.clear();
                self.open_statistics();
            }
            Control::Mode => self.toggle_mode(),
            _ => {}
        }
        if self.board.state() != BoardState::Playing {
            return false;
        }
        match control {
            Control::MoveLeft => self.board.move_by(-1),
            Control::MoveRight => self.board.move_by(1),
            Control::SoftDrop => self.board.soft_drop(),
            Control::HardDrop => self.board.hard_drop().is_some(),
            Control::RotateLeft => self.board.rotate(Turn::Left),
            Control::RotateRight => self.board.rotate(Turn::Right),
            Control::Hold => self.board.hold(),
            _ => false,
        }
    }

    /// Playing and paused swap; resuming closes the statistics view.
    pub fn toggle_pause(&mut self) {
        let before = self.board.state();
        let after = self.board.toggle_pause();
        match (before, after) {
            (BoardState::Playing, BoardState::Paused) => debug!("paused"),
            (BoardState::Paused, BoardState::Playing) => {
                debug!("resumed");
                if self.statistics_open {
                    self.statistics_open = false;
                    self.statistics_dirty = true;
                }
            }
            _ => {}
        }
    }

    /// Restart a finished or paused game; pause a running one.
    pub fn reset(&mut self) {
        if self.board.state() == BoardState::Playing {
            self.toggle_pause();
            return;
        }
        if self.board.mode() == GameMode::Marathon {
            self.board
                .config(Some(self.start_gravity), self.board.ghost_enabled(), None);
        }
        self.restart();
    }

    /// Re-initialise the board. A game that comes back to life closes the
    /// statistics view, like resuming does.
    fn restart(&mut self) {
        self.board.init();
        if self.board.state() == BoardState::Playing && self.statistics_open {
            self.statistics_open = false;
            self.statistics_dirty = true;
            debug!("statistics closed on restart");
        }
    }

    /// Set gravity (infinite mode only).
    ///
    /// In marathon mode the call is rejected and nothing else happens. In
    /// infinite mode a playing game is paused, whether or not the value was
    /// accepted. Returns false if the value was rejected.
    pub fn set_gravity(&mut self, gravity: u8) -> bool {
        if self.board.mode() == GameMode::Marathon {
            return false;
        }
        let accepted = gravity <= MAX_GRAVITY
            && self
                .board
                .config(Some(gravity), self.board.ghost_enabled(), None);
        if accepted {
            self.start_gravity = gravity;
            self.config.gravity = gravity;
        }
        if self.board.state() == BoardState::Playing {
            self.toggle_pause();
        }
        accepted
    }

    /// Step gravity up or down by one (infinite mode only).
    pub fn nudge_gravity(&mut self, delta: i8) -> bool {
        let target = self.board.gravity() as i16 + delta as i16;
        if target < 0 || target > MAX_GRAVITY as i16 {
            return false;
        }
        self.set_gravity(target as u8)
    }

    /// Flip the ghost projection. Pauses a playing game.
    pub fn toggle_ghost(&mut self) {
        if self.board.state() == BoardState::Playing {
            self.toggle_pause();
        }
        let ghost = !self.board.ghost_enabled();
        self.config.ghost = ghost;
        self.board.config(None, ghost, None);
    }

    /// Pause a playing game and open the statistics view.
    pub fn open_statistics(&mut self) {
        if self.board.state() == BoardState::Playing {
            self.toggle_pause();
        }
        self.statistics_open = true;
        self.statistics_dirty = true;
        debug!("statistics opened");
    }

    /// Pause a playing game; otherwise switch mode and start over at gravity 0.
    pub fn toggle_mode(&mut self) {
        if self.board.state() == BoardState::Playing {
            self.toggle_pause();
            return;
        }
        self.pressing.clear();
        let mode = self.board.mode().toggled();
        self.start_gravity = 0;
        self.config.gravity = 0;
        self.config.mode = mode;
        self.board.config(Some(0), self.board.ghost_enabled(), Some(mode));
        self.restart();
    }
}
