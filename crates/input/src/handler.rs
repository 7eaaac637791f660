//! Held-key tracking for terminal environments.
//!
//! Terminals with keyboard enhancement report key releases; most others only
//! report presses (repeated by the OS while a key is held). The tracker turns
//! either stream into clean down/up transitions: without release events, a
//! key that has not been seen for a few frames is considered released.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_control;
use crate::types::Control;

/// Frames without a press before a key counts as released (~150ms at 60fps).
pub const DEFAULT_RELEASE_TIMEOUT_FRAMES: u32 = 9;

const MAX_HELD: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Down(Control),
    Up(Control),
}

#[derive(Debug, Clone, Copy)]
struct Held {
    control: Control,
    idle_frames: u32,
}

#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: ArrayVec<Held, MAX_HELD>,
    release_timeout_frames: u32,
    /// Set once the terminal delivers a real release event
    reports_release: bool,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            release_timeout_frames: DEFAULT_RELEASE_TIMEOUT_FRAMES,
            reports_release: false,
        }
    }

    pub fn with_release_timeout_frames(mut self, frames: u32) -> Self {
        self.release_timeout_frames = frames;
        self
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.iter().any(|h| h.control == control)
    }

    /// Feed a terminal key event.
    pub fn handle(&mut self, key: KeyEvent) -> Option<KeyTransition> {
        let control = map_control(key)?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(control),
            KeyEventKind::Release => self.release(control),
        }
    }

    /// A press (or repeat) of `control`. Only the first press transitions.
    pub fn press(&mut self, control: Control) -> Option<KeyTransition> {
        if let Some(held) = self.held.iter_mut().find(|h| h.control == control) {
            held.idle_frames = 0;
            return None;
        }
        if self.held.is_full() {
            return None;
        }
        self.held.push(Held {
            control,
            idle_frames: 0,
        });
        Some(KeyTransition::Down(control))
    }

    pub fn release(&mut self, control: Control) -> Option<KeyTransition> {
        self.reports_release = true;
        let idx = self.held.iter().position(|h| h.control == control)?;
        self.held.remove(idx);
        Some(KeyTransition::Up(control))
    }

    /// Age held keys by one frame and return synthesized releases.
    pub fn on_frame(&mut self) -> ArrayVec<KeyTransition, MAX_HELD> {
        let mut released = ArrayVec::new();
        if self.reports_release {
            return released;
        }
        let timeout = self.release_timeout_frames;
        self.held.retain(|held| {
            held.idle_frames += 1;
            if held.idle_frames > timeout {
                released.push(KeyTransition::Up(held.control));
                return false;
            }
            true
        });
        released
    }

    /// Forget every held key (e.g. on focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_first_press_only() {
        let mut tracker = KeyTracker::new();
        assert_eq!(
            tracker.handle(key(KeyCode::Left, KeyEventKind::Press)),
            Some(KeyTransition::Down(Control::MoveLeft))
        );
        assert_eq!(tracker.handle(key(KeyCode::Left, KeyEventKind::Repeat)), None);
        assert!(tracker.is_held(Control::MoveLeft));
    }

    #[test]
    fn test_timeout_release_without_release_events() {
        let mut tracker = KeyTracker::new().with_release_timeout_frames(2);
        tracker.press(Control::SoftDrop);
        assert!(tracker.on_frame().is_empty());
        assert!(tracker.on_frame().is_empty());
        // Refreshing the press restarts the countdown.
        tracker.press(Control::SoftDrop);
        assert!(tracker.on_frame().is_empty());
        assert!(tracker.on_frame().is_empty());
        assert_eq!(
            tracker.on_frame().as_slice(),
            &[KeyTransition::Up(Control::SoftDrop)]
        );
        assert!(!tracker.is_held(Control::SoftDrop));
    }

    #[test]
    fn test_real_release_disables_timeout() {
        let mut tracker = KeyTracker::new().with_release_timeout_frames(1);
        tracker.press(Control::MoveRight);
        assert_eq!(
            tracker.handle(key(KeyCode::Right, KeyEventKind::Release)),
            Some(KeyTransition::Up(Control::MoveRight))
        );
        tracker.press(Control::MoveRight);
        for _ in 0..10 {
            assert!(tracker.on_frame().is_empty());
        }
        assert!(tracker.is_held(Control::MoveRight));
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let mut tracker = KeyTracker::new();
        assert_eq!(tracker.handle(key(KeyCode::Char('g'), KeyEventKind::Press)), None);
        assert_eq!(tracker.handle(key(KeyCode::Char('q'), KeyEventKind::Press)), None);
    }
}
