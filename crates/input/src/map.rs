//! Key mapping from terminal events to controls and front-end commands.

use crate::types::Control;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key means to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// A session control (held, auto-repeated where applicable)
    Control(Control),
    GravityUp,
    GravityDown,
    ToggleGhost,
    Quit,
}

/// Map a key to its command.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    if should_quit(key) {
        return Some(KeyCommand::Quit);
    }
    let control = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Control::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Control::MoveRight,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Control::SoftDrop,
        KeyCode::Char(' ') => Control::HardDrop,

        // Rotation
        KeyCode::Up
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Control::RotateRight,
        KeyCode::Char('z') | KeyCode::Char('Z') => Control::RotateLeft,

        KeyCode::Char('c') | KeyCode::Char('C') => Control::Hold,

        // Session
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Control::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => Control::Reset,
        KeyCode::Char('s') | KeyCode::Char('S') => Control::Statistics,
        KeyCode::Char('m') | KeyCode::Char('M') => Control::Mode,

        // Settings
        KeyCode::Char('+') | KeyCode::Char('=') => return Some(KeyCommand::GravityUp),
        KeyCode::Char('-') | KeyCode::Char('_') => return Some(KeyCommand::GravityDown),
        KeyCode::Char('g') | KeyCode::Char('G') => return Some(KeyCommand::ToggleGhost),

        _ => return None,
    };
    Some(KeyCommand::Control(control))
}

/// Map a key to a session control, ignoring front-end commands.
pub fn map_control(key: KeyEvent) -> Option<Control> {
    match map_key(key)? {
        KeyCommand::Control(control) => Some(control),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(code: KeyCode) -> Option<Control> {
        map_control(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(control(KeyCode::Left), Some(Control::MoveLeft));
        assert_eq!(control(KeyCode::Right), Some(Control::MoveRight));
        assert_eq!(control(KeyCode::Down), Some(Control::SoftDrop));
        assert_eq!(control(KeyCode::Char(' ')), Some(Control::HardDrop));
        assert_eq!(control(KeyCode::Char('H')), Some(Control::MoveLeft));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(control(KeyCode::Up), Some(Control::RotateRight));
        assert_eq!(control(KeyCode::Char('x')), Some(Control::RotateRight));
        assert_eq!(control(KeyCode::Char('z')), Some(Control::RotateLeft));
        assert_eq!(control(KeyCode::Char('Z')), Some(Control::RotateLeft));
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(control(KeyCode::Char('c')), Some(Control::Hold));
        assert_eq!(control(KeyCode::Esc), Some(Control::Pause));
        assert_eq!(control(KeyCode::Char('r')), Some(Control::Reset));
        assert_eq!(control(KeyCode::Char('s')), Some(Control::Statistics));
        assert_eq!(control(KeyCode::Char('m')), Some(Control::Mode));
    }

    #[test]
    fn test_front_end_commands() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('+'))), Some(KeyCommand::GravityUp));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('-'))), Some(KeyCommand::GravityDown));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('g'))), Some(KeyCommand::ToggleGhost));
        assert_eq!(control(KeyCode::Char('g')), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::F(5))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyCommand::Quit)
        );
    }
}
