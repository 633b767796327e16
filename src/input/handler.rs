use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, FaceNormal};

/// Heading as seen on screen, relative to the face being looked at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScreenDirection {
    /// World heading for this on-screen heading while standing on `normal`
    pub fn to_world(self, normal: FaceNormal) -> Direction {
        let (right, up) = normal.view_axes();
        match self {
            ScreenDirection::Up => up,
            ScreenDirection::Down => up.opposite(),
            ScreenDirection::Right => right,
            ScreenDirection::Left => right.opposite(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(ScreenDirection),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(ScreenDirection::Up),
            KeyCode::Down => KeyAction::Turn(ScreenDirection::Down),
            KeyCode::Left => KeyAction::Turn(ScreenDirection::Left),
            KeyCode::Right => KeyAction::Turn(ScreenDirection::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(ScreenDirection::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(ScreenDirection::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(ScreenDirection::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(ScreenDirection::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
