use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Direction, Intent};

/// Maps terminal key presses onto simulation intents
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` for key releases and unbound keys.
    pub fn handle_key_event(&self, key: KeyEvent) -> Option<Intent> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Intent::Quit);
        }

        let intent = match key.code {
            KeyCode::Up => Intent::Turn(Direction::Up),
            KeyCode::Down => Intent::Turn(Direction::Down),
            KeyCode::Left => Intent::Turn(Direction::Left),
            KeyCode::Right => Intent::Turn(Direction::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Intent::Turn(Direction::Up),
                's' => Intent::Turn(Direction::Down),
                'a' => Intent::Turn(Direction::Left),
                'd' => Intent::Turn(Direction::Right),
                'h' => Intent::ToggleHint,
                'r' => Intent::Reset,
                'q' => Intent::Quit,
                _ => return None,
            },

            KeyCode::Esc => Intent::Quit,
            _ => return None,
        };

        Some(intent)
    }
}
