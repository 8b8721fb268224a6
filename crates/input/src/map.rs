//! Key mapping from terminal events to buttons.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Physical buttons of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Center,
    Reset,
}

/// Map keyboard input to a button.
///
/// Up/Down double as left/right so the board can be read in either
/// orientation.
pub fn map_key_event(key: KeyEvent) -> Option<Button> {
    match key.code {
        KeyCode::Left
        | KeyCode::Up
        | KeyCode::Char('a')
        | KeyCode::Char('A')
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Some(Button::Left),
        KeyCode::Right
        | KeyCode::Down
        | KeyCode::Char('d')
        | KeyCode::Char('D')
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('j')
        | KeyCode::Char('J') => Some(Button::Right),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Button::Center),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Button::Reset),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
