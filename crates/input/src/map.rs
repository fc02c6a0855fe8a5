//! Key mapping from terminal events to arcade events.

use crate::types::Event;
use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map one key press to an event. Unbound keys map to [`Event::None`].
pub fn map_key(key: KeyEvent) -> Event {
    if should_quit(key) {
        return Event::Quit;
    }

    match key.code {
        // Movement
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Event::MoveUp,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Event::MoveDown,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Event::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Event::MoveRight,

        KeyCode::Enter | KeyCode::Char(' ') => Event::Action,
        KeyCode::Char('p') | KeyCode::Char('P') => Event::Pause,
        KeyCode::Char('m') | KeyCode::Char('M') => Event::Menu,

        // Module switching
        KeyCode::Char('n') | KeyCode::Char('N') => Event::NextRenderer,
        KeyCode::Char('b') | KeyCode::Char('B') => Event::PrevRenderer,
        KeyCode::Char(']') => Event::NextGame,
        KeyCode::Char('[') => Event::PrevGame,

        _ => Event::None,
    }
}

/// Map any terminal event. Only key presses produce events; releases,
/// repeats, mouse and resize events are ignored.
pub fn map_terminal_event(event: &TermEvent) -> Event {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => map_key(*key),
        _ => Event::None,
    }
}

/// Check if key should quit the session.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Event::MoveUp);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Event::MoveDown);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Event::MoveLeft);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Event::MoveRight);

        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('W'))), Event::MoveUp);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('s'))), Event::MoveDown);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('a'))), Event::MoveLeft);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('D'))), Event::MoveRight);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Event::Action);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Event::Action);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('p'))), Event::Pause);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('m'))), Event::Menu);
    }

    #[test]
    fn test_switch_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('n'))), Event::NextRenderer);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('b'))), Event::PrevRenderer);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(']'))), Event::NextGame);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('['))), Event::PrevGame);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Event::Quit);
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), Event::None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Tab)), Event::None);
    }

    #[test]
    fn test_only_presses_count() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_terminal_event(&TermEvent::Key(release)), Event::None);
        assert_eq!(
            map_terminal_event(&TermEvent::Key(KeyEvent::from(KeyCode::Enter))),
            Event::Action
        );
        assert_eq!(map_terminal_event(&TermEvent::Resize(80, 24)), Event::None);

        let mouse = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(map_terminal_event(&TermEvent::Mouse(mouse)), Event::None);
    }
}
