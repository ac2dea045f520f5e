use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::core::input::KeyEvent;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    /// A key for the navigation engine, named like a browser names it.
    Key(KeyEvent),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} {:?} with modifiers {:?}",
                key_event.code,
                key_event.kind,
                key_event.modifiers
            );
            translate(key_event)
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Maps a terminal key event to a browser-style key identifier.
///
/// Release events are dropped. Repeats are passed through flagged, so the
/// dispatcher can ignore them; terminals only report them when the kitty
/// keyboard protocol is enabled.
pub fn translate(key_event: crossterm::event::KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    let key = match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Some(TuiEvent::Quit),
        (_, KeyCode::Char('q')) => return Some(TuiEvent::Quit),
        (_, KeyCode::Left) => "ArrowLeft".to_string(),
        (_, KeyCode::Right) => "ArrowRight".to_string(),
        (_, KeyCode::Up) => "ArrowUp".to_string(),
        (_, KeyCode::Down) => "ArrowDown".to_string(),
        (_, KeyCode::Enter) => "Enter".to_string(),
        (_, KeyCode::Backspace) => "Backspace".to_string(),
        (_, KeyCode::Esc) => "Escape".to_string(),
        (_, KeyCode::F(n)) => format!("F{n}"),
        (_, KeyCode::Char(c)) => c.to_string(),
        _ => return None,
    };
    Some(TuiEvent::Key(KeyEvent {
        key,
        repeat: key_event.kind == KeyEventKind::Repeat,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> crossterm::event::KeyEvent {
        crossterm::event::KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn pressed(code: KeyCode) -> Option<TuiEvent> {
        translate(key(code, KeyEventKind::Press))
    }

    #[test]
    fn test_arrows_use_browser_names() {
        assert_eq!(pressed(KeyCode::Left), Some(TuiEvent::Key(KeyEvent::press("ArrowLeft"))));
        assert_eq!(pressed(KeyCode::Down), Some(TuiEvent::Key(KeyEvent::press("ArrowDown"))));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(pressed(KeyCode::Enter), Some(TuiEvent::Key(KeyEvent::press("Enter"))));
        assert_eq!(pressed(KeyCode::Char(' ')), Some(TuiEvent::Key(KeyEvent::press(" "))));
        assert_eq!(pressed(KeyCode::Esc), Some(TuiEvent::Key(KeyEvent::press("Escape"))));
        assert_eq!(pressed(KeyCode::F(5)), Some(TuiEvent::Key(KeyEvent::press("F5"))));
    }

    #[test]
    fn test_repeat_is_flagged_and_release_dropped() {
        assert_eq!(
            translate(key(KeyCode::Right, KeyEventKind::Repeat)),
            Some(TuiEvent::Key(KeyEvent::repeat("ArrowRight")))
        );
        assert_eq!(translate(key(KeyCode::Right, KeyEventKind::Release)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(pressed(KeyCode::Char('q')), Some(TuiEvent::Quit));
        let ctrl_c = crossterm::event::KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'), KeyEventKind::Press)
        };
        assert_eq!(translate(ctrl_c), Some(TuiEvent::Quit));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(pressed(KeyCode::Tab), None);
        assert_eq!(pressed(KeyCode::PageUp), None);
    }
}
