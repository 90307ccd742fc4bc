//! Event handling for the TUI.
//!
//! Provides keyboard event polling and key classification.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use planboard_core::Granularity;

use crate::TuiResult;

/// Poll for keyboard events with a timeout.
///
/// Returns `Some(KeyEvent)` if a key was pressed within the timeout,
/// or `None` if no key was pressed.
pub fn poll_key(timeout: Duration) -> TuiResult<Option<KeyEvent>> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(Some(key));
    }
    Ok(None)
}

/// Check if the key event represents a quit command.
///
/// Returns `true` for 'q' key or Ctrl+C.
pub fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

/// Check if the key event selects the next item (j or Down arrow).
pub fn is_down(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Down,
            ..
        }
    )
}

/// Check if the key event selects the previous item (k or Up arrow).
pub fn is_up(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('k'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Up,
            ..
        }
    )
}

/// Check if the key event steps to the previous period (h or Left arrow).
pub fn is_previous(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            ..
        }
    )
}

/// Check if the key event steps to the next period (l or Right arrow).
pub fn is_next(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('l'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
            ..
        }
    )
}

/// Check if the key event pans the surface back (H).
///
/// Terminals differ on whether Shift is reported alongside the uppercase
/// character, so modifiers are ignored.
pub fn is_pan_back(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('H'),
            ..
        }
    )
}

/// Check if the key event pans the surface forward (L).
pub fn is_pan_forward(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('L'),
            ..
        }
    )
}

/// Granularity selected by the key, if any (d, w or m).
pub fn granularity_key(key: &KeyEvent) -> Option<Granularity> {
    if key.modifiers != KeyModifiers::NONE {
        return None;
    }
    match key.code {
        KeyCode::Char('d') => Some(Granularity::Day),
        KeyCode::Char('w') => Some(Granularity::Week),
        KeyCode::Char('m') => Some(Granularity::Month),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_is_quit_q() {
        let key = make_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(is_quit(&key));
    }

    #[test]
    fn test_is_quit_ctrl_c() {
        let key = make_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_quit(&key));
    }

    #[test]
    fn test_is_quit_other() {
        let key = make_key(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(!is_quit(&key));
    }

    #[test]
    fn test_is_down_j_and_arrow() {
        assert!(is_down(&make_key(KeyCode::Char('j'), KeyModifiers::NONE)));
        assert!(is_down(&make_key(KeyCode::Down, KeyModifiers::NONE)));
    }

    #[test]
    fn test_is_up_k_and_arrow() {
        assert!(is_up(&make_key(KeyCode::Char('k'), KeyModifiers::NONE)));
        assert!(is_up(&make_key(KeyCode::Up, KeyModifiers::NONE)));
    }

    #[test]
    fn test_is_previous() {
        assert!(is_previous(&make_key(KeyCode::Char('h'), KeyModifiers::NONE)));
        assert!(is_previous(&make_key(KeyCode::Left, KeyModifiers::NONE)));
    }

    #[test]
    fn test_is_next() {
        assert!(is_next(&make_key(KeyCode::Char('l'), KeyModifiers::NONE)));
        assert!(is_next(&make_key(KeyCode::Right, KeyModifiers::NONE)));
    }

    #[test]
    fn test_is_previous_with_modifier_is_false() {
        let key = make_key(KeyCode::Char('h'), KeyModifiers::CONTROL);
        assert!(!is_previous(&key));
    }

    #[test]
    fn test_pan_keys_accept_shift() {
        assert!(is_pan_back(&make_key(KeyCode::Char('H'), KeyModifiers::SHIFT)));
        assert!(is_pan_back(&make_key(KeyCode::Char('H'), KeyModifiers::NONE)));
        assert!(is_pan_forward(&make_key(KeyCode::Char('L'), KeyModifiers::SHIFT)));
        assert!(!is_pan_forward(&make_key(KeyCode::Char('l'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_granularity_keys() {
        let cases = [
            ('d', Some(Granularity::Day)),
            ('w', Some(Granularity::Week)),
            ('m', Some(Granularity::Month)),
            ('x', None),
        ];
        for (c, expected) in cases {
            assert_eq!(
                granularity_key(&make_key(KeyCode::Char(c), KeyModifiers::NONE)),
                expected
            );
        }
    }

    #[test]
    fn test_granularity_key_with_modifier_is_none() {
        let key = make_key(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(granularity_key(&key), None);
    }
}
