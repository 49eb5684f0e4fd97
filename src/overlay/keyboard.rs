/// Keys the overlay understands, independent of the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Space,
    Backspace,
    Enter,
    Shift,
    Ctrl,
    Tab,
    Escape,
    CapsLock,
    Alt,
    Meta,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn press(key: KeyCode) -> Self {
        Self {
            key,
            action: KeyAction::Press,
        }
    }

    pub fn release(key: KeyCode) -> Self {
        Self {
            key,
            action: KeyAction::Release,
        }
    }
}

/// Maps a key to the label used by the keyboard layout.
///
/// Characters pass through uppercased, so punctuation such as `;` or `/`
/// matches its layout key directly. `KeyCode::Other` yields `None` and the
/// event is dropped.
pub fn normalize_key(key: KeyCode) -> Option<String> {
    let label = match key {
        KeyCode::Char(' ') | KeyCode::Space => "SPACE",
        KeyCode::Char(c) => return Some(c.to_uppercase().collect()),
        KeyCode::Backspace => "BACKSPACE",
        KeyCode::Enter => "ENTER",
        KeyCode::Shift => "SHIFT",
        KeyCode::Ctrl => "CTRL",
        KeyCode::Tab => "TAB",
        KeyCode::Escape => "ESC",
        KeyCode::CapsLock => "CAPS",
        KeyCode::Alt => "ALT",
        KeyCode::Meta => "WIN",
        KeyCode::Other => return None,
    };
    Some(label.to_string())
}

/// Held modifier flags as reported by the toolkit each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Turns modifier flag changes into press/release events.
///
/// Toolkits usually expose modifiers only as state, never as key events, so
/// the overlay compares consecutive snapshots.
#[derive(Debug, Default)]
pub struct ModifierTracker {
    held: KeyModifiers,
}

impl ModifierTracker {
    pub fn update(&mut self, next: KeyModifiers) -> Vec<KeyEvent> {
        let prev = self.held;
        self.held = next;

        [
            (prev.shift, next.shift, KeyCode::Shift),
            (prev.ctrl, next.ctrl, KeyCode::Ctrl),
            (prev.alt, next.alt, KeyCode::Alt),
            (prev.meta, next.meta, KeyCode::Meta),
        ]
        .into_iter()
        .filter_map(|(was, is, key)| match (was, is) {
            (false, true) => Some(KeyEvent::press(key)),
            (true, false) => Some(KeyEvent::release(key)),
            _ => None,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characters_are_uppercased() {
        assert_eq!(normalize_key(KeyCode::Char('q')).as_deref(), Some("Q"));
        assert_eq!(normalize_key(KeyCode::Char('7')).as_deref(), Some("7"));
        assert_eq!(normalize_key(KeyCode::Char('[')).as_deref(), Some("["));
    }

    #[test]
    fn named_keys_map_to_layout_labels() {
        let cases = [
            (KeyCode::Space, "SPACE"),
            (KeyCode::Char(' '), "SPACE"),
            (KeyCode::Backspace, "BACKSPACE"),
            (KeyCode::Enter, "ENTER"),
            (KeyCode::Shift, "SHIFT"),
            (KeyCode::Ctrl, "CTRL"),
            (KeyCode::Tab, "TAB"),
            (KeyCode::Escape, "ESC"),
            (KeyCode::CapsLock, "CAPS"),
            (KeyCode::Alt, "ALT"),
            (KeyCode::Meta, "WIN"),
        ];
        for (key, label) in cases {
            assert_eq!(normalize_key(key).as_deref(), Some(label), "{key:?}");
        }
    }

    #[test]
    fn other_keys_are_dropped() {
        assert_eq!(normalize_key(KeyCode::Other), None);
    }

    #[test]
    fn modifier_transitions_emit_press_then_release() {
        let mut tracker = ModifierTracker::default();
        assert!(tracker.update(KeyModifiers::default()).is_empty());

        let pressed = tracker.update(KeyModifiers {
            shift: true,
            ctrl: true,
            ..Default::default()
        });
        assert_eq!(
            pressed,
            vec![KeyEvent::press(KeyCode::Shift), KeyEvent::press(KeyCode::Ctrl)]
        );

        let held = tracker.update(KeyModifiers {
            shift: true,
            ..Default::default()
        });
        assert_eq!(held, vec![KeyEvent::release(KeyCode::Ctrl)]);

        let released = tracker.update(KeyModifiers::default());
        assert_eq!(released, vec![KeyEvent::release(KeyCode::Shift)]);
    }
}
