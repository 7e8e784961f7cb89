//! Keypress events.
//!
//! Deliberately small: a closed set of keys the widget tree cares about plus
//! modifier flags. Terminal keycode tables live in the backend.

use std::fmt;

bitflags::bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const ALT = 1 << 1;
        const SHIFT = 1 << 2;
    }
}

/// A key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Enter => f.write_str("Enter"),
            Key::Tab => f.write_str("Tab"),
            Key::BackTab => f.write_str("BackTab"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Esc => f.write_str("Esc"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Insert => f.write_str("Insert"),
            Key::F(n) => write!(f, "F{n}"),
        }
    }
}

/// A key press, with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeypressEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeypressEvent {
    /// Unmodified key press.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Create a keypress with modifiers.
    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Ctrl plus a character.
    pub const fn ctrl(c: char) -> Self {
        Self::with_modifiers(Key::Char(c), Modifiers::CTRL)
    }

    /// Alt plus a character.
    pub const fn alt(c: char) -> Self {
        Self::with_modifiers(Key::Char(c), Modifiers::ALT)
    }
}

impl From<Key> for KeypressEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for KeypressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Keypress: ")?;
        if self.modifiers.contains(Modifiers::CTRL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_modifiers() {
        let event = KeypressEvent::with_modifiers(Key::Char('q'), Modifiers::CTRL | Modifiers::ALT);
        assert_eq!(event.to_string(), "Keypress: Ctrl+Alt+q");
    }

    #[test]
    fn test_display_named_keys() {
        assert_eq!(KeypressEvent::new(Key::F(10)).to_string(), "Keypress: F10");
        assert_eq!(KeypressEvent::new(Key::Char(' ')).to_string(), "Keypress: Space");
        assert_eq!(
            KeypressEvent::with_modifiers(Key::Tab, Modifiers::SHIFT).to_string(),
            "Keypress: Shift+Tab"
        );
    }
}
