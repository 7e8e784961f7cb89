//! Input Module - crossterm event conversion
//!
//! Bridges crossterm's already-decoded terminal events to our event types.
//! Raw escape-sequence parsing stays in crossterm; what lives here is the
//! state crossterm doesn't keep for us:
//!
//! - which buttons are currently held (motion events report them)
//! - double-click synthesis from two quick left presses on the same cell
//!
//! # Example
//!
//! ```ignore
//! use spark_vision::{Desktop, DesktopConfig};
//! use std::time::Duration;
//!
//! let mut desktop = Desktop::new(DesktopConfig::default());
//! loop {
//!     for dispatch in desktop.poll(Duration::from_millis(16))? {
//!         tracing::trace!(?dispatch, "routed");
//!     }
//! }
//! ```

use std::time::{Duration, Instant};

use crossterm::event::{
    Event as CrosstermEvent,
    KeyCode, KeyEventKind, KeyModifiers,
    KeyEvent as CrosstermKeyEvent,
    MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent,
    MouseEventKind as CrosstermMouseEventKind,
    poll, read,
};

use super::keyboard::{Key, KeypressEvent, Modifiers};
use super::mouse::{MouseButtons, MouseEvent, MouseEventKind};
use super::resize::ResizeEvent;
use crate::types::Point;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Everything the widget tree knows how to route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Mouse(MouseEvent),
    Keypress(KeypressEvent),
    Resize(ResizeEvent),
}

impl From<MouseEvent> for InputEvent {
    fn from(event: MouseEvent) -> Self {
        Self::Mouse(event)
    }
}

impl From<KeypressEvent> for InputEvent {
    fn from(event: KeypressEvent) -> Self {
        Self::Keypress(event)
    }
}

impl From<ResizeEvent> for InputEvent {
    fn from(event: ResizeEvent) -> Self {
        Self::Resize(event)
    }
}

// =============================================================================
// DECODER
// =============================================================================

/// Stateful crossterm-to-`InputEvent` converter.
#[derive(Debug, Clone)]
pub struct InputDecoder {
    held: MouseButtons,
    last_click: Option<(Point, Instant)>,
    double_click: Duration,
}

impl InputDecoder {
    /// Create a decoder with the given double-click window.
    pub fn new(double_click: Duration) -> Self {
        Self {
            held: MouseButtons::empty(),
            last_click: None,
            double_click,
        }
    }

    /// Buttons currently held down.
    pub fn held_buttons(&self) -> MouseButtons {
        self.held
    }

    /// Convert one crossterm event using the current time.
    pub fn decode(&mut self, event: CrosstermEvent) -> Vec<InputEvent> {
        self.decode_at(event, Instant::now())
    }

    /// Convert one crossterm event as if it arrived at `now`.
    ///
    /// Usually yields zero or one event; a double click yields the press
    /// followed by the `DoubleClick`.
    pub fn decode_at(&mut self, event: CrosstermEvent, now: Instant) -> Vec<InputEvent> {
        match event {
            CrosstermEvent::Mouse(mouse) => self.decode_mouse(mouse, now),
            CrosstermEvent::Key(key) => convert_key_event(key)
                .map(InputEvent::Keypress)
                .into_iter()
                .collect(),
            CrosstermEvent::Resize(w, h) => {
                vec![InputEvent::Resize(ResizeEvent::screen(i32::from(w), i32::from(h)))]
            }
            _ => Vec::new(),
        }
    }

    /// Poll the terminal for an event with timeout and decode it.
    /// Returns an empty list if nothing arrived within timeout.
    pub fn poll(&mut self, timeout: Duration) -> std::io::Result<Vec<InputEvent>> {
        if poll(timeout)? {
            Ok(self.decode(read()?))
        } else {
            Ok(Vec::new())
        }
    }

    fn decode_mouse(&mut self, event: CrosstermMouseEvent, now: Instant) -> Vec<InputEvent> {
        let ax = i32::from(event.column);
        let ay = i32::from(event.row);

        let (kind, buttons) = match event.kind {
            CrosstermMouseEventKind::Down(btn) => {
                self.held |= convert_mouse_button(btn);
                (MouseEventKind::Down, self.held)
            }
            CrosstermMouseEventKind::Up(btn) => {
                let released = convert_mouse_button(btn);
                self.held.remove(released);
                (MouseEventKind::Up, released)
            }
            CrosstermMouseEventKind::Drag(btn) => {
                // A drag implies the button is down even if we missed the press
                self.held |= convert_mouse_button(btn);
                (MouseEventKind::Motion, self.held)
            }
            CrosstermMouseEventKind::Moved => (MouseEventKind::Motion, self.held),
            CrosstermMouseEventKind::ScrollUp => (MouseEventKind::Down, MouseButtons::WHEEL_UP),
            CrosstermMouseEventKind::ScrollDown => (MouseEventKind::Down, MouseButtons::WHEEL_DOWN),
            CrosstermMouseEventKind::ScrollLeft | CrosstermMouseEventKind::ScrollRight => {
                return Vec::new();
            }
        };

        let mut events = vec![InputEvent::Mouse(MouseEvent::at(kind, ax, ay, buttons))];

        if matches!(event.kind, CrosstermMouseEventKind::Down(CrosstermMouseButton::Left)) {
            let here = Point::new(ax, ay);
            match self.last_click {
                Some((at, when)) if at == here && now.saturating_duration_since(when) <= self.double_click => {
                    events.push(InputEvent::Mouse(MouseEvent::double_click(ax, ay, buttons)));
                    self.last_click = None;
                }
                _ => self.last_click = Some((here, now)),
            }
        }

        events
    }
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_DOUBLE_CLICK_MILLIS))
    }
}

/// Convert crossterm MouseButton to our button flag
fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButtons {
    match btn {
        CrosstermMouseButton::Left => MouseButtons::LEFT,
        CrosstermMouseButton::Right => MouseButtons::RIGHT,
        CrosstermMouseButton::Middle => MouseButtons::MIDDLE,
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeypressEvent.
///
/// Releases and keys outside [`Key`] yield `None`.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeypressEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };

    Some(KeypressEvent::with_modifiers(key, convert_modifiers(event.modifiers)))
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    out
}

// =============================================================================
// TESTS
// =============================================================================
