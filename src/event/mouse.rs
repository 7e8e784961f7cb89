//! Mouse events.
//!
//! A `MouseEvent` carries two positions:
//!
//! - `absolute_x` / `absolute_y` - screen coordinates, fixed at construction
//! - `x` / `y` - coordinates relative to whichever widget is looking at it
//!
//! The relative pair is what handlers use. Dispatch hands every handler its
//! own copy via [`MouseEvent::relative_to`], so the invariant
//! `(x, y) == (absolute_x, absolute_y) - handler origin` always holds there.
//!
//! # Example
//!
//! ```
//! use spark_vision::{MouseButtons, MouseEvent, MouseEventKind, Point};
//!
//! let event = MouseEvent::at(MouseEventKind::Down, 10, 11, MouseButtons::LEFT);
//! let local = event.relative_to(Point::new(7, 7));
//! assert_eq!((local.x, local.y), (3, 4));
//! assert_eq!(local.absolute_x(), 10);
//! ```

use std::fmt;

use crate::types::Point;

// =============================================================================
// TYPES
// =============================================================================

/// What the mouse did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse motion, with or without buttons held.
    Motion,
    /// A button (or wheel notch) went down.
    Down,
    /// A button was released.
    Up,
    /// Second press of the left button in quick succession.
    DoubleClick,
}

impl MouseEventKind {
    /// Stable diagnostic name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Motion => "MOUSE_MOTION",
            Self::Down => "MOUSE_DOWN",
            Self::Up => "MOUSE_UP",
            Self::DoubleClick => "MOUSE_DOUBLE_CLICK",
        }
    }
}

impl fmt::Display for MouseEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Button and wheel state. Each flag is independent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Button 1.
        const LEFT = 1 << 0;
        /// Button 2.
        const RIGHT = 1 << 1;
        /// Button 3.
        const MIDDLE = 1 << 2;
        /// Button 4.
        const WHEEL_UP = 1 << 3;
        /// Button 5.
        const WHEEL_DOWN = 1 << 4;
    }
}

// =============================================================================
// MOUSE EVENT
// =============================================================================

/// A mouse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseEvent {
    kind: MouseEventKind,
    /// Column relative to the current handler.
    pub x: i32,
    /// Row relative to the current handler.
    pub y: i32,
    absolute_x: i32,
    absolute_y: i32,
    buttons: MouseButtons,
}

impl MouseEvent {
    /// Create a mouse event with every field given.
    pub const fn new(
        kind: MouseEventKind,
        x: i32,
        y: i32,
        absolute_x: i32,
        absolute_y: i32,
        buttons: MouseButtons,
    ) -> Self {
        Self {
            kind,
            x,
            y,
            absolute_x,
            absolute_y,
            buttons,
        }
    }

    /// Create an event at a screen position. Relative equals absolute.
    pub const fn at(kind: MouseEventKind, absolute_x: i32, absolute_y: i32, buttons: MouseButtons) -> Self {
        Self::new(kind, absolute_x, absolute_y, absolute_x, absolute_y, buttons)
    }

    /// Create a mouse down event
    pub const fn down(absolute_x: i32, absolute_y: i32, buttons: MouseButtons) -> Self {
        Self::at(MouseEventKind::Down, absolute_x, absolute_y, buttons)
    }

    /// Create a mouse up event
    pub const fn up(absolute_x: i32, absolute_y: i32, buttons: MouseButtons) -> Self {
        Self::at(MouseEventKind::Up, absolute_x, absolute_y, buttons)
    }

    /// Create a mouse motion event
    pub const fn motion(absolute_x: i32, absolute_y: i32, buttons: MouseButtons) -> Self {
        Self::at(MouseEventKind::Motion, absolute_x, absolute_y, buttons)
    }

    /// Create a double click event
    pub const fn double_click(absolute_x: i32, absolute_y: i32, buttons: MouseButtons) -> Self {
        Self::at(MouseEventKind::DoubleClick, absolute_x, absolute_y, buttons)
    }

    /// Independent copy for handing the same event to more than one consumer.
    #[must_use]
    pub fn dup(&self) -> Self {
        self.clone()
    }

    /// Copy of this event as seen by a widget whose absolute origin is `origin`.
    #[must_use]
    pub fn relative_to(&self, origin: Point) -> Self {
        let local = self.absolute() - origin;
        Self {
            x: local.x,
            y: local.y,
            ..self.clone()
        }
    }

    /// Re-express the relative position in place for an origin moved by `(dx, dy)`.
    pub fn shift_origin(&mut self, dx: i32, dy: i32) {
        self.x = self.x.wrapping_sub(dx);
        self.y = self.y.wrapping_sub(dy);
    }

    /// What the mouse did.
    pub const fn kind(&self) -> MouseEventKind {
        self.kind
    }

    /// Screen column.
    pub const fn absolute_x(&self) -> i32 {
        self.absolute_x
    }

    /// Screen row.
    pub const fn absolute_y(&self) -> i32 {
        self.absolute_y
    }

    /// Relative position as a point.
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Screen position as a point.
    pub const fn absolute(&self) -> Point {
        Point::new(self.absolute_x, self.absolute_y)
    }

    /// Button and wheel flags.
    pub const fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    /// Left button.
    pub const fn is_mouse1(&self) -> bool {
        self.buttons.contains(MouseButtons::LEFT)
    }

    /// Right button.
    pub const fn is_mouse2(&self) -> bool {
        self.buttons.contains(MouseButtons::RIGHT)
    }

    /// Middle button.
    pub const fn is_mouse3(&self) -> bool {
        self.buttons.contains(MouseButtons::MIDDLE)
    }

    /// Wheel scrolled up (button 4).
    pub const fn is_wheel_up(&self) -> bool {
        self.buttons.contains(MouseButtons::WHEEL_UP)
    }

    /// Wheel scrolled down (button 5).
    pub const fn is_wheel_down(&self) -> bool {
        self.buttons.contains(MouseButtons::WHEEL_DOWN)
    }
}

impl fmt::Display for MouseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mouse: {} x {} y {} absoluteX {} absoluteY {} 1 {} 2 {} 3 {} DOWN {} UP {}",
            self.kind,
            self.x,
            self.y,
            self.absolute_x,
            self.absolute_y,
            self.is_mouse1(),
            self.is_mouse2(),
            self.is_mouse3(),
            self.is_wheel_up(),
            self.is_wheel_down(),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_starts_in_screen_space() {
        let event = MouseEvent::at(MouseEventKind::Motion, 12, 7, MouseButtons::empty());
        assert_eq!(event.position(), event.absolute());
    }

    #[test]
    fn test_dup_is_isolated() {
        let original = MouseEvent::new(MouseEventKind::Down, 3, 4, 10, 11, MouseButtons::LEFT);
        let mut copy = original.dup();
        assert_eq!(copy, original);

        copy.x = 99;
        copy.shift_origin(1, 1);
        assert_eq!(original.x, 3);
        assert_eq!(original.y, 4);
        assert_eq!(copy.x, 98);
        assert_eq!(copy.y, 3);
    }

    #[test]
    fn test_relative_to_keeps_absolute() {
        let event = MouseEvent::down(10, 11, MouseButtons::RIGHT);
        let local = event.relative_to(Point::new(4, 20));

        assert_eq!(local.position(), Point::new(6, -9));
        assert_eq!(local.absolute(), Point::new(10, 11));
        assert_eq!(local.kind(), MouseEventKind::Down);
        assert!(local.is_mouse2());
        // source untouched
        assert_eq!(event.position(), Point::new(10, 11));
    }

    #[test]
    fn test_display_golden() {
        let event = MouseEvent::new(MouseEventKind::Down, 3, 4, 10, 11, MouseButtons::LEFT);
        assert_eq!(
            event.to_string(),
            "Mouse: MOUSE_DOWN x 3 y 4 absoluteX 10 absoluteY 11 1 true 2 false 3 false DOWN false UP false"
        );
    }

    #[test]
    fn test_display_all_flags() {
        let event = MouseEvent::new(
            MouseEventKind::DoubleClick,
            -1,
            0,
            5,
            6,
            MouseButtons::all(),
        );
        assert_eq!(
            event.to_string(),
            "Mouse: MOUSE_DOUBLE_CLICK x -1 y 0 absoluteX 5 absoluteY 6 1 true 2 true 3 true DOWN true UP true"
        );
    }

    #[test]
    fn test_display_wheel_up_under_down_label() {
        let event = MouseEvent::new(
            MouseEventKind::Down,
            3,
            4,
            10,
            11,
            MouseButtons::LEFT | MouseButtons::WHEEL_UP,
        );
        assert_eq!(
            event.to_string(),
            "Mouse: MOUSE_DOWN x 3 y 4 absoluteX 10 absoluteY 11 1 true 2 false 3 false DOWN true UP false"
        );
    }

    #[test]
    fn test_button_flags_are_independent() {
        let event = MouseEvent::motion(0, 0, MouseButtons::MIDDLE | MouseButtons::WHEEL_DOWN);
        assert!(!event.is_mouse1());
        assert!(!event.is_mouse2());
        assert!(event.is_mouse3());
        assert!(!event.is_wheel_up());
        assert!(event.is_wheel_down());
    }
}
