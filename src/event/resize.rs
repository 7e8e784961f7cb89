//! Resize events.

use std::fmt;

/// Who is being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeKind {
    /// The whole terminal changed size.
    Screen,
    /// A container is resizing one of its own children.
    Widget,
}

impl ResizeKind {
    /// Stable diagnostic name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Screen => "SCREEN",
            Self::Widget => "WIDGET",
        }
    }
}

impl fmt::Display for ResizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// New dimensions for the receiver. Not validated: zero and negative sizes
/// pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeEvent {
    kind: ResizeKind,
    width: i32,
    height: i32,
}

impl ResizeEvent {
    /// Create a resize event.
    pub const fn new(kind: ResizeKind, width: i32, height: i32) -> Self {
        Self {
            kind,
            width,
            height,
        }
    }

    /// Terminal resize.
    pub const fn screen(width: i32, height: i32) -> Self {
        Self::new(ResizeKind::Screen, width, height)
    }

    /// Container-to-child resize.
    pub const fn widget(width: i32, height: i32) -> Self {
        Self::new(ResizeKind::Widget, width, height)
    }

    /// A WIDGET resize with `margin` cells taken off each dimension.
    ///
    /// Wraps on overflow instead of panicking.
    #[must_use]
    pub const fn shrunk_by(&self, margin: i32) -> Self {
        Self::widget(self.width.wrapping_sub(margin), self.height.wrapping_sub(margin))
    }

    /// SCREEN or WIDGET.
    pub const fn kind(&self) -> ResizeKind {
        self.kind
    }

    /// New width in columns.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// New height in rows.
    pub const fn height(&self) -> i32 {
        self.height
    }
}

impl fmt::Display for ResizeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Resize: {} width = {} height = {}",
            self.kind, self.width, self.height
        )
    }
}
