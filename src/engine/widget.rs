//! The `Widget` trait: per-node behavior hooks.
//!
//! The tree owns geometry, children, and routing. A `Widget` only decides
//! what to do with an event that has already been translated into its own
//! coordinate space. Every hook has a do-nothing default, so a container
//! with no behavior of its own is just `Panel`.

use crate::event::{KeypressEvent, MouseEvent, ResizeEvent};
use crate::types::Rect;

/// Result of offering an event to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOutcome {
    /// Handled; stop propagation.
    Consumed,
    /// Not interested; keep bubbling toward the dispatch root.
    #[default]
    Ignored,
}

impl EventOutcome {
    /// True for `Consumed`.
    pub const fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed)
    }
}

impl From<bool> for EventOutcome {
    fn from(consumed: bool) -> Self {
        if consumed { Self::Consumed } else { Self::Ignored }
    }
}

/// Behavior attached to a node in a [`WidgetTree`](super::WidgetTree).
///
/// Mouse hooks receive an event whose `x`/`y` are relative to this widget.
pub trait Widget {
    /// Short name used in trace output.
    fn name(&self) -> &str {
        "widget"
    }

    fn on_mouse_down(&mut self, _event: &MouseEvent) -> EventOutcome {
        EventOutcome::Ignored
    }

    fn on_mouse_up(&mut self, _event: &MouseEvent) -> EventOutcome {
        EventOutcome::Ignored
    }

    fn on_mouse_motion(&mut self, _event: &MouseEvent) -> EventOutcome {
        EventOutcome::Ignored
    }

    fn on_mouse_double_click(&mut self, _event: &MouseEvent) -> EventOutcome {
        EventOutcome::Ignored
    }

    fn on_keypress(&mut self, _event: &KeypressEvent) -> EventOutcome {
        EventOutcome::Ignored
    }

    /// Called after the tree has applied `event` to this node.
    ///
    /// `bounds` is the node's rectangle after the resize, relative to its parent.
    fn on_resize(&mut self, _event: &ResizeEvent, _bounds: Rect) {}
}

/// A widget with no behavior of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panel;

impl Widget for Panel {
    fn name(&self) -> &str {
        "panel"
    }
}
