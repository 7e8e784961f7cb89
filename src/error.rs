//! Error types for widget tree operations.
//!
//! Dispatch itself never fails on event contents; errors come from handles
//! that no longer point at a live widget or from structural misuse.

use thiserror::Error;

use crate::engine::WidgetId;

/// Errors returned by [`WidgetTree`](crate::WidgetTree) and [`Desktop`](crate::Desktop).
#[derive(Debug, Error)]
pub enum Error {
    /// The handle is stale or was never issued by this tree.
    #[error("unknown widget {0}")]
    UnknownWidget(WidgetId),

    /// A window-only operation was used on a plain widget.
    #[error("widget {0} is not a window")]
    NotAWindow(WidgetId),

    /// The widget is not a direct child of the given parent.
    #[error("widget {child} is not a child of {parent}")]
    NotAChild {
        /// Expected parent.
        parent: WidgetId,
        /// Offending widget.
        child: WidgetId,
    },

    /// The widget already sits under a parent.
    #[error("widget {child} is already attached to {parent}")]
    AlreadyAttached {
        /// Current parent.
        parent: WidgetId,
        /// Widget being attached.
        child: WidgetId,
    },

    /// Attaching would make a widget its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: WidgetId,
        /// Widget being attached.
        child: WidgetId,
    },

    /// The window was created without the resizable flag.
    #[error("window {0} is not resizable")]
    NotResizable(WidgetId),

    /// Reading terminal input failed.
    #[error("terminal input error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
