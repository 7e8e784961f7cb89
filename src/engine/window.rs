//! Windows: widget nodes with window-only data.
//!
//! A window is an ordinary node in the [`WidgetTree`] whose role carries a
//! [`Window`]: title, flags, and two non-owning handles.
//!
//! - **primary** - the content child the window keeps sized to its own
//!   interior on WIDGET resizes (see [`WINDOW_BORDER_MARGIN`])
//! - **status bar** - any widget the application shows while this window is
//!   active; it does not have to be a child
//!
//! # Example
//!
//! ```
//! use spark_vision::{Panel, Rect, Window, WindowFlags, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let editor = Window::new("Editor").with_flags(WindowFlags::RESIZABLE);
//! let win = tree.insert_window(editor, Panel, Rect::new(0, 0, 44, 22));
//! let text = tree.add_child(win, Panel, Rect::new(0, 0, 42, 20)).unwrap();
//! tree.set_primary(win, text).unwrap();
//! assert_eq!(tree.primary(win).unwrap(), Some(text));
//! ```

use super::registry::{Role, WidgetId, WidgetTree};
use super::widget::Widget;
use crate::error::{Error, Result};
use crate::types::Rect;

/// Rows and columns of chrome (border plus title) around a window's primary child.
pub const WINDOW_BORDER_MARGIN: i32 = 2;

bitflags::bitflags! {
    /// Window behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowFlags: u8 {
        /// The user (and `Desktop::resize_window`) may change its size.
        const RESIZABLE = 1 << 0;
        /// While frontmost, captures all mouse input.
        const MODAL = 1 << 1;
        /// Centered on the screen when added to a desktop.
        const CENTERED = 1 << 2;
    }
}

/// Window-only data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub title: String,
    pub flags: WindowFlags,
    pub(crate) primary: Option<WidgetId>,
    pub(crate) status_bar: Option<WidgetId>,
}

impl Window {
    /// Create a window with no flags.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            flags: WindowFlags::empty(),
            primary: None,
            status_bar: None,
        }
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Has `RESIZABLE`.
    pub fn is_resizable(&self) -> bool {
        self.flags.contains(WindowFlags::RESIZABLE)
    }

    /// Has `MODAL`.
    pub fn is_modal(&self) -> bool {
        self.flags.contains(WindowFlags::MODAL)
    }

    /// Has `CENTERED`.
    pub fn is_centered(&self) -> bool {
        self.flags.contains(WindowFlags::CENTERED)
    }

    /// Content child resized along with the window.
    pub fn primary(&self) -> Option<WidgetId> {
        self.primary
    }

    /// Status bar shown while the window is active.
    pub fn status_bar(&self) -> Option<WidgetId> {
        self.status_bar
    }
}

impl WidgetTree {
    /// Add a detached window.
    pub fn insert_window<W>(&mut self, window: Window, widget: W, bounds: Rect) -> WidgetId
    where
        W: Widget + 'static,
    {
        tracing::debug!(title = %window.title, %bounds, "window created");
        self.allocate(Box::new(widget), bounds, Role::Window(window))
    }

    /// Add a window as the back-most child of `parent`.
    pub fn add_child_window<W>(
        &mut self,
        parent: WidgetId,
        window: Window,
        widget: W,
        bounds: Rect,
    ) -> Result<WidgetId>
    where
        W: Widget + 'static,
    {
        self.node(parent)?;
        let id = self.insert_window(window, widget, bounds);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Whether the node carries window data.
    pub fn is_window(&self, id: WidgetId) -> Result<bool> {
        Ok(matches!(self.node(id)?.role, Role::Window(_)))
    }

    /// Window data of a node.
    pub fn window(&self, id: WidgetId) -> Result<&Window> {
        match &self.node(id)?.role {
            Role::Window(window) => Ok(window),
            Role::Plain => Err(Error::NotAWindow(id)),
        }
    }

    /// Mutable window data of a node.
    pub fn window_mut(&mut self, id: WidgetId) -> Result<&mut Window> {
        match &mut self.node_mut(id)?.role {
            Role::Window(window) => Ok(window),
            Role::Plain => Err(Error::NotAWindow(id)),
        }
    }

    /// Designate the content child resized along with the window.
    ///
    /// `child` must be a direct child of `window`.
    pub fn set_primary(&mut self, window: WidgetId, child: WidgetId) -> Result<()> {
        self.window(window)?;
        if self.parent(child)? != Some(window) {
            return Err(Error::NotAChild {
                parent: window,
                child,
            });
        }
        self.window_mut(window)?.primary = Some(child);
        Ok(())
    }

    /// Forget the primary child.
    pub fn clear_primary(&mut self, window: WidgetId) -> Result<()> {
        self.window_mut(window)?.primary = None;
        Ok(())
    }

    /// Primary child of a window.
    pub fn primary(&self, window: WidgetId) -> Result<Option<WidgetId>> {
        Ok(self.window(window)?.primary)
    }

    /// Associate a status bar with the window. `None` clears it.
    pub fn set_status_bar(&mut self, window: WidgetId, bar: Option<WidgetId>) -> Result<()> {
        if let Some(bar) = bar {
            self.node(bar)?;
        }
        self.window_mut(window)?.status_bar = bar;
        Ok(())
    }

    /// Status bar of a window.
    pub fn status_bar(&self, window: WidgetId) -> Result<Option<WidgetId>> {
        Ok(self.window(window)?.status_bar)
    }
}

// =============================================================================
// TESTS
// =============================================================================
