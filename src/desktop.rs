//! Desktop - top-level windows and the route from terminal input into them.
//!
//! Owns the [`WidgetTree`] plus a front-to-back stack of root windows, the
//! screen size, and the [`InputDecoder`].
//!
//! Routing rules:
//!
//! - **Mouse** goes to the front-most window under the pointer. A press on a
//!   background window raises it first (`raise_on_click`). While the front
//!   window is modal it gets every mouse event that lands inside it and
//!   nothing else gets any.
//! - **Keypress** goes to the front window's active chain.
//! - **SCREEN resize** updates the screen size and is broadcast to every window.
//! - **WIDGET resize** goes to the front window.
//!
//! # Example
//!
//! ```
//! use spark_vision::{Desktop, DesktopConfig, MouseButtons, MouseEvent, Panel, Rect, Window};
//!
//! let mut desktop = Desktop::new(DesktopConfig::default());
//! let back = desktop.add_window(Window::new("Back"), Panel, Rect::new(0, 0, 20, 10));
//! let front = desktop.add_window(Window::new("Front"), Panel, Rect::new(30, 0, 20, 10));
//! assert_eq!(desktop.active_window(), Some(front));
//!
//! desktop.handle_event(MouseEvent::down(5, 5, MouseButtons::LEFT).into()).unwrap();
//! assert_eq!(desktop.active_window(), Some(back));
//! ```

use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

use crate::config::DesktopConfig;
use crate::engine::{Dispatch, Widget, WidgetId, WidgetTree, Window};
use crate::error::{Error, Result};
use crate::event::{InputDecoder, InputEvent, KeypressEvent, MouseEvent, MouseEventKind, ResizeEvent, ResizeKind};
use crate::types::{Point, Rect};

/// Window stack plus the tree that holds every window's widgets.
pub struct Desktop {
    tree: WidgetTree,
    /// Front-to-back.
    windows: Vec<WidgetId>,
    screen: Rect,
    config: DesktopConfig,
    decoder: InputDecoder,
}

impl Desktop {
    /// Create an empty desktop.
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            tree: WidgetTree::new(),
            windows: Vec::new(),
            screen: Rect::new(0, 0, config.screen_width, config.screen_height),
            decoder: InputDecoder::new(config.double_click_interval()),
            config,
        }
    }

    /// Active settings.
    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// The widget tree holding every window.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable widget tree.
    ///
    /// Windows removed or attached under another widget through this handle
    /// drop out of the window stack on the next routed event.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The crossterm decoder, for callers that run their own read loop.
    pub fn decoder_mut(&mut self) -> &mut InputDecoder {
        &mut self.decoder
    }

    /// Screen rectangle, updated by SCREEN resizes.
    pub fn screen(&self) -> Rect {
        self.screen
    }

    // -------------------------------------------------------------------------
    // Window stack
    // -------------------------------------------------------------------------

    /// Top-level windows, front-to-back.
    pub fn windows(&self) -> &[WidgetId] {
        &self.windows
    }

    /// The front window, which receives keypresses.
    pub fn active_window(&self) -> Option<WidgetId> {
        self.windows
            .iter()
            .copied()
            .find(|&id| self.is_top_level(id))
    }

    /// Add a window in front of all others. `bounds` are screen coordinates;
    /// centered windows keep their size but ignore the requested origin.
    pub fn add_window<W>(&mut self, window: Window, widget: W, bounds: Rect) -> WidgetId
    where
        W: Widget + 'static,
    {
        let bounds = if window.is_centered() {
            bounds.at(Point::new(
                (self.screen.width.saturating_sub(bounds.width) / 2).max(0),
                (self.screen.height.saturating_sub(bounds.height) / 2).max(0),
            ))
        } else {
            bounds
        };

        let id = self.tree.insert_window(window, widget, bounds);
        self.windows.insert(0, id);
        tracing::debug!(window = %id, %bounds, "window added to desktop");
        id
    }

    /// Remove a window and everything in it.
    pub fn close_window(&mut self, id: WidgetId) -> Result<()> {
        self.prune_stale();
        self.stack_position(id)?;
        self.tree.remove(id)?;
        self.windows.retain(|&w| w != id);
        tracing::debug!(window = %id, "window closed");
        Ok(())
    }

    /// Bring a window to the front.
    pub fn activate_window(&mut self, id: WidgetId) -> Result<()> {
        self.prune_stale();
        let pos = self.stack_position(id)?;
        if pos != 0 {
            let id = self.windows.remove(pos);
            self.windows.insert(0, id);
            tracing::debug!(window = %id, "window activated");
        }
        Ok(())
    }

    /// Front-most window whose bounds contain a screen point.
    pub fn window_at(&self, point: Point) -> Option<WidgetId> {
        self.windows.iter().copied().find(|&id| {
            self.is_top_level(id)
                && self
                    .tree
                    .bounds(id)
                    .is_ok_and(|bounds| bounds.contains(point))
        })
    }

    /// Set a window's size and propagate it as a WIDGET resize.
    pub fn resize_window(&mut self, id: WidgetId, width: i32, height: i32) -> Result<()> {
        if !self.tree.window(id)?.is_resizable() {
            return Err(Error::NotResizable(id));
        }
        self.tree.resize(id, &ResizeEvent::widget(width, height))
    }

    /// Move a window to a new screen position.
    pub fn move_window(&mut self, id: WidgetId, x: i32, y: i32) -> Result<()> {
        let bounds = self.tree.bounds(id)?;
        self.tree.set_bounds(id, bounds.at(Point::new(x, y)))
    }

    fn stack_position(&self, id: WidgetId) -> Result<usize> {
        self.windows
            .iter()
            .position(|&w| w == id)
            .ok_or(Error::UnknownWidget(id))
    }

    /// Live window with no parent.
    fn is_top_level(&self, id: WidgetId) -> bool {
        self.tree.is_window(id).unwrap_or(false) && self.tree.parent(id).is_ok_and(|p| p.is_none())
    }

    /// Drop stack entries that stopped being top-level windows behind our back.
    fn prune_stale(&mut self) {
        let before = self.windows.len();
        let stack = std::mem::take(&mut self.windows);
        self.windows = stack.into_iter().filter(|&id| self.is_top_level(id)).collect();
        if self.windows.len() != before {
            tracing::debug!(dropped = before - self.windows.len(), "stale windows pruned from stack");
        }
    }

    // -------------------------------------------------------------------------
    // Routing
    // -------------------------------------------------------------------------

    /// Route one event. Returns the dispatch result for mouse and keypress
    /// events that reached a window; `None` otherwise.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<Option<Dispatch>> {
        self.prune_stale();
        match event {
            InputEvent::Mouse(mouse) => self.handle_mouse(&mouse),
            InputEvent::Keypress(key) => self.handle_keypress(&key),
            InputEvent::Resize(resize) => {
                self.handle_resize(&resize)?;
                Ok(None)
            }
        }
    }

    /// Decode a crossterm event and route everything it produces.
    pub fn handle_crossterm(&mut self, event: CrosstermEvent) -> Result<Vec<Dispatch>> {
        let mut results = Vec::new();
        for input in self.decoder.decode(event) {
            results.extend(self.handle_event(input)?);
        }
        Ok(results)
    }

    /// Wait up to `timeout` for terminal input and route it.
    pub fn poll(&mut self, timeout: Duration) -> Result<Vec<Dispatch>> {
        let mut results = Vec::new();
        for input in self.decoder.poll(timeout)? {
            results.extend(self.handle_event(input)?);
        }
        Ok(results)
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> Result<Option<Dispatch>> {
        let point = event.absolute();

        if let Some(front) = self.active_window() {
            if self.tree.window(front)?.is_modal() {
                if !self.tree.bounds(front)?.contains(point) {
                    tracing::debug!(modal = %front, %point, "mouse outside modal window ignored");
                    return Ok(None);
                }
                return self.tree.dispatch_mouse(front, event).map(Some);
            }
        }

        let Some(target) = self.window_at(point) else {
            tracing::trace!(%point, "mouse on empty desktop");
            return Ok(None);
        };

        if event.kind() == MouseEventKind::Down && self.config.raise_on_click {
            self.activate_window(target)?;
        }

        self.tree.dispatch_mouse(target, event).map(Some)
    }

    fn handle_keypress(&mut self, event: &KeypressEvent) -> Result<Option<Dispatch>> {
        match self.active_window() {
            Some(front) => self.tree.dispatch_keypress(front, event).map(Some),
            None => Ok(None),
        }
    }

    fn handle_resize(&mut self, event: &ResizeEvent) -> Result<()> {
        match event.kind() {
            ResizeKind::Screen => {
                self.screen = Rect::new(0, 0, event.width(), event.height());
                tracing::debug!(screen = %self.screen, windows = self.windows.len(), "screen resized");
                for id in self.windows.clone() {
                    self.tree.resize(id, event)?;
                }
                Ok(())
            }
            ResizeKind::Widget => match self.active_window() {
                Some(front) => self.tree.resize(front, event),
                None => Ok(()),
            },
        }
    }
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================
