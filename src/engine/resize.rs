//! Resize propagation.
//!
//! Two paths, picked by the node's role and the event kind:
//!
//! ```text
//! Window, WIDGET  -> adopt size, send (w - 2, h - 2) WIDGET to the primary child only
//! Plain,  WIDGET  -> adopt size, stop
//! any,    SCREEN  -> broadcast the identical event to every direct child, in z-order
//! ```
//!
//! The node's [`Widget::on_resize`](super::Widget::on_resize) hook runs right
//! after its own bounds are updated and before anything is forwarded, so the
//! new rectangle is already readable from the tree.

use super::registry::{Role, WidgetId, WidgetTree};
use super::window::WINDOW_BORDER_MARGIN;
use crate::error::Result;
use crate::event::{ResizeEvent, ResizeKind};

impl WidgetTree {
    /// Apply `event` to `id` and propagate it.
    pub fn resize(&mut self, id: WidgetId, event: &ResizeEvent) -> Result<()> {
        let node = self.node_mut(id)?;
        let is_window = matches!(node.role, Role::Window(_));

        if event.kind() == ResizeKind::Widget {
            node.bounds = node.bounds.with_size(event.width(), event.height());
        }
        let bounds = node.bounds;
        node.widget.on_resize(event, bounds);

        match (event.kind(), is_window) {
            (ResizeKind::Widget, true) => {
                let primary = self.primary(id)?;
                let Some(primary) = primary else {
                    tracing::debug!(window = %id, %event, "window resized, no primary child");
                    return Ok(());
                };
                let inner = event.shrunk_by(WINDOW_BORDER_MARGIN);
                tracing::debug!(window = %id, %primary, %inner, "forwarding resize to primary child");
                self.resize(primary, &inner)
            }
            (ResizeKind::Widget, false) => Ok(()),
            (ResizeKind::Screen, _) => {
                let children = self.node(id)?.children.clone();
                tracing::trace!(widget = %id, children = children.len(), %event, "broadcasting resize");
                for child in children {
                    self.resize(child, event)?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
