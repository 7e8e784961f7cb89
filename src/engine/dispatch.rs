//! Dispatch - hit-testing and coordinate translation.
//!
//! Mouse routing from a dispatch root:
//!
//! 1. Start with the root's relative point: screen point minus root origin.
//! 2. Walk the children front-to-back; the first enabled child whose bounds
//!    contain the point is the hit. Later siblings are not tested.
//! 3. Subtract the child's origin and repeat from the child.
//! 4. When no child contains the point, the current node is the target.
//!
//! The event itself is never rewritten on the way down. The walk only
//! accumulates each node's absolute origin; a handler receives a fresh copy
//! made by [`MouseEvent::relative_to`] for its own origin, so no two handlers
//! can observe each other's coordinates.
//!
//! The target is offered the event first. If it ignores it, the event
//! bubbles to each ancestor in turn (in that ancestor's coordinates) until
//! one consumes it or the dispatch root has had its turn.
//!
//! Keypresses follow the active-child chain instead of a hit path, then
//! bubble the same way.

use super::registry::{WidgetId, WidgetTree};
use super::widget::{EventOutcome, Widget};
use crate::error::Result;
use crate::event::{KeypressEvent, MouseEvent, MouseEventKind};
use crate::types::Point;

/// Outcome of routing one event through the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// First widget offered the event: the deepest hit, or the end of the active chain.
    pub target: WidgetId,
    /// Widget that consumed it, if any did.
    pub consumed_by: Option<WidgetId>,
}

impl Dispatch {
    /// Whether some widget consumed the event.
    pub const fn is_consumed(&self) -> bool {
        self.consumed_by.is_some()
    }
}

/// One step of a hit path: a widget and its absolute origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitStep {
    /// Widget on the path.
    pub widget: WidgetId,
    /// Its absolute top-left corner.
    pub origin: Point,
}

impl WidgetTree {
    /// Widgets under a screen point, from `root` down to the deepest hit.
    ///
    /// Never empty: `root` is always the first step, whether or not its own
    /// bounds contain the point.
    pub fn hit_path(&self, root: WidgetId, absolute: Point) -> Result<Vec<HitStep>> {
        let mut origin = self.absolute_origin(root)?;
        let mut path = vec![HitStep {
            widget: root,
            origin,
        }];
        let mut current = root;

        loop {
            let local = absolute - origin;
            let mut hit = None;
            for &child in &self.node(current)?.children {
                let node = self.node(child)?;
                if node.enabled && node.bounds.contains(local) {
                    hit = Some((child, node.bounds.origin()));
                    break;
                }
            }

            let Some((child, offset)) = hit else { break };
            origin = origin + offset;
            tracing::trace!(parent = %current, %child, local = %(local - offset), "hit-test descend");
            path.push(HitStep {
                widget: child,
                origin,
            });
            current = child;
        }

        Ok(path)
    }

    /// Deepest widget under a screen point, starting from `root`.
    pub fn widget_at(&self, root: WidgetId, absolute: Point) -> Result<WidgetId> {
        let path = self.hit_path(root, absolute)?;
        Ok(path[path.len() - 1].widget)
    }

    /// Route a mouse event from `root`.
    ///
    /// `event` only needs correct absolute coordinates; its relative pair is
    /// recomputed for every handler. Presses and double clicks also make the
    /// hit path the active chain.
    pub fn dispatch_mouse(&mut self, root: WidgetId, event: &MouseEvent) -> Result<Dispatch> {
        let path = self.hit_path(root, event.absolute())?;
        let target = path[path.len() - 1].widget;

        if matches!(event.kind(), MouseEventKind::Down | MouseEventKind::DoubleClick) {
            for pair in path.windows(2) {
                self.node_mut(pair[0].widget)?.active = Some(pair[1].widget);
            }
        }

        for step in path.iter().rev() {
            let local = event.relative_to(step.origin);
            let node = self.node_mut(step.widget)?;
            tracing::trace!(widget = %step.widget, name = node.widget.name(), %local, "mouse delivered");
            if deliver_mouse(node.widget.as_mut(), &local).is_consumed() {
                tracing::debug!(%target, consumed_by = %step.widget, kind = %event.kind(), "mouse dispatched");
                return Ok(Dispatch {
                    target,
                    consumed_by: Some(step.widget),
                });
            }
        }

        tracing::debug!(%target, kind = %event.kind(), "mouse dispatched, not consumed");
        Ok(Dispatch {
            target,
            consumed_by: None,
        })
    }

    /// Active chain from `root`: root, its active child, that child's active child, ...
    ///
    /// Stops before a disabled widget.
    pub fn active_chain(&self, root: WidgetId) -> Result<Vec<WidgetId>> {
        let mut chain = vec![root];
        let mut current = root;
        while let Some(next) = self.node(current)?.active {
            if !self.node(next)?.enabled {
                break;
            }
            chain.push(next);
            current = next;
        }
        Ok(chain)
    }

    /// Route a keypress from `root` down the active chain.
    pub fn dispatch_keypress(&mut self, root: WidgetId, event: &KeypressEvent) -> Result<Dispatch> {
        let chain = self.active_chain(root)?;
        let target = chain[chain.len() - 1];

        for &id in chain.iter().rev() {
            if self.node_mut(id)?.widget.on_keypress(event).is_consumed() {
                tracing::debug!(%target, consumed_by = %id, %event, "keypress dispatched");
                return Ok(Dispatch {
                    target,
                    consumed_by: Some(id),
                });
            }
        }

        tracing::debug!(%target, %event, "keypress dispatched, not consumed");
        Ok(Dispatch {
            target,
            consumed_by: None,
        })
    }
}

fn deliver_mouse(widget: &mut dyn Widget, event: &MouseEvent) -> EventOutcome {
    match event.kind() {
        MouseEventKind::Motion => widget.on_mouse_motion(event),
        MouseEventKind::Down => widget.on_mouse_down(event),
        MouseEventKind::Up => widget.on_mouse_up(event),
        MouseEventKind::DoubleClick => widget.on_mouse_double_click(event),
    }
}

// =============================================================================
// TESTS
// =============================================================================
