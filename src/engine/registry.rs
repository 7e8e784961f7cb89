//! Widget Registry - the arena that owns every node.
//!
//! Manages the lifecycle of widget handles:
//! - Generational `WidgetId` handles, so a stale handle never aliases a reused slot
//! - Free slot pool for O(1) reuse
//! - Parent/child links (children in front-to-back z-order)
//! - Recursive removal of whole subtrees
//!
//! Parent links are handles, never references. Restructuring the tree can
//! leave a caller holding a dead handle, which every accessor reports as
//! [`Error::UnknownWidget`] instead of dangling.

use std::fmt;

use super::widget::Widget;
use super::window::Window;
use crate::error::{Error, Result};
use crate::types::{Point, Rect};

// =============================================================================
// Handles
// =============================================================================

/// Handle to a node in a [`WidgetTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId {
    index: u32,
    generation: u32,
}

impl WidgetId {
    /// Slot index, stable for the lifetime of the widget.
    pub const fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}v{}", self.index, self.generation)
    }
}

// =============================================================================
// Nodes
// =============================================================================

/// What kind of node this is.
pub(crate) enum Role {
    Plain,
    Window(Window),
}

pub(crate) struct Node {
    pub(crate) bounds: Rect,
    pub(crate) parent: Option<WidgetId>,
    /// Front-to-back.
    pub(crate) children: Vec<WidgetId>,
    pub(crate) active: Option<WidgetId>,
    pub(crate) enabled: bool,
    pub(crate) role: Role,
    pub(crate) widget: Box<dyn Widget>,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

// =============================================================================
// Tree
// =============================================================================

/// Arena of widgets.
///
/// Nodes without a parent are roots. A root's bounds are in screen space;
/// every other node's bounds are relative to its parent.
#[derive(Default)]
pub struct WidgetTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no widgets.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `id` still refers to a live widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.node(id).is_ok()
    }

    pub(crate) fn node(&self, id: WidgetId) -> Result<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(Error::UnknownWidget(id))
    }

    pub(crate) fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(Error::UnknownWidget(id))
    }

    // -------------------------------------------------------------------------
    // Allocation
    // -------------------------------------------------------------------------

    /// Add a detached widget. It becomes a root until attached.
    pub fn insert<W>(&mut self, widget: W, bounds: Rect) -> WidgetId
    where
        W: Widget + 'static,
    {
        self.insert_boxed(Box::new(widget), bounds)
    }

    /// Add a detached boxed widget.
    pub fn insert_boxed(&mut self, widget: Box<dyn Widget>, bounds: Rect) -> WidgetId {
        self.allocate(widget, bounds, Role::Plain)
    }

    /// Add a widget as the back-most child of `parent`.
    pub fn add_child<W>(&mut self, parent: WidgetId, widget: W, bounds: Rect) -> Result<WidgetId>
    where
        W: Widget + 'static,
    {
        self.node(parent)?;
        let id = self.insert(widget, bounds);
        self.attach(parent, id)?;
        Ok(id)
    }

    pub(crate) fn allocate(&mut self, widget: Box<dyn Widget>, bounds: Rect, role: Role) -> WidgetId {
        let name = widget.name().to_string();
        let node = Node {
            bounds,
            parent: None,
            children: Vec::new(),
            active: None,
            enabled: true,
            role,
            widget,
        };

        // Reuse free slot or allocate new
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                WidgetId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                WidgetId {
                    index,
                    generation: 0,
                }
            }
        };

        self.len += 1;
        tracing::trace!(%id, widget = %name, %bounds, "widget allocated");
        id
    }

    /// Remove a widget and its whole subtree.
    ///
    /// Window primary/status-bar handles and active-child handles that
    /// pointed into the removed subtree are cleared.
    pub fn remove(&mut self, id: WidgetId) -> Result<()> {
        self.detach(id)?;

        // Collect the subtree first, then free it
        let mut doomed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            stack.extend(self.node(current)?.children.iter().copied());
            doomed.push(current);
        }

        for &dead in &doomed {
            let slot = &mut self.slots[dead.index as usize];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(dead.index);
            self.len -= 1;
        }

        // Status bars need not be children, so scrub every survivor
        for slot in &mut self.slots {
            if let Some(Node {
                role: Role::Window(window),
                ..
            }) = slot.node.as_mut()
            {
                if window.status_bar.is_some_and(|bar| doomed.contains(&bar)) {
                    window.status_bar = None;
                }
            }
        }

        tracing::debug!(%id, removed = doomed.len(), "widget subtree removed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Attach a root as the back-most child of `parent`.
    pub fn attach(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.node(parent)?;
        if let Some(current) = self.node(child)?.parent {
            return Err(Error::AlreadyAttached {
                parent: current,
                child,
            });
        }

        // parent must not live inside child's subtree
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(Error::Cycle { parent, child });
            }
            cursor = self.node(ancestor)?.parent;
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Detach a widget from its parent, making it a root. No-op for roots.
    pub fn detach(&mut self, child: WidgetId) -> Result<()> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };

        let node = self.node_mut(parent)?;
        node.children.retain(|&c| c != child);
        if node.active == Some(child) {
            node.active = None;
        }
        if let Role::Window(window) = &mut node.role {
            if window.primary == Some(child) {
                window.primary = None;
            }
        }

        self.node_mut(child)?.parent = None;
        Ok(())
    }

    /// Move a widget to the front of its siblings. No-op for roots.
    pub fn bring_to_front(&mut self, child: WidgetId) -> Result<()> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };

        let children = &mut self.node_mut(parent)?.children;
        if let Some(pos) = children.iter().position(|&c| c == child) {
            let id = children.remove(pos);
            children.insert(0, id);
        }
        Ok(())
    }

    /// Parent handle, `None` for roots.
    pub fn parent(&self, id: WidgetId) -> Result<Option<WidgetId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children in front-to-back order.
    pub fn children(&self, id: WidgetId) -> Result<&[WidgetId]> {
        Ok(&self.node(id)?.children)
    }

    /// `id` followed by each ancestor up to its root.
    pub fn ancestors(&self, id: WidgetId) -> Result<Vec<WidgetId>> {
        let mut chain = vec![id];
        let mut cursor = self.node(id)?.parent;
        while let Some(ancestor) = cursor {
            chain.push(ancestor);
            cursor = self.node(ancestor)?.parent;
        }
        Ok(chain)
    }

    /// Topmost ancestor of `id` (itself if it is a root).
    pub fn root_of(&self, id: WidgetId) -> Result<WidgetId> {
        let chain = self.ancestors(id)?;
        Ok(chain[chain.len() - 1])
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Bounds relative to the parent.
    pub fn bounds(&self, id: WidgetId) -> Result<Rect> {
        Ok(self.node(id)?.bounds)
    }

    /// Replace bounds without sending a resize.
    pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) -> Result<()> {
        self.node_mut(id)?.bounds = bounds;
        Ok(())
    }

    /// Screen position of the widget's top-left corner: the sum of its own
    /// and every ancestor's relative origin.
    pub fn absolute_origin(&self, id: WidgetId) -> Result<Point> {
        let mut origin = Point::ORIGIN;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            origin = origin + node.bounds.origin();
            cursor = node.parent;
        }
        Ok(origin)
    }

    /// Bounds in screen space.
    pub fn absolute_bounds(&self, id: WidgetId) -> Result<Rect> {
        let origin = self.absolute_origin(id)?;
        Ok(self.bounds(id)?.at(origin))
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Disabled widgets are skipped by hit-testing.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<()> {
        self.node_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Whether hit-testing can land on the widget.
    pub fn is_enabled(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.enabled)
    }

    /// The child that receives keypresses routed through `id`.
    pub fn active_child(&self, id: WidgetId) -> Result<Option<WidgetId>> {
        Ok(self.node(id)?.active)
    }

    /// Make `id` the active child of its parent, and so on up to the root,
    /// so keypresses routed from the root end up at `id`.
    pub fn activate(&mut self, id: WidgetId) -> Result<()> {
        let chain = self.ancestors(id)?;
        for pair in chain.windows(2) {
            let (child, parent) = (pair[0], pair[1]);
            self.node_mut(parent)?.active = Some(child);
        }
        Ok(())
    }

    /// Behavior object of the widget.
    pub fn widget(&self, id: WidgetId) -> Result<&dyn Widget> {
        Ok(self.node(id)?.widget.as_ref())
    }

    /// Mutable behavior object of the widget.
    pub fn widget_mut(&mut self, id: WidgetId) -> Result<&mut dyn Widget> {
        Ok(self.node_mut(id)?.widget.as_mut())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Panel;

    #[test]
    fn test_insert_and_lookup() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel, Rect::new(1, 2, 30, 10));

        assert_eq!(tree.len(), 1);
        assert!(tree.contains(root));
        assert_eq!(tree.bounds(root).unwrap(), Rect::new(1, 2, 30, 10));
        assert_eq!(tree.parent(root).unwrap(), None);
        assert!(tree.is_enabled(root).unwrap());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel, Rect::new(0, 0, 10, 10));
        let a = tree.add_child(root, Panel, Rect::new(0, 0, 1, 1)).unwrap();
        let b = tree.add_child(root, Panel, Rect::new(1, 0, 1, 1)).unwrap();
        let c = tree.add_child(root, Panel, Rect::new(2, 0, 1, 1)).unwrap();

        assert_eq!(tree.children(root).unwrap(), &[a, b, c]);
        assert_eq!(tree.parent(b).unwrap(), Some(root));

        tree.bring_to_front(c).unwrap();
        assert_eq!(tree.children(root).unwrap(), &[c, a, b]);
    }

    #[test]
    fn test_absolute_origin_sums_ancestors() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel, Rect::new(5, 3, 50, 20));
        let mid = tree.add_child(root, Panel, Rect::new(2, 1, 20, 10)).unwrap();
        let leaf = tree.add_child(mid, Panel, Rect::new(4, 4, 5, 5)).unwrap();

        assert_eq!(tree.absolute_origin(root).unwrap(), Point::new(5, 3));
        assert_eq!(tree.absolute_origin(leaf).unwrap(), Point::new(11, 8));
        assert_eq!(tree.absolute_bounds(leaf).unwrap(), Rect::new(11, 8, 5, 5));
        assert_eq!(tree.root_of(leaf).unwrap(), root);
        assert_eq!(tree.ancestors(leaf).unwrap(), vec![leaf, mid, root]);
    }

    #[test]
    fn test_remove_is_recursive_and_invalidates_handles() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel, Rect::new(0, 0, 10, 10));
        let mid = tree.add_child(root, Panel, Rect::new(0, 0, 5, 5)).unwrap();
        let leaf = tree.add_child(mid, Panel, Rect::new(0, 0, 1, 1)).unwrap();

        tree.remove(mid).unwrap();

        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(mid));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).unwrap().is_empty());
        assert!(matches!(tree.bounds(leaf), Err(Error::UnknownWidget(id)) if id == leaf));
    }

    #[test]
    fn test_reused_slot_does_not_revive_stale_handle() {
        let mut tree = WidgetTree::new();
        let first = tree.insert(Panel, Rect::default());
        tree.remove(first).unwrap();

        let second = tree.insert(Panel, Rect::new(1, 1, 1, 1));
        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);
        assert!(!tree.contains(first));
        assert!(tree.contains(second));
    }

    #[test]
    fn test_attach_rejects_cycles_and_double_parents() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel, Rect::default());
        let child = tree.add_child(root, Panel, Rect::default()).unwrap();
        let other = tree.insert(Panel, Rect::default());

        assert!(matches!(tree.attach(child, root), Err(Error::Cycle { .. })));
        assert!(matches!(tree.attach(root, root), Err(Error::Cycle { .. })));
        assert!(matches!(
            tree.attach(other, child),
            Err(Error::AlreadyAttached { parent, .. }) if parent == root
        ));

        tree.detach(child).unwrap();
        tree.attach(other, child).unwrap();
        assert_eq!(tree.parent(child).unwrap(), Some(other));
    }

    #[test]
    fn test_activate_sets_chain() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel, Rect::default());
        let mid = tree.add_child(root, Panel, Rect::default()).unwrap();
        let leaf = tree.add_child(mid, Panel, Rect::default()).unwrap();

        tree.activate(leaf).unwrap();
        assert_eq!(tree.active_child(root).unwrap(), Some(mid));
        assert_eq!(tree.active_child(mid).unwrap(), Some(leaf));

        tree.detach(mid).unwrap();
        assert_eq!(tree.active_child(root).unwrap(), None);
    }

    #[test]
    fn test_add_child_to_unknown_parent_allocates_nothing() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Panel, Rect::default());
        tree.remove(root).unwrap();

        assert!(tree.add_child(root, Panel, Rect::default()).is_err());
        assert!(tree.is_empty());
    }
}
