//! Widget Engine - the tree, and how events move through it.
//!
//! - Registry: arena of nodes, generational handles, parent/child links
//! - Widget: per-node behavior hooks
//! - Window: window-only node data (title, flags, primary child, status bar)
//! - Dispatch: hit-testing, coordinate translation, bubbling, keypress routing
//! - Resize: SCREEN broadcast and WIDGET-to-primary propagation
//!
//! # Architecture
//!
//! Widgets are NOT linked objects. They are slots in one arena, and all
//! relationships are handles:
//!
//! ```text
//! w0v0: Window "Editor" (parent=None,  bounds=44x22+0+0, primary=w1v0)
//! w1v0: Editor          (parent=w0v0,  bounds=42x20+1+1)
//! w2v0: Scrollbar       (parent=w0v0,  bounds=1x20+43+1)
//! ```
//!
//! A handle outliving its widget is an error on use, never a dangling pointer.

mod dispatch;
mod registry;
mod resize;
mod widget;
mod window;

pub use dispatch::*;
pub use registry::{WidgetId, WidgetTree};
pub use widget::*;
pub use window::*;
