//! # spark-vision
//!
//! Event model and widget/window dispatch core for a windowed terminal UI.
//!
//! ## Architecture
//!
//! Widgets live in one arena, the [`WidgetTree`], and refer to each other by
//! generational [`WidgetId`] handles. A window is a node that also carries
//! [`Window`] data. The [`Desktop`] keeps a stack of top-level windows and
//! routes terminal input into them:
//!
//! ```text
//! crossterm Event → InputDecoder → InputEvent → Desktop → WidgetTree dispatch → Widget hooks
//! ```
//!
//! Mouse events carry immutable screen coordinates. Each handler receives a
//! copy whose `x`/`y` are relative to its own origin.
//!
//! ## Modules
//!
//! - [`types`] - Point and Rect
//! - [`event`] - Mouse, keypress and resize events, crossterm decoding
//! - [`engine`] - Widget arena, windows, dispatch, resize propagation
//! - [`desktop`] - Window stack and input routing
//! - [`config`] - Desktop settings
//! - [`error`] - Error type

pub mod config;
pub mod desktop;
pub mod engine;
pub mod error;
pub mod event;
pub mod types;

pub use config::{DesktopConfig, DEFAULT_DOUBLE_CLICK_MILLIS};
pub use desktop::Desktop;
pub use engine::*;
pub use error::{Error, Result};
pub use event::*;
pub use types::*;
