//! Event Module - what happened, as value types
//!
//! - **Mouse** - motion/press/release/double-click with relative and screen coordinates
//! - **Resize** - SCREEN (terminal) or WIDGET (container-to-child) size changes
//! - **Keyboard** - key plus modifiers
//! - **Input** - crossterm conversion, button tracking, double-click synthesis

mod input;
mod keyboard;
mod mouse;
mod resize;

pub use input::*;
pub use keyboard::*;
pub use mouse::*;
pub use resize::*;
