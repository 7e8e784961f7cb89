//! Desktop configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default double-click window, in milliseconds.
pub const DEFAULT_DOUBLE_CLICK_MILLIS: u64 = 250;

/// Tunables for [`Desktop`](crate::Desktop).
///
/// Missing fields fall back to defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Max gap between two left presses on the same cell that still counts as a double click.
    pub double_click_millis: u64,
    /// Bring a window to the front when it is clicked.
    pub raise_on_click: bool,
    /// Screen size assumed until the first SCREEN resize arrives.
    pub screen_width: i32,
    pub screen_height: i32,
}

impl DesktopConfig {
    /// Set the double-click window.
    pub fn with_double_click_millis(mut self, millis: u64) -> Self {
        self.double_click_millis = millis;
        self
    }

    /// Set whether clicking a background window raises it.
    pub fn with_raise_on_click(mut self, raise: bool) -> Self {
        self.raise_on_click = raise;
        self
    }

    /// Set the initial screen size.
    pub fn with_screen_size(mut self, width: i32, height: i32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Double-click window as a `Duration`.
    pub fn double_click_interval(&self) -> Duration {
        Duration::from_millis(self.double_click_millis)
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            double_click_millis: DEFAULT_DOUBLE_CLICK_MILLIS,
            raise_on_click: true,
            screen_width: 80,
            screen_height: 24,
        }
    }
}
