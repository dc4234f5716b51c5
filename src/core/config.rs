//! User facing configuration of the zone engine.
use crate::pure::zone::DEFAULT_HIGHLIGHT_MARGIN;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a press on an anchor handle begins and ends a resize drag.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// A press starts dragging and a second press stops it
    #[default]
    Toggle,
    /// Dragging lasts for as long as the button is held
    Hold,
}

crate::__with_builder_and_getters! {
    /// The main user facing configuration details.
    ///
    /// See [ConfigBuilder] for details of what can be overwritten.
    ///
    /// # Example
    /// ```
    /// use snapzone::Config;
    /// use std::time::Duration;
    ///
    /// let config = Config::default();
    ///
    /// assert_eq!(config.window_margin(), 0);
    /// assert_eq!(config.poll_interval(), Duration::from_millis(25));
    /// ```
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Clone, Debug, PartialEq, Eq)]
    Config;

    /// Builder struct for generating user [Config]
    ///
    /// # Example
    /// ```
    /// use snapzone::{core::config::DragMode, Config};
    ///
    /// let config = Config::default()
    ///     .builder()
    ///     .window_margin(8)
    ///     .show_tabs(true)
    ///     .drag_mode(DragMode::Hold)
    ///     .build()
    ///     .expect("failed to build config");
    ///
    /// assert!(config.show_tabs());
    /// ```
    #[derive(Debug)]
    ConfigBuilder;

    /// the gap left between each zone edge and the windows tiled inside of it in pixels
    window_margin: i32; => 0;
    /// whether windows sharing a zone get a tab strip for switching between them
    show_tabs: bool; => false;
    /// the height of a zone tab strip in pixels
    tab_height: i32; => 50;
    /// the width of each tab in pixels
    tab_width: i32; => 200;
    /// how far outside of its edges a zone still accepts a dropped window in pixels
    highlight_margin: i32; => DEFAULT_HIGHLIGHT_MARGIN;
    /// how often the pointer is polled for hover highlighting while zones are shown
    poll_interval: Duration; => Duration::from_millis(25);
    /// how anchor handles in the layout editor respond to button presses
    drag_mode: DragMode; => DragMode::Toggle;
}

impl ConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.inner.window_margin < 0 {
            return Err("window_margin must be non-negative".into());
        }

        if self.inner.highlight_margin < 0 {
            return Err("highlight_margin must be non-negative".into());
        }

        if self.inner.tab_height <= 0 || self.inner.tab_width <= 0 {
            return Err("tab dimensions must be positive".into());
        }

        if self.inner.poll_interval.is_zero() {
            return Err("poll_interval must be non-zero".into());
        }

        Ok(())
    }
}
