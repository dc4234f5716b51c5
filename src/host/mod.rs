//! Interfaces to the desktop shell hosting the zone engine.
//!
//! The engine never talks to a window system or widget toolkit directly. Instead a shell
//! integration provides implementations of [WindowSystem] (window, monitor and event queries)
//! and [Renderer] (drawing zone previews, tabs and resize handles). Anything implementing both
//! is a [Shell] and can drive an [App][crate::core::App].
use crate::{
    pure::{
        geometry::{Point, Rect},
        zone::ZoneId,
    },
    Result, WinId,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod event;
#[cfg(test)]
pub(crate) mod mock;

#[doc(inline)]
pub use event::{Event, EventKind};

/// The type of a window as reported by the window system
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowType {
    /// A regular top level application window
    #[default]
    Normal,
    /// A transient dialog
    Dialog,
    /// A utility or toolbar window
    Utility,
    /// A panel or dock
    Dock,
    /// Anything else: menus, tooltips, splash screens etc
    Other,
}

/// A snapshot of an open window.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Window {
    /// The stable id of this window
    pub id: WinId,
    /// The display title of this window
    pub title: String,
    /// The window class of this window
    pub class: String,
    /// The current frame geometry of this window
    pub frame: Rect,
    /// The index of the monitor this window is on
    pub monitor: usize,
    /// The type of this window
    pub window_type: WindowType,
}

impl Window {
    /// Whether this is a normal application window that should be tiled
    pub fn is_normal(&self) -> bool {
        self.window_type == WindowType::Normal
    }

    /// The midpoint of this window's frame
    pub fn midpoint(&self) -> Point {
        self.frame.midpoint()
    }
}

/// An active monitor
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Monitor {
    /// The index of this monitor
    pub index: usize,
    /// The full extent of this monitor
    pub rect: Rect,
}

/// A handle on an event subscription held with the [WindowSystem].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Whether a periodic timer should keep firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerControl {
    /// Keep the timer running
    Continue,
    /// Cancel the timer
    Stop,
}

/// An on screen element managed through a [Renderer].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Widget {
    /// The highlight box for a zone
    Zone(ZoneId),
    /// A tab in the tab strip of a zone
    Tab {
        /// The zone the tab belongs to
        zone: ZoneId,
        /// The window the tab activates
        window: WinId,
    },
    /// A resize handle between two zones
    Anchor {
        /// The left / top zone
        a: ZoneId,
        /// The right / bottom zone
        b: ZoneId,
    },
}

/// The visual style to apply to a [Widget].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetStyle {
    /// A zone preview / drop target highlight
    Zone,
    /// A zone within the layout editor
    Editable,
    /// A tab button
    Tab,
    /// A resize handle
    Anchor,
}

/// A handle on the window system of the hosting shell.
///
/// All methods take `&self`: implementations are expected to use interior mutability where
/// required, as is typical for connection style handles.
pub trait WindowSystem {
    /// The currently open windows on the active workspace, in stacking order.
    fn current_windows(&self) -> Result<Vec<Window>>;

    /// Look up a single window by id.
    fn window(&self, id: WinId) -> Result<Option<Window>> {
        Ok(self.current_windows()?.into_iter().find(|w| w.id == id))
    }

    /// Move and resize the frame of the given window to the absolute rect `r`.
    fn move_resize(&self, id: WinId, r: Rect) -> Result<()>;
    /// Raise and focus the given window.
    fn activate(&self, id: WinId) -> Result<()>;
    /// Minimize the given window.
    fn minimize(&self, id: WinId) -> Result<()>;
    /// Restore the given window from being minimized.
    fn unminimize(&self, id: WinId) -> Result<()>;

    /// The current position of the pointer.
    fn cursor_position(&self) -> Result<Point>;

    /// The currently active monitors.
    fn monitors(&self) -> Result<Vec<Monitor>>;
    /// The index of the monitor currently containing the pointer.
    fn current_monitor(&self) -> Result<usize>;
    /// The usable work area of the given monitor, if it is currently available.
    fn work_area(&self, monitor: usize) -> Result<Option<Rect>>;

    /// The number of workspaces.
    fn n_workspaces(&self) -> Result<usize>;
    /// The index of the active workspace.
    fn active_workspace(&self) -> Result<usize>;

    /// Begin delivering events of the given kind to the engine.
    fn subscribe(&self, kind: EventKind) -> Result<SubscriptionId>;
    /// Stop delivering the events associated with a previous subscription.
    fn unsubscribe(&self, id: SubscriptionId) -> Result<()>;
    /// Begin calling [App::poll_cursor][crate::core::App::poll_cursor] at the given interval
    /// until it returns [TimerControl::Stop].
    fn start_timer(&self, interval: Duration) -> Result<()>;
}

/// A handle on the widget layer of the hosting shell.
pub trait Renderer {
    /// Create a new (hidden) widget.
    fn create_widget(
        &self,
        widget: Widget,
        style: WidgetStyle,
        r: Rect,
        label: Option<&str>,
    ) -> Result<()>;
    /// Move and resize an existing widget.
    fn move_widget(&self, widget: Widget, r: Rect) -> Result<()>;
    /// Show or hide a widget.
    fn set_visible(&self, widget: Widget, visible: bool) -> Result<()>;
    /// Toggle the hover highlight of a widget.
    fn set_hover(&self, widget: Widget, hovering: bool) -> Result<()>;
    /// Release a widget. Releasing a widget that does not exist is a no-op.
    fn destroy_widget(&self, widget: Widget) -> Result<()>;
}

/// Everything the engine needs from its hosting shell.
pub trait Shell: WindowSystem + Renderer {}

impl<T> Shell for T where T: WindowSystem + Renderer {}
