//! Events delivered to the engine by the hosting shell
use crate::{host::Widget, pure::geometry::Point, WinId};
use strum::{Display, EnumIter};

/// The kinds of [Event] that the engine subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum EventKind {
    /// See [Event::WindowCreated]
    WindowCreated,
    /// See [Event::GrabBegin]
    GrabBegin,
    /// See [Event::GrabEnd]
    GrabEnd,
    /// See [Event::Restacked]
    Restacked,
    /// See [Event::WorkspaceSwitched]
    WorkspaceSwitched,
    /// See [Event::WorkAreasChanged]
    WorkAreasChanged,
    /// See [Event::MonitorsChanged]
    MonitorsChanged,
    /// See [Event::FullscreenChanged]
    FullscreenChanged,
    /// See [Event::PointerMoved]
    PointerMoved,
    /// See [Event::ButtonPress]
    ButtonPress,
    /// See [Event::ButtonRelease]
    ButtonRelease,
}

/// Something that happened in the hosting shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A new window was created
    WindowCreated(WinId),
    /// An interactive move / resize of a window started
    GrabBegin(WinId),
    /// An interactive move / resize of a window finished
    GrabEnd(WinId),
    /// The stacking order of windows changed
    Restacked,
    /// The active workspace changed
    WorkspaceSwitched,
    /// The work area of one or more monitors changed
    WorkAreasChanged,
    /// Monitors were added, removed or reconfigured
    MonitorsChanged,
    /// A window entered or left fullscreen on the primary monitor
    FullscreenChanged {
        /// Whether the primary monitor is now showing a fullscreen window
        fullscreen: bool,
    },
    /// The pointer moved across the stage
    PointerMoved(Point),
    /// A pointer button was pressed on one of the engine's widgets
    ButtonPress {
        /// The widget that was pressed
        widget: Widget,
        /// The pointer position at the time of the press
        pointer: Point,
    },
    /// A pointer button was released
    ButtonRelease {
        /// The pointer position at the time of the release
        pointer: Point,
    },
}

impl Event {
    /// The [EventKind] of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Self::WindowCreated(_) => EventKind::WindowCreated,
            Self::GrabBegin(_) => EventKind::GrabBegin,
            Self::GrabEnd(_) => EventKind::GrabEnd,
            Self::Restacked => EventKind::Restacked,
            Self::WorkspaceSwitched => EventKind::WorkspaceSwitched,
            Self::WorkAreasChanged => EventKind::WorkAreasChanged,
            Self::MonitorsChanged => EventKind::MonitorsChanged,
            Self::FullscreenChanged { .. } => EventKind::FullscreenChanged,
            Self::PointerMoved(_) => EventKind::PointerMoved,
            Self::ButtonPress { .. } => EventKind::ButtonPress,
            Self::ButtonRelease { .. } => EventKind::ButtonRelease,
        }
    }
}
