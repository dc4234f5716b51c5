//! Side effect free management of zone and layout state
pub mod anchor;
pub mod geometry;
pub mod layout;
pub mod zone;

#[doc(inline)]
pub use anchor::{Axis, ZoneAnchor};
#[doc(inline)]
pub use geometry::{JoinType, Point, Rect};
#[doc(inline)]
pub use layout::{Layout, LayoutItem, LayoutsSettings, WorkspaceMonitorSettings};
#[doc(inline)]
pub use zone::{Tab, Zone, ZoneEvent, ZoneId, ZoneKind};
