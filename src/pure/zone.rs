//! Zones: rectangular regions of a work area that windows are tiled into.
//!
//! A [Zone] is a pure geometric model. Mutating its position or size records a [ZoneEvent]
//! which a rendering adapter can drain (via [Zone::take_events]) in order to keep any
//! on screen representation of the zone in sync.
use crate::{
    pure::{
        geometry::{join_type, JoinType, Point, Rect},
        layout::LayoutItem,
    },
    WinId,
};
use std::{collections::BTreeSet, fmt};

/// How far outside of its outer edges a zone still registers the pointer or a window
/// midpoint as being contained.
pub const DEFAULT_HIGHLIGHT_MARGIN: i32 = 16;

/// A unique identifier for a zone: the display that owns it and a per-display sequence number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneId {
    /// The id of the owning display
    pub display: u32,
    /// The sequence number of this zone within its display
    pub index: u32,
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.display, self.index)
    }
}

/// The behaviour variant of a [Zone], selected when it is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneKind {
    /// A plain zone: windows are placed in the margin-shrunk rect
    Plain,
    /// A zone that shows a strip of tabs when hosting more than one window
    Tabbed {
        /// The height of the tab strip in pixels
        tab_height: i32,
        /// The width of each tab in pixels
        tab_width: i32,
    },
    /// A zone being edited as part of a layout, labelled with its percentages
    Editable {
        /// The layout item this zone was created from
        item: LayoutItem,
    },
}

/// A tab within the tab strip of a [ZoneKind::Tabbed] zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// The window that is activated when this tab is selected
    pub window: WinId,
    /// The title of the window, used as the tab label
    pub title: String,
    /// The on screen position of the tab
    pub rect: Rect,
}

/// Changes to a [Zone] that need to be reflected by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneEvent {
    /// The origin of the zone moved
    PositionChanged,
    /// The size (or margin) of the zone changed
    SizeChanged,
    /// The tab strip of the zone was rebuilt. The previous tabs are provided so that
    /// their widgets can be released.
    TabsChanged {
        /// The tabs that were replaced
        removed: Vec<Tab>,
    },
}

/// A mutable rectangle with a margin that hosts a set of windows.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    id: ZoneId,
    kind: ZoneKind,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    margin: i32,
    tolerance: i32,
    windows: BTreeSet<WinId>,
    tabs: Vec<Tab>,
    events: Vec<ZoneEvent>,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone {}: {}", self.id, self.inner_rect())
    }
}

impl Zone {
    /// Create a new zone of the given kind with `r` as its outer rect.
    pub fn new(id: ZoneId, kind: ZoneKind, r: Rect, margin: i32) -> Self {
        Self {
            id,
            kind,
            x: r.x,
            y: r.y,
            width: r.w,
            height: r.h,
            margin,
            tolerance: DEFAULT_HIGHLIGHT_MARGIN,
            windows: BTreeSet::new(),
            tabs: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Set the containment tolerance used by [Zone::contains].
    pub fn with_tolerance(mut self, tolerance: i32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The unique id of this zone
    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// The kind of this zone
    pub fn kind(&self) -> &ZoneKind {
        &self.kind
    }

    /// The x coordinate of the outer rect
    pub fn x(&self) -> i32 {
        self.x
    }

    /// The y coordinate of the outer rect
    pub fn y(&self) -> i32 {
        self.y
    }

    /// The width of the outer rect
    pub fn width(&self) -> i32 {
        self.width
    }

    /// The height of the outer rect
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The margin left between the outer rect and placed windows
    pub fn margin(&self) -> i32 {
        self.margin
    }

    /// Set the x coordinate of the outer rect.
    pub fn set_x(&mut self, v: i32) {
        if self.x != v {
            self.x = v;
            self.events.push(ZoneEvent::PositionChanged);
        }
    }

    /// Set the y coordinate of the outer rect.
    pub fn set_y(&mut self, v: i32) {
        if self.y != v {
            self.y = v;
            self.events.push(ZoneEvent::PositionChanged);
        }
    }

    /// Set the width of the outer rect.
    pub fn set_width(&mut self, v: i32) {
        if self.width != v {
            self.width = v;
            self.events.push(ZoneEvent::SizeChanged);
        }
    }

    /// Set the height of the outer rect.
    pub fn set_height(&mut self, v: i32) {
        if self.height != v {
            self.height = v;
            self.events.push(ZoneEvent::SizeChanged);
        }
    }

    /// Set the margin of this zone.
    pub fn set_margin(&mut self, v: i32) {
        if self.margin != v {
            self.margin = v;
            self.events.push(ZoneEvent::SizeChanged);
        }
    }

    /// Move the left edge by `delta`, keeping the right edge fixed.
    pub fn size_left(&mut self, delta: i32) {
        self.set_x(self.x + delta);
        self.set_width(self.width - delta);
    }

    /// Move the right edge by `delta`, keeping the left edge fixed.
    pub fn size_right(&mut self, delta: i32) {
        self.set_width(self.width + delta);
    }

    /// Move the top edge by `delta`, keeping the bottom edge fixed.
    pub fn size_top(&mut self, delta: i32) {
        self.set_y(self.y + delta);
        self.set_height(self.height - delta);
    }

    /// Move the bottom edge by `delta`, keeping the top edge fixed.
    pub fn size_bottom(&mut self, delta: i32) {
        self.set_height(self.height + delta);
    }

    /// Drain the pending change events for this zone.
    pub fn take_events(&mut self) -> Vec<ZoneEvent> {
        std::mem::take(&mut self.events)
    }

    /// The outer rect of this zone
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// The width of the outer rect plus the margin on both sides
    pub fn total_width(&self) -> i32 {
        self.width + 2 * self.margin
    }

    /// The height of the outer rect plus the margin on both sides
    pub fn total_height(&self) -> i32 {
        self.height + 2 * self.margin
    }

    fn base_inner_rect(&self) -> Rect {
        Rect::new(
            self.x + self.margin,
            self.y + self.margin,
            self.width - 2 * self.margin,
            self.height - 2 * self.margin,
        )
    }

    /// The rect that hosted windows are placed in.
    ///
    /// This is the outer rect shrunk by the margin on every side. Tabbed zones that are
    /// currently showing a tab strip additionally reserve `margin + tab_height` at the top.
    pub fn inner_rect(&self) -> Rect {
        let mut r = self.base_inner_rect();

        if let ZoneKind::Tabbed { tab_height, .. } = self.kind {
            if self.tabs.len() > 1 {
                r.y += self.margin + tab_height;
                r.h -= self.margin + tab_height;
            }
        }

        r
    }

    /// Whether the point `p` is within this zone, allowing for the containment tolerance.
    pub fn contains(&self, p: Point) -> bool {
        self.contains_area(p, 1, 1)
    }

    /// Whether the box at `p` of size `w`x`h` is within this zone, allowing for the
    /// containment tolerance on every side.
    pub fn contains_area(&self, p: Point, w: i32, h: i32) -> bool {
        0.max(self.x - self.tolerance) <= p.x
            && 0.max(self.y - self.tolerance) <= p.y
            && self.x + self.total_width() + self.tolerance >= p.x + w
            && self.y + self.total_height() + self.tolerance >= p.y + h
    }

    /// The label shown for editable zones
    pub fn label(&self) -> Option<String> {
        match self.kind {
            ZoneKind::Editable { item } => Some(format!(
                "{}% x {}%",
                item.width_percentage, item.height_percentage
            )),
            _ => None,
        }
    }

    /// The ids of the windows currently assigned to this zone
    pub fn windows(&self) -> impl Iterator<Item = &WinId> {
        self.windows.iter()
    }

    /// Whether `id` is assigned to this zone
    pub fn has_window(&self, id: WinId) -> bool {
        self.windows.contains(&id)
    }

    /// Whether this zone has no windows assigned
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The number of windows assigned to this zone
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Assign `id` to this zone
    pub fn add_window(&mut self, id: WinId) {
        self.windows.insert(id);
    }

    /// Remove `id` from this zone, returning whether it was present
    pub fn remove_window(&mut self, id: WinId) -> bool {
        self.windows.remove(&id)
    }

    /// The current tab strip of this zone
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Compute the target positions of the assigned windows that are still alive.
    ///
    /// `live` is the set of currently open windows (id and title) in stacking order: the
    /// returned moves follow the same order. Ids of windows that are not present in `live`
    /// are skipped but remain assigned. Tabbed zones rebuild their tab strip if the set of
    /// members has changed.
    pub fn adjust_windows<'a, I>(&mut self, live: I) -> Vec<(WinId, Rect)>
    where
        I: IntoIterator<Item = (WinId, &'a str)>,
    {
        let members: Vec<(WinId, &str)> = live
            .into_iter()
            .filter(|(id, _)| self.windows.contains(id))
            .collect();

        if let ZoneKind::Tabbed {
            tab_height,
            tab_width,
        } = self.kind
        {
            let base = self.base_inner_rect();
            let tabs: Vec<Tab> = if members.len() > 1 {
                members
                    .iter()
                    .enumerate()
                    .map(|(i, (id, title))| Tab {
                        window: *id,
                        title: title.to_string(),
                        rect: Rect::new(
                            base.x + i as i32 * tab_width,
                            base.y,
                            tab_width,
                            tab_height,
                        ),
                    })
                    .collect()
            } else {
                Vec::new()
            };

            if tabs != self.tabs {
                let removed = std::mem::replace(&mut self.tabs, tabs);
                self.events.push(ZoneEvent::TabsChanged { removed });
            }
        }

        let r = self.inner_rect();

        members.into_iter().map(|(id, _)| (id, r)).collect()
    }

    /// Release the tab strip of this zone (if any), recording the change.
    pub fn clear_tabs(&mut self) {
        if !self.tabs.is_empty() {
            let removed = std::mem::take(&mut self.tabs);
            self.events.push(ZoneEvent::TabsChanged { removed });
        }
    }
}

/// The combined outer rect of a set of zones that a window was dropped across.
///
/// Two zones are combined along the axis they are joined on. For three or more zones the
/// widths and heights are simply summed: this over-approximates the covered area.
/// Returns `None` if `zones` is empty.
pub fn merged_rect(zones: &[&Zone]) -> Option<Rect> {
    let first = zones.first()?;
    let x = zones.iter().map(|z| z.x).min().unwrap_or(first.x);
    let y = zones.iter().map(|z| z.y).min().unwrap_or(first.y);
    let sum_w: i32 = zones.iter().map(|z| z.width).sum();
    let sum_h: i32 = zones.iter().map(|z| z.height).sum();

    let (w, h) = match zones {
        [a, b] => match join_type(&a.rect().edges(), &b.rect().edges()) {
            JoinType::Horizontal => (sum_w, a.height),
            _ => (a.width, sum_h),
        },
        [z] => (z.width, z.height),
        _ => (sum_w, sum_h),
    };

    Some(Rect::new(x, y, w, h))
}
