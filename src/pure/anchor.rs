//! Drag handles for resizing a pair of adjacent zones.
use crate::pure::{
    geometry::{Point, Rect},
    zone::Zone,
};

/// The minimum half-thickness of an anchor handle so that it remains grabbable when the
/// zone margin is zero.
pub const MIN_ANCHOR_HALF_WIDTH: i32 = 4;

/// The axis along which an anchor resizes its zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The zones sit side by side: dragging moves their shared vertical edge left / right
    Horizontal,
    /// The zones are stacked: dragging moves their shared horizontal edge up / down
    Vertical,
}

/// An edge drag controller binding two adjacent zones.
///
/// `a` is always the left (or top) zone and `b` the right (or bottom) one. Zones are
/// referenced by their index within the owning display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneAnchor {
    a: usize,
    b: usize,
    axis: Axis,
    margin: i32,
    dragging: bool,
    last: i32,
}

impl ZoneAnchor {
    /// Create a new anchor between the zones at index `a` and `b`.
    pub fn new(a: usize, b: usize, axis: Axis, margin: i32) -> Self {
        Self {
            a,
            b,
            axis,
            margin,
            dragging: false,
            last: 0,
        }
    }

    /// The indices of the zones bound by this anchor
    pub fn zones(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// The axis this anchor resizes along
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Whether a drag is currently in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn coord(&self, p: Point) -> i32 {
        match self.axis {
            Axis::Horizontal => p.x,
            Axis::Vertical => p.y,
        }
    }

    /// The position of the drag handle, straddling the shared edge of the two zones.
    ///
    /// Returns `None` if the zone indices are not valid for `zones`.
    pub fn rect(&self, zones: &[Zone]) -> Option<Rect> {
        let a = zones.get(self.a)?;
        zones.get(self.b)?;
        let half = self.margin.max(MIN_ANCHOR_HALF_WIDTH);

        let r = match self.axis {
            Axis::Horizontal => Rect::new(
                a.x() + a.width() - half,
                a.y() + self.margin,
                half * 2,
                a.height() - self.margin * 2,
            ),
            Axis::Vertical => Rect::new(
                a.x() + self.margin,
                a.y() + a.height() - half,
                a.width() - self.margin * 2,
                half * 2,
            ),
        };

        Some(r)
    }

    /// Toggle the drag state in response to a button press at `p`.
    pub fn press(&mut self, p: Point) {
        self.last = self.coord(p);
        self.dragging = !self.dragging;
    }

    /// Begin dragging from `p` if not already dragging.
    pub fn start(&mut self, p: Point) {
        if !self.dragging {
            self.last = self.coord(p);
            self.dragging = true;
        }
    }

    /// Stop dragging.
    pub fn stop(&mut self) {
        self.dragging = false;
    }

    /// Apply pointer motion to `p`, growing one zone and shrinking the other by the same
    /// amount so that their combined size is unchanged.
    ///
    /// Returns `true` if the zones were modified.
    pub fn pointer_moved(&mut self, p: Point, zones: &mut [Zone]) -> bool {
        if !self.dragging || self.a >= zones.len() || self.b >= zones.len() {
            return false;
        }

        let delta = self.coord(p) - self.last;
        self.last = self.coord(p);
        if delta == 0 {
            return false;
        }

        match self.axis {
            Axis::Horizontal => {
                zones[self.a].size_right(delta);
                zones[self.b].size_left(delta);
            }
            Axis::Vertical => {
                zones[self.a].size_bottom(delta);
                zones[self.b].size_top(delta);
            }
        }

        true
    }
}
