//! Geometry primitives
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An x,y coordinate pair
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    /// An absolute x coordinate within the global stage
    pub x: i32,
    /// An absolute y coordinate within the global stage
    pub y: i32,
}

impl Point {
    /// Create a new Point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The euclidean distance between this point and `other`.
    /// ```
    /// # use snapzone::pure::geometry::Point;
    /// let p = Point::new(0, 0);
    ///
    /// assert_eq!(p.distance(&Point::new(3, 4)), 5.0);
    /// ```
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;

        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from(raw: (i32, i32)) -> Self {
        let (x, y) = raw;

        Self { x, y }
    }
}

// A Rect converts to its top left corner
impl From<Rect> for Point {
    fn from(r: Rect) -> Self {
        let Rect { x, y, .. } = r;

        Self { x, y }
    }
}

/// A width and height pair
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Size {
    /// The width in pixels
    pub w: i32,
    /// The height in pixels
    pub h: i32,
}

impl Size {
    /// Create a new Size.
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

/// A straight line segment between two points
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    /// The start of the segment (top or left most end)
    pub start: Point,
    /// The end of the segment (bottom or right most end)
    pub end: Point,
}

impl Line {
    /// Create a new Line.
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    /// Whether `self` and `other` lie on the same axis aligned line and share a
    /// segment of positive length.
    pub fn overlaps(&self, other: &Line) -> bool {
        if self.is_vertical() && other.is_vertical() && self.start.x == other.start.x {
            overlap(self.start.y, self.end.y, other.start.y, other.end.y) > 0
        } else if self.is_horizontal() && other.is_horizontal() && self.start.y == other.start.y
        {
            overlap(self.start.x, self.end.x, other.start.x, other.end.x) > 0
        } else {
            false
        }
    }
}

fn overlap(a0: i32, a1: i32, b0: i32, b1: i32) -> i32 {
    a1.min(b1) - a0.max(b0)
}

/// The four edges of a [Rect]
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Edges {
    /// The top edge, running left to right
    pub top: Line,
    /// The bottom edge, running left to right
    pub bottom: Line,
    /// The left edge, running top to bottom
    pub left: Line,
    /// The right edge, running top to bottom
    pub right: Line,
}

/// How two rectangles abut one another.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// The rectangles sit side by side, sharing a vertical edge
    Horizontal,
    /// The rectangles are stacked, sharing a horizontal edge
    Vertical,
    /// The rectangles do not share an edge
    None,
}

/// Classify how the rectangles with the given [Edges] are joined.
///
/// ```
/// # use snapzone::pure::geometry::{join_type, JoinType, Rect};
/// let left = Rect::new(0, 0, 500, 1000);
/// let right = Rect::new(500, 0, 500, 1000);
/// let below = Rect::new(0, 1000, 500, 200);
///
/// assert_eq!(join_type(&left.edges(), &right.edges()), JoinType::Horizontal);
/// assert_eq!(join_type(&left.edges(), &below.edges()), JoinType::Vertical);
/// assert_eq!(join_type(&right.edges(), &below.edges()), JoinType::None);
/// ```
pub fn join_type(a: &Edges, b: &Edges) -> JoinType {
    if a.right.overlaps(&b.left) || b.right.overlaps(&a.left) {
        JoinType::Horizontal
    } else if a.bottom.overlaps(&b.top) || b.bottom.overlaps(&a.top) {
        JoinType::Vertical
    } else {
        JoinType::None
    }
}

/// A screen position: top left corner + extent
///
/// All values are signed so that monitors positioned to the left of or above the
/// primary monitor and intermediate resize deltas can be represented directly.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Rect {
    /// The x-coordinate of the top left corner of this rect
    pub x: i32,
    /// The y-coordinate of the top left corner of this rect
    pub y: i32,
    /// The width of this rect
    pub w: i32,
    /// The height of this rect
    pub h: i32,
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.w, self.h)
    }
}

impl Rect {
    /// Create a new Rect.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect { x, y, w, h }
    }

    /// Create a new Rect from an origin and a [Size].
    pub const fn from_parts(origin: Point, size: Size) -> Rect {
        Rect {
            x: origin.x,
            y: origin.y,
            w: size.w,
            h: size.h,
        }
    }

    /// The extent of this Rect
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// The x coordinate of the right hand edge of this Rect
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// The y coordinate of the bottom edge of this Rect
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// The midpoint of this rectangle.
    ///
    /// Odd side lengths will lead to a truncated point towards the top left corner
    /// in order to maintain integer coordinates.
    /// ```
    /// # use snapzone::pure::geometry::{Rect, Point};
    /// let r = Rect::new(0, 0, 100, 200);
    ///
    /// assert_eq!(r.midpoint(), Point { x: 50, y: 100 });
    /// ```
    pub fn midpoint(&self) -> Point {
        Point {
            x: self.x + self.w / 2,
            y: self.y + self.h / 2,
        }
    }

    /// The four edges of this Rect as [Line] segments.
    pub fn edges(&self) -> Edges {
        let (x0, y0, x1, y1) = (self.x, self.y, self.right(), self.bottom());

        Edges {
            top: Line::new(Point::new(x0, y0), Point::new(x1, y0)),
            bottom: Line::new(Point::new(x0, y1), Point::new(x1, y1)),
            left: Line::new(Point::new(x0, y0), Point::new(x0, y1)),
            right: Line::new(Point::new(x1, y0), Point::new(x1, y1)),
        }
    }

    /// Shrink this Rect by `border` on every side, moving the origin inwards.
    ///
    /// Width and height are never reduced below zero.
    /// ```
    /// # use snapzone::pure::geometry::Rect;
    /// let r = Rect::new(0, 0, 100, 200);
    ///
    /// assert_eq!(r.inset(10), Rect::new(10, 10, 80, 180));
    /// assert_eq!(r.inset(60), Rect::new(60, 60, 0, 80));
    /// ```
    pub fn inset(&self, border: i32) -> Self {
        Self {
            x: self.x + border,
            y: self.y + border,
            w: (self.w - 2 * border).max(0),
            h: (self.h - 2 * border).max(0),
        }
    }

    /// Check whether this Rect contains `other` as a sub-Rect
    pub fn contains(&self, other: &Rect) -> bool {
        match other {
            Rect { x, .. } if *x < self.x => false,
            Rect { x, w, .. } if (*x + *w) > self.right() => false,
            Rect { y, .. } if *y < self.y => false,
            Rect { y, h, .. } if (*y + *h) > self.bottom() => false,
            _ => true,
        }
    }

    /// Check whether this Rect contains `p` (edges inclusive)
    pub fn contains_point<P>(&self, p: P) -> bool
    where
        P: Into<Point>,
    {
        let p = p.into();

        (self.x..=self.right()).contains(&p.x) && (self.y..=self.bottom()).contains(&p.y)
    }

    /// The smallest Rect enclosing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);

        Rect {
            x,
            y,
            w: self.right().max(other.right()) - x,
            h: self.bottom().max(other.bottom()) - y,
        }
    }
}
