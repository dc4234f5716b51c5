//! Declarative layout definitions and the column packing used to turn them into zones.
//!
//! A [Layout] is an ordered list of [LayoutItem]s, each giving a width and height as a
//! percentage of a monitor work area. Items are consumed column by column: the height
//! percentages of consecutive items are accumulated until they reach 100%, at which point
//! the next item starts a new column to the right of the previous one.
use crate::{pure::geometry::Rect, Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::warn;

/// Tolerance used when checking that the heights of a column sum to 100%.
const COLUMN_EPSILON: f64 = 1e-6;

/// A single region of a [Layout], sized as a percentage of the available work area.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem {
    /// Width as a percentage of the work area width
    #[cfg_attr(
        feature = "serde",
        serde(rename = "widthPercentage", alias = "widthPerc")
    )]
    pub width_percentage: f64,
    /// Height as a percentage of the work area height
    #[cfg_attr(
        feature = "serde",
        serde(rename = "heightPercentage", alias = "heightPerc")
    )]
    pub height_percentage: f64,
}

impl LayoutItem {
    /// Create a new LayoutItem.
    pub const fn new(width_percentage: f64, height_percentage: f64) -> Self {
        Self {
            width_percentage,
            height_percentage,
        }
    }
}

/// A named, validated set of [LayoutItem]s.
///
/// Construction always goes through [Layout::try_new] (deserialization included) so any
/// `Layout` value is known to pack cleanly into whole columns.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLayout"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    name: String,
    items: Vec<LayoutItem>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawLayout {
    #[serde(default)]
    name: Option<String>,
    items: Vec<LayoutItem>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLayout> for Layout {
    type Error = Error;

    fn try_from(raw: RawLayout) -> Result<Self> {
        Layout::try_new(raw.name.unwrap_or_else(|| "Layout".to_string()), raw.items)
    }
}

impl Layout {
    /// Create a new [Layout], checking that its items pack into complete columns.
    ///
    /// ```
    /// # use snapzone::pure::layout::{Layout, LayoutItem};
    /// let ok = Layout::try_new("halves", vec![LayoutItem::new(50.0, 100.0), LayoutItem::new(50.0, 100.0)]);
    /// assert!(ok.is_ok());
    ///
    /// // the second column never reaches 100% height
    /// let bad = Layout::try_new("bad", vec![LayoutItem::new(50.0, 100.0), LayoutItem::new(50.0, 60.0)]);
    /// assert!(bad.is_err());
    /// ```
    pub fn try_new(name: impl Into<String>, items: Vec<LayoutItem>) -> Result<Self> {
        let name = name.into();
        if let Err(reason) = column_ranges(&items) {
            return Err(Error::InvalidLayout { name, reason });
        }

        Ok(Self { name, items })
    }

    /// A layout containing a single zone covering the entire work area.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: vec![LayoutItem::new(100.0, 100.0)],
        }
    }

    /// The display name of this layout
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename this layout
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The items making up this layout in packing order
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// The index ranges of the items making up each column of this layout.
    pub fn columns(&self) -> Vec<Range<usize>> {
        // Validated on construction
        column_ranges(&self.items).unwrap_or_default()
    }

    /// Pack the items of this layout into the given work area.
    ///
    /// Pixel sizes are truncated towards zero. Each item is placed below the previous one
    /// until its column is full, at which point the origin moves right by the width of the
    /// last item placed and back up to the top of the work area.
    /// ```
    /// # use snapzone::pure::{geometry::Rect, layout::{Layout, LayoutItem}};
    /// let l = Layout::try_new("3 zones", vec![
    ///     LayoutItem::new(50.0, 50.0),
    ///     LayoutItem::new(50.0, 50.0),
    ///     LayoutItem::new(50.0, 100.0),
    /// ]).unwrap();
    ///
    /// assert_eq!(
    ///     l.zone_rects(Rect::new(0, 0, 1000, 1000)),
    ///     vec![
    ///         Rect::new(0, 0, 500, 500),
    ///         Rect::new(0, 500, 500, 500),
    ///         Rect::new(500, 0, 500, 1000),
    ///     ]
    /// );
    /// ```
    pub fn zone_rects(&self, work_area: Rect) -> Vec<Rect> {
        let mut x = work_area.x;
        let mut y = work_area.y;
        let mut residual_height_percentage = 100.0;
        let mut rects = Vec::with_capacity(self.items.len());

        for item in self.items.iter() {
            let w = (work_area.w as f64 * item.width_percentage / 100.0).trunc() as i32;
            let h = (work_area.h as f64 * item.height_percentage / 100.0).trunc() as i32;
            rects.push(Rect::new(x, y, w, h));

            residual_height_percentage -= item.height_percentage;
            if residual_height_percentage.abs() < COLUMN_EPSILON {
                x += w;
                y = work_area.y;
                residual_height_percentage = 100.0;
            } else {
                y += h;
            }
        }

        rects
    }
}

fn column_ranges(items: &[LayoutItem]) -> std::result::Result<Vec<Range<usize>>, String> {
    if items.is_empty() {
        return Err("a layout must contain at least one item".to_string());
    }

    let mut columns = Vec::new();
    let mut start = 0;
    let mut residual = 100.0;

    for (i, item) in items.iter().enumerate() {
        for (dim, p) in [
            ("width", item.width_percentage),
            ("height", item.height_percentage),
        ] {
            if !(0.0..=100.0).contains(&p) {
                return Err(format!("item {i} has a {dim} of {p}% (expected 0-100)"));
            }
        }

        residual -= item.height_percentage;
        if residual.abs() < COLUMN_EPSILON {
            columns.push(start..i + 1);
            start = i + 1;
            residual = 100.0;
        } else if residual < 0.0 {
            return Err(format!(
                "the column starting at item {start} exceeds 100% height at item {i}"
            ));
        }
    }

    if start != items.len() {
        return Err(format!(
            "the column starting at item {start} only covers {}% of the height",
            100.0 - residual
        ));
    }

    Ok(columns)
}

/// The layout selected for a given workspace / monitor pair.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceMonitorSettings {
    /// Index into [LayoutsSettings::definitions]
    pub current: usize,
}

/// The full layout document: the known layout definitions and which of them is selected
/// for each workspace (outer index) and monitor (inner index).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutsSettings {
    /// Selected definition per `[workspace][monitor]`
    pub workspaces: Vec<Vec<WorkspaceMonitorSettings>>,
    /// The available layout definitions
    pub definitions: Vec<Layout>,
}

impl Default for LayoutsSettings {
    fn default() -> Self {
        let two_column = Layout {
            name: "2 Column".to_string(),
            items: vec![LayoutItem::new(50.0, 100.0), LayoutItem::new(50.0, 100.0)],
        };

        Self {
            workspaces: vec![vec![WorkspaceMonitorSettings::default(); 2]; 2],
            definitions: vec![two_column],
        }
    }
}

impl LayoutsSettings {
    /// Parse a layout document from its JSON representation.
    #[cfg(feature = "serde")]
    pub fn from_json(s: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(s)?;
        if settings.definitions.is_empty() {
            return Err(Error::NoLayoutDefinitions);
        }

        Ok(settings)
    }

    /// Parse a layout document, falling back to the bundled default document if it is
    /// malformed.
    #[cfg(feature = "serde")]
    pub fn from_json_or_default(s: &str) -> Self {
        match Self::from_json(s) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(%e, "unable to parse layout document: using defaults");
                Self::default()
            }
        }
    }

    /// Serialize this document to JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Ensure that there is a selection entry for every workspace and monitor and that every
    /// selection points at a known definition.
    ///
    /// Returns `true` if the document was modified.
    pub fn refresh(&mut self, n_workspaces: usize, n_monitors: usize) -> bool {
        let mut changed = false;
        let n_definitions = self.definitions.len();

        while self.workspaces.len() < n_workspaces {
            self.workspaces
                .push(vec![WorkspaceMonitorSettings::default(); n_monitors]);
            changed = true;
        }

        for monitors in self.workspaces.iter_mut() {
            if monitors.len() < n_monitors {
                monitors.resize(n_monitors, WorkspaceMonitorSettings::default());
                changed = true;
            }

            for s in monitors.iter_mut().filter(|s| s.current >= n_definitions) {
                warn!(current = s.current, "layout selection out of range: resetting");
                s.current = 0;
                changed = true;
            }
        }

        changed
    }

    /// The definition index currently selected for the given workspace and monitor.
    pub fn selected(&self, workspace: usize, monitor: usize) -> Result<usize> {
        self.workspaces
            .get(workspace)
            .ok_or(Error::UnknownWorkspace(workspace))?
            .get(monitor)
            .map(|s| s.current)
            .ok_or(Error::UnknownMonitor(monitor))
    }

    /// Select the definition at `layout` for the given workspace and monitor.
    pub fn select(&mut self, workspace: usize, monitor: usize, layout: usize) -> Result<()> {
        if layout >= self.definitions.len() {
            return Err(Error::UnknownLayout(layout));
        }

        let s = self
            .workspaces
            .get_mut(workspace)
            .ok_or(Error::UnknownWorkspace(workspace))?
            .get_mut(monitor)
            .ok_or(Error::UnknownMonitor(monitor))?;
        s.current = layout;

        Ok(())
    }

    /// The selected [Layout] for each monitor of the given workspace.
    pub fn layouts_for_workspace(&self, workspace: usize) -> Result<Vec<Layout>> {
        self.workspaces
            .get(workspace)
            .ok_or(Error::UnknownWorkspace(workspace))?
            .iter()
            .map(|s| {
                self.definitions
                    .get(s.current)
                    .cloned()
                    .ok_or(Error::UnknownLayout(s.current))
            })
            .collect()
    }
}
