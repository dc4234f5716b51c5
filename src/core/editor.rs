//! Interactive resizing of the zones of a layout.
use crate::{
    core::{
        config::{Config, DragMode},
        display::{DisplayPurpose, ZoneDisplay},
    },
    host::{Renderer, Shell, Widget, WidgetStyle},
    pure::{
        anchor::{Axis, ZoneAnchor},
        geometry::{join_type, JoinType, Point},
        layout::{Layout, LayoutItem},
        zone::{Zone, ZoneId},
    },
    Result,
};
use tracing::{debug, trace};

/// A [ZoneDisplay] with drag handles between adjacent zones.
///
/// Dragging a handle moves the shared edge of the two zones it sits between, growing one and
/// shrinking the other by the same amount.
#[derive(Debug, Clone)]
pub struct ZoneEditor {
    display: ZoneDisplay,
    anchors: Vec<ZoneAnchor>,
    drag_mode: DragMode,
    editing: bool,
}

impl ZoneEditor {
    /// Create a new editor for `layout` on the given monitor.
    pub fn new(id: u32, monitor: usize, layout: Layout, config: Config) -> Self {
        let drag_mode = config.drag_mode;

        Self {
            display: ZoneDisplay::new(id, monitor, DisplayPurpose::Editing, layout, config),
            anchors: Vec::new(),
            drag_mode,
            editing: false,
        }
    }

    /// The monitor being edited
    pub fn monitor(&self) -> usize {
        self.display.monitor()
    }

    /// The layout the editor was last built from
    pub fn layout(&self) -> &Layout {
        self.display.layout()
    }

    /// The zones being edited
    pub fn zones(&self) -> &[Zone] {
        self.display.zones()
    }

    /// The drag handles between adjacent zones
    pub fn anchors(&self) -> &[ZoneAnchor] {
        &self.anchors
    }

    /// Whether the editor is currently shown and accepting input
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Whether the zone `id` belongs to this editor
    pub fn owns(&self, id: ZoneId) -> bool {
        id.display == self.display.id()
    }

    /// Build the zones and drag handles for the current work area.
    pub fn init<X: Shell>(&mut self, x: &X) -> Result<()> {
        self.destroy_anchors(x)?;
        self.display.init(x)?;
        self.create_anchors(x)
    }

    /// Replace the layout being edited, discarding any edits made so far.
    pub fn set_layout<X: Shell>(&mut self, layout: Layout, x: &X) -> Result<()> {
        self.destroy_anchors(x)?;
        self.display.set_layout(layout, x)?;
        self.create_anchors(x)
    }

    fn create_anchors<X: Renderer>(&mut self, x: &X) -> Result<()> {
        let zones = self.display.zones();
        self.anchors = build_anchors(zones, self.display.config().window_margin);

        for a in self.anchors.iter() {
            if let (Some(w), Some(r)) = (anchor_widget(a, zones), a.rect(zones)) {
                x.create_widget(w, WidgetStyle::Anchor, r, None)?;
                x.set_visible(w, self.editing)?;
            }
        }
        debug!(n_anchors = self.anchors.len(), "built layout editor");

        Ok(())
    }

    /// Show the editor and start accepting input.
    pub fn show<X: Renderer>(&mut self, x: &X) -> Result<()> {
        self.editing = true;
        self.display.show(x)?;
        self.set_anchors_visible(true, x)
    }

    /// Hide the editor, cancelling any in progress drag.
    pub fn hide<X: Renderer>(&mut self, x: &X) -> Result<()> {
        self.editing = false;
        self.anchors.iter_mut().for_each(|a| a.stop());
        self.display.hide(x)?;
        self.set_anchors_visible(false, x)
    }

    fn set_anchors_visible<X: Renderer>(&self, visible: bool, x: &X) -> Result<()> {
        for w in self.anchors.iter().flat_map(|a| anchor_widget(a, self.display.zones())) {
            x.set_visible(w, visible)?;
        }

        Ok(())
    }

    /// Handle a button press on the handle between zones `a` and `b`.
    ///
    /// Returns `false` if there is no such handle in this editor.
    pub fn press(&mut self, a: ZoneId, b: ZoneId, p: Point) -> bool {
        if !self.editing {
            return false;
        }

        let zones = self.display.zones();
        let target = Some(Widget::Anchor { a, b });
        let idx = self
            .anchors
            .iter()
            .position(|anchor| anchor_widget(anchor, zones) == target);

        let idx = match idx {
            Some(idx) => idx,
            None => return false,
        };

        for (i, anchor) in self.anchors.iter_mut().enumerate() {
            if i != idx {
                anchor.stop();
                continue;
            }

            match self.drag_mode {
                DragMode::Toggle => anchor.press(p),
                DragMode::Hold => anchor.start(p),
            }
            trace!(%a, %b, dragging = anchor.is_dragging(), "anchor pressed");
        }

        true
    }

    /// Handle a button release anywhere on screen.
    pub fn release(&mut self) {
        if self.drag_mode == DragMode::Hold {
            self.anchors.iter_mut().for_each(|a| a.stop());
        }
    }

    /// Whether any handle is currently being dragged
    pub fn is_dragging(&self) -> bool {
        self.anchors.iter().any(|a| a.is_dragging())
    }

    /// Apply pointer motion to any handle currently being dragged.
    ///
    /// Returns `true` if any zones were resized.
    pub fn pointer_moved<X: Renderer>(&mut self, p: Point, x: &X) -> Result<bool> {
        let mut changed = false;
        for a in self.anchors.iter_mut() {
            changed |= a.pointer_moved(p, self.display.zones_mut());
        }

        if !changed {
            return Ok(false);
        }

        let zones = self.display.zones();
        for a in self.anchors.iter() {
            if let (Some(w), Some(r)) = (anchor_widget(a, zones), a.rect(zones)) {
                x.move_widget(w, r)?;
            }
        }
        self.display.flush(x)?;

        Ok(true)
    }

    /// The layout described by the current geometry of the zones.
    ///
    /// Widths are relative to the work area and heights are relative to the total height of
    /// the column each zone is in.
    pub fn to_layout(&self) -> Result<Layout> {
        let layout = self.display.layout();
        let zones = self.display.zones();
        let wa = match self.display.work_area() {
            Some(wa) if !zones.is_empty() && wa.w > 0 => wa,
            _ => return Ok(layout.clone()),
        };

        let mut items = Vec::with_capacity(zones.len());
        for col in layout.columns() {
            let col_height: i32 = zones[col.clone()].iter().map(|z| z.height()).sum();
            for z in zones[col].iter() {
                let height_percentage = if col_height > 0 {
                    z.height() as f64 * 100.0 / col_height as f64
                } else {
                    0.0
                };
                let width_percentage = z.width() as f64 * 100.0 / wa.w as f64;
                items.push(LayoutItem::new(width_percentage, height_percentage));
            }
        }

        Layout::try_new(layout.name(), items)
    }

    /// Release the zones and handles of this editor.
    pub fn destroy<X: Renderer>(&mut self, x: &X) -> Result<()> {
        self.editing = false;
        self.destroy_anchors(x)?;
        self.display.destroy(x)
    }

    fn destroy_anchors<X: Renderer>(&mut self, x: &X) -> Result<()> {
        for w in self.anchors.iter().flat_map(|a| anchor_widget(a, self.display.zones())) {
            x.destroy_widget(w)?;
        }
        self.anchors.clear();

        Ok(())
    }
}

fn anchor_widget(anchor: &ZoneAnchor, zones: &[Zone]) -> Option<Widget> {
    let (a, b) = anchor.zones();

    Some(Widget::Anchor {
        a: zones.get(a)?.id(),
        b: zones.get(b)?.id(),
    })
}

/// An anchor for every pair of zones that share part of an edge, with the left / top zone
/// first.
fn build_anchors(zones: &[Zone], margin: i32) -> Vec<ZoneAnchor> {
    let mut anchors = Vec::new();

    for (i, zi) in zones.iter().enumerate() {
        for (j, zj) in zones.iter().enumerate().skip(i + 1) {
            match join_type(&zi.rect().edges(), &zj.rect().edges()) {
                JoinType::Horizontal if zi.x() < zj.x() => {
                    anchors.push(ZoneAnchor::new(i, j, Axis::Horizontal, margin))
                }
                JoinType::Horizontal => {
                    anchors.push(ZoneAnchor::new(j, i, Axis::Horizontal, margin))
                }
                JoinType::Vertical if zi.y() < zj.y() => {
                    anchors.push(ZoneAnchor::new(i, j, Axis::Vertical, margin))
                }
                JoinType::Vertical => {
                    anchors.push(ZoneAnchor::new(j, i, Axis::Vertical, margin))
                }
                JoinType::None => (),
            }
        }
    }

    anchors
}
