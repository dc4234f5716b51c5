//! A set of zones built from a [Layout] for the work area of a single monitor.
use crate::{
    core::config::Config,
    host::{Renderer, Shell, Widget, WidgetStyle},
    pure::{
        geometry::{Point, Rect},
        layout::{Layout, LayoutItem},
        zone::{Zone, ZoneEvent, ZoneId, ZoneKind},
    },
    Result,
};
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

/// What a [ZoneDisplay] is being used for. This determines the [ZoneKind] of the zones it
/// creates and how they are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayPurpose {
    /// A read only preview of a layout
    Preview,
    /// Zones that have windows tiled into them
    Tiling,
    /// Zones that are being interactively resized
    Editing,
}

/// The zones of a single monitor, built from a [Layout] and the monitor work area.
#[derive(Debug, Clone)]
pub struct ZoneDisplay {
    id: u32,
    monitor: usize,
    purpose: DisplayPurpose,
    layout: Layout,
    config: Config,
    work_area: Option<Rect>,
    zones: Vec<Zone>,
    next_index: u32,
    visible: bool,
}

impl ZoneDisplay {
    /// Create a new display for `monitor`. No zones are created until [ZoneDisplay::init]
    /// is called.
    pub fn new(
        id: u32,
        monitor: usize,
        purpose: DisplayPurpose,
        layout: Layout,
        config: Config,
    ) -> Self {
        Self {
            id,
            monitor,
            purpose,
            layout,
            config,
            work_area: None,
            zones: Vec::new(),
            next_index: 0,
            visible: false,
        }
    }

    /// The unique id of this display
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The index of the monitor this display covers
    pub fn monitor(&self) -> usize {
        self.monitor
    }

    /// What this display is being used for
    pub fn purpose(&self) -> DisplayPurpose {
        self.purpose
    }

    /// The layout this display was built from
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The config this display was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The work area the current zones were built for, if one was available
    pub fn work_area(&self) -> Option<Rect> {
        self.work_area
    }

    /// The zones of this display, in layout order
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub(crate) fn zones_mut(&mut self) -> &mut [Zone] {
        &mut self.zones
    }

    /// Whether the zone highlights of this display are currently shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Build the zones of this display from its layout and the current work area of its
    /// monitor.
    ///
    /// If the work area is currently unavailable no zones are created: this is not an error
    /// and a later call to [ZoneDisplay::init] will build the zones once it is known.
    pub fn init<X: Shell>(&mut self, x: &X) -> Result<()> {
        let work_area = x.work_area(self.monitor)?;
        self.destroy(x)?;
        self.build(work_area, x)
    }

    /// Rebuild the zones of this display if the work area of its monitor has changed since
    /// they were last built.
    ///
    /// Returns `true` if the zones were rebuilt.
    pub fn reinit<X: Shell>(&mut self, x: &X) -> Result<bool> {
        let work_area = x.work_area(self.monitor)?;
        if work_area == self.work_area {
            trace!(id = self.id, "work area unchanged");
            return Ok(false);
        }

        self.destroy(x)?;
        self.build(work_area, x)?;

        Ok(true)
    }

    /// Replace the layout of this display and rebuild its zones.
    pub fn set_layout<X: Shell>(&mut self, layout: Layout, x: &X) -> Result<()> {
        self.layout = layout;
        self.init(x)
    }

    fn build<X: Shell>(&mut self, work_area: Option<Rect>, x: &X) -> Result<()> {
        self.work_area = work_area;

        let wa = match work_area {
            Some(wa) => wa,
            None => {
                warn!(monitor = self.monitor, "no work area available: skipping zones");
                return Ok(());
            }
        };

        let rects = self.layout.zone_rects(wa);
        let items = self.layout.items().to_vec();
        debug!(
            id = self.id,
            monitor = self.monitor,
            layout = %self.layout.name(),
            ?wa,
            "building zones"
        );

        for (r, item) in rects.into_iter().zip(items) {
            let kind = self.zone_kind(item);
            let zone = self.create_zone(r, kind, x)?;
            self.zones.push(zone);
        }

        Ok(())
    }

    fn zone_kind(&self, item: LayoutItem) -> ZoneKind {
        match self.purpose {
            DisplayPurpose::Editing => ZoneKind::Editable { item },
            DisplayPurpose::Tiling if self.config.show_tabs => ZoneKind::Tabbed {
                tab_height: self.config.tab_height,
                tab_width: self.config.tab_width,
            },
            _ => ZoneKind::Plain,
        }
    }

    fn widget_style(&self) -> WidgetStyle {
        match self.purpose {
            DisplayPurpose::Editing => WidgetStyle::Editable,
            _ => WidgetStyle::Zone,
        }
    }

    /// Create a new zone belonging to this display along with its widget.
    ///
    /// The zone is not added to [ZoneDisplay::zones]: this is used both for layout zones and
    /// for ad-hoc zones that are tracked by the caller.
    pub(crate) fn create_zone<X: Renderer>(
        &mut self,
        r: Rect,
        kind: ZoneKind,
        x: &X,
    ) -> Result<Zone> {
        let id = ZoneId {
            display: self.id,
            index: self.next_index,
        };
        self.next_index += 1;

        let zone = Zone::new(id, kind, r, self.config.window_margin)
            .with_tolerance(self.config.highlight_margin);

        let widget = Widget::Zone(id);
        let label = zone.label();
        x.create_widget(widget, self.widget_style(), zone.inner_rect(), label.as_deref())?;
        x.set_visible(widget, self.visible)?;
        trace!(%id, rect = %zone.rect(), "created zone");

        Ok(zone)
    }

    /// Show the zones of this display.
    pub fn show<X: Renderer>(&mut self, x: &X) -> Result<()> {
        self.visible = true;
        set_visible(&self.zones, true, x)
    }

    /// Hide the zones of this display.
    pub fn hide<X: Renderer>(&mut self, x: &X) -> Result<()> {
        self.visible = false;
        for z in self.zones.iter() {
            x.set_hover(Widget::Zone(z.id()), false)?;
        }

        set_visible(&self.zones, false, x)
    }

    /// Highlight the zones that the pointer at `p` is currently over.
    pub fn highlight_zones_under_cursor<X: Renderer>(&self, p: Point, x: &X) -> Result<()> {
        highlight(&self.zones, p, x)
    }

    /// The indices of the zones that contain the point `p`.
    pub fn zones_under(&self, p: Point) -> Vec<usize> {
        self.zones
            .iter()
            .enumerate()
            .filter(|(_, z)| z.contains(p))
            .map(|(i, _)| i)
            .collect()
    }

    /// Sync any pending zone changes to their widgets.
    pub fn flush<X: Renderer>(&mut self, x: &X) -> Result<()> {
        for z in self.zones.iter_mut() {
            sync_zone(z, x)?;
        }

        Ok(())
    }

    /// Release all zones of this display along with their widgets.
    pub fn destroy<X: Renderer>(&mut self, x: &X) -> Result<()> {
        for mut z in self.zones.drain(..) {
            destroy_zone(&mut z, x)?;
        }

        Ok(())
    }
}

pub(crate) fn set_visible<X: Renderer>(zones: &[Zone], visible: bool, x: &X) -> Result<()> {
    for z in zones.iter() {
        x.set_visible(Widget::Zone(z.id()), visible)?;
    }

    Ok(())
}

pub(crate) fn highlight<X: Renderer>(zones: &[Zone], p: Point, x: &X) -> Result<()> {
    for z in zones.iter() {
        x.set_hover(Widget::Zone(z.id()), z.contains(p))?;
    }

    Ok(())
}

/// Drain the pending events of `zone` and update its widgets to match.
pub(crate) fn sync_zone<X: Renderer>(zone: &mut Zone, x: &X) -> Result<()> {
    let events = zone.take_events();
    if events.is_empty() {
        return Ok(());
    }

    let id = zone.id();
    x.move_widget(Widget::Zone(id), zone.inner_rect())?;

    let mut stale = BTreeSet::new();
    let mut tabs_changed = false;
    for e in events {
        if let ZoneEvent::TabsChanged { removed } = e {
            tabs_changed = true;
            stale.extend(removed.into_iter().map(|t| t.window));
        }
    }

    if !tabs_changed {
        return Ok(());
    }

    for window in stale {
        x.destroy_widget(Widget::Tab { zone: id, window })?;
    }

    for tab in zone.tabs() {
        let w = Widget::Tab {
            zone: id,
            window: tab.window,
        };
        x.create_widget(w, WidgetStyle::Tab, tab.rect, Some(&tab.title))?;
        x.set_visible(w, true)?;
    }

    Ok(())
}

/// Release the widgets owned by `zone`.
pub(crate) fn destroy_zone<X: Renderer>(zone: &mut Zone, x: &X) -> Result<()> {
    zone.take_events();
    for tab in zone.tabs() {
        x.destroy_widget(Widget::Tab {
            zone: zone.id(),
            window: tab.window,
        })?;
    }
    zone.clear_tabs();
    zone.take_events();

    x.destroy_widget(Widget::Zone(zone.id()))
}
