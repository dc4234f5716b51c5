//! Tracking which windows are tiled into which zones.
use crate::{
    core::{
        config::Config,
        display::{self, DisplayPurpose, ZoneDisplay},
    },
    host::{Shell, TimerControl, Window},
    pure::{
        geometry::Rect,
        layout::Layout,
        zone::{merged_rect, Zone, ZoneId, ZoneKind},
    },
    Result, WinId,
};
use tracing::{debug, info, trace};

/// The tiling state of a single workspace on a single monitor.
///
/// Assignment of windows to zones is the authoritative state: windows are only moved by
/// [ZoneManager::apply_layout], which positions every live window assigned to a zone inside
/// of that zone. Dropping a window across more than one zone creates a "virtual" zone that
/// covers all of them and lives for as long as it has windows assigned to it.
#[derive(Debug, Clone)]
pub struct ZoneManager {
    workspace: usize,
    display: ZoneDisplay,
    virtual_zones: Vec<Zone>,
}

impl ZoneManager {
    /// Create a new manager for the given workspace and monitor.
    pub fn new(
        id: u32,
        workspace: usize,
        monitor: usize,
        layout: Layout,
        config: Config,
    ) -> Self {
        Self {
            workspace,
            display: ZoneDisplay::new(id, monitor, DisplayPurpose::Tiling, layout, config),
            virtual_zones: Vec::new(),
        }
    }

    /// The workspace this manager is tiling
    pub fn workspace(&self) -> usize {
        self.workspace
    }

    /// The monitor this manager is tiling
    pub fn monitor(&self) -> usize {
        self.display.monitor()
    }

    /// The underlying display holding the layout zones
    pub fn display(&self) -> &ZoneDisplay {
        &self.display
    }

    /// The zones built from the current layout
    pub fn zones(&self) -> &[Zone] {
        self.display.zones()
    }

    /// The ad-hoc zones created by dropping windows across multiple layout zones
    pub fn virtual_zones(&self) -> &[Zone] {
        &self.virtual_zones
    }

    /// The work area the current zones were built for
    pub fn work_area(&self) -> Option<Rect> {
        self.display.work_area()
    }

    /// The layout and virtual zones of this manager
    fn all_zones(&self) -> impl Iterator<Item = &Zone> {
        self.display.zones().iter().chain(self.virtual_zones.iter())
    }

    fn all_zones_mut(&mut self) -> impl Iterator<Item = &mut Zone> {
        self.display
            .zones_mut()
            .iter_mut()
            .chain(self.virtual_zones.iter_mut())
    }

    /// The zone that `id` is currently assigned to, if any
    pub fn zone_of(&self, id: WinId) -> Option<ZoneId> {
        self.all_zones().find(|z| z.has_window(id)).map(|z| z.id())
    }

    /// The normal windows of the active workspace that are on this manager's monitor.
    fn tileable_windows<X: Shell>(&self, x: &X) -> Result<Vec<Window>> {
        let monitor = self.monitor();

        Ok(x.current_windows()?
            .into_iter()
            .filter(|w| w.is_normal() && w.monitor == monitor)
            .collect())
    }

    /// Build the zones for the current work area and assign the currently open windows to
    /// the zone containing their midpoint.
    pub fn init<X: Shell>(&mut self, x: &X) -> Result<()> {
        self.destroy_virtual_zones(x)?;
        self.display.init(x)?;
        self.initial_layout(x)
    }

    /// Assign each open window that is not yet tiled to the first zone containing the
    /// midpoint of its frame.
    pub fn initial_layout<X: Shell>(&mut self, x: &X) -> Result<()> {
        for w in self.tileable_windows(x)? {
            if self.zone_of(w.id).is_some() {
                continue;
            }

            let p = w.midpoint();
            if let Some(z) = self.display.zones_mut().iter_mut().find(|z| z.contains(p)) {
                trace!(id = %w.id, zone = %z.id(), "initial assignment");
                z.add_window(w.id);
            }
        }

        Ok(())
    }

    /// The ids of the windows in `windows` whose midpoint lies within `r`.
    pub fn windows_currently_present_in(r: Rect, windows: &[Window]) -> Vec<WinId> {
        windows
            .iter()
            .filter(|w| r.contains_point(w.midpoint()))
            .map(|w| w.id)
            .collect()
    }

    /// Remove `id` from every zone of this manager, returning whether it was assigned.
    pub fn forget_window<X: Shell>(&mut self, id: WinId, x: &X) -> Result<bool> {
        let mut removed = false;
        for z in self.all_zones_mut() {
            removed |= z.remove_window(id);
        }
        self.cleanup_virtual_zones(x)?;

        Ok(removed)
    }

    /// Assign a newly created window to the zone containing its midpoint and move it into
    /// place, falling back to [ZoneManager::add_window] if no zone contains it.
    pub fn place_new_window<X: Shell>(&mut self, id: WinId, x: &X) -> Result<()> {
        let w = match x.window(id)? {
            Some(w) if w.is_normal() => w,
            _ => {
                debug!(%id, "ignoring window that is not a normal window");
                return Ok(());
            }
        };

        let p = w.midpoint();
        match self.display.zones().iter().position(|z| z.contains(p)) {
            Some(idx) => self.assign(id, idx, x),
            None => self.add_window(id, x),
        }
    }

    /// Assign a window to the nearest free zone and move it into place.
    ///
    /// If exactly one zone is empty the window is placed there, otherwise it is placed in the
    /// zone whose midpoint is closest to the midpoint of the window. Ties are broken in
    /// favour of the zone that comes first in the layout.
    pub fn add_window<X: Shell>(&mut self, id: WinId, x: &X) -> Result<()> {
        let w = match x.window(id)? {
            Some(w) if w.is_normal() => w,
            _ => {
                debug!(%id, "ignoring window that is not a normal window");
                return Ok(());
            }
        };

        match nearest_free_zone(self.display.zones(), &w) {
            Some(idx) => self.assign(id, idx, x),
            None => {
                debug!(%id, monitor = self.monitor(), "no zones to add window to");
                Ok(())
            }
        }
    }

    fn assign<X: Shell>(&mut self, id: WinId, idx: usize, x: &X) -> Result<()> {
        for z in self.all_zones_mut() {
            z.remove_window(id);
        }
        let zone = &mut self.display.zones_mut()[idx];
        info!(%id, zone = %zone.id(), "adding window to zone");
        zone.add_window(id);
        self.cleanup_virtual_zones(x)?;

        self.apply_layout(x)
    }

    /// Reassign `id` based on the current position of the pointer at the end of a drag.
    ///
    /// Returns `true` if the window was (re)assigned. If the pointer is not over any zone
    /// the current assignment of the window is left unchanged.
    #[tracing::instrument(level = "trace", skip(self, x), fields(monitor = self.monitor()))]
    pub fn move_window_to_zone_under_cursor<X: Shell>(
        &mut self,
        id: WinId,
        x: &X,
    ) -> Result<bool> {
        let p = x.cursor_position()?;
        let touched = self.display.zones_under(p);

        match touched[..] {
            [] => {
                debug!(%id, ?p, "window dropped outside of all zones");
                return Ok(false);
            }

            [idx] => {
                for z in self.all_zones_mut() {
                    z.remove_window(id);
                }
                let zone = &mut self.display.zones_mut()[idx];
                debug!(%id, zone = %zone.id(), "moving window to zone");
                zone.add_window(id);
            }

            _ => {
                let zones = self.display.zones();
                let refs: Vec<&Zone> = touched.iter().map(|&i| &zones[i]).collect();
                let r = match merged_rect(&refs) {
                    Some(r) => r,
                    None => return Ok(false),
                };

                let windows = self.tileable_windows(x)?;
                let mut members = Self::windows_currently_present_in(r, &windows);
                if !members.contains(&id) {
                    members.push(id);
                }

                for z in self.all_zones_mut() {
                    for &m in members.iter() {
                        z.remove_window(m);
                    }
                }

                let mut zone = self.display.create_zone(r, ZoneKind::Plain, x)?;
                members.iter().for_each(|&m| zone.add_window(m));
                debug!(
                    %id,
                    zone = %zone.id(),
                    ?r,
                    n_windows = members.len(),
                    "created virtual zone"
                );
                self.virtual_zones.push(zone);
            }
        }

        self.cleanup_virtual_zones(x)?;
        self.apply_layout(x)?;

        Ok(true)
    }

    /// Move every live window assigned to a zone into that zone.
    ///
    /// No assignment decisions are made here so this is safe to call as often as needed.
    #[tracing::instrument(level = "trace", skip(self, x), fields(monitor = self.monitor()))]
    pub fn apply_layout<X: Shell>(&mut self, x: &X) -> Result<()> {
        let windows = x.current_windows()?;
        let live: Vec<(WinId, &str)> = windows
            .iter()
            .filter(|w| w.is_normal())
            .map(|w| (w.id, w.title.as_str()))
            .collect();

        let mut moves = Vec::new();
        for z in self.all_zones_mut() {
            moves.extend(z.adjust_windows(live.iter().copied()));
        }

        for (id, r) in moves {
            match windows.iter().find(|w| w.id == id) {
                Some(w) if w.frame == r => (),
                _ => {
                    trace!(%id, %r, "moving window");
                    x.move_resize(id, r)?;
                }
            }
        }

        self.flush(x)
    }

    fn flush<X: Shell>(&mut self, x: &X) -> Result<()> {
        self.display.flush(x)?;
        for z in self.virtual_zones.iter_mut() {
            display::sync_zone(z, x)?;
        }

        Ok(())
    }

    /// Show the zone highlights for this manager.
    pub fn show<X: Shell>(&mut self, x: &X) -> Result<()> {
        self.display.show(x)?;
        display::set_visible(&self.virtual_zones, true, x)
    }

    /// Hide the zone highlights for this manager.
    pub fn hide<X: Shell>(&mut self, x: &X) -> Result<()> {
        self.display.hide(x)?;
        display::set_visible(&self.virtual_zones, false, x)
    }

    /// Whether the zone highlights of this manager are currently shown
    pub fn is_visible(&self) -> bool {
        self.display.is_visible()
    }

    /// Update the hover state of zones under the pointer while the zones are shown.
    pub fn poll_cursor<X: Shell>(&self, x: &X) -> Result<TimerControl> {
        if !self.display.is_visible() {
            return Ok(TimerControl::Stop);
        }

        let p = x.cursor_position()?;
        self.display.highlight_zones_under_cursor(p, x)?;

        Ok(TimerControl::Continue)
    }

    /// Rebuild the zones if the work area of the monitor has changed, reassigning windows
    /// based on their current position.
    pub fn reinit<X: Shell>(&mut self, x: &X) -> Result<()> {
        let previous = self.display.work_area();
        if !self.display.reinit(x)? {
            return Ok(());
        }

        let current = self.display.work_area();
        info!(monitor = self.monitor(), ?previous, ?current, "work area changed");
        self.destroy_virtual_zones(x)?;
        self.initial_layout(x)
    }

    /// Switch to a new layout, reassigning windows based on their current position.
    pub fn set_layout<X: Shell>(&mut self, layout: Layout, x: &X) -> Result<()> {
        self.destroy_virtual_zones(x)?;
        self.display.set_layout(layout, x)?;
        self.initial_layout(x)?;

        self.apply_layout(x)
    }

    /// Release all zones of this manager along with their widgets.
    pub fn destroy<X: Shell>(&mut self, x: &X) -> Result<()> {
        self.destroy_virtual_zones(x)?;
        self.display.destroy(x)
    }

    fn destroy_virtual_zones<X: Shell>(&mut self, x: &X) -> Result<()> {
        for mut z in self.virtual_zones.drain(..) {
            display::destroy_zone(&mut z, x)?;
        }

        Ok(())
    }

    fn cleanup_virtual_zones<X: Shell>(&mut self, x: &X) -> Result<()> {
        let (empty, keep): (Vec<Zone>, Vec<Zone>) = std::mem::take(&mut self.virtual_zones)
            .into_iter()
            .partition(|z| z.is_empty());
        self.virtual_zones = keep;

        for mut z in empty {
            debug!(zone = %z.id(), "removing empty virtual zone");
            display::destroy_zone(&mut z, x)?;
        }

        Ok(())
    }
}

/// The index of the zone a new window should be placed in.
fn nearest_free_zone(zones: &[Zone], w: &Window) -> Option<usize> {
    let mut empty = zones.iter().enumerate().filter(|(_, z)| z.is_empty());
    if let (Some((idx, _)), None) = (empty.next(), empty.next()) {
        return Some(idx);
    }

    let p = w.midpoint();
    let mut best: Option<(usize, f64)> = None;
    for (idx, z) in zones.iter().enumerate() {
        let d = p.distance(&z.rect().midpoint());
        match best {
            Some((_, current)) if d >= current => (),
            _ => best = Some((idx, d)),
        }
    }

    best.map(|(idx, _)| idx)
}
