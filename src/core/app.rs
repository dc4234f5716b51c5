//! The top level application context tying the engine to a hosting shell.
use crate::{
    core::{
        config::Config,
        display::{DisplayPurpose, ZoneDisplay},
        editor::ZoneEditor,
        manager::ZoneManager,
        subscriptions::Subscriptions,
    },
    host::{Event, EventKind, Shell, TimerControl, Widget},
    pure::{
        geometry::Point,
        layout::{Layout, LayoutsSettings},
    },
    Error, Result, WinId,
};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{debug, error, info, trace};

/// A running instance of the zone engine.
///
/// An `App` is created by [App::enable], which subscribes to the events it needs and builds
/// a [ZoneManager] for each monitor of the active workspace. Events from the shell are passed
/// to [App::handle_event] and everything is torn down again by [App::disable].
#[derive(Debug)]
pub struct App<X: Shell> {
    x: X,
    config: Config,
    layouts: LayoutsSettings,
    workspace: usize,
    managers: Vec<Vec<ZoneManager>>,
    editors: BTreeMap<usize, ZoneEditor>,
    previews: BTreeMap<usize, ZoneDisplay>,
    subscriptions: Subscriptions,
    next_display: u32,
    pending_save: bool,
    enabled: bool,
}

impl<X: Shell> App<X> {
    /// Start the engine: subscribe to shell events and tile the active workspace.
    pub fn enable(config: Config, layouts: LayoutsSettings, x: X) -> Result<Self> {
        if layouts.definitions.is_empty() {
            return Err(Error::NoLayoutDefinitions);
        }

        let mut app = Self {
            x,
            config,
            layouts,
            workspace: 0,
            managers: Vec::new(),
            editors: BTreeMap::new(),
            previews: BTreeMap::new(),
            subscriptions: Subscriptions::default(),
            next_display: 0,
            pending_save: false,
            enabled: true,
        };

        if let Err(e) = app.start() {
            app.disable();
            return Err(e);
        }
        info!(workspace = app.workspace, "enabled");

        Ok(app)
    }

    fn start(&mut self) -> Result<()> {
        self.subscriptions.acquire_all(EventKind::iter(), &self.x)?;
        self.refresh_layouts()?;
        self.set_to_current_workspace()
    }

    /// Stop the engine, releasing every subscription and widget.
    ///
    /// Errors from the shell are logged rather than returned so that as much as possible is
    /// released. Calling this more than once is a no-op.
    pub fn disable(&mut self) {
        if !self.enabled {
            debug!("already disabled");
            return;
        }
        self.enabled = false;

        let n = self.subscriptions.release_all(&self.x);
        log_err("editors", self.cancel_editing());
        log_err("previews", self.clear_previews());
        log_err("managers", self.destroy_managers());
        info!(n_subscriptions = n, "disabled");
    }

    /// Whether this app is currently running
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The shell this app is running in
    pub fn shell(&self) -> &X {
        &self.x
    }

    /// The config this app is running with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current layout document
    pub fn layouts(&self) -> &LayoutsSettings {
        &self.layouts
    }

    /// The event subscriptions currently held
    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    /// The workspace currently being tiled
    pub fn workspace(&self) -> usize {
        self.workspace
    }

    /// The managers for each monitor of the active workspace
    pub fn managers(&self) -> &[ZoneManager] {
        self.managers
            .get(self.workspace)
            .map(|ms| ms.as_slice())
            .unwrap_or(&[])
    }

    /// The manager for the given monitor of the active workspace
    pub fn manager(&self, monitor: usize) -> Option<&ZoneManager> {
        self.managers().iter().find(|m| m.monitor() == monitor)
    }

    /// The layout editor for the given monitor, if one is open
    pub fn editor(&self, monitor: usize) -> Option<&ZoneEditor> {
        self.editors.get(&monitor)
    }

    /// The layout preview for the given monitor, if one is shown
    pub fn preview(&self, monitor: usize) -> Option<&ZoneDisplay> {
        self.previews.get(&monitor)
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_display;
        self.next_display += 1;

        id
    }

    fn layout_for(&self, workspace: usize, monitor: usize) -> Result<Layout> {
        let idx = self.layouts.selected(workspace, monitor)?;

        self.layouts
            .definitions
            .get(idx)
            .cloned()
            .ok_or(Error::UnknownLayout(idx))
    }

    fn refresh_layouts(&mut self) -> Result<()> {
        let n_workspaces = self.x.n_workspaces()?;
        let n_monitors = self.x.monitors()?.len();
        if self.layouts.refresh(n_workspaces, n_monitors) {
            debug!(n_workspaces, n_monitors, "layout document updated");
            self.pending_save = true;
        }

        Ok(())
    }

    /// Rebuild the managers for each monitor of the active workspace.
    pub fn set_to_current_workspace(&mut self) -> Result<()> {
        self.destroy_managers()?;
        self.workspace = self.x.active_workspace()?;

        let mut managers = Vec::new();
        for m in self.x.monitors()? {
            let layout = self.layout_for(self.workspace, m.index)?;
            let id = self.next_id();
            let mut manager =
                ZoneManager::new(id, self.workspace, m.index, layout, self.config.clone());
            manager.init(&self.x)?;
            manager.apply_layout(&self.x)?;
            managers.push(manager);
        }

        if self.managers.len() <= self.workspace {
            self.managers.resize_with(self.workspace + 1, Vec::new);
        }
        debug!(workspace = self.workspace, n_managers = managers.len(), "tiling workspace");
        self.managers[self.workspace] = managers;

        Ok(())
    }

    fn destroy_managers(&mut self) -> Result<()> {
        for mut m in std::mem::take(&mut self.managers).into_iter().flatten() {
            m.destroy(&self.x)?;
        }

        Ok(())
    }

    /// React to an event from the shell.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        if !self.enabled {
            debug!(?event, "ignoring event while disabled");
            return Ok(());
        }
        trace!(kind = %event.kind(), "handling event");

        match event {
            Event::WindowCreated(id) => self.on_window_created(id),
            Event::GrabBegin(id) => self.on_grab_begin(id),
            Event::GrabEnd(id) => self.on_grab_end(id),
            Event::Restacked => self.apply_layouts(),
            Event::WorkspaceSwitched => {
                self.refresh_layouts()?;
                self.set_to_current_workspace()
            }
            Event::WorkAreasChanged => self.reinit(),
            Event::MonitorsChanged => self.on_monitors_changed(),
            Event::FullscreenChanged { fullscreen } => self.on_fullscreen_changed(fullscreen),
            Event::PointerMoved(p) => self.on_pointer_moved(p),
            Event::ButtonPress { widget, pointer } => self.on_button_press(widget, pointer),
            Event::ButtonRelease { .. } => {
                self.editors.values_mut().for_each(|e| e.release());
                Ok(())
            }
        }
    }

    fn is_tileable(&self, id: WinId) -> Result<bool> {
        Ok(self.x.window(id)?.map(|w| w.is_normal()).unwrap_or(false))
    }

    fn on_window_created(&mut self, id: WinId) -> Result<()> {
        let w = match self.x.window(id)? {
            Some(w) if w.is_normal() => w,
            _ => return Ok(()),
        };

        let x = &self.x;
        let workspace = self.workspace;
        let manager = self
            .managers
            .get_mut(workspace)
            .and_then(|ms| ms.iter_mut().find(|m| m.monitor() == w.monitor));

        match manager {
            Some(m) => m.place_new_window(id, x),
            None => {
                debug!(%id, monitor = w.monitor, "no manager for monitor");
                Ok(())
            }
        }
    }

    fn on_grab_begin(&mut self, id: WinId) -> Result<()> {
        if !self.is_tileable(id)? {
            return Ok(());
        }

        let x = &self.x;
        for m in self.managers.get_mut(self.workspace).into_iter().flatten() {
            m.show(x)?;
        }

        self.x.start_timer(self.config.poll_interval)
    }

    fn on_grab_end(&mut self, id: WinId) -> Result<()> {
        let x = &self.x;
        let managers = match self.managers.get_mut(self.workspace) {
            Some(ms) => ms,
            None => return Ok(()),
        };

        for m in managers.iter_mut() {
            m.hide(x)?;
        }

        let tileable = x.window(id)?.map(|w| w.is_normal()).unwrap_or(false);
        if !tileable {
            return Ok(());
        }

        let monitor = x.current_monitor()?;
        let dropped = match managers.iter_mut().find(|m| m.monitor() == monitor) {
            Some(m) => m.move_window_to_zone_under_cursor(id, x)?,
            None => false,
        };

        if dropped {
            for m in managers.iter_mut().filter(|m| m.monitor() != monitor) {
                if m.forget_window(id, x)? {
                    m.apply_layout(x)?;
                }
            }
        }

        Ok(())
    }

    fn apply_layouts(&mut self) -> Result<()> {
        let x = &self.x;
        for m in self.managers.get_mut(self.workspace).into_iter().flatten() {
            m.apply_layout(x)?;
        }

        Ok(())
    }

    fn reinit(&mut self) -> Result<()> {
        let x = &self.x;
        for m in self.managers.get_mut(self.workspace).into_iter().flatten() {
            m.reinit(x)?;
            m.apply_layout(x)?;
        }

        Ok(())
    }

    fn on_monitors_changed(&mut self) -> Result<()> {
        let n_monitors = self.x.monitors()?.len();
        if n_monitors == self.managers().len() {
            return self.reinit();
        }

        info!(n_monitors, "monitor configuration changed: rebuilding");
        self.cancel_editing()?;
        self.clear_previews()?;
        self.refresh_layouts()?;
        self.set_to_current_workspace()
    }

    fn on_fullscreen_changed(&mut self, fullscreen: bool) -> Result<()> {
        if fullscreen {
            debug!("fullscreen window shown: removing zones");
            self.destroy_managers()
        } else {
            debug!("fullscreen window closed: restoring zones");
            self.set_to_current_workspace()
        }
    }

    fn on_pointer_moved(&mut self, p: Point) -> Result<()> {
        let x = &self.x;
        for e in self.editors.values_mut() {
            e.pointer_moved(p, x)?;
        }

        Ok(())
    }

    fn on_button_press(&mut self, widget: Widget, pointer: Point) -> Result<()> {
        match widget {
            Widget::Anchor { a, b } => {
                if let Some(e) = self.editors.values_mut().find(|e| e.owns(a)) {
                    e.press(a, b, pointer);
                }

                Ok(())
            }

            Widget::Tab { window, .. } => self.x.activate(window),

            Widget::Zone(_) => Ok(()),
        }
    }

    /// Update the hover highlights of all shown zones.
    ///
    /// Returns [TimerControl::Stop] once no zones are being shown.
    pub fn poll_cursor(&self) -> Result<TimerControl> {
        let mut control = TimerControl::Stop;
        for m in self.managers() {
            if m.poll_cursor(&self.x)? == TimerControl::Continue {
                control = TimerControl::Continue;
            }
        }

        Ok(control)
    }

    /// Select the layout definition at index `layout` for the given monitor of the active
    /// workspace and retile that monitor.
    pub fn set_layout(&mut self, layout: usize, monitor: usize) -> Result<()> {
        self.layouts.select(self.workspace, monitor, layout)?;
        self.pending_save = true;
        let l = self.layout_for(self.workspace, monitor)?;
        info!(layout, monitor, name = %l.name(), "setting layout");

        let x = &self.x;
        let manager = self
            .managers
            .get_mut(self.workspace)
            .and_then(|ms| ms.iter_mut().find(|m| m.monitor() == monitor));

        match manager {
            Some(m) => m.set_layout(l, x),
            None => Err(Error::UnknownMonitor(monitor)),
        }
    }

    /// Open the layout editor for the layout of the given monitor.
    pub fn edit_layout(&mut self, monitor: usize) -> Result<()> {
        if self.editors.contains_key(&monitor) {
            debug!(monitor, "already editing");
            return Ok(());
        }

        if let Some(mut p) = self.previews.remove(&monitor) {
            p.destroy(&self.x)?;
        }

        let layout = self.layout_for(self.workspace, monitor)?;
        let id = self.next_id();
        let mut editor = ZoneEditor::new(id, monitor, layout, self.config.clone());
        editor.init(&self.x)?;
        editor.show(&self.x)?;
        self.editors.insert(monitor, editor);

        Ok(())
    }

    /// Save the edits made on the given monitor into its selected layout definition and
    /// retile every monitor using that definition.
    pub fn save_layout(&mut self, monitor: usize) -> Result<()> {
        let mut editor = self
            .editors
            .remove(&monitor)
            .ok_or(Error::UnknownMonitor(monitor))?;
        let layout = editor.to_layout();
        editor.destroy(&self.x)?;
        let layout = layout?;

        let idx = self.layouts.selected(self.workspace, monitor)?;
        let def = self
            .layouts
            .definitions
            .get_mut(idx)
            .ok_or(Error::UnknownLayout(idx))?;
        *def = layout.clone();
        self.pending_save = true;
        info!(monitor, layout = %layout.name(), "saved layout");

        let workspace = self.workspace;
        let using: Vec<usize> = self
            .managers()
            .iter()
            .map(|m| m.monitor())
            .filter(|&mon| self.layouts.selected(workspace, mon).ok() == Some(idx))
            .collect();

        let x = &self.x;
        for m in self.managers.get_mut(workspace).into_iter().flatten() {
            if using.contains(&m.monitor()) {
                m.set_layout(layout.clone(), x)?;
            }
        }

        Ok(())
    }

    /// Close all layout editors, discarding any edits.
    pub fn cancel_editing(&mut self) -> Result<()> {
        for (_, mut e) in std::mem::take(&mut self.editors) {
            e.destroy(&self.x)?;
        }

        Ok(())
    }

    /// Reset the editor on the given monitor to a single zone covering the work area.
    pub fn reset_layout(&mut self, monitor: usize) -> Result<()> {
        let x = &self.x;
        let editor = self
            .editors
            .get_mut(&monitor)
            .ok_or(Error::UnknownMonitor(monitor))?;
        let name = editor.layout().name().to_string();
        editor.set_layout(Layout::single(name), x)?;

        editor.show(x)
    }

    /// Add a new single zone layout definition, returning its index.
    pub fn create_layout(&mut self, name: impl Into<String>) -> usize {
        self.layouts.definitions.push(Layout::single(name));
        self.pending_save = true;

        self.layouts.definitions.len() - 1
    }

    /// Rename the layout definition selected for the given monitor.
    pub fn rename_layout(&mut self, monitor: usize, name: impl Into<String>) -> Result<()> {
        let idx = self.layouts.selected(self.workspace, monitor)?;
        self.layouts
            .definitions
            .get_mut(idx)
            .ok_or(Error::UnknownLayout(idx))?
            .set_name(name);
        self.pending_save = true;

        Ok(())
    }

    /// Show a preview of the layout definition at index `layout` on the given monitor.
    pub fn preview_layout(&mut self, layout: usize, monitor: usize) -> Result<()> {
        let l = self
            .layouts
            .definitions
            .get(layout)
            .cloned()
            .ok_or(Error::UnknownLayout(layout))?;

        if let Some(mut p) = self.previews.remove(&monitor) {
            p.destroy(&self.x)?;
        }

        let id = self.next_id();
        let mut preview =
            ZoneDisplay::new(id, monitor, DisplayPurpose::Preview, l, self.config.clone());
        preview.init(&self.x)?;
        preview.show(&self.x)?;
        self.previews.insert(monitor, preview);

        Ok(())
    }

    /// Remove all layout previews.
    pub fn clear_previews(&mut self) -> Result<()> {
        for (_, mut p) in std::mem::take(&mut self.previews) {
            p.destroy(&self.x)?;
        }

        Ok(())
    }

    /// The layout document if it has changed since it was last taken.
    pub fn take_pending_save(&mut self) -> Option<LayoutsSettings> {
        if std::mem::take(&mut self.pending_save) {
            Some(self.layouts.clone())
        } else {
            None
        }
    }
}

fn log_err(what: &str, res: Result<()>) {
    if let Err(e) = res {
        error!(%e, what, "error during teardown");
    }
}
