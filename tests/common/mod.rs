//! An in memory desktop for driving the engine from integration tests.
#![allow(dead_code)]
use snapzone::{
    host::{
        EventKind, Monitor, Renderer, SubscriptionId, Widget, WidgetStyle, Window, WindowSystem,
        WindowType,
    },
    pure::geometry::{Point, Rect},
    Error, Result, WinId,
};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::Rc,
    sync::Once,
    time::Duration,
};

pub const SCREEN_WIDTH: i32 = 1000;
pub const SCREEN_HEIGHT: i32 = 600;

static TRACING: Once = Once::new();

/// Log engine output for failing tests with RUST_LOG set
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn screen(n: i32) -> Rect {
    Rect::new(n * SCREEN_WIDTH, 0, SCREEN_WIDTH, SCREEN_HEIGHT)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeWidget {
    pub style: WidgetStyle,
    pub rect: Rect,
    pub visible: bool,
    pub hover: bool,
}

#[derive(Debug)]
pub struct FakeDesktop {
    pub windows: RefCell<Vec<(usize, Window)>>,
    pub cursor: Cell<Point>,
    pub monitors: RefCell<Vec<Monitor>>,
    pub work_areas: RefCell<Vec<Option<Rect>>>,
    pub workspace: Cell<usize>,
    pub n_workspaces: Cell<usize>,
    pub subscriptions: RefCell<BTreeMap<SubscriptionId, EventKind>>,
    pub released: RefCell<Vec<SubscriptionId>>,
    pub widgets: RefCell<BTreeMap<Widget, FakeWidget>>,
    pub moves: RefCell<Vec<(WinId, Rect)>>,
    pub timers: Cell<usize>,
    /// The number of outstanding subscriptions, shared so it outlives the desktop
    pub held: Rc<Cell<usize>>,
    next_subscription: Cell<u64>,
}

impl FakeDesktop {
    /// A desktop with `n_monitors` side by side screens and two workspaces.
    pub fn new(n_monitors: i32) -> Self {
        init_tracing();
        let monitors: Vec<Monitor> = (0..n_monitors)
            .map(|n| Monitor {
                index: n as usize,
                rect: screen(n),
            })
            .collect();
        let work_areas = monitors.iter().map(|m| Some(m.rect)).collect();

        Self {
            windows: RefCell::new(Vec::new()),
            cursor: Cell::new(Point::default()),
            monitors: RefCell::new(monitors),
            work_areas: RefCell::new(work_areas),
            workspace: Cell::new(0),
            n_workspaces: Cell::new(2),
            subscriptions: RefCell::new(BTreeMap::new()),
            released: RefCell::new(Vec::new()),
            widgets: RefCell::new(BTreeMap::new()),
            moves: RefCell::new(Vec::new()),
            timers: Cell::new(0),
            held: Rc::new(Cell::new(0)),
            next_subscription: Cell::new(1),
        }
    }

    pub fn open(&self, id: u64, workspace: usize, frame: Rect) {
        let monitor = self.monitor_at(frame.midpoint());
        self.windows.borrow_mut().push((
            workspace,
            Window {
                id: WinId(id),
                title: format!("window {id}"),
                class: "fake".to_string(),
                frame,
                monitor,
                window_type: WindowType::Normal,
            },
        ));
    }

    pub fn open_dialog(&self, id: u64, frame: Rect) {
        self.open(id, self.workspace.get(), frame);
        if let Some((_, w)) = self.windows.borrow_mut().last_mut() {
            w.window_type = WindowType::Dialog;
        }
    }

    pub fn frame(&self, id: u64) -> Rect {
        self.windows
            .borrow()
            .iter()
            .find(|(_, w)| w.id == WinId(id))
            .map(|(_, w)| w.frame)
            .expect("unknown window")
    }

    /// Simulate the user dragging a window so that the pointer ends up at `p`
    pub fn drag_to(&self, id: u64, p: Point) {
        let monitor = self.monitor_at(p);
        let mut windows = self.windows.borrow_mut();
        if let Some((_, w)) = windows.iter_mut().find(|(_, w)| w.id == WinId(id)) {
            w.frame = Rect::new(p.x - w.frame.w / 2, p.y - w.frame.h / 2, w.frame.w, w.frame.h);
            w.monitor = monitor;
        }
        drop(windows);

        self.cursor.set(p);
    }

    pub fn visible_zones(&self) -> usize {
        self.widgets
            .borrow()
            .iter()
            .filter(|(w, s)| matches!(w, Widget::Zone(_)) && s.visible)
            .count()
    }

    fn monitor_at(&self, p: Point) -> usize {
        self.monitors
            .borrow()
            .iter()
            .find(|m| m.rect.contains_point(p))
            .map(|m| m.index)
            .unwrap_or(0)
    }
}

impl WindowSystem for FakeDesktop {
    fn current_windows(&self) -> Result<Vec<Window>> {
        let ws = self.workspace.get();

        Ok(self
            .windows
            .borrow()
            .iter()
            .filter(|(w, _)| *w == ws)
            .map(|(_, w)| w.clone())
            .collect())
    }

    fn move_resize(&self, id: WinId, r: Rect) -> Result<()> {
        let mut windows = self.windows.borrow_mut();
        let (_, w) = windows
            .iter_mut()
            .find(|(_, w)| w.id == id)
            .ok_or(Error::UnknownWindow(id))?;
        w.frame = r;
        self.moves.borrow_mut().push((id, r));

        Ok(())
    }

    fn activate(&self, _: WinId) -> Result<()> {
        Ok(())
    }

    fn minimize(&self, _: WinId) -> Result<()> {
        Ok(())
    }

    fn unminimize(&self, _: WinId) -> Result<()> {
        Ok(())
    }

    fn cursor_position(&self) -> Result<Point> {
        Ok(self.cursor.get())
    }

    fn monitors(&self) -> Result<Vec<Monitor>> {
        Ok(self.monitors.borrow().clone())
    }

    fn current_monitor(&self) -> Result<usize> {
        Ok(self.monitor_at(self.cursor.get()))
    }

    fn work_area(&self, monitor: usize) -> Result<Option<Rect>> {
        Ok(self.work_areas.borrow().get(monitor).copied().flatten())
    }

    fn n_workspaces(&self) -> Result<usize> {
        Ok(self.n_workspaces.get())
    }

    fn active_workspace(&self) -> Result<usize> {
        Ok(self.workspace.get())
    }

    fn subscribe(&self, kind: EventKind) -> Result<SubscriptionId> {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscriptions.borrow_mut().insert(id, kind);
        self.held.set(self.held.get() + 1);

        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        self.subscriptions
            .borrow_mut()
            .remove(&id)
            .ok_or_else(|| Error::Raw(format!("double release of subscription {}", id.0)))?;
        self.released.borrow_mut().push(id);
        self.held.set(self.held.get() - 1);

        Ok(())
    }

    fn start_timer(&self, _: Duration) -> Result<()> {
        self.timers.set(self.timers.get() + 1);
        Ok(())
    }
}

impl Renderer for FakeDesktop {
    fn create_widget(
        &self,
        widget: Widget,
        style: WidgetStyle,
        rect: Rect,
        _: Option<&str>,
    ) -> Result<()> {
        let w = FakeWidget {
            style,
            rect,
            visible: false,
            hover: false,
        };
        self.widgets.borrow_mut().insert(widget, w);

        Ok(())
    }

    fn move_widget(&self, widget: Widget, r: Rect) -> Result<()> {
        if let Some(w) = self.widgets.borrow_mut().get_mut(&widget) {
            w.rect = r;
        }

        Ok(())
    }

    fn set_visible(&self, widget: Widget, visible: bool) -> Result<()> {
        if let Some(w) = self.widgets.borrow_mut().get_mut(&widget) {
            w.visible = visible;
        }

        Ok(())
    }

    fn set_hover(&self, widget: Widget, hovering: bool) -> Result<()> {
        if let Some(w) = self.widgets.borrow_mut().get_mut(&widget) {
            w.hover = hovering;
        }

        Ok(())
    }

    fn destroy_widget(&self, widget: Widget) -> Result<()> {
        self.widgets.borrow_mut().remove(&widget);

        Ok(())
    }
}
