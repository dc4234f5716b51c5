//! Mock implementations of the host traits that are easier to implement for use in tests.
//! This module and its contents are only available when testing.
use crate::{
    host::{
        EventKind, Monitor, Renderer, SubscriptionId, Widget, WidgetStyle, Window, WindowSystem,
        WindowType,
    },
    pure::geometry::{Point, Rect},
    Error, Result, WinId,
};
use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

/// All methods on this trait are unimplemented by default unless an implementation is
/// provided.
///
/// Any implementation of `MockWindowSystem` will automatically implement `WindowSystem` by
/// forwarding on calls to `$method` to `mock_$method`.
#[allow(unused_variables)]
pub trait MockWindowSystem {
    fn mock_current_windows(&self) -> Result<Vec<Window>> {
        unimplemented!("mock_current_windows")
    }

    fn mock_move_resize(&self, id: WinId, r: Rect) -> Result<()> {
        unimplemented!("mock_move_resize")
    }

    fn mock_activate(&self, id: WinId) -> Result<()> {
        unimplemented!("mock_activate")
    }

    fn mock_minimize(&self, id: WinId) -> Result<()> {
        unimplemented!("mock_minimize")
    }

    fn mock_unminimize(&self, id: WinId) -> Result<()> {
        unimplemented!("mock_unminimize")
    }

    fn mock_cursor_position(&self) -> Result<Point> {
        unimplemented!("mock_cursor_position")
    }

    fn mock_monitors(&self) -> Result<Vec<Monitor>> {
        unimplemented!("mock_monitors")
    }

    fn mock_current_monitor(&self) -> Result<usize> {
        Ok(0)
    }

    fn mock_work_area(&self, monitor: usize) -> Result<Option<Rect>> {
        unimplemented!("mock_work_area")
    }

    fn mock_n_workspaces(&self) -> Result<usize> {
        Ok(1)
    }

    fn mock_active_workspace(&self) -> Result<usize> {
        Ok(0)
    }

    fn mock_subscribe(&self, kind: EventKind) -> Result<SubscriptionId> {
        unimplemented!("mock_subscribe")
    }

    fn mock_unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        unimplemented!("mock_unsubscribe")
    }

    fn mock_start_timer(&self, interval: Duration) -> Result<()> {
        Ok(())
    }
}

impl<T> WindowSystem for T
where
    T: MockWindowSystem,
{
    fn current_windows(&self) -> Result<Vec<Window>> {
        self.mock_current_windows()
    }

    fn move_resize(&self, id: WinId, r: Rect) -> Result<()> {
        self.mock_move_resize(id, r)
    }

    fn activate(&self, id: WinId) -> Result<()> {
        self.mock_activate(id)
    }

    fn minimize(&self, id: WinId) -> Result<()> {
        self.mock_minimize(id)
    }

    fn unminimize(&self, id: WinId) -> Result<()> {
        self.mock_unminimize(id)
    }

    fn cursor_position(&self) -> Result<Point> {
        self.mock_cursor_position()
    }

    fn monitors(&self) -> Result<Vec<Monitor>> {
        self.mock_monitors()
    }

    fn current_monitor(&self) -> Result<usize> {
        self.mock_current_monitor()
    }

    fn work_area(&self, monitor: usize) -> Result<Option<Rect>> {
        self.mock_work_area(monitor)
    }

    fn n_workspaces(&self) -> Result<usize> {
        self.mock_n_workspaces()
    }

    fn active_workspace(&self) -> Result<usize> {
        self.mock_active_workspace()
    }

    fn subscribe(&self, kind: EventKind) -> Result<SubscriptionId> {
        self.mock_subscribe(kind)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        self.mock_unsubscribe(id)
    }

    fn start_timer(&self, interval: Duration) -> Result<()> {
        self.mock_start_timer(interval)
    }
}

/// All methods on this trait are no-ops by default.
///
/// Any implementation of `MockRenderer` will automatically implement `Renderer`.
#[allow(unused_variables)]
pub trait MockRenderer {
    fn mock_create_widget(
        &self,
        widget: Widget,
        style: WidgetStyle,
        r: Rect,
        label: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }

    fn mock_move_widget(&self, widget: Widget, r: Rect) -> Result<()> {
        Ok(())
    }

    fn mock_set_visible(&self, widget: Widget, visible: bool) -> Result<()> {
        Ok(())
    }

    fn mock_set_hover(&self, widget: Widget, hovering: bool) -> Result<()> {
        Ok(())
    }

    fn mock_destroy_widget(&self, widget: Widget) -> Result<()> {
        Ok(())
    }
}

impl<T> Renderer for T
where
    T: MockRenderer,
{
    fn create_widget(
        &self,
        widget: Widget,
        style: WidgetStyle,
        r: Rect,
        label: Option<&str>,
    ) -> Result<()> {
        self.mock_create_widget(widget, style, r, label)
    }

    fn move_widget(&self, widget: Widget, r: Rect) -> Result<()> {
        self.mock_move_widget(widget, r)
    }

    fn set_visible(&self, widget: Widget, visible: bool) -> Result<()> {
        self.mock_set_visible(widget, visible)
    }

    fn set_hover(&self, widget: Widget, hovering: bool) -> Result<()> {
        self.mock_set_hover(widget, hovering)
    }

    fn destroy_widget(&self, widget: Widget) -> Result<()> {
        self.mock_destroy_widget(widget)
    }
}

/// The tracked state of a widget in a [TestDesktop]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    pub style: WidgetStyle,
    pub rect: Rect,
    pub visible: bool,
    pub hover: bool,
    pub label: Option<String>,
}

/// An in memory desktop with a single workspace and a single 1000x1000 monitor.
#[derive(Debug)]
pub struct TestDesktop {
    pub windows: RefCell<Vec<Window>>,
    pub cursor: Cell<Point>,
    pub monitors: RefCell<Vec<Monitor>>,
    pub work_areas: RefCell<Vec<Option<Rect>>>,
    pub moves: RefCell<Vec<(WinId, Rect)>>,
    pub activated: RefCell<Vec<WinId>>,
    pub widgets: RefCell<BTreeMap<Widget, WidgetState>>,
    pub subscriptions: RefCell<BTreeSet<SubscriptionId>>,
    next_subscription: Cell<u64>,
}

impl Default for TestDesktop {
    fn default() -> Self {
        let r = Rect::new(0, 0, 1000, 1000);

        Self {
            windows: RefCell::new(Vec::new()),
            cursor: Cell::new(Point::default()),
            monitors: RefCell::new(vec![Monitor { index: 0, rect: r }]),
            work_areas: RefCell::new(vec![Some(r)]),
            moves: RefCell::new(Vec::new()),
            activated: RefCell::new(Vec::new()),
            widgets: RefCell::new(BTreeMap::new()),
            subscriptions: RefCell::new(BTreeSet::new()),
            next_subscription: Cell::new(0),
        }
    }
}

impl TestDesktop {
    pub fn with_windows(windows: &[(u64, Rect)]) -> Self {
        let d = Self::default();
        for &(id, frame) in windows {
            d.open(id, frame);
        }

        d
    }

    pub fn open(&self, id: u64, frame: Rect) {
        self.windows.borrow_mut().push(Window {
            id: WinId(id),
            title: format!("window {id}"),
            class: "test".to_string(),
            frame,
            monitor: 0,
            window_type: WindowType::Normal,
        });
    }

    pub fn close(&self, id: u64) {
        self.windows.borrow_mut().retain(|w| w.id != WinId(id));
    }

    pub fn frame(&self, id: u64) -> Option<Rect> {
        self.windows
            .borrow()
            .iter()
            .find(|w| w.id == WinId(id))
            .map(|w| w.frame)
    }

    pub fn widget(&self, w: Widget) -> Option<WidgetState> {
        self.widgets.borrow().get(&w).cloned()
    }

    pub fn n_widgets(&self) -> usize {
        self.widgets.borrow().len()
    }
}

impl MockWindowSystem for TestDesktop {
    fn mock_current_windows(&self) -> Result<Vec<Window>> {
        Ok(self.windows.borrow().clone())
    }

    fn mock_move_resize(&self, id: WinId, r: Rect) -> Result<()> {
        let mut windows = self.windows.borrow_mut();
        let w = windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(Error::UnknownWindow(id))?;
        w.frame = r;
        self.moves.borrow_mut().push((id, r));

        Ok(())
    }

    fn mock_activate(&self, id: WinId) -> Result<()> {
        self.activated.borrow_mut().push(id);
        Ok(())
    }

    fn mock_cursor_position(&self) -> Result<Point> {
        Ok(self.cursor.get())
    }

    fn mock_monitors(&self) -> Result<Vec<Monitor>> {
        Ok(self.monitors.borrow().clone())
    }

    fn mock_work_area(&self, monitor: usize) -> Result<Option<Rect>> {
        Ok(self.work_areas.borrow().get(monitor).copied().flatten())
    }

    fn mock_subscribe(&self, _: EventKind) -> Result<SubscriptionId> {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscriptions.borrow_mut().insert(id);

        Ok(id)
    }

    fn mock_unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        if self.subscriptions.borrow_mut().remove(&id) {
            Ok(())
        } else {
            Err(Error::Raw(format!("unknown subscription {}", id.0)))
        }
    }
}

impl MockRenderer for TestDesktop {
    fn mock_create_widget(
        &self,
        widget: Widget,
        style: WidgetStyle,
        rect: Rect,
        label: Option<&str>,
    ) -> Result<()> {
        let state = WidgetState {
            style,
            rect,
            visible: false,
            hover: false,
            label: label.map(String::from),
        };
        self.widgets.borrow_mut().insert(widget, state);

        Ok(())
    }

    fn mock_move_widget(&self, widget: Widget, r: Rect) -> Result<()> {
        if let Some(s) = self.widgets.borrow_mut().get_mut(&widget) {
            s.rect = r;
        }

        Ok(())
    }

    fn mock_set_visible(&self, widget: Widget, visible: bool) -> Result<()> {
        if let Some(s) = self.widgets.borrow_mut().get_mut(&widget) {
            s.visible = visible;
        }

        Ok(())
    }

    fn mock_set_hover(&self, widget: Widget, hovering: bool) -> Result<()> {
        if let Some(s) = self.widgets.borrow_mut().get_mut(&widget) {
            s.hover = hovering;
        }

        Ok(())
    }

    fn mock_destroy_widget(&self, widget: Widget) -> Result<()> {
        self.widgets.borrow_mut().remove(&widget);

        Ok(())
    }
}
