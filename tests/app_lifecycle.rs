//! Enabling and disabling the engine against a shell
use snapzone::{
    host::{Event, EventKind, TimerControl, Widget},
    pure::geometry::{Point, Rect},
    App, Config, Error, LayoutsSettings, WinId,
};
use strum::IntoEnumIterator;

mod common;

use common::FakeDesktop;

fn enable(x: FakeDesktop) -> App<FakeDesktop> {
    App::enable(Config::default(), LayoutsSettings::default(), x).unwrap()
}

#[test]
fn every_event_kind_is_subscribed_once() {
    let app = enable(FakeDesktop::new(1));
    let subs = app.shell().subscriptions.borrow();

    assert_eq!(subs.len(), EventKind::iter().count());
    for kind in EventKind::iter() {
        assert_eq!(subs.values().filter(|&&k| k == kind).count(), 1, "{kind}");
    }
}

#[test]
fn disable_releases_exactly_what_was_acquired() {
    let mut app = enable(FakeDesktop::new(2));
    let acquired: Vec<_> = app.shell().subscriptions.borrow().keys().copied().collect();

    app.disable();
    let mut released = app.shell().released.borrow().clone();
    released.sort();

    assert_eq!(released, acquired);
    assert!(app.subscriptions().is_empty());
}

#[test]
fn disabling_twice_releases_nothing_more() {
    let mut app = enable(FakeDesktop::new(1));

    app.disable();
    let n_released = app.shell().released.borrow().len();
    app.disable();

    assert_eq!(app.shell().released.borrow().len(), n_released);
    assert_eq!(app.shell().held.get(), 0);
}

#[test]
fn disable_removes_every_widget() {
    let x = FakeDesktop::new(2);
    x.open(1, 0, Rect::new(10, 10, 100, 100));
    x.open(2, 0, Rect::new(20, 20, 100, 100));
    let config = Config::default().builder().show_tabs(true).build().unwrap();
    let mut app = App::enable(config, LayoutsSettings::default(), x).unwrap();

    app.edit_layout(0).unwrap();
    app.preview_layout(0, 1).unwrap();
    assert!(!app.shell().widgets.borrow().is_empty());

    app.disable();

    assert!(app.shell().widgets.borrow().is_empty());
    assert!(app.editor(0).is_none());
    assert!(app.preview(1).is_none());
}

#[test]
fn a_document_without_definitions_is_rejected() {
    let x = FakeDesktop::new(1);
    let held = x.held.clone();
    let layouts = LayoutsSettings {
        workspaces: vec![],
        definitions: vec![],
    };

    let res = App::enable(Config::default(), layouts, x);

    assert!(matches!(res, Err(Error::NoLayoutDefinitions)));
    assert_eq!(held.get(), 0);
}

#[test]
fn a_failed_enable_releases_its_subscriptions() {
    let x = FakeDesktop::new(1);
    // the shell reports an active workspace that it does not have
    x.workspace.set(5);
    let held = x.held.clone();

    let res = App::enable(Config::default(), LayoutsSettings::default(), x);

    assert!(matches!(res, Err(Error::UnknownWorkspace(5))));
    assert_eq!(held.get(), 0);
}

#[test]
fn grabbing_shows_zones_and_starts_polling() {
    let x = FakeDesktop::new(1);
    x.open(1, 0, Rect::new(10, 10, 100, 100));
    let mut app = enable(x);
    assert_eq!(app.shell().visible_zones(), 0);

    app.handle_event(Event::GrabBegin(WinId(1))).unwrap();

    assert_eq!(app.shell().visible_zones(), 2);
    assert_eq!(app.shell().timers.get(), 1);

    app.shell().cursor.set(Point::new(800, 300));
    assert_eq!(app.poll_cursor().unwrap(), TimerControl::Continue);
    let right = app.manager(0).unwrap().zones()[1].id();
    assert!(app.shell().widgets.borrow()[&Widget::Zone(right)].hover);

    app.handle_event(Event::GrabEnd(WinId(1))).unwrap();

    assert_eq!(app.shell().visible_zones(), 0);
    assert_eq!(app.poll_cursor().unwrap(), TimerControl::Stop);
}

#[test]
fn grabbing_a_dialog_does_not_show_zones() {
    let x = FakeDesktop::new(1);
    x.open_dialog(1, Rect::new(10, 10, 100, 100));
    let mut app = enable(x);

    app.handle_event(Event::GrabBegin(WinId(1))).unwrap();

    assert_eq!(app.shell().visible_zones(), 0);
    assert_eq!(app.shell().timers.get(), 0);
}

#[test]
fn the_default_document_needs_no_save() {
    let mut app = enable(FakeDesktop::new(2));

    assert!(app.take_pending_save().is_none());
}

#[test]
fn extra_workspaces_are_added_to_the_document() {
    let x = FakeDesktop::new(1);
    x.n_workspaces.set(3);
    let mut app = enable(x);

    let saved = app.take_pending_save().expect("document should be updated");

    assert_eq!(saved.workspaces.len(), 3);
    assert!(saved.workspaces.iter().all(|ms| !ms.is_empty()));
    assert!(app.take_pending_save().is_none());
}

#[test]
fn layouts_differ_per_workspace() {
    let x = FakeDesktop::new(1);
    x.open(1, 1, Rect::new(10, 10, 100, 100));
    let mut app = enable(x);
    let full = app.create_layout("full");
    app.set_layout(full, 0).unwrap();

    app.shell().workspace.set(1);
    app.handle_event(Event::WorkspaceSwitched).unwrap();

    assert_eq!(app.manager(0).unwrap().zones().len(), 2);
    assert_eq!(app.shell().frame(1), Rect::new(0, 0, 500, 600));
}

#[test]
fn fullscreen_windows_hide_zones_until_closed() {
    let x = FakeDesktop::new(1);
    x.open(1, 0, Rect::new(10, 10, 100, 100));
    let mut app = enable(x);

    app.handle_event(Event::FullscreenChanged { fullscreen: true })
        .unwrap();
    assert!(app.shell().widgets.borrow().is_empty());

    app.handle_event(Event::FullscreenChanged { fullscreen: false })
        .unwrap();
    assert_eq!(app.manager(0).unwrap().zones().len(), 2);
    assert!(app.manager(0).unwrap().zone_of(WinId(1)).is_some());
}
