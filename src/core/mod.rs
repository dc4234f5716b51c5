//! The stateful zone engine: displays, managers, the layout editor and the top level [App].
pub mod app;
pub mod config;
pub mod display;
pub mod editor;
pub mod manager;
pub mod subscriptions;

#[doc(inline)]
pub use app::App;
#[doc(inline)]
pub use config::{Config, ConfigBuilder, DragMode};
#[doc(inline)]
pub use display::{DisplayPurpose, ZoneDisplay};
#[doc(inline)]
pub use editor::ZoneEditor;
#[doc(inline)]
pub use manager::ZoneManager;
#[doc(inline)]
pub use subscriptions::Subscriptions;
