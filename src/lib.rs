//! # Snapzone: a zone based window tiling engine
//!
//! Snapzone partitions the work area of each monitor into rectangular "zones" described by a
//! declarative [Layout][pure::layout::Layout] and keeps the geometry of open windows in sync
//! with the zone they have been assigned to.
//!
//! ## Overview
//! The crate is split into three layers:
//!
//! - [pure]: side effect free data structures (geometry, layouts, zones and resize anchors).
//! - [host]: the capability traits that a desktop shell needs to implement in order to drive
//!   the engine ([WindowSystem][host::WindowSystem] and [Renderer][host::Renderer]) along with
//!   the [Event][host::Event] model the engine reacts to.
//! - [core]: the stateful engine itself: [ZoneDisplay][core::ZoneDisplay],
//!   [ZoneManager][core::ZoneManager], [ZoneEditor][core::ZoneEditor] and the top level
//!   [App][core::App] context that dispatches shell events.
//!
//! Nothing in this crate draws pixels, binds keys or persists settings: all of that is the
//! responsibility of the shell integration that implements the [host] traits.
#![warn(
    clippy::complexity,
    clippy::correctness,
    clippy::style,
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rustdoc::all
)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Deref;

#[macro_use]
mod macros;

pub mod core;
pub mod host;
pub mod pure;

#[doc(inline)]
pub use crate::core::{App, Config};
#[doc(inline)]
pub use pure::{
    geometry::{Point, Rect},
    layout::{Layout, LayoutItem, LayoutsSettings},
};

/// Error variants from the snapzone library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A [Layout] definition was rejected during validation
    #[error("invalid layout '{name}': {reason}")]
    InvalidLayout {
        /// The name of the layout that was rejected
        name: String,
        /// Why the layout was rejected
        reason: String,
    },

    /// A [Config] failed validation when being built
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A layout document was provided without any layout definitions
    #[error("a layout document must contain at least one layout definition")]
    NoLayoutDefinitions,

    /// A layout definition index was requested that does not exist
    #[error("{0} is not a known layout index")]
    UnknownLayout(usize),

    /// A monitor index was requested that does not exist
    #[error("{0} is not a known monitor")]
    UnknownMonitor(usize),

    /// A workspace index was requested that does not exist
    #[error("{0} is not a known workspace")]
    UnknownWorkspace(usize),

    /// An attempt was made to reference a window that is not known to the host
    #[error("{0} is not a known window")]
    UnknownWindow(WinId),

    /// A generic error type for use by host implementations when needing to
    /// construct a simple [Error].
    #[error("Unhandled error: {0}")]
    Raw(String),

    /// A layout document could not be parsed
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A Result where the error type is a snapzone [Error]
pub type Result<T> = std::result::Result<T, Error>;

/// A stable identifier for a window provided by the host window system
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct WinId(pub u64);

impl std::fmt::Display for WinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for WinId {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u64> for WinId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
