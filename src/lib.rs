//! Theme manager for web pages.
//!
//! Keeps exactly one theme class from an ordered set on the document root and
//! switches it on button clicks: delegated per-theme buttons (`data-theme`),
//! next/previous cycling, and random selection. The chosen theme is persisted
//! and restored on the next visit; without a saved choice the OS/browser
//! `prefers-color-scheme` preference, then the configured default, decide.
//!
//! The core is browser-independent and tested natively. The `web` feature adds
//! web-sys host implementations and a `#[wasm_bindgen]` `ThemeManager` handle.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::ThemeController`]: initial resolution, selection, DOM sync |
//! | [`config`] | Defaults, JSON overrides, validation |
//! | [`theme`] | Theme set and active-index model |
//! | [`action`] | Closed set of button actions |
//! | [`host`] | Document and preference-store contracts |
//! | [`memory`] | In-memory host implementations |
//! | [`error`] | Configuration and storage errors |
//! | `web` | Browser glue (feature `web`) |

pub mod action;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod memory;
pub mod theme;
#[cfg(feature = "web")]
pub mod web;

pub use action::Action;
pub use config::ThemeConfig;
pub use controller::{Resolution, ThemeController};
pub use error::{ConfigError, StorageError, Violation};
pub use theme::{ActiveTheme, ThemeSet};
