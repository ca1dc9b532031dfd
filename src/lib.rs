//! A terminal front page: paginated auto-scrolling news columns with
//! search-and-jump, a trending list and a media panel.
//!
//! The binary wires [`config::Config`], [`catalog::Catalog`] and
//! [`app::App`] together and hands them to [`ui::run`]. Everything below the
//! UI layer is plain state and can be driven directly, which is how the
//! integration tests exercise it.

pub mod app;
pub mod catalog;
pub mod config;
pub mod keybindings;
pub mod pager;
pub mod theme;
pub mod ticker;
pub mod ui;
pub mod util;
