//! Terminal User Interface module.
//!
//! This module provides the TUI for the news front page, including:
//! - Main event loop (`run`)
//! - Keyboard and mouse input handling
//! - Rendering of masthead, columns, sidebar and overlays
//! - Deferred jump event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard and mouse input handling
//! - `events` - Deferred event processing
//! - `render` - Frame layout and overlay dispatch
//! - `helpers` - Shared utility functions
//! - `masthead` - Masthead, search box and suggestion popover
//! - `pages` - Dot strip
//! - `columns` - Article cards and column viewports
//! - `sidebar` - Trending list and media panel
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod columns;
mod events;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod masthead;
mod pages;
mod render;
mod sidebar;
mod status;

// Re-export the public API
pub use loop_runner::{run, Action};
