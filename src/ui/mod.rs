//! Terminal user interface.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `tasks` - Spawning background fetches
//! - `render` - View rendering dispatch
//! - `home` - Carousel rows
//! - `grid` - Browse grid and genre-filter overlay
//! - `detail` - Tabbed detail view
//! - `status` - Status bar widget
//! - `help` - Help overlay

mod detail;
mod events;
mod grid;
mod help;
mod home;
mod input;
mod loop_runner;
mod render;
mod status;
pub mod tasks;

pub use loop_runner::{run, Action};
