//! Terminal browser for the TMDB movie and TV catalog.
//!
//! The crate splits into a sans-IO core and a TUI shell:
//!
//! - [`catalog`] - typed TMDB API client
//! - [`browse`] - paged, filterable list state machine
//! - [`genres`] - genre code to name resolution
//! - [`app`] - central application state
//! - [`ui`] - ratatui event loop and renderers

pub mod app;
pub mod browse;
pub mod catalog;
pub mod config;
pub mod genres;
pub mod theme;
pub mod ui;
pub mod util;
