//! Shared utility functions.

mod format;
mod text;

pub use format::{format_currency, format_date, format_runtime, format_year};
pub use text::{display_width, truncate_to_width};
