//! Theme system for the TUI.
//!
//! Semantic color roles mapped to ratatui `Style` values. The theme is
//! owned by `App` and passed explicitly into every render call; there
//! is no ambient global theme state.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `Palette` for this variant.
    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette::dark(),
            Self::Light => Palette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Palette: semantic roles to Style
// ============================================================================

/// A complete palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct Palette {
    // -- Chrome --
    pub border: Style,
    pub heading: Style,
    pub status_bar: Style,
    pub hint: Style,

    // -- Cards & lists --
    pub card_title: Style,
    pub card_meta: Style,
    pub genre_badge: Style,
    pub selected: Style,

    // -- Detail view --
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub tagline: Style,
    pub rating: Style,

    // -- States --
    pub loading: Style,
    pub empty: Style,
    pub error: Style,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(Color::Black).bg(Color::DarkGray),
            hint: Style::default().fg(Color::DarkGray),

            card_title: Style::default().fg(Color::White),
            card_meta: Style::default().fg(Color::Gray),
            genre_badge: Style::default().fg(Color::Magenta),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),
            tagline: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            rating: Style::default().fg(Color::Yellow),

            loading: Style::default().fg(Color::Yellow),
            empty: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
        }
    }

    pub fn light() -> Self {
        Self {
            border: Style::default().fg(Color::Gray),
            heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(Color::White).bg(Color::Gray),
            hint: Style::default().fg(Color::Gray),

            card_title: Style::default().fg(Color::Black),
            card_meta: Style::default().fg(Color::DarkGray),
            genre_badge: Style::default().fg(Color::Magenta),
            selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::DarkGray),
            tagline: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            rating: Style::default().fg(Color::Rgb(180, 120, 0)),

            loading: Style::default().fg(Color::Rgb(180, 120, 0)),
            empty: Style::default().fg(Color::Gray),
            error: Style::default().fg(Color::Red),
        }
    }
}
