//! Render dispatch for the TUI.
//!
//! Routes to the appropriate view renderer based on application state,
//! then stacks any active overlays on top.

use crate::app::{App, View};
use crate::catalog::GenreFilter;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use super::{detail, grid, help, home, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    match app.view {
        View::Home => home::render(f, app, chunks[0]),
        View::Browse(media) => grid::render(f, app, media, chunks[0]),
        View::Detail => detail::render(f, app, chunks[0]),
    }
    status::render(f, app, chunks[1]);

    if app.show_filter {
        render_filter_overlay(f, app);
    }
    if app.show_help {
        help::render(f, app);
    }
}

/// Genre filter picker, centered over the browse grid.
fn render_filter_overlay(f: &mut Frame, app: &App) {
    let View::Browse(media) = app.view else { return };
    let area = f.area();

    let genres = app.resolver.selectable(media);
    let active = app.controller(media).filter();

    let mut items: Vec<ListItem> = Vec::with_capacity(genres.len() + 1);
    let mut push = |idx: usize, label: &str, is_active: bool| {
        let marker = if is_active { "● " } else { "  " };
        let line = format!("{marker}{label}");
        let item = if idx == app.filter_selected {
            ListItem::new(line).style(app.palette.selected)
        } else {
            ListItem::new(line)
        };
        items.push(item);
    };

    push(0, "All Genres", active == GenreFilter::All);
    for (i, (code, name)) in genres.iter().enumerate() {
        push(i + 1, name, active == GenreFilter::Genre(*code));
    }

    let height = (items.len() as u16 + 2).min(area.height.saturating_sub(4));
    let width = 36u16.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 10 || overlay.height < 3 {
        return;
    }

    f.render_widget(Clear, overlay);

    // Keep the cursor visible when the list overflows the overlay
    let visible = overlay.height.saturating_sub(2) as usize;
    let skip = app.filter_selected.saturating_sub(visible.saturating_sub(1));
    let items: Vec<ListItem> = items.into_iter().skip(skip).take(visible).collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.palette.heading)
            .title(" Filter by Genre "),
    );
    f.render_widget(list, overlay);
}
