//! Browse view: infinitely-scrolling card grid for one media type.

use crate::app::App;
use crate::catalog::{CatalogItem, GenreFilter, MediaType};
use crate::util::{format_year, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::input::GRID_COLS;

/// Lines per grid cell: title, meta, genres, spacer.
const CELL_HEIGHT: u16 = 4;

pub fn render(f: &mut Frame, app: &App, media: MediaType, area: Rect) {
    let view = app.controller(media).view();
    let selected = app.grid_selected(media);

    let filter_label = match view.filter {
        GenreFilter::All => String::new(),
        GenreFilter::Genre(code) => {
            format!(" · {}", app.resolver.name_for(media, code))
        }
    };
    let title = format!(" {}{} ", media.plural_label(), filter_label);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.border)
        .title(Span::styled(title, app.palette.heading));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.is_initial_loading {
        f.render_widget(
            Paragraph::new("Loading...").style(app.palette.loading),
            inner,
        );
        return;
    }

    if view.items.is_empty() {
        let (text, style) = match view.error {
            Some(error) => (
                format!("{error}\n\nPress r to retry"),
                app.palette.error,
            ),
            None => ("No results for this filter".to_string(), app.palette.empty),
        };
        f.render_widget(Paragraph::new(text).style(style), inner);
        return;
    }

    let cell_width = inner.width / GRID_COLS as u16;
    if cell_width < 6 || inner.height < CELL_HEIGHT {
        return;
    }

    // Scroll whole rows so the cursor stays visible
    let visible_rows = (inner.height / CELL_HEIGHT).max(1) as usize;
    let cursor_row = selected / GRID_COLS;
    let first_row = cursor_row.saturating_sub(visible_rows.saturating_sub(1));

    for row in 0..visible_rows {
        let item_row = first_row + row;
        for col in 0..GRID_COLS {
            let idx = item_row * GRID_COLS + col;
            let Some(item) = view.items.get(idx) else { break };
            let cell = Rect {
                x: inner.x + col as u16 * cell_width,
                y: inner.y + row as u16 * CELL_HEIGHT,
                width: cell_width,
                height: CELL_HEIGHT.min(inner.height - row as u16 * CELL_HEIGHT),
            };
            render_cell(f, app, item, idx == selected, cell);
        }
    }

    // Footer line inside the border: load-more progress, a retryable
    // error, or the end-of-catalog marker
    let footer = Rect {
        x: inner.x,
        y: inner.y + inner.height - 1,
        width: inner.width,
        height: 1,
    };
    if view.is_loading_more {
        f.render_widget(
            Paragraph::new("Loading more...").style(app.palette.loading),
            footer,
        );
    } else if let Some(error) = view.error {
        f.render_widget(
            Paragraph::new(truncate_to_width(
                &format!("{error} — press r to retry"),
                inner.width as usize,
            ))
            .style(app.palette.error),
            footer,
        );
    } else if !view.has_more {
        f.render_widget(
            Paragraph::new("End of results").style(app.palette.empty),
            footer,
        );
    }
}

fn render_cell(f: &mut Frame, app: &App, item: &CatalogItem, selected: bool, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;

    let title_style = if selected {
        app.palette.selected
    } else {
        app.palette.card_title
    };

    let mut lines = vec![
        Line::from(Span::styled(
            truncate_to_width(item.display_title(), width),
            title_style,
        )),
        Line::from(vec![
            Span::styled(format_year(item.release_date()), app.palette.card_meta),
            Span::styled(format!("  ★ {:.1}", item.vote_average()), app.palette.rating),
        ]),
    ];

    let names = app.resolver.names_for(item.media_type(), item.genre_codes());
    if !names.is_empty() {
        let joined = names.join(", ");
        lines.push(Line::from(Span::styled(
            truncate_to_width(&joined, width).into_owned(),
            app.palette.genre_badge,
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
