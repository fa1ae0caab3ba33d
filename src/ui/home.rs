//! Home view: three horizontal carousel rows.

use crate::app::App;
use crate::catalog::CatalogItem;
use crate::util::{format_year, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of one carousel card, including padding.
const CARD_WIDTH: u16 = 24;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if app.home.loading && app.home.rows.is_none() {
        let msg = Paragraph::new("Loading...")
            .style(app.palette.loading)
            .block(titled_block(app, " Home "));
        f.render_widget(msg, area);
        return;
    }

    if let Some(error) = &app.home.error {
        if app.home.rows.is_none() {
            let msg = Paragraph::new(format!("{error}\n\nPress r to retry"))
                .style(app.palette.error)
                .block(titled_block(app, " Home "));
            f.render_widget(msg, area);
            return;
        }
    }

    let Some(rows) = &app.home.rows else {
        let msg = Paragraph::new("Press r to load")
            .style(app.palette.empty)
            .block(titled_block(app, " Home "));
        f.render_widget(msg, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let sections: [(&str, &[CatalogItem]); 3] = [
        ("Trending This Week", &rows.trending),
        ("Now Playing", &rows.now_playing),
        ("Popular Series", &rows.popular_series),
    ];

    for (row_idx, ((title, items), chunk)) in sections.into_iter().zip(chunks.iter()).enumerate() {
        let selected_col = (row_idx == app.home.selected_row).then_some(app.home.selected_col);
        render_row(f, app, title, items, selected_col, *chunk);
    }
}

fn render_row(
    f: &mut Frame,
    app: &App,
    title: &str,
    items: &[CatalogItem],
    selected_col: Option<usize>,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if selected_col.is_some() {
            app.palette.heading
        } else {
            app.palette.border
        })
        .title(Span::styled(format!(" {title} "), app.palette.heading));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if items.is_empty() {
        f.render_widget(
            Paragraph::new("Nothing here right now").style(app.palette.empty),
            inner,
        );
        return;
    }

    // Scroll the row so the selected card stays visible
    let visible_cards = (inner.width / CARD_WIDTH).max(1) as usize;
    let first = selected_col
        .unwrap_or(0)
        .saturating_sub(visible_cards.saturating_sub(1));

    for (slot, (idx, item)) in items
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_cards)
        .enumerate()
    {
        let card_area = Rect {
            x: inner.x + slot as u16 * CARD_WIDTH,
            y: inner.y,
            width: CARD_WIDTH.min(inner.width.saturating_sub(slot as u16 * CARD_WIDTH)),
            height: inner.height,
        };
        if card_area.width < 4 {
            break;
        }
        render_card(f, app, item, selected_col == Some(idx), card_area);
    }
}

fn render_card(f: &mut Frame, app: &App, item: &CatalogItem, selected: bool, area: Rect) {
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

    if area.height > 4 {
        lines.push(Line::from(""));
        for chunk in wrap_overview(item.overview(), width, area.height.saturating_sub(5) as usize) {
            lines.push(Line::from(Span::styled(chunk, app.palette.card_meta)));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Naive word wrap for the card's overview snippet.
fn wrap_overview(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                return lines;
            }
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    lines
}

fn titled_block(app: &App, title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.border)
        .title(title)
}
