//! Help overlay showing all keybindings.

use crate::app::App;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Row, Table},
    Frame,
};

/// Keybindings grouped by context.
const SECTIONS: [(&str, &[(&str, &str)]); 4] = [
    (
        "General",
        &[
            ("1 / 2 / 3", "Home / Movies / Series"),
            ("t", "Toggle theme"),
            ("?", "Toggle this help"),
            ("q, Ctrl+C", "Quit"),
        ],
    ),
    (
        "Home",
        &[
            ("↑↓←→, hjkl", "Move between cards"),
            ("Enter", "Open detail view"),
            ("o", "Open selection in browser"),
            ("r", "Reload rows"),
        ],
    ),
    (
        "Browse",
        &[
            ("↑↓←→, hjkl", "Move around the grid"),
            ("f", "Genre filter"),
            ("Enter", "Open detail view"),
            ("o", "Open selection in browser"),
            ("r", "Retry a failed load"),
            ("Esc", "Back to home"),
        ],
    ),
    (
        "Detail",
        &[
            ("Tab", "Next tab"),
            ("j / k", "Scroll"),
            ("o", "Open on TMDB"),
            ("r", "Retry a failed load"),
            ("Esc, Backspace", "Back"),
        ],
    ),
];

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    let overlay = centered_rect(70, 80, area);
    if overlay.width < 30 || overlay.height < 8 {
        return;
    }

    f.render_widget(Clear, overlay);

    let mut rows: Vec<Row> = Vec::new();
    for (label, bindings) in SECTIONS {
        rows.push(
            Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {} --", label),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(app.palette.heading),
        );
        for (key, description) in bindings {
            rows.push(Row::new(vec![
                format!("  {}", key),
                description.to_string(),
            ]));
        }
        rows.push(Row::new(vec![String::new(), String::new()]));
    }
    rows.pop();

    let visible_height = overlay.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = rows.into_iter().take(visible_height).collect();

    let widths = [Constraint::Length(18), Constraint::Min(20)];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.palette.heading)
                .title(" Help (any key to close) "),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        );

    f.render_widget(table, overlay);
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
