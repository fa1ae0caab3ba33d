use crate::app::{App, View};
use ratatui::{layout::Rect, text::Line, text::Span, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Spinner glyphs cycled by the tick handler while anything is loading.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the status bar.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Cow avoids allocations for the static keybinding hints
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match app.view {
            View::Home => {
                Cow::Borrowed("[1]home [2]movies [3]series [↑↓←→]move [Enter]detail [t]heme [?]help [q]uit")
            }
            View::Browse(_) => {
                Cow::Borrowed("[f]ilter [↑↓←→]move [Enter]detail [o]pen [r]etry [Esc]home [?]help [q]uit")
            }
            View::Detail => {
                Cow::Borrowed("[Tab]next tab [j/k]scroll [o]pen in browser [Esc]back [?]help [q]uit")
            }
        }
    };

    let mut spans = Vec::with_capacity(2);
    if app.anything_loading() {
        spans.push(Span::raw(format!("{} ", SPINNER[app.spinner_frame % SPINNER.len()])));
    }
    spans.push(Span::raw(text));

    let paragraph = Paragraph::new(Line::from(spans)).style(app.palette.status_bar);
    f.render_widget(paragraph, area);
}
