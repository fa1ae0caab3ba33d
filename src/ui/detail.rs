//! Detail view: tabbed page for one movie or series.

use crate::app::{App, DetailState, DetailTab};
use crate::catalog::{DetailBundle, ItemDetail, Provider};
use crate::util::{format_currency, format_date, format_runtime, format_year, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Cast entries shown on the Cast tab.
const MAX_CAST: usize = 20;
/// Key crew entries (directors, writers, creators) shown below the cast.
const MAX_CREW: usize = 6;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.border);

    match &app.detail {
        DetailState::Idle => {
            f.render_widget(block, area);
        }
        DetailState::Loading { .. } => {
            let inner = block.inner(area);
            f.render_widget(block, area);
            f.render_widget(
                Paragraph::new("Loading...").style(app.palette.loading),
                inner,
            );
        }
        DetailState::Failed { error, .. } => {
            let inner = block.inner(area);
            f.render_widget(block, area);
            f.render_widget(
                Paragraph::new(format!("{error}\n\nPress r to retry, Esc to go back"))
                    .style(app.palette.error),
                inner,
            );
        }
        DetailState::Ready(bundle) => render_ready(f, app, bundle, area),
    }
}

fn render_ready(f: &mut Frame, app: &App, bundle: &DetailBundle, area: Rect) {
    let title = format!(
        " {} ({}) ",
        bundle.detail.display_title(),
        format_year(bundle.detail.release_date())
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.border)
        .title(Span::styled(title, app.palette.heading));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    render_tab_bar(f, app, chunks[0]);

    let lines = match app.detail_tab {
        DetailTab::Overview => overview_lines(app, bundle),
        DetailTab::Cast => cast_lines(app, bundle),
        DetailTab::Media => media_lines(app, bundle),
        DetailTab::Reviews => review_lines(app, bundle),
        DetailTab::Watch => watch_lines(app, bundle),
        DetailTab::Similar => similar_lines(app, bundle),
    };

    // Clamp scroll so the last line cannot scroll past the top
    let max_scroll = (lines.len() as u16).saturating_sub(chunks[1].height);
    let scroll = app.detail_scroll.min(max_scroll);

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(body, chunks[1]);
}

fn render_tab_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::with_capacity(DetailTab::ALL.len() * 2);
    for tab in DetailTab::ALL {
        let style = if tab == app.detail_tab {
            app.palette.tab_active
        } else {
            app.palette.tab_inactive
        };
        spans.push(Span::styled(tab.title(), style));
        spans.push(Span::raw("   "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ============================================================================
// Tab content
// ============================================================================

fn overview_lines<'a>(app: &App, bundle: &'a DetailBundle) -> Vec<Line<'a>> {
    let detail = &bundle.detail;
    let mut lines = Vec::new();

    if !detail.tagline().is_empty() {
        lines.push(Line::from(Span::styled(
            detail.tagline(),
            app.palette.tagline,
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled(
            format!("★ {:.1}", detail.vote_average()),
            app.palette.rating,
        ),
        Span::styled(
            format!(" ({} votes)", detail.vote_count()),
            app.palette.card_meta,
        ),
    ]));

    let genres = detail
        .genres()
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if !genres.is_empty() {
        lines.push(Line::from(Span::styled(genres, app.palette.genre_badge)));
    }
    lines.push(Line::from(""));

    match detail {
        ItemDetail::Movie(movie) => {
            lines.push(meta_line(app, "Released", format_date(movie.release_date)));
            lines.push(meta_line(app, "Runtime", format_runtime(movie.runtime)));
            lines.push(meta_line(app, "Status", movie.status.clone()));
            if movie.budget > 0 {
                lines.push(meta_line(app, "Budget", format_currency(movie.budget)));
            }
            if movie.revenue > 0 {
                lines.push(meta_line(app, "Revenue", format_currency(movie.revenue)));
            }
        }
        ItemDetail::Series(series) => {
            lines.push(meta_line(
                app,
                "First aired",
                format_date(series.first_air_date),
            ));
            lines.push(meta_line(
                app,
                "Seasons",
                format!(
                    "{} ({} episodes)",
                    series.number_of_seasons, series.number_of_episodes
                ),
            ));
            lines.push(meta_line(app, "Status", series.status.clone()));
        }
    }
    lines.push(Line::from(""));

    if detail.overview().is_empty() {
        lines.push(Line::from(Span::styled(
            "No overview available",
            app.palette.empty,
        )));
    } else {
        lines.push(Line::from(detail.overview()));
    }

    lines
}

fn cast_lines<'a>(app: &App, bundle: &'a DetailBundle) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    if bundle.credits.cast.is_empty() && bundle.credits.crew.is_empty() {
        return vec![empty_line(app, "No cast information available")];
    }

    for member in bundle.credits.cast.iter().take(MAX_CAST) {
        let mut spans = vec![Span::styled(&*member.name, app.palette.card_title)];
        if !member.character.is_empty() {
            spans.push(Span::styled(
                format!("  as {}", member.character),
                app.palette.card_meta,
            ));
        }
        lines.push(Line::from(spans));
    }

    let key_crew: Vec<_> = bundle
        .credits
        .crew
        .iter()
        .filter(|c| matches!(c.job.as_str(), "Director" | "Screenplay" | "Writer" | "Creator"))
        .take(MAX_CREW)
        .collect();
    if !key_crew.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Crew", app.palette.heading)));
        for member in key_crew {
            lines.push(Line::from(vec![
                Span::styled(&*member.name, app.palette.card_title),
                Span::styled(format!("  {}", member.job), app.palette.card_meta),
            ]));
        }
    }

    lines
}

fn media_lines<'a>(app: &App, bundle: &'a DetailBundle) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    let trailers: Vec<_> = bundle
        .videos
        .iter()
        .filter(|v| v.site == "YouTube")
        .collect();
    if trailers.is_empty() && bundle.images.backdrops.is_empty() && bundle.images.posters.is_empty()
    {
        return vec![empty_line(app, "No media available")];
    }

    if !trailers.is_empty() {
        lines.push(Line::from(Span::styled("Videos", app.palette.heading)));
        for video in trailers {
            let marker = if video.official { "✓ " } else { "  " };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(&*video.name, app.palette.card_title),
                Span::styled(format!("  [{}]", video.kind), app.palette.card_meta),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    https://www.youtube.com/watch?v={}", video.key),
                app.palette.hint,
            )));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!(
            "{} backdrops, {} posters",
            bundle.images.backdrops.len(),
            bundle.images.posters.len()
        ),
        app.palette.card_meta,
    )));

    lines
}

fn review_lines<'a>(app: &App, bundle: &'a DetailBundle) -> Vec<Line<'a>> {
    if bundle.reviews.is_empty() {
        return vec![empty_line(app, "No reviews yet")];
    }

    let mut lines = Vec::new();
    for review in &bundle.reviews {
        let mut header = vec![Span::styled(&*review.author, app.palette.card_title)];
        if let Some(rating) = review.author_details.rating {
            header.push(Span::styled(
                format!("  ★ {rating:.0}/10"),
                app.palette.rating,
            ));
        }
        lines.push(Line::from(header));
        lines.push(Line::from(&*review.content));
        lines.push(Line::from(""));
    }
    lines
}

fn watch_lines<'a>(app: &App, bundle: &'a DetailBundle) -> Vec<Line<'a>> {
    if bundle.providers.is_empty() {
        return vec![empty_line(app, "No watch providers for your region")];
    }

    let mut lines = Vec::new();
    let groups: [(&str, &[Provider]); 3] = [
        ("Stream", &bundle.providers.flatrate),
        ("Rent", &bundle.providers.rent),
        ("Buy", &bundle.providers.buy),
    ];
    for (label, providers) in groups {
        if providers.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(label, app.palette.heading)));
        for provider in providers {
            lines.push(Line::from(Span::styled(
                format!("  {}", provider.provider_name),
                app.palette.card_title,
            )));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Availability data from JustWatch via TMDB",
        app.palette.hint,
    )));
    lines
}

fn similar_lines<'a>(app: &App, bundle: &'a DetailBundle) -> Vec<Line<'a>> {
    if bundle.similar.is_empty() {
        return vec![empty_line(app, "No similar titles found")];
    }

    bundle
        .similar
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled(
                    truncate_to_width(item.display_title(), 50),
                    app.palette.card_title,
                ),
                Span::styled(
                    format!("  {}", format_year(item.release_date())),
                    app.palette.card_meta,
                ),
                Span::styled(
                    format!("  ★ {:.1}", item.vote_average()),
                    app.palette.rating,
                ),
            ])
        })
        .collect()
}

fn meta_line(app: &App, label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), app.palette.card_meta),
        Span::raw(value),
    ])
}

fn empty_line(app: &App, text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, app.palette.empty))
}
