//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## Screens
//!
//! * No page loaded yet: a loading screen, or a full-screen retry prompt if
//!   the first request failed.
//! * Otherwise: the launch list with a footer row (loading / retry / load
//!   more / end of list) and a one-line status bar.

use falcon_flights::{LaunchItem, RocketType};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

const HELP: &str = "q: quit  ↑/↓: scroll  Home/End: jump  r: load/retry";

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    if app.state.launches.is_some() {
        draw_launch_list(app, frame, main_area);
    } else if app.state.last_request_failed {
        draw_message(
            frame,
            main_area,
            "Couldn't load launches.\n\nPress r to try again.",
            Color::Red,
        );
    } else {
        draw_message(frame, main_area, "Loading launches…", Color::DarkGray);
    }

    draw_status_bar(app, frame, status_area);
}

fn title() -> String {
    format!(" {} launches ", RocketType::Falcon9.name())
}

/// Centered message filling `area`.
fn draw_message(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let block = Block::default().title(title()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = text.lines().count() as u16;
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let message = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, middle);
}

fn launch_line(item: &LaunchItem) -> Line<'_> {
    let mut spans = vec![
        Span::styled(
            format!("{:<20}", item.date.format("%B %-d, %Y")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("#{:<4}", item.flight_number),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(item.name.as_str(), Style::default().fg(Color::White)),
    ];

    if let Some(success) = item.success {
        let (label, color) = if success {
            ("success", Color::Green)
        } else {
            ("failure", Color::Red)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{label}]"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let media = media_label(item);
    if !media.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(media, Style::default().fg(Color::Magenta)));
    }

    Line::from(spans)
}

/// Short marker for the images a launch has, e.g. `patch, 3 photos`.
fn media_label(item: &LaunchItem) -> String {
    let mut parts = Vec::new();
    if item.patch_image_url.is_some() {
        parts.push("patch".to_string());
    }
    match item.image_urls.len() {
        0 => {}
        1 => parts.push("1 photo".to_string()),
        n => parts.push(format!("{n} photos")),
    }
    parts.join(", ")
}

/// Last row under the items, describing what happens next.
fn footer_line(app: &App) -> Line<'static> {
    let (text, color) = if app.state.is_loading {
        ("Loading", Color::Gray)
    } else if app.state.last_request_failed {
        ("Couldn't load more launches, press r to retry", Color::Red)
    } else if app.state.is_exhausted() {
        ("No more launches", Color::DarkGray)
    } else {
        ("Load next ↓ (r)", Color::Yellow)
    };
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
}

/// Render the scrollable launch list.
fn draw_launch_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let footer = footer_line(app);
    let mut rows: Vec<ListItem> = app
        .state
        .items()
        .iter()
        .map(|item| ListItem::new(launch_line(item)))
        .collect();
    rows.push(ListItem::new(footer));

    let list = List::new(rows)
        .block(Block::default().title(title()).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(app.status(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::raw(HELP),
    ]));
    frame.render_widget(status, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
