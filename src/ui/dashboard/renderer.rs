//! Dashboard main renderer

use super::components::{chart, footer, header, keywords, logs, settings};
use super::state::DashboardState;
use super::utils::clean_http_error_message;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    if let Some(error) = &state.init_error {
        render_init_error(f, main_chunks[1], error);
    } else {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
            .split(main_chunks[1]);

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(12), Constraint::Fill(1)])
            .split(content_chunks[0]);

        settings::render_settings_panel(f, left_chunks[0], state);
        keywords::render_keywords_panel(f, left_chunks[1], state);
        chart::render_chart_panel(f, content_chunks[1], state);
    }

    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3]);
}

/// Full-width error shown when no provider session could be established.
fn render_init_error(f: &mut Frame, area: Rect, error: &str) {
    let lines = vec![
        Line::from(Span::styled(
            clean_http_error_message(error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press [R] to retry or [Q] to quit.",
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default()
        .title("GOOGLE TRENDS UNAVAILABLE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red))
        .padding(Padding::uniform(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
