//! Dashboard interest chart component
//!
//! Renders the selected keyword's interest over the last 24 hours

use super::super::state::DashboardState;
use super::super::utils::{clean_http_error_message, format_axis_time};
use crate::model::InterestSeries;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Padding, Paragraph, Wrap,
};

/// Title used for the chart of `keyword`.
pub fn chart_title(keyword: &str) -> String {
    format!("\"{}\" search interest, past 24 hours", keyword)
}

/// Render the right pane: a placeholder, a notice, or the chart.
pub fn render_chart_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(keyword) = state.selected_keyword() else {
        render_placeholder(f, area);
        return;
    };

    match state.series() {
        Some(series) if !series.is_empty() => render_series(f, area, series),
        Some(_) => {
            // Fetched but empty: no chart
            let message = match &state.interest_error {
                Some(error) => clean_http_error_message(error),
                None => "No interest data for the last 24 hours.".to_string(),
            };
            render_notice(f, area, keyword, &message, Color::Red);
        }
        None => render_notice(f, area, keyword, "Loading interest data...", Color::DarkGray),
    }
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Select a keyword on the left to see its trend.",
            Style::default().fg(Color::LightBlue),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[↑/↓] move  [Enter] select",
            Style::default().fg(Color::Gray),
        )),
    ];
    let block = Block::default()
        .title("SEARCH INTEREST")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_notice(f: &mut Frame, area: Rect, keyword: &str, message: &str, color: Color) {
    let block = Block::default()
        .title(chart_title(keyword))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color),
        )))
        .block(block)
        .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_series(f: &mut Frame, area: Rect, series: &InterestSeries) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(area);

    render_summary(f, chunks[0], series);

    let data = series.chart_points();
    let (start, end) = match series.time_bounds() {
        Some(bounds) => bounds,
        None => return,
    };
    let min_x = start.timestamp() as f64;
    // A single sample still needs a non-empty x range
    let max_x = (end.timestamp() as f64).max(min_x + 1.0);
    let mid = start + (end - start) / 2;

    let datasets = vec![
        Dataset::default()
            .name(series.keyword.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightGreen))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(chart_title(&series.keyword))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::Gray))
                .bounds([min_x, max_x])
                .labels(vec![
                    Span::raw(format_axis_time(start)),
                    Span::raw(format_axis_time(mid)),
                    Span::raw(format_axis_time(end)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Interest")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
        );

    f.render_widget(chart, chunks[1]);
}

fn render_summary(f: &mut Frame, area: Rect, series: &InterestSeries) {
    let mut spans = Vec::new();
    if let Some(latest) = series.latest() {
        spans.push(Span::styled(" Latest: ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("{}{}", latest.value, if latest.is_partial { "*" } else { "" }),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(peak) = series.peak() {
        spans.push(Span::styled("  Peak: ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("{} at {}", peak.value, format_axis_time(peak.timestamp)),
            Style::default().fg(Color::LightYellow),
        ));
    }
    spans.push(Span::styled(
        format!("  Samples: {}", series.len()),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
