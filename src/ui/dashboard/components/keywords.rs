//! Dashboard trending-keywords component
//!
//! Renders the keyword table, or the fetch error in its place

use super::super::state::DashboardState;
use super::super::utils::clean_http_error_message;
use crate::model::TrendingKeyword;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState, Wrap,
};

/// Render the trending keywords of the selected region.
pub fn render_keywords_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title(format!("TRENDING IN {}", state.selected_region().label().to_uppercase()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let options = state.keyword_options();
    if options.is_empty() {
        // No table without keywords; say why instead
        let line = match &state.keywords_error {
            Some(error) => Line::from(Span::styled(
                clean_http_error_message(error),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(Span::styled(
                "Waiting for trending searches...",
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(
            Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let selected = state.selected_keyword();
    let rows: Vec<Row> = options
        .iter()
        .map(|keyword| {
            let is_selected = selected == Some(keyword.as_str());
            let (marker, style) = if is_selected {
                (
                    "●",
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(Color::White))
            };
            Row::new(vec![Cell::from(format!("{} {}", marker, keyword)).style(style)])
        })
        .collect();

    let header = Row::new(vec![Cell::from(TrendingKeyword::COLUMN)]).style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    );

    let table = Table::new(rows, [Constraint::Fill(1)])
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");

    let mut table_state = TableState::default().with_selected(Some(state.keyword_cursor()));
    f.render_stateful_widget(table, area, &mut table_state);
}
