//! Dashboard settings panel component
//!
//! Renders the region selector and the refresh controls

use crate::environment::Environment;
use crate::region::Region;

use super::super::state::DashboardState;
use super::super::utils::format_countdown;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

/// Render the settings panel.
pub fn render_settings_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut lines = Vec::new();

    for (index, region) in Region::ALL.iter().enumerate() {
        let selected = *region == state.selected_region();
        let (marker, style) = if selected {
            (
                "▶",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (" ", Style::default().fg(Color::Gray))
        };
        lines.push(Line::from(vec![Span::styled(
            format!("{} {} {}", marker, index + 1, region),
            style,
        )]));
    }

    lines.push(Line::from(""));

    let (refresh_text, refresh_color) = if state.refresh_enabled() {
        ("ON", Color::LightGreen)
    } else {
        ("OFF", Color::DarkGray)
    };
    lines.push(Line::from(vec![
        Span::styled("Auto-refresh: ", Style::default().fg(Color::Gray)),
        Span::styled(
            refresh_text,
            Style::default()
                .fg(refresh_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  every {}", state.refresh_interval()),
            Style::default().fg(Color::LightCyan),
        ),
    ]));

    let updated = state.last_updated.as_deref().unwrap_or("Never");
    lines.push(Line::from(vec![
        Span::styled("Updated: ", Style::default().fg(Color::Gray)),
        Span::styled(updated.to_string(), Style::default().fg(Color::Yellow)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Uptime: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_countdown(state.start_time.elapsed()),
            Style::default().fg(Color::Gray),
        ),
    ]));

    // Only worth showing when pointed somewhere unusual
    if let Environment::Custom { base_url } = &state.environment {
        lines.push(Line::from(vec![Span::styled(
            format!("API: {}", base_url),
            Style::default().fg(Color::Yellow),
        )]));
    }

    let block = Block::default()
        .title("REGION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
