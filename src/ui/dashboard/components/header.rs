//! Dashboard header component
//!
//! Renders the title and the auto-refresh gauge

use super::super::state::DashboardState;
use super::super::utils::format_countdown;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and refresh progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title_text = format!(
        "GOOGLE TRENDS MONITOR v{} - {}",
        version,
        state.selected_region()
    );

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (progress_text, gauge_color, progress_percent) = if !state.refresh_enabled() {
        ("AUTO-REFRESH OFF".to_string(), Color::DarkGray, 0)
    } else {
        match state.refresh_countdown {
            Some((remaining, total)) if !total.is_zero() => {
                let elapsed = total.saturating_sub(remaining);
                let progress =
                    ((elapsed.as_secs_f64() / total.as_secs_f64()) * 100.0).min(100.0) as u16;
                (
                    format!("NEXT REFRESH IN {}", format_countdown(remaining)),
                    Color::LightBlue,
                    progress,
                )
            }
            _ => ("REFRESHING".to_string(), Color::LightGreen, 100),
        }
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
