//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use chrono::{DateTime, Local, Utc};
use ratatui::prelude::Color;
use std::time::Duration;

/// Get a ratatui color for an event based on where it came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Keywords => Color::Cyan,
        Source::Interest => Color::LightGreen,
        Source::Client => Color::Yellow,
        Source::Refresh => Color::LightBlue,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some((date_part, time_part)) = timestamp.split_once(' ') {
        // Extract MM-DD from date and HH:MM:SS from time
        if let (Some(month_day), Some(clock)) = (date_part.get(5..10), time_part.get(0..8)) {
            return format!("{} {}", month_day, clock);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    // Replace verbose HTTP error patterns with cleaner messages
    if msg.contains("<html") || msg.contains("<!DOCTYPE") {
        if let Some(prefix) = msg.split_once(": <").map(|(head, _)| head) {
            return format!("{} (HTML error page)", prefix);
        }
        return "Provider returned an HTML error page".to_string();
    }
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Request timed out".to_string();
    }
    if msg.contains("Reqwest error") && msg.contains("error sending request") {
        return "Network error - check your connection".to_string();
    }
    // Return original message if no HTTP error pattern detected
    msg.to_string()
}

/// Format a countdown as "4m 12s" or "12s"
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

/// Local wall-clock label for a chart axis
pub fn format_axis_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}
