//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::controller::TrendController;
use crate::events::Event;
use crate::model::{InterestSeries, TrendingKeyword};
use crate::pretty::print_friendly_error_header;
use crate::pretty::print_cmd_info;
use crate::region::Region;
use crate::ui::Preferences;
use chrono::Local;
use std::error::Error;
use tokio::sync::mpsc;

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Printing the region's trending keywords and the chosen keyword's series
/// 2. Console event logging
/// 3. Repeating every interval with auto-refresh until Ctrl+C
///
/// # Arguments
/// * `session` - Session data from setup
/// * `preferences` - Region, keyword and refresh settings
///
/// # Returns
/// * `Ok(())` - Headless mode completed successfully
/// * `Err` - The provider session could not be initialized
pub async fn run_headless_mode(
    mut session: SessionData,
    preferences: Preferences,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", preferences.region);

    let mut initialized = false;
    loop {
        if !initialized {
            match session.controller.initialize().await {
                Ok(()) => initialized = true,
                Err(e) => {
                    print_events(&mut session.event_receiver);
                    if e.is_rate_limited() {
                        print_friendly_error_header();
                    }
                    // Without auto-refresh there is no later turn to retry on
                    if !preferences.refresh_enabled {
                        return Err(e.into());
                    }
                }
            }
        }

        if initialized {
            let report = run_cycle(
                &session.controller,
                preferences.region,
                preferences.keyword.as_deref(),
            )
            .await;
            print_events(&mut session.event_receiver);
            println!("{}", report);
        }

        if !preferences.refresh_enabled {
            break;
        }

        print_cmd_info!(
            "Auto-refresh",
            "Next refresh in {} (Ctrl+C to stop)",
            preferences.refresh_interval
        );
        tokio::select! {
            _ = tokio::time::sleep(preferences.refresh_interval.as_duration()) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    print_session_shutdown();
    print_session_exit_success();
    Ok(())
}

/// Result of one fetch cycle.
#[derive(Debug)]
pub struct CycleReport {
    pub region: Region,
    pub keywords: Vec<TrendingKeyword>,
    pub series: Option<InterestSeries>,
}

/// Fetches the region's keywords and, if `keyword` is among them, its series.
pub async fn run_cycle(
    controller: &TrendController,
    region: Region,
    keyword: Option<&str>,
) -> CycleReport {
    let keywords = controller.fetch_trending_keywords(region.code()).await;
    let series = match keyword {
        Some(keyword) if keywords.iter().any(|k| k.as_str() == keyword) => {
            Some(controller.fetch_interest_over_time(keyword).await)
        }
        _ => None,
    };
    CycleReport {
        region,
        keywords,
        series,
    }
}

impl std::fmt::Display for CycleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Trending in {}:", self.region)?;
        if self.keywords.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (rank, keyword) in self.keywords.iter().enumerate() {
            writeln!(f, "  {:>2}. {}", rank + 1, keyword)?;
        }

        if let Some(series) = &self.series {
            writeln!(f)?;
            writeln!(f, "Interest in \"{}\", past 24 hours:", series.keyword)?;
            if series.is_empty() {
                writeln!(f, "  (no data)")?;
            }
            for point in &series.points {
                writeln!(
                    f,
                    "  {}  {:>3}{}",
                    point
                        .timestamp
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M"),
                    point.value,
                    if point.is_partial { " (partial)" } else { "" }
                )?;
            }
        }
        Ok(())
    }
}

fn print_events(receiver: &mut mpsc::Receiver<Event>) {
    while let Ok(event) = receiver.try_recv() {
        if event.should_display() {
            println!("{}", event);
        }
    }
}
