//! Dashboard state management
//!
//! Contains the main dashboard state struct and its user-driven transitions

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as DashboardEvent;
use crate::model::{InterestSeries, RefreshInterval, TrendingKeyword};
use crate::region::Region;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Session-scoped dashboard state.
///
/// The selected keyword, when set, is always one of `keywords`: changing the
/// region or replacing the keyword list drops a selection that no longer fits.
#[derive(Debug)]
pub struct DashboardState {
    /// The provider environment the session talks to.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,

    selected_region: Region,
    selected_keyword: Option<String>,
    refresh_enabled: bool,
    refresh_interval: RefreshInterval,

    /// Latest trending keywords for the selected region, in provider rank order.
    keywords: Vec<TrendingKeyword>,
    /// Highlighted row in the keyword table.
    keyword_cursor: usize,
    /// Interest series of the selected keyword, once fetched.
    series: Option<InterestSeries>,

    /// Last trending-searches failure, shown in place of the table
    pub keywords_error: Option<String>,
    /// Last interest-over-time failure, shown in the chart pane
    pub interest_error: Option<String>,
    /// Provider session failure, replaces both panes
    pub init_error: Option<String>,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<DashboardEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<DashboardEvent>,

    /// Remaining and total wait of a pending auto-refresh
    pub refresh_countdown: Option<(Duration, Duration)>,
    /// Local time of the last completed fetch cycle
    pub last_updated: Option<String>,
    /// Loop turn counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(
        environment: Environment,
        start_time: Instant,
        region: Region,
        refresh_enabled: bool,
        refresh_interval: RefreshInterval,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            environment,
            start_time,
            with_background_color: ui_config.with_background_color,
            selected_region: region,
            selected_keyword: None,
            refresh_enabled,
            refresh_interval,
            keywords: Vec::new(),
            keyword_cursor: 0,
            series: None,
            keywords_error: None,
            interest_error: None,
            init_error: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            refresh_countdown: None,
            last_updated: None,
            tick: 0,
        }
    }

    // Getters for the session selection
    pub fn selected_region(&self) -> Region {
        self.selected_region
    }

    pub fn selected_keyword(&self) -> Option<&str> {
        self.selected_keyword.as_deref()
    }

    pub fn refresh_enabled(&self) -> bool {
        self.refresh_enabled
    }

    pub fn refresh_interval(&self) -> RefreshInterval {
        self.refresh_interval
    }

    /// Keywords the selector may offer. Empty means no selector is shown.
    pub fn keyword_options(&self) -> &[TrendingKeyword] {
        &self.keywords
    }

    pub fn keyword_cursor(&self) -> usize {
        self.keyword_cursor
    }

    pub fn highlighted_keyword(&self) -> Option<&TrendingKeyword> {
        self.keywords.get(self.keyword_cursor)
    }

    pub fn series(&self) -> Option<&InterestSeries> {
        self.series.as_ref()
    }

    /// Switches region. Returns false when the region is already selected.
    ///
    /// The keyword list, selection and series belong to the old region and are
    /// cleared.
    pub fn select_region(&mut self, region: Region) -> bool {
        if self.selected_region == region {
            return false;
        }
        self.selected_region = region;
        self.selected_keyword = None;
        self.keywords.clear();
        self.keyword_cursor = 0;
        self.series = None;
        self.keywords_error = None;
        self.interest_error = None;
        true
    }

    /// Selects a keyword from the current list. Returns whether it was accepted.
    pub fn select_keyword(&mut self, keyword: &str) -> bool {
        let Some(position) = self.keywords.iter().position(|k| k.as_str() == keyword) else {
            return false;
        };
        if self.selected_keyword.as_deref() != Some(keyword) {
            self.series = None;
            self.interest_error = None;
        }
        self.selected_keyword = Some(keyword.to_string());
        self.keyword_cursor = position;
        true
    }

    pub fn set_refresh_enabled(&mut self, enabled: bool) {
        self.refresh_enabled = enabled;
        if !enabled {
            self.refresh_countdown = None;
        }
    }

    pub fn set_refresh_interval(&mut self, interval: RefreshInterval) {
        self.refresh_interval = interval;
    }

    /// Replaces the keyword list after a fetch.
    pub fn set_keywords(&mut self, keywords: Vec<TrendingKeyword>) {
        self.keywords = keywords;
        let still_listed = self
            .selected_keyword
            .as_deref()
            .and_then(|selected| self.keywords.iter().position(|k| k.as_str() == selected));
        match still_listed {
            Some(position) => self.keyword_cursor = position,
            None => {
                self.selected_keyword = None;
                self.series = None;
                self.keyword_cursor = 0;
            }
        }
    }

    /// Stores a fetched series if it still belongs to the selected keyword.
    pub fn set_series(&mut self, series: InterestSeries) {
        if self.selected_keyword.as_deref() == Some(series.keyword.as_str()) {
            self.series = Some(series);
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.keyword_cursor = self.keyword_cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.keyword_cursor + 1 < self.keywords.len() {
            self.keyword_cursor += 1;
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: DashboardEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: DashboardEvent) {
        self.pending_events.push_back(event);
    }
}
