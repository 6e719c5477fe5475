//! Main application state and UI loop
//!
//! Contains the App struct, action handling and the terminal event loop

use crate::consts::cli_consts::{INPUT_POLL_MS, SPLASH_DURATION_MS};
use crate::controller::TrendController;
use crate::events::Event as DashboardEvent;
use crate::model::RefreshInterval;
use crate::refresh::RefreshLoop;
use crate::region::Region;
use crate::ui::action::Action;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use chrono::Local;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// Initial selection and refresh settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub region: Region,
    pub refresh_enabled: bool,
    pub refresh_interval: RefreshInterval,
    /// Keyword to select once it shows up in the first keyword list.
    pub keyword: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            region: Region::default(),
            refresh_enabled: false,
            refresh_interval: RefreshInterval::default(),
            keyword: None,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen with keywords and the interest chart.
    Dashboard,
}

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Application state
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Session state rendered by the dashboard.
    state: DashboardState,

    /// Fetches trends and reports failures as events.
    controller: TrendController,

    /// Schedules refresh ticks onto the action queue.
    refresh: RefreshLoop,

    /// Receives events from the controller.
    event_receiver: mpsc::Receiver<DashboardEvent>,

    /// Receives timer-driven actions.
    action_receiver: mpsc::Receiver<Action>,

    /// Whether the provider session is ready.
    initialized: bool,

    /// Keyword to select after the first successful keyword fetch.
    pending_keyword: Option<String>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        controller: TrendController,
        event_receiver: mpsc::Receiver<DashboardEvent>,
        action_sender: mpsc::Sender<Action>,
        action_receiver: mpsc::Receiver<Action>,
        preferences: Preferences,
        ui_config: UIConfig,
    ) -> Self {
        let state = DashboardState::new(
            controller.environment().clone(),
            Instant::now(),
            preferences.region,
            preferences.refresh_enabled,
            preferences.refresh_interval,
            ui_config,
        );
        Self {
            current_screen: Screen::Splash,
            state,
            controller,
            refresh: RefreshLoop::new(action_sender),
            event_receiver,
            action_receiver,
            initialized: false,
            pending_keyword: preferences.keyword,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    #[cfg(test)]
    pub fn refresh_loop(&self) -> &RefreshLoop {
        &self.refresh
    }

    /// Current selection and refresh settings, for persisting on exit.
    pub fn preferences(&self) -> Preferences {
        Preferences {
            region: self.state.selected_region(),
            refresh_enabled: self.state.refresh_enabled(),
            refresh_interval: self.state.refresh_interval(),
            keyword: self.state.selected_keyword().map(str::to_string),
        }
    }

    pub fn show_dashboard(&mut self) {
        self.current_screen = Screen::Dashboard;
    }

    /// Makes sure a provider session exists. Failure aborts the current turn.
    async fn ensure_initialized(&mut self) -> bool {
        if self.initialized {
            return true;
        }
        match self.controller.initialize().await {
            Ok(()) => {
                self.initialized = true;
                self.state.init_error = None;
                true
            }
            Err(_) => false,
        }
    }

    /// Full fetch cycle: trending keywords, then the selected keyword's series.
    pub async fn reload(&mut self) {
        self.refresh.cancel();
        if !self.ensure_initialized().await {
            return;
        }

        let region = self.state.selected_region();
        let keywords = self.controller.fetch_trending_keywords(region.code()).await;
        self.state.set_keywords(keywords);

        if let Some(keyword) = self.pending_keyword.take() {
            self.state.select_keyword(&keyword);
        }

        self.load_interest().await;
        self.state.last_updated = Some(Local::now().format("%H:%M:%S").to_string());
    }

    /// Fetches the series of the selected keyword, if any.
    async fn load_interest(&mut self) {
        let Some(keyword) = self.state.selected_keyword().map(str::to_string) else {
            return;
        };
        if !self.ensure_initialized().await {
            return;
        }
        let series = self.controller.fetch_interest_over_time(&keyword).await;
        self.state.set_series(series);
    }

    /// Applies one action to the session.
    pub async fn apply(&mut self, action: Action) -> Flow {
        match action {
            Action::Quit => return Flow::Quit,
            Action::SelectRegion(region) => self.select_region(region).await,
            Action::NextRegion => {
                let region = self.state.selected_region().next();
                self.select_region(region).await;
            }
            Action::PreviousRegion => {
                let region = self.state.selected_region().previous();
                self.select_region(region).await;
            }
            Action::CursorUp => self.state.move_cursor_up(),
            Action::CursorDown => self.state.move_cursor_down(),
            Action::SelectHighlightedKeyword => {
                if let Some(keyword) = self.state.highlighted_keyword().map(|k| k.to_string()) {
                    self.select_keyword(&keyword).await;
                }
            }
            Action::ToggleRefresh => {
                let enabled = !self.state.refresh_enabled();
                self.state.set_refresh_enabled(enabled);
                if !enabled {
                    self.refresh.cancel();
                }
                let msg = if enabled {
                    format!("Auto-refresh enabled, every {}", self.state.refresh_interval())
                } else {
                    "Auto-refresh disabled".to_string()
                };
                self.state.add_event(DashboardEvent::refresh(msg));
            }
            Action::IncreaseInterval => {
                let interval = self.state.refresh_interval().increment();
                self.change_interval(interval);
            }
            Action::DecreaseInterval => {
                let interval = self.state.refresh_interval().decrement();
                self.change_interval(interval);
            }
            Action::RefreshNow => self.reload().await,
            Action::RefreshTick(generation) => {
                // Ticks of cancelled waits are stale
                if self.refresh.on_tick(generation) {
                    self.state
                        .add_event(DashboardEvent::refresh("Auto-refresh".to_string()));
                    self.reload().await;
                }
            }
        }
        Flow::Continue
    }

    async fn select_region(&mut self, region: Region) {
        if self.state.select_region(region) {
            self.reload().await;
        }
    }

    async fn select_keyword(&mut self, keyword: &str) {
        if self.state.select_keyword(keyword) {
            self.refresh.cancel();
            self.load_interest().await;
        }
    }

    fn change_interval(&mut self, interval: RefreshInterval) {
        if interval == self.state.refresh_interval() {
            return;
        }
        self.state.set_refresh_interval(interval);
        // Re-armed with the new interval after the next render
        self.refresh.cancel();
    }

    /// Called once a frame has been drawn; starts the refresh wait if enabled.
    pub fn after_render(&mut self) {
        if self.state.refresh_enabled() {
            self.refresh.arm(self.state.refresh_interval());
        }
    }

    /// Moves queued controller events into the dashboard state.
    pub fn sync_state(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.add_event(event);
        }
        self.state.update();
        self.state.refresh_countdown = self.refresh.remaining();
    }

    /// Next queued timer action, without waiting.
    pub fn try_next_action(&mut self) -> Option<Action> {
        self.action_receiver.try_recv().ok()
    }

    /// Waits for the next timer action.
    #[cfg(test)]
    pub async fn next_action(&mut self) -> Option<Action> {
        self.action_receiver.recv().await
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    // Show the splash while the first fetch is in flight
    terminal.draw(|f| render(f, app))?;
    app.reload().await;

    // UI event loop
    loop {
        app.sync_state();
        terminal.draw(|f| render(f, app))?;
        app.after_render();

        // Handle splash-to-dashboard transition
        if app.current_screen == Screen::Splash && splash_start.elapsed() >= splash_duration {
            app.show_dashboard();
            continue;
        }

        // Timer actions queued since the last turn
        while let Some(action) = app.try_next_action() {
            if app.apply(action).await == Flow::Quit {
                return Ok(());
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let Some(action) = Action::from_key(key) else {
                    continue;
                };

                if app.current_screen == Screen::Splash && action != Action::Quit {
                    // Any other key press skips the splash screen
                    app.show_dashboard();
                    continue;
                }

                if app.apply(action).await == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, &app.state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventSender;
    use crate::model::InterestSeries;
    use crate::trends::error::TrendsError;
    use crate::trends::{InterestTable, MockTrendsProvider, TimelineRow};
    use chrono::{TimeZone, Utc};
    use ratatui::backend::TestBackend;

    fn app_with(mock: MockTrendsProvider, preferences: Preferences) -> App {
        let (event_sender, event_receiver) = mpsc::channel(64);
        let (action_sender, action_receiver) = mpsc::channel(8);
        let controller = TrendController::new(Box::new(mock), EventSender::new(event_sender));
        let mut app = App::new(
            controller,
            event_receiver,
            action_sender,
            action_receiver,
            preferences,
            UIConfig::new(false),
        );
        app.show_dashboard();
        app
    }

    fn base_mock() -> MockTrendsProvider {
        let mut mock = MockTrendsProvider::new();
        mock.expect_environment()
            .return_const(crate::environment::Environment::Production);
        mock.expect_initialize().returning(|| Ok(()));
        mock
    }

    fn taiwan() -> Preferences {
        Preferences {
            region: Region::Taiwan,
            ..Preferences::default()
        }
    }

    fn typhoon_table(keywords: &[String]) -> InterestTable {
        InterestTable {
            keywords: keywords.to_vec(),
            rows: (0..24)
                .map(|hour| TimelineRow {
                    timestamp: Utc.timestamp_opt(1_730_246_400 + hour * 3600, 0).unwrap(),
                    values: vec![(hour as u32 * 4) % 101],
                    is_partial: hour == 23,
                })
                .collect(),
        }
    }

    fn screen_text(app: &App) -> String {
        let backend = TestBackend::new(140, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_each_region_uses_its_code() {
        for region in Region::ALL {
            let mut mock = base_mock();
            let code = region.code();
            mock.expect_trending_searches()
                .withf(move |requested| requested == code)
                .times(1)
                .returning(|_| Ok(vec!["keyword".to_string()]));
            let mut app = app_with(
                mock,
                Preferences {
                    region,
                    ..Preferences::default()
                },
            );

            app.reload().await;
            assert_eq!(app.state().keyword_options().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_selecting_typhoon_renders_its_chart() {
        let mut mock = base_mock();
        mock.expect_trending_searches()
            .withf(|code| code == "taiwan")
            .times(1)
            .returning(|_| Ok(vec!["stock market".to_string(), "typhoon".to_string()]));
        mock.expect_interest_over_time()
            .withf(|keywords, timeframe| {
                keywords.len() == 1 && keywords[0] == "typhoon" && timeframe == "now 1-d"
            })
            .times(1)
            .returning(|keywords, _| Ok(typhoon_table(keywords)));
        let mut app = app_with(mock, taiwan());

        app.reload().await;
        app.apply(Action::CursorDown).await;
        assert_eq!(
            app.apply(Action::SelectHighlightedKeyword).await,
            Flow::Continue
        );
        app.sync_state();

        let series = app.state().series().unwrap();
        assert_eq!(series.len(), 24);
        let screen = screen_text(&app);
        assert!(screen.contains("\"typhoon\" search interest, past 24 hours"));
        assert!(screen.contains("TRENDING IN TAIWAN"));
    }

    #[tokio::test]
    async fn test_keyword_failure_shows_error_without_table() {
        let mut mock = base_mock();
        mock.expect_trending_searches().times(1).returning(|_| {
            Err(TrendsError::Http {
                status: 503,
                message: "unreachable".to_string(),
            })
        });
        let mut app = app_with(mock, taiwan());

        app.reload().await;
        app.sync_state();

        assert!(app.state().keyword_options().is_empty());
        let screen = screen_text(&app);
        assert!(screen.contains("Failed to fetch trending searches"));
        assert!(!screen.contains(crate::model::TrendingKeyword::COLUMN));
    }

    #[tokio::test]
    async fn test_empty_keywords_offer_nothing_to_select() {
        let mut mock = base_mock();
        mock.expect_trending_searches()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        mock.expect_interest_over_time().times(0);
        let mut app = app_with(mock, taiwan());

        app.reload().await;
        app.apply(Action::SelectHighlightedKeyword).await;

        assert_eq!(app.state().selected_keyword(), None);
    }

    #[tokio::test]
    async fn test_empty_series_omits_chart_without_error() {
        let mut mock = base_mock();
        mock.expect_trending_searches()
            .returning(|_| Ok(vec!["typhoon".to_string()]));
        mock.expect_interest_over_time()
            .times(1)
            .returning(|keywords, _| {
                Ok(InterestTable {
                    keywords: keywords.to_vec(),
                    rows: Vec::new(),
                })
            });
        let mut app = app_with(mock, taiwan());

        app.reload().await;
        app.apply(Action::SelectHighlightedKeyword).await;
        app.sync_state();

        assert_eq!(
            app.state().series(),
            Some(&InterestSeries::empty("typhoon"))
        );
        let screen = screen_text(&app);
        assert!(screen.contains("No interest data for the last 24 hours."));
        assert!(!screen.contains("Interest"));
    }

    #[tokio::test]
    async fn test_region_change_invalidates_keyword() {
        let mut mock = base_mock();
        mock.expect_trending_searches()
            .withf(|code| code == "taiwan")
            .returning(|_| Ok(vec!["typhoon".to_string()]));
        mock.expect_trending_searches()
            .withf(|code| code == "japan")
            .times(1)
            .returning(|_| Ok(vec!["earthquake".to_string()]));
        mock.expect_interest_over_time()
            .returning(|keywords, _| Ok(typhoon_table(keywords)));
        let mut app = app_with(mock, taiwan());

        app.reload().await;
        app.select_keyword("typhoon").await;
        app.apply(Action::SelectRegion(Region::Japan)).await;

        assert_eq!(app.state().selected_region(), Region::Japan);
        assert_eq!(app.state().selected_keyword(), None);
        assert!(app.state().series().is_none());
    }

    #[tokio::test]
    async fn test_init_failure_aborts_turn() {
        let mut mock = MockTrendsProvider::new();
        mock.expect_environment()
            .return_const(crate::environment::Environment::Production);
        mock.expect_initialize()
            .times(1)
            .returning(|| Err(TrendsError::Malformed("no cookie".to_string())));
        mock.expect_trending_searches().times(0);
        let mut app = app_with(mock, taiwan());

        app.reload().await;
        app.sync_state();

        assert!(app.state().init_error.is_some());
        assert!(screen_text(&app).contains("GOOGLE TRENDS UNAVAILABLE"));
    }

    #[tokio::test]
    async fn test_preselected_keyword_is_loaded() {
        let mut mock = base_mock();
        mock.expect_trending_searches()
            .returning(|_| Ok(vec!["stock market".to_string(), "typhoon".to_string()]));
        mock.expect_interest_over_time()
            .times(1)
            .returning(|keywords, _| Ok(typhoon_table(keywords)));
        let mut app = app_with(
            mock,
            Preferences {
                keyword: Some("typhoon".to_string()),
                ..taiwan()
            },
        );

        app.reload().await;

        assert_eq!(app.state().selected_keyword(), Some("typhoon"));
        assert!(app.state().series().is_some());
    }

    #[tokio::test]
    async fn test_refresh_disabled_never_waits() {
        let mut mock = base_mock();
        mock.expect_trending_searches()
            .times(1)
            .returning(|_| Ok(vec!["typhoon".to_string()]));
        mock.expect_interest_over_time()
            .times(1)
            .returning(|keywords, _| Ok(typhoon_table(keywords)));
        let mut app = app_with(mock, taiwan());

        app.reload().await;
        app.after_render();
        app.select_keyword("typhoon").await;
        app.after_render();

        assert!(!app.refresh_loop().is_waiting());
        assert!(app.try_next_action().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_tick_forces_one_more_cycle() {
        let mut mock = base_mock();
        mock.expect_trending_searches()
            .times(2)
            .returning(|_| Ok(vec!["stock market".to_string(), "typhoon".to_string()]));
        mock.expect_interest_over_time()
            .times(2)
            .returning(|keywords, _| Ok(typhoon_table(keywords)));
        let mut app = app_with(
            mock,
            Preferences {
                refresh_enabled: true,
                refresh_interval: RefreshInterval::new(5),
                ..taiwan()
            },
        );

        app.reload().await;
        app.select_keyword("typhoon").await;
        app.sync_state();
        app.after_render();
        assert!(app.refresh_loop().is_waiting());

        let started = tokio::time::Instant::now();
        let action = app.next_action().await.unwrap();
        assert!(matches!(action, Action::RefreshTick(_)));
        assert!(started.elapsed() >= Duration::from_secs(300));

        app.apply(action).await;
        assert!(!app.refresh_loop().is_waiting());
        assert_eq!(app.state().selected_keyword(), Some("typhoon"));
        assert!(app.try_next_action().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabling_refresh_cancels_wait() {
        let mut mock = base_mock();
        mock.expect_trending_searches()
            .times(1)
            .returning(|_| Ok(vec!["typhoon".to_string()]));
        let mut app = app_with(
            mock,
            Preferences {
                refresh_enabled: true,
                refresh_interval: RefreshInterval::new(1),
                ..taiwan()
            },
        );

        app.reload().await;
        app.after_render();
        app.apply(Action::ToggleRefresh).await;
        app.after_render();

        tokio::time::advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        assert!(app.try_next_action().is_none());
        assert!(!app.state().refresh_enabled());
    }

    #[tokio::test]
    async fn test_interval_keys_stay_clamped() {
        let mut app = app_with(base_mock(), taiwan());
        app.change_interval(RefreshInterval::new(60));
        app.apply(Action::IncreaseInterval).await;
        assert_eq!(app.state().refresh_interval().minutes(), 60);

        app.change_interval(RefreshInterval::new(1));
        app.apply(Action::DecreaseInterval).await;
        assert_eq!(app.state().refresh_interval().minutes(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_queued_before_interval_change_is_ignored() {
        let mut mock = base_mock();
        mock.expect_trending_searches()
            .times(1)
            .returning(|_| Ok(vec!["typhoon".to_string()]));
        let mut app = app_with(
            mock,
            Preferences {
                refresh_enabled: true,
                refresh_interval: RefreshInterval::new(1),
                ..taiwan()
            },
        );

        app.reload().await;
        app.after_render();

        // The first wait fires while a key press is being handled
        tokio::time::advance(Duration::from_secs(61)).await;
        tokio::task::yield_now().await;
        app.apply(Action::IncreaseInterval).await;
        app.after_render();

        while let Some(action) = app.try_next_action() {
            app.apply(action).await;
        }

        assert!(app.refresh_loop().is_waiting());
        let (remaining, total) = app.refresh_loop().remaining().unwrap();
        assert_eq!(total, Duration::from_secs(120));
        assert_eq!(remaining, Duration::from_secs(120));
    }
}
