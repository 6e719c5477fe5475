pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered controller events
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum number of buffered refresh actions
    pub const ACTION_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    /// Auto-refresh interval bounds and default
    pub mod refresh {
        /// Shortest allowed refresh interval (minutes)
        pub const MIN_INTERVAL_MINUTES: u32 = 1;

        /// Longest allowed refresh interval (minutes)
        pub const MAX_INTERVAL_MINUTES: u32 = 60;

        /// Interval used when nothing else is configured (minutes)
        pub const DEFAULT_INTERVAL_MINUTES: u32 = 5;
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// How long the splash screen stays up before the dashboard (milliseconds)
    pub const SPLASH_DURATION_MS: u64 = 1500;

    /// Keyboard polling interval of the UI loop (milliseconds)
    pub const INPUT_POLL_MS: u64 = 100;

    // =============================================================================
    // PROVIDER CONFIGURATION
    // =============================================================================

    /// Google Trends request parameters
    pub mod trends {
        use std::time::Duration;

        /// Host language sent with every request
        pub const HOST_LANGUAGE: &str = "en-US";

        /// Timezone offset in minutes sent with every request
        pub const TZ_OFFSET_MINUTES: i32 = 360;

        /// Geo used when requesting the session cookie
        pub const COOKIE_GEO: &str = "US";

        /// Timeframe token for the trailing 24 hours
        pub const LAST_DAY_TIMEFRAME: &str = "now 1-d";

        /// Widget id carrying the interest-over-time request
        pub const TIMESERIES_WIDGET_ID: &str = "TIMESERIES";

        /// Connect and request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        /// Helper function to get the request timeout
        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }
}
