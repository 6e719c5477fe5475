mod config;
mod consts;
mod controller;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod model;
mod pretty;
mod refresh;
mod region;
mod session;
mod trends;
mod ui;

use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::model::RefreshInterval;
use crate::pretty::print_cmd_error;
use crate::region::Region;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::ui::Preferences;
use clap::{ArgAction, Parser};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Live Google Trends monitor for the terminal
struct Args {
    /// Region to show: a name ("Hong Kong") or a code ("hong_kong")
    #[arg(long, value_name = "REGION")]
    region: Option<Region>,

    /// Minutes between automatic refreshes, clamped to 1-60
    #[arg(long, value_name = "MINUTES")]
    refresh_interval: Option<i64>,

    /// Start with auto-refresh enabled
    #[arg(long, action = ArgAction::SetTrue)]
    auto_refresh: bool,

    /// Keyword to select once it appears among the trending searches
    #[arg(long, value_name = "KEYWORD")]
    keyword: Option<String>,

    /// Print results to stdout instead of running the dashboard
    #[arg(long, action = ArgAction::SetTrue)]
    headless: bool,

    /// Enable background colors in the dashboard
    #[arg(long, action = ArgAction::SetTrue)]
    with_background: bool,

    /// Alternative base URL for the Google Trends endpoints
    #[arg(long, value_name = "URL")]
    api_url: Option<Environment>,
}

impl Args {
    /// Overlays command-line flags on the saved preferences.
    fn preferences(&self, config: &Config) -> Preferences {
        Preferences {
            region: self.region.unwrap_or(config.region),
            refresh_enabled: self.auto_refresh || config.auto_refresh,
            refresh_interval: self
                .refresh_interval
                .map(RefreshInterval::new)
                .unwrap_or(config.refresh_interval),
            keyword: self.keyword.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init_max_level();

    let config_path = get_config_path()?;
    let config = match Config::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            print_cmd_error!(
                "Ignoring unreadable config",
                "{}: {}",
                config_path.display(),
                e
            );
            Config::default()
        }
    };

    let environment = args.api_url.clone().unwrap_or_default();
    let preferences = args.preferences(&config);
    let session = setup_session(environment)?;

    if args.headless {
        return run_headless_mode(session, preferences).await;
    }

    let final_preferences = run_tui_mode(session, preferences, args.with_background).await?;
    let updated = Config::new(
        final_preferences.region,
        final_preferences.refresh_interval,
        final_preferences.refresh_enabled,
    );
    if let Err(e) = updated.save(&config_path) {
        print_cmd_error!("Failed to save preferences", "{}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "trend-watch",
            "--region",
            "taiwan",
            "--refresh-interval",
            "90",
            "--keyword",
            "typhoon",
        ]);
        let config = Config::new(Region::Japan, RefreshInterval::new(10), true);

        let preferences = args.preferences(&config);
        assert_eq!(preferences.region, Region::Taiwan);
        assert_eq!(preferences.refresh_interval.minutes(), 60);
        assert!(preferences.refresh_enabled);
        assert_eq!(preferences.keyword.as_deref(), Some("typhoon"));
    }

    #[test]
    fn test_config_fills_missing_flags() {
        let args = Args::parse_from(["trend-watch"]);
        let config = Config::new(Region::HongKong, RefreshInterval::new(15), false);

        let preferences = args.preferences(&config);
        assert_eq!(preferences.region, Region::HongKong);
        assert_eq!(preferences.refresh_interval.minutes(), 15);
        assert!(!preferences.refresh_enabled);
        assert!(args.api_url.is_none());
    }

    #[test]
    fn test_rejects_unknown_region() {
        assert!(Args::try_parse_from(["trend-watch", "--region", "atlantis"]).is_err());
    }
}
