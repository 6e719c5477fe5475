//! Trend fetching with user-facing error reporting
//!
//! Every provider call is attempted once. Failures are reported as error
//! events and replaced with an empty result, so callers never see an error
//! from the fetch operations.

use crate::consts::cli_consts::trends::LAST_DAY_TIMEFRAME;
use crate::environment::Environment;
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventSender, EventType};
use crate::logging::LogLevel;
use crate::model::{InterestPoint, InterestSeries, TrendingKeyword};
use crate::trends::TrendsProvider;
use crate::trends::error::TrendsError;

pub struct TrendController {
    provider: Box<dyn TrendsProvider>,
    event_sender: EventSender,
    error_classifier: ErrorClassifier,
}

impl TrendController {
    pub fn new(provider: Box<dyn TrendsProvider>, event_sender: EventSender) -> Self {
        Self {
            provider,
            event_sender,
            error_classifier: ErrorClassifier::new(),
        }
    }

    pub fn environment(&self) -> &Environment {
        self.provider.environment()
    }

    /// Prepares the provider session. Unlike the fetch calls this does return
    /// the error: without a session there is nothing to render this turn.
    pub async fn initialize(&self) -> Result<(), TrendsError> {
        match self.provider.initialize().await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.event_sender
                    .send_client_event(
                        format!("Failed to initialize Google Trends session: {}", e),
                        EventType::Error,
                        LogLevel::Error,
                    )
                    .await;
                Err(e)
            }
        }
    }

    /// Ranked trending keywords for `region_code`, or an empty list on failure.
    pub async fn fetch_trending_keywords(&self, region_code: &str) -> Vec<TrendingKeyword> {
        match self.provider.trending_searches(region_code).await {
            Ok(queries) => {
                self.event_sender
                    .send_keywords_event(
                        format!(
                            "Fetched {} trending searches for {}",
                            queries.len(),
                            region_code
                        ),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                queries.into_iter().map(TrendingKeyword::from).collect()
            }
            Err(e) => {
                let log_level = self.error_classifier.classify_fetch_error(&e);
                self.event_sender
                    .send_keywords_event(
                        format!("Failed to fetch trending searches: {}", e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
                Vec::new()
            }
        }
    }

    /// Interest in `keyword` over the last day, or an empty series on failure.
    pub async fn fetch_interest_over_time(&self, keyword: &str) -> InterestSeries {
        let keywords = vec![keyword.to_string()];
        let table = match self
            .provider
            .interest_over_time(&keywords, LAST_DAY_TIMEFRAME)
            .await
        {
            Ok(table) => table,
            Err(e) => {
                let log_level = self.error_classifier.classify_fetch_error(&e);
                self.event_sender
                    .send_interest_event(
                        format!("Failed to fetch interest for \"{}\": {}", keyword, e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
                return InterestSeries::empty(keyword);
            }
        };

        let Some(column) = table.column_index(keyword) else {
            self.event_sender
                .send_interest_event(
                    format!("Failed to fetch interest for \"{}\": missing column", keyword),
                    EventType::Error,
                    LogLevel::Error,
                )
                .await;
            return InterestSeries::empty(keyword);
        };

        let points: Vec<InterestPoint> = table
            .rows
            .into_iter()
            .filter_map(|row| {
                row.values.get(column).map(|value| InterestPoint {
                    timestamp: row.timestamp,
                    value: *value,
                    is_partial: row.is_partial,
                })
            })
            .collect();

        self.event_sender
            .send_interest_event(
                format!(
                    "Fetched {} interest points for \"{}\"",
                    points.len(),
                    keyword
                ),
                EventType::Success,
                LogLevel::Info,
            )
            .await;
        InterestSeries::new(keyword, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, Source};
    use crate::trends::{InterestTable, MockTrendsProvider, TimelineRow};
    use chrono::{TimeZone, Utc};
    use tokio::sync::mpsc;

    fn controller_with(mock: MockTrendsProvider) -> (TrendController, mpsc::Receiver<Event>) {
        let (sender, receiver) = mpsc::channel(16);
        (
            TrendController::new(Box::new(mock), EventSender::new(sender)),
            receiver,
        )
    }

    fn row(secs: i64, value: u32) -> TimelineRow {
        TimelineRow {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            values: vec![value],
            is_partial: false,
        }
    }

    #[tokio::test]
    async fn test_fetch_trending_keywords_preserves_rank() {
        let mut mock = MockTrendsProvider::new();
        mock.expect_trending_searches()
            .withf(|code| code == "taiwan")
            .times(1)
            .returning(|_| Ok(vec!["stock market".to_string(), "typhoon".to_string()]));
        let (controller, mut events) = controller_with(mock);

        let keywords = controller.fetch_trending_keywords("taiwan").await;

        assert_eq!(
            keywords,
            vec![TrendingKeyword::from("stock market"), TrendingKeyword::from("typhoon")]
        );
        let event = events.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Success);
    }

    #[tokio::test]
    async fn test_fetch_trending_keywords_failure_returns_empty() {
        let mut mock = MockTrendsProvider::new();
        mock.expect_trending_searches().times(1).returning(|_| {
            Err(TrendsError::Http {
                status: 503,
                message: "Service Unavailable".to_string(),
            })
        });
        let (controller, mut events) = controller_with(mock);

        let keywords = controller.fetch_trending_keywords("japan").await;

        assert!(keywords.is_empty());
        let event = events.try_recv().unwrap();
        assert_eq!(event.source, Source::Keywords);
        assert_eq!(event.event_type, EventType::Error);
        assert!(event.msg.contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_interest_uses_last_day_window() {
        let mut mock = MockTrendsProvider::new();
        mock.expect_interest_over_time()
            .withf(|keywords, timeframe| {
                keywords.len() == 1 && keywords[0] == "typhoon" && timeframe == "now 1-d"
            })
            .times(1)
            .returning(|keywords, _| {
                Ok(InterestTable {
                    keywords: keywords.to_vec(),
                    rows: vec![row(200, 90), row(100, 30)],
                })
            });
        let (controller, _events) = controller_with(mock);

        let series = controller.fetch_interest_over_time("typhoon").await;

        assert_eq!(series.keyword, "typhoon");
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].value, 30);
        assert_eq!(series.points[1].value, 90);
    }

    #[tokio::test]
    async fn test_fetch_interest_failure_returns_empty_series() {
        let mut mock = MockTrendsProvider::new();
        mock.expect_interest_over_time()
            .times(1)
            .returning(|_, _| Err(TrendsError::Malformed("truncated".to_string())));
        let (controller, mut events) = controller_with(mock);

        let series = controller.fetch_interest_over_time("typhoon").await;

        assert!(series.is_empty());
        assert_eq!(series.keyword, "typhoon");
        let event = events.try_recv().unwrap();
        assert_eq!(event.source, Source::Interest);
        assert_eq!(event.log_level, LogLevel::Error);
    }

    #[tokio::test]
    async fn test_fetch_interest_missing_column_is_empty() {
        let mut mock = MockTrendsProvider::new();
        mock.expect_interest_over_time().times(1).returning(|_, _| {
            Ok(InterestTable {
                keywords: vec!["other".to_string()],
                rows: vec![row(100, 30)],
            })
        });
        let (controller, _events) = controller_with(mock);

        assert!(controller.fetch_interest_over_time("typhoon").await.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_failure_is_reported() {
        let mut mock = MockTrendsProvider::new();
        mock.expect_initialize().times(1).returning(|| {
            Err(TrendsError::Http {
                status: 429,
                message: "Too Many Requests".to_string(),
            })
        });
        let (controller, mut events) = controller_with(mock);

        assert!(controller.initialize().await.is_err());
        let event = events.try_recv().unwrap();
        assert_eq!(event.source, Source::Client);
        assert!(event.is_error());
    }
}
