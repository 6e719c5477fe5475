//! Dashboard data types
//!
//! Trending keywords, interest series and the refresh interval.

use crate::consts::cli_consts::refresh::{
    DEFAULT_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

/// A search term the provider currently ranks as trending for a region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrendingKeyword(String);

impl TrendingKeyword {
    /// Title of the single display column keywords are shown under.
    pub const COLUMN: &'static str = "Keyword";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TrendingKeyword {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TrendingKeyword {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for TrendingKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One sample of relative search interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestPoint {
    pub timestamp: DateTime<Utc>,
    /// Provider-relative score, 0 to 100.
    pub value: u32,
    /// The provider marks the latest bucket as partial while it is still filling.
    pub is_partial: bool,
}

/// Chronological interest samples for exactly one keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestSeries {
    pub keyword: String,
    pub points: Vec<InterestPoint>,
}

impl InterestSeries {
    pub fn new(keyword: impl Into<String>, mut points: Vec<InterestPoint>) -> Self {
        points.sort_by_key(|point| point.timestamp);
        Self {
            keyword: keyword.into(),
            points,
        }
    }

    /// An empty series for `keyword`, used when a fetch failed.
    pub fn empty(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Chart coordinates: unix seconds on x, interest score on y.
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|point| (point.timestamp.timestamp() as f64, point.value as f64))
            .collect()
    }

    /// First and last timestamp of the series.
    pub fn time_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.timestamp, last.timestamp))
    }

    pub fn peak(&self) -> Option<&InterestPoint> {
        self.points.iter().max_by_key(|point| point.value)
    }

    pub fn latest(&self) -> Option<&InterestPoint> {
        self.points.last()
    }
}

/// Auto-refresh interval in whole minutes, always within [1, 60].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u32")]
pub struct RefreshInterval(u32);

impl RefreshInterval {
    /// Builds an interval, clamping out-of-range values into [1, 60].
    pub fn new(minutes: i64) -> Self {
        let clamped = minutes.clamp(MIN_INTERVAL_MINUTES as i64, MAX_INTERVAL_MINUTES as i64);
        Self(clamped as u32)
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0 as u64 * 60)
    }

    pub fn increment(&self) -> Self {
        Self::new(self.0 as i64 + 1)
    }

    pub fn decrement(&self) -> Self {
        Self::new(self.0 as i64 - 1)
    }
}

impl Default for RefreshInterval {
    fn default() -> Self {
        Self(DEFAULT_INTERVAL_MINUTES)
    }
}

impl From<i64> for RefreshInterval {
    fn from(minutes: i64) -> Self {
        Self::new(minutes)
    }
}

impl From<RefreshInterval> for u32 {
    fn from(interval: RefreshInterval) -> Self {
        interval.0
    }
}

impl Display for RefreshInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} min", self.0)
    }
}
