use crate::environment::Environment;
use crate::trends::error::TrendsError;
use chrono::{DateTime, Utc};

pub(crate) mod client;
pub use client::TrendsClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

/// One row of an interest-over-time table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub timestamp: DateTime<Utc>,
    /// One value per requested keyword, in request order.
    pub values: Vec<u32>,
    pub is_partial: bool,
}

/// Time-indexed table with one numeric column per requested keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestTable {
    pub keywords: Vec<String>,
    pub rows: Vec<TimelineRow>,
}

impl InterestTable {
    /// Index of the column holding `keyword`, if it was requested.
    pub fn column_index(&self, keyword: &str) -> Option<usize> {
        self.keywords.iter().position(|k| k == keyword)
    }
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TrendsProvider: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Prepares a provider session. Must succeed before the fetch calls are useful.
    async fn initialize(&self) -> Result<(), TrendsError>;

    /// Ranked trending search queries for a region code.
    async fn trending_searches(&self, region_code: &str) -> Result<Vec<String>, TrendsError>;

    /// Relative interest for `keywords` over `timeframe`.
    async fn interest_over_time(
        &self,
        keywords: &[String],
        timeframe: &str,
    ) -> Result<InterestTable, TrendsError>;
}
