//! Google Trends Client
//!
//! A client for the Google Trends web API, covering trending searches and
//! interest over time.

use crate::consts::cli_consts::trends::{
    COOKIE_GEO, HOST_LANGUAGE, TIMESERIES_WIDGET_ID, TZ_OFFSET_MINUTES, request_timeout,
};
use crate::environment::Environment;
use crate::trends::error::TrendsError;
use crate::trends::{InterestTable, TimelineRow, TrendsProvider};
use chrono::{TimeZone, Utc};
use reqwest::{Client, ClientBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("trend-watch/", env!("CARGO_PKG_VERSION"));

const TRENDING_SEARCHES_ENDPOINT: &str = "hottrends/visualize/internal/data";
const EXPLORE_ENDPOINT: &str = "api/explore";
const MULTILINE_ENDPOINT: &str = "api/widgetdata/multiline";

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    #[serde(default)]
    widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    #[serde(default)]
    token: String,
    #[serde(default)]
    request: Value,
}

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: TimelineData,
}

#[derive(Debug, Deserialize)]
struct TimelineData {
    #[serde(rename = "timelineData", default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
struct TimelinePoint {
    time: String,
    #[serde(default)]
    value: Vec<u32>,
    #[serde(rename = "isPartial", default)]
    is_partial: bool,
}

#[derive(Debug, Clone)]
pub struct TrendsClient {
    client: Client,
    environment: Environment,
}

impl TrendsClient {
    /// Builds the HTTP client. Cookies are kept so the session cookie from
    /// [`TrendsProvider::initialize`] rides along on later calls.
    pub fn new(environment: Environment) -> Result<Self, TrendsError> {
        let client = ClientBuilder::new()
            .connect_timeout(request_timeout())
            .timeout(request_timeout())
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.trends_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, TrendsError> {
        if !response.status().is_success() {
            return Err(TrendsError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_text(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String, TrendsError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).query(query).send().await?;
        let response = Self::handle_response_status(response).await?;
        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, TrendsError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::handle_response_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_text(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String, TrendsError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        let response = self.client.post(&url).query(query).send().await?;
        let response = Self::handle_response_status(response).await?;
        Ok(response.text().await?)
    }
}

/// Drops the anti-XSSI guard (`)]}'` and friends) the API puts before its JSON.
fn strip_xssi_prefix(body: &str) -> &str {
    match body.find(['{', '[']) {
        Some(start) => &body[start..],
        None => body,
    }
}

fn explore_payload(keywords: &[String], timeframe: &str) -> Value {
    let comparison: Vec<Value> = keywords
        .iter()
        .map(|keyword| json!({ "keyword": keyword, "time": timeframe, "geo": "" }))
        .collect();
    json!({ "comparisonItem": comparison, "category": 0, "property": "" })
}

fn region_searches(
    mut by_region: HashMap<String, Vec<String>>,
    region_code: &str,
) -> Result<Vec<String>, TrendsError> {
    by_region.remove(region_code).ok_or_else(|| {
        TrendsError::Malformed(format!("no trending searches for region '{}'", region_code))
    })
}

fn parse_timeseries_widget(body: &str) -> Result<(Value, String), TrendsError> {
    let explore: ExploreResponse = serde_json::from_str(strip_xssi_prefix(body))?;
    explore
        .widgets
        .into_iter()
        .find(|widget| widget.id == TIMESERIES_WIDGET_ID)
        .map(|widget| (widget.request, widget.token))
        .ok_or_else(|| TrendsError::Malformed("explore response has no TIMESERIES widget".into()))
}

fn parse_timeline(body: &str, keywords: &[String]) -> Result<InterestTable, TrendsError> {
    let multiline: MultilineResponse = serde_json::from_str(strip_xssi_prefix(body))?;
    let mut rows = Vec::with_capacity(multiline.default.timeline_data.len());

    for point in multiline.default.timeline_data {
        let secs: i64 = point
            .time
            .parse()
            .map_err(|_| TrendsError::Malformed(format!("invalid timestamp '{}'", point.time)))?;
        let timestamp = Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| TrendsError::Malformed(format!("timestamp out of range: {}", secs)))?;
        if point.value.len() != keywords.len() {
            return Err(TrendsError::Malformed(format!(
                "expected {} values per row, got {}",
                keywords.len(),
                point.value.len()
            )));
        }
        rows.push(TimelineRow {
            timestamp,
            values: point.value,
            is_partial: point.is_partial,
        });
    }

    Ok(InterestTable {
        keywords: keywords.to_vec(),
        rows,
    })
}

#[async_trait::async_trait]
impl TrendsProvider for TrendsClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn initialize(&self) -> Result<(), TrendsError> {
        self.get_text("", &[("geo", COOKIE_GEO.to_string())])
            .await
            .map(|_| ())
    }

    async fn trending_searches(&self, region_code: &str) -> Result<Vec<String>, TrendsError> {
        let by_region = self.get_json(TRENDING_SEARCHES_ENDPOINT).await?;
        region_searches(by_region, region_code)
    }

    async fn interest_over_time(
        &self,
        keywords: &[String],
        timeframe: &str,
    ) -> Result<InterestTable, TrendsError> {
        let tz = TZ_OFFSET_MINUTES.to_string();
        let explore_query = [
            ("hl", HOST_LANGUAGE.to_string()),
            ("tz", tz.clone()),
            ("req", explore_payload(keywords, timeframe).to_string()),
        ];
        let explore_body = self.post_text(EXPLORE_ENDPOINT, &explore_query).await?;
        let (request, token) = parse_timeseries_widget(&explore_body)?;

        let multiline_query = [
            ("req", request.to_string()),
            ("token", token),
            ("tz", tz),
        ];
        let body = self.get_text(MULTILINE_ENDPOINT, &multiline_query).await?;
        parse_timeline(&body, keywords)
    }
}
