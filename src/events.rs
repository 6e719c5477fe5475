//! Event System
//!
//! Types and implementations for dashboard events and logging

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

/// Which part of the dashboard produced an event.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// Trending-searches fetches.
    Keywords,
    /// Interest-over-time fetches.
    Interest,
    /// Provider session setup.
    Client,
    /// Auto-refresh scheduling.
    Refresh,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn keywords_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Keywords, msg, event_type, log_level)
    }

    pub fn interest_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Interest, msg, event_type, log_level)
    }

    pub fn client_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Client, msg, event_type, log_level)
    }

    pub fn refresh(msg: String) -> Self {
        Self::new(Source::Refresh, msg, EventType::Refresh, LogLevel::Info)
    }

    pub fn is_error(&self) -> bool {
        self.event_type == EventType::Error
    }

    pub fn should_display(&self) -> bool {
        // Always show success and error events
        if matches!(self.event_type, EventType::Success | EventType::Error) {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

/// Event sending utilities shared by the controller and the refresh loop
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_keywords_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::keywords_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_interest_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::interest_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_client_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::client_with_level(message, event_type, log_level))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_always_displayed() {
        let event = Event::keywords_with_level(
            "Failed to fetch trending searches".to_string(),
            EventType::Error,
            LogLevel::Warn,
        );
        assert!(event.is_error());
        assert!(event.should_display());
        assert_eq!(event.source, Source::Keywords);
    }

    #[test]
    fn test_display_includes_type_and_message() {
        let event = Event::refresh("Next refresh in 5 min".to_string());
        let rendered = event.to_string();
        assert!(rendered.starts_with("Refresh ["));
        assert!(rendered.ends_with("Next refresh in 5 min"));
    }
}
