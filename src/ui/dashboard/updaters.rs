//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::state::DashboardState;

use crate::events::{Event as DashboardEvent, EventType, Source};

impl DashboardState {
    /// Update the dashboard state with a new tick and any queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: &DashboardEvent) {
        match event.source {
            Source::Keywords => self.keywords_error = Self::error_message(event),
            Source::Interest => self.interest_error = Self::error_message(event),
            Source::Client => {
                if event.event_type == EventType::Error {
                    self.init_error = Some(event.msg.clone());
                }
            }
            Source::Refresh => {}
        }
    }

    /// Error text carried by a failure event; success events clear it.
    fn error_message(event: &DashboardEvent) -> Option<String> {
        match event.event_type {
            EventType::Error => Some(event.msg.clone()),
            _ => None,
        }
    }
}
