//! Session setup and initialization

use crate::consts::cli_consts::{ACTION_QUEUE_SIZE, EVENT_QUEUE_SIZE};
use crate::controller::TrendController;
use crate::environment::Environment;
use crate::events::{Event, EventSender};
use crate::trends::{TrendsClient, TrendsProvider};
use crate::ui::Action;
use std::error::Error;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Fetches trends and reports failures as events
    pub controller: TrendController,
    /// Event receiver for controller events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sender handed to the refresh loop
    pub action_sender: mpsc::Sender<Action>,
    /// Receiver drained by the UI loop
    pub action_receiver: mpsc::Receiver<Action>,
}

/// Builds a session around the given provider.
pub fn session_with_provider(provider: Box<dyn TrendsProvider>) -> SessionData {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (action_sender, action_receiver) = mpsc::channel::<Action>(ACTION_QUEUE_SIZE);

    SessionData {
        controller: TrendController::new(provider, EventSender::new(event_sender)),
        event_receiver,
        action_sender,
        action_receiver,
    }
}

/// Sets up a session against the Google Trends endpoints of `env`
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub fn setup_session(env: Environment) -> Result<SessionData, Box<dyn Error>> {
    let client = TrendsClient::new(env)?;
    Ok(session_with_provider(Box::new(client)))
}
