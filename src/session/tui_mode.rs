//! TUI mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::ui::{self, Preferences, UIConfig};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io};

/// Runs the application in TUI mode
///
/// This function handles:
/// 1. Terminal setup and cleanup
/// 2. UI application initialization and execution
/// 3. Returning the final selection so it can be persisted
///
/// # Arguments
/// * `session` - Session data from setup
/// * `preferences` - Initial region, keyword and refresh settings
/// * `with_background` - Whether to enable background colors
///
/// # Returns
/// * `Ok(Preferences)` - The settings in effect when the user quit
/// * `Err` - TUI mode failed
pub async fn run_tui_mode(
    session: SessionData,
    preferences: Preferences,
    with_background: bool,
) -> Result<Preferences, Box<dyn Error>> {
    print_session_starting("TUI", preferences.region);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Initialize the terminal with Crossterm backend
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = ui::App::new(
        session.controller,
        session.event_receiver,
        session.action_sender,
        session.action_receiver,
        preferences,
        UIConfig::new(with_background),
    );

    let result = ui::run(&mut terminal, &mut app).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle the result
    result?;

    print_session_shutdown();
    let final_preferences = app.preferences();
    // Cancels any pending refresh wait
    drop(app);
    print_session_exit_success();

    Ok(final_preferences)
}
