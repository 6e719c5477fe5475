//! User and timer actions consumed by the UI loop

use crate::region::Region;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single state-changing request. Actions are applied one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectRegion(Region),
    NextRegion,
    PreviousRegion,
    CursorUp,
    CursorDown,
    SelectHighlightedKeyword,
    ToggleRefresh,
    IncreaseInterval,
    DecreaseInterval,
    /// Manual full reload.
    RefreshNow,
    /// Delivered by the refresh loop when its interval elapses. Carries the
    /// generation of the wait that produced it.
    RefreshTick(u64),
    Quit,
}

impl Action {
    /// Maps a key press to an action, if it is bound.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Right | KeyCode::Tab => Some(Action::NextRegion),
            KeyCode::Left | KeyCode::BackTab => Some(Action::PreviousRegion),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
            KeyCode::Enter => Some(Action::SelectHighlightedKeyword),
            KeyCode::Char('a') => Some(Action::ToggleRefresh),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::IncreaseInterval),
            KeyCode::Char('-') => Some(Action::DecreaseInterval),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::RefreshNow),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                Region::ALL.get(index).copied().map(Action::SelectRegion)
            }
            _ => None,
        }
    }
}
