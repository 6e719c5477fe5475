// Module declarations
mod action;
mod app;
pub mod dashboard;
pub mod splash;
// Re-exports for external use
pub use action::Action;
pub use app::{App, Preferences, UIConfig, run};
