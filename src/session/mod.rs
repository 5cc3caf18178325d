//! Session orchestration module

pub mod actor;
pub mod messages;
pub mod state;

// Re-export for convenience
pub use actor::SessionActor;
pub use messages::{SessionCommand, SessionEvent};
pub use state::AppState;
