//! Utility modules for error handling and configuration

pub mod config;
pub mod error;
pub mod paths;

// Re-export for convenience
pub use config::ClientSettings;
pub use error::{ClipfetchError, Failure, FailureKind};
pub use paths::get_data_dir;
