//! Local data directory resolution
//!
//! All persisted state lives under a single platform-standard data directory,
//! never under a path relative to the current working directory. Relative
//! paths resolve to wrong locations when the binary is launched from an app
//! launcher or a service manager instead of a shell.

use std::path::PathBuf;
use tracing::debug;

/// Get the data directory for clipfetch.
///
/// Returns the platform data dir joined with `clipfetch` (e.g.
/// `~/.local/share/clipfetch` on Linux), falling back to `~/.clipfetch`,
/// with `/tmp/clipfetch` as a last resort. Creates the directory if it
/// doesn't exist.
pub fn get_data_dir() -> PathBuf {
    let dir = dirs::data_dir()
        .map(|base| base.join("clipfetch"))
        .or_else(|| dirs::home_dir().map(|home| home.join(".clipfetch")))
        .unwrap_or_else(|| PathBuf::from("/tmp/clipfetch"));

    // Ensure directory exists
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Warning: Failed to create data directory {:?}: {}", dir, e);
        eprintln!("Will attempt to use the directory anyway");
    }

    debug!("Data directory: {:?}", dir);
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_is_not_relative() {
        let path = get_data_dir();
        assert!(path.is_absolute(), "Data dir must be absolute path");
        assert!(
            path.to_string_lossy().contains("clipfetch"),
            "Path must be namespaced to clipfetch"
        );
    }

    #[test]
    fn test_data_dir_is_accessible() {
        let dir = get_data_dir();
        assert!(
            std::fs::metadata(&dir).is_ok(),
            "Data dir should be accessible after creation"
        );
    }
}
