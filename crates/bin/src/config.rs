//! Data directory and logging configuration.
//!
//! Record files are looked up in a platform-specific data directory unless
//! `--data-dir` (or `FINBRO_DATA_DIR`) points elsewhere.

use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Get the default data directory path.
///
/// Uses platform-specific data directories:
/// - Linux: `~/.local/share/finbro/`
/// - macOS: `~/Library/Application Support/finbro/`
/// - Windows: `%APPDATA%\finbro\`
pub(crate) fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("finbro")
}

/// Get the configured data directory, preferring an explicit override.
pub(crate) fn resolve_data_dir(override_dir: Option<&Path>) -> PathBuf {
    override_dir.map_or_else(default_data_dir, Path::to_path_buf)
}

/// Default log filter when `RUST_LOG` is unset.
pub(crate) const fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "finbro=debug" } else { "finbro=info" }
}

/// Install the stderr log subscriber.
pub(crate) fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_override() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/records")));
        assert_eq!(dir, PathBuf::from("/tmp/records"));
    }

    #[test]
    fn test_default_data_dir_ends_with_finbro() {
        assert!(resolve_data_dir(None).ends_with("finbro"));
    }

    #[test]
    fn test_default_log_filter() {
        assert_eq!(default_log_filter(false), "finbro=info");
        assert_eq!(default_log_filter(true), "finbro=debug");
    }
}
