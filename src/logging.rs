// src/logging.rs

use flexi_logger::{FileSpec, FlexiLoggerError, Logger, LoggerHandle};
use std::path::{Path, PathBuf};

/// Where `logctl` writes its log file unless told otherwise.
pub fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("loggy")
}

/// File logging for the terminal client; stderr belongs to the UI.
///
/// The returned handle must stay alive for as long as logging is wanted.
pub fn init_client_logging(dir: &Path) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str("info")?
        .log_to_file(FileSpec::default().directory(dir).basename("logctl"))
        .format(flexi_logger::detailed_format)
        .start()
}

/// Stderr logging for the service, filtered by `RUST_LOG`.
pub fn init_server_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
