use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::FeedError;

pub fn get_log_file() -> Result<PathBuf, FeedError> {
    // Check the XDG_CACHE_HOME environment variable first
    let base_cache_dir = env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".cache")))
        .or_else(dirs::cache_dir)
        .ok_or_else(|| FeedError::Config("Could not find a cache directory".to_string()))?;

    let app_cache_dir = base_cache_dir.join("visafeed");

    fs::create_dir_all(&app_cache_dir)
        .map_err(|e| FeedError::Io(format!("Failed to create cache directory: {}", e)))?;

    Ok(app_cache_dir.join("visafeed.log"))
}

/// Routes `log` records into a file; the terminal belongs to the feed screen.
pub fn init_logging(path: Option<&Path>) -> Result<PathBuf, FeedError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => get_log_file()?,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| FeedError::Io(format!("Failed to open log file {:?}: {}", path, e)))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "visafeed=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| FeedError::Config(format!("Failed to install logger: {}", e)))?;

    Ok(path)
}
