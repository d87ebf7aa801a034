// leetfind: browse LeetCode interview questions by company.
// Entry point: configuration, file logging, and the terminal lifecycle.

mod app;
mod cache;
mod config;
mod data;
mod error;
mod github;
mod state;
mod ui;

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::app::App;
use crate::config::Config;

/// Send tracing output to a log file beside the cache. Stdout belongs to
/// the TUI, so nothing is logged if the file cannot be opened.
fn init_logging(log_path: &Path) {
    if let Some(dir) = log_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_path) else {
        return;
    };

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let config = Config::from_env();
    init_logging(&cache::log_path_for(&config.cache_path));
    info!(
        repo = %config.repo,
        branch = %config.branch,
        cache = %config.cache_path.display(),
        "startup"
    );

    let mut app = App::new(config)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    if let Err(e) = &result {
        warn!("terminal error: {}", e);
    }
    result?;

    info!("shutdown");
    Ok(())
}
