// Cache path utilities.
// Locates the merged table and log file under the platform cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

pub const TABLE_FILE_NAME: &str = "merged_problems.csv";
pub const LOG_FILE_NAME: &str = "leetfind.log";

/// Get the base cache directory (~/.cache/leetfind on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "leetfind").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Default location of the merged problems table.
pub fn table_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(TABLE_FILE_NAME))
}

/// Log file kept beside the cached table.
pub fn log_path_for(table_path: &std::path::Path) -> PathBuf {
    table_path
        .parent()
        .map(|dir| dir.join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}
