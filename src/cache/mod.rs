// Cache module for local filesystem caching.
// Keeps the merged problems table between runs.

pub mod paths;
pub mod store;

pub use paths::{TABLE_FILE_NAME, log_path_for, table_path};
pub use store::CacheStore;
