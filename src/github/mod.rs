// GitHub module.
// Client and types for listing the problems repository and fetching raw files.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
