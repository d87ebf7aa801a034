// GitHub API response types.
// Defines structs for deserializing the git trees listing.

use serde::{Deserialize, Serialize};

/// Kind of object in a git tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TreeEntryType {
    #[default]
    Blob,
    Tree,
    Commit,
    #[serde(other)]
    Unknown,
}

/// One entry of a recursive tree listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type", default)]
    pub entry_type: TreeEntryType,
    pub sha: Option<String>,
    pub size: Option<u64>,
}

/// Response of `GET /repos/{owner}/{repo}/git/trees/{sha}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeResponse {
    pub sha: Option<String>,
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    /// Set when GitHub cut the listing short.
    #[serde(default)]
    pub truncated: bool,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

impl RateLimit {
    /// Whether any rate limit headers have been seen yet.
    pub fn is_known(&self) -> bool {
        self.limit > 0
    }
}
