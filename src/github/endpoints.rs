// GitHub API endpoint functions.
// Tree listing for the configured branch and the `TableSource` binding.

use tracing::warn;

use crate::data::TableSource;
use crate::error::Result;

use super::client::GitHubClient;
use super::types::{TreeEntryType, TreeResponse};

impl GitHubClient {
    /// Get the full recursive git tree of the configured branch.
    pub async fn get_tree(&mut self) -> Result<TreeResponse> {
        let endpoint = self.config().tree_endpoint();
        let response = self
            .get_with_params(&endpoint, &[("recursive", "1")])
            .await?;
        let tree: TreeResponse = response.json().await?;

        if tree.truncated {
            warn!(
                entries = tree.tree.len(),
                "tree listing was truncated by GitHub; some files will be missing"
            );
        }

        Ok(tree)
    }
}

/// Paths of the file entries in `tree`, in listing order.
pub fn blob_paths(tree: TreeResponse) -> Vec<String> {
    tree.tree
        .into_iter()
        .filter(|entry| entry.entry_type == TreeEntryType::Blob)
        .map(|entry| entry.path)
        .collect()
}

impl TableSource for GitHubClient {
    async fn list_paths(&mut self) -> Result<Vec<String>> {
        let tree = self.get_tree().await?;
        Ok(blob_paths(tree))
    }

    async fn fetch_text(&mut self, path: &str) -> Result<String> {
        self.get_raw(path).await
    }
}
