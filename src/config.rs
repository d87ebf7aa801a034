// Runtime configuration.
// Fixed source repository and cache location, overridable from the environment.

use std::path::PathBuf;

use crate::cache;

pub const DEFAULT_REPO: &str = "liquidslr/leetcode-company-wise-problems";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Where the problem lists come from and where the merged table is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Repository in `owner/name` form.
    pub repo: String,
    pub branch: String,
    /// Base URL of the GitHub REST API.
    pub api_base: String,
    /// Base URL for raw file contents (repo and branch are appended).
    pub raw_base: String,
    /// Location of the merged table cache file.
    pub cache_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            cache_path: cache::table_path()
                .unwrap_or_else(|| PathBuf::from(cache::TABLE_FILE_NAME)),
        }
    }
}

impl Config {
    /// Build configuration from `LEETFIND_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(repo) = var("LEETFIND_REPO") {
            config.repo = repo;
        }
        if let Some(branch) = var("LEETFIND_BRANCH") {
            config.branch = branch;
        }
        if let Some(api_base) = var("LEETFIND_API_BASE") {
            config.api_base = api_base.trim_end_matches('/').to_string();
        }
        if let Some(raw_base) = var("LEETFIND_RAW_BASE") {
            config.raw_base = raw_base.trim_end_matches('/').to_string();
        }
        if let Some(cache_path) = var("LEETFIND_CACHE") {
            config.cache_path = PathBuf::from(cache_path);
        }

        config
    }

    /// Endpoint for the recursive tree listing of the configured branch.
    pub fn tree_endpoint(&self) -> String {
        format!("/repos/{}/git/trees/{}", self.repo, self.branch)
    }

    /// Raw content URL for a path in the configured repository.
    pub fn raw_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.raw_base,
            self.repo,
            self.branch,
            path.trim_start_matches('/')
        )
    }

    /// Browser URL of the source repository.
    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}", self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.repo, DEFAULT_REPO);
        assert_eq!(config.branch, "main");
        assert!(config.cache_path.ends_with("merged_problems.csv"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("LEETFIND_REPO", "someone/problems"),
            ("LEETFIND_BRANCH", "dev"),
            ("LEETFIND_RAW_BASE", "http://localhost:8080/"),
            ("LEETFIND_CACHE", "/tmp/problems.csv"),
            ("LEETFIND_API_BASE", "   "),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.repo, "someone/problems");
        assert_eq!(config.branch, "dev");
        assert_eq!(config.raw_base, "http://localhost:8080");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.cache_path, PathBuf::from("/tmp/problems.csv"));
    }

    #[test]
    fn test_urls() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(
            config.tree_endpoint(),
            "/repos/liquidslr/leetcode-company-wise-problems/git/trees/main"
        );
        assert_eq!(
            config.raw_url("Google/5. All.csv"),
            "https://raw.githubusercontent.com/liquidslr/leetcode-company-wise-problems/main/Google/5. All.csv"
        );
    }
}
