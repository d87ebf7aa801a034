// Fetch-and-merge pipeline.
// Lists matching problem files, loads each one, and concatenates the results.

use std::fmt;

use tracing::{error, info, warn};

use crate::cache::CacheStore;
use crate::error::{LeetfindError, Result};

use super::table::{COMPANY_COLUMN, MergedTable, SOURCE_FILE_COLUMN};

/// Filename suffix of the per-company "all questions" lists.
pub const MATCH_SUFFIX: &str = "All.csv";

/// A remote tree of CSV files.
#[allow(async_fn_in_trait)]
pub trait TableSource {
    /// Every path in the tree, in listing order.
    async fn list_paths(&mut self) -> Result<Vec<String>>;

    /// Raw text of the file at `path`.
    async fn fetch_text(&mut self, path: &str) -> Result<String>;
}

/// Why a single file was left out of the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Fetch(String),
    Parse(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Fetch(e) => write!(f, "fetch failed: {}", e),
            SkipReason::Parse(e) => write!(f, "parse failed: {}", e),
        }
    }
}

/// Result of loading one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Loaded(MergedTable),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub path: String,
    pub reason: SkipReason,
}

/// Merged table plus what happened to each input.
#[derive(Debug)]
pub struct MergeReport {
    pub table: MergedTable,
    /// Number of files that contributed rows.
    pub loaded: usize,
    pub skipped: Vec<SkippedSource>,
    /// Set when the merged table could not be written to the cache.
    pub cache_error: Option<LeetfindError>,
}

/// Result of a full refresh from the remote source.
#[derive(Debug)]
pub struct RefreshReport {
    /// Set when the directory listing failed; the merge then ran on no paths.
    pub listing_error: Option<LeetfindError>,
    pub merge: MergeReport,
}

/// Where the current table came from.
#[derive(Debug)]
pub enum DataLoad {
    Cached(MergedTable),
    Fetched(RefreshReport),
}

impl DataLoad {
    pub fn table(&self) -> &MergedTable {
        match self {
            DataLoad::Cached(table) => table,
            DataLoad::Fetched(report) => &report.merge.table,
        }
    }
}

/// Company name for a repository path: its first segment, capitalized.
pub fn company_from_path(path: &str) -> String {
    let segment = path.split('/').next().unwrap_or_default();
    capitalize(segment)
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// List the source tree and keep only paths ending in `All.csv`.
pub async fn list_matching_paths<S: TableSource>(source: &mut S) -> Result<Vec<String>> {
    let paths = source
        .list_paths()
        .await
        .map_err(|e| LeetfindError::DirectoryListFailed {
            reason: e.to_string(),
        })?;

    let total = paths.len();
    let matched: Vec<String> = paths
        .into_iter()
        .filter(|path| path.ends_with(MATCH_SUFFIX))
        .collect();

    info!(total, matched = matched.len(), "listed source tree");
    Ok(matched)
}

/// Fetch and parse one path, tagging its rows with company and source file.
pub async fn load_source<S: TableSource>(source: &mut S, path: &str) -> SourceOutcome {
    let text = match source.fetch_text(path).await {
        Ok(text) => text,
        Err(e) => return SourceOutcome::Skipped(SkipReason::Fetch(e.to_string())),
    };

    match MergedTable::from_csv(&text) {
        Ok(mut table) => {
            table.fill_column(COMPANY_COLUMN, &company_from_path(path));
            table.fill_column(SOURCE_FILE_COLUMN, path);
            SourceOutcome::Loaded(table)
        }
        Err(e) => SourceOutcome::Skipped(SkipReason::Parse(e.to_string())),
    }
}

/// Load every path in order, concatenate what loaded, and save it to `store`.
///
/// Failed paths are skipped and reported. The cache is overwritten even when
/// nothing loaded.
pub async fn fetch_and_merge<S: TableSource>(
    source: &mut S,
    paths: &[String],
    store: &CacheStore,
) -> MergeReport {
    let mut outcomes = Vec::with_capacity(paths.len());
    for path in paths {
        outcomes.push((path.clone(), load_source(source, path).await));
    }

    let mut tables = Vec::new();
    let mut skipped = Vec::new();
    for (path, outcome) in outcomes {
        match outcome {
            SourceOutcome::Loaded(table) => tables.push(table),
            SourceOutcome::Skipped(reason) => {
                warn!(%path, %reason, "skipped problem list");
                skipped.push(SkippedSource { path, reason });
            }
        }
    }

    let loaded = tables.len();
    let table = MergedTable::concat(tables);
    info!(
        loaded,
        skipped = skipped.len(),
        rows = table.len(),
        "merged problem lists"
    );

    let cache_error = store.save(&table).err();
    if let Some(e) = &cache_error {
        error!(path = %store.path().display(), error = %e, "failed to write cache");
    }

    MergeReport {
        table,
        loaded,
        skipped,
        cache_error,
    }
}

/// Re-list and re-fetch everything, replacing the cache.
pub async fn refresh<S: TableSource>(source: &mut S, store: &CacheStore) -> RefreshReport {
    let (paths, listing_error) = match list_matching_paths(source).await {
        Ok(paths) => (paths, None),
        Err(e) => {
            error!(error = %e, "directory listing failed");
            (Vec::new(), Some(e))
        }
    };

    let merge = fetch_and_merge(source, &paths, store).await;
    RefreshReport {
        listing_error,
        merge,
    }
}

/// Return the cached table if there is one, otherwise refresh.
pub async fn load_or_fetch<S: TableSource>(source: &mut S, store: &CacheStore) -> DataLoad {
    match store.load() {
        Some(table) => {
            info!(rows = table.len(), "using cached problems");
            DataLoad::Cached(table)
        }
        None => DataLoad::Fetched(refresh(source, store).await),
    }
}
