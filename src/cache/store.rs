// Cache store for the merged problems table.
// Flat CSV file, written atomically and replaced wholesale on refresh.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::data::MergedTable;
use crate::error::Result;

/// Reads and writes the cached table at a fixed path.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached table.
    ///
    /// Returns `None` when there is no cache file, when it cannot be read or
    /// parsed, or when it holds a table without columns. In each case the
    /// caller is expected to fetch fresh data.
    pub fn load(&self) -> Option<MergedTable> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable cache, ignoring");
                return None;
            }
        };

        if contents.trim().is_empty() {
            debug!(path = %self.path.display(), "cache holds no data");
            return None;
        }

        match MergedTable::from_csv(&contents) {
            Ok(table) => {
                debug!(rows = table.len(), columns = table.columns().len(), "loaded cache");
                Some(table)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt cache, ignoring");
                None
            }
        }
    }

    /// Overwrite the cache file with `table`.
    pub fn save(&self, table: &MergedTable) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let written = write_synced(&temp_path, table)
            .and_then(|()| fs::rename(&temp_path, &self.path).map_err(Into::into));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        debug!(path = %self.path.display(), rows = table.len(), "saved cache");
        Ok(())
    }

    /// Get the modification time of the cache file.
    pub fn modified_at(&self) -> io::Result<SystemTime> {
        fs::metadata(&self.path)?.modified()
    }
}

/// Write `table` to `path` and flush it to disk.
fn write_synced(path: &Path, table: &MergedTable) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    table.write_csv(&mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::tests::table;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CacheStore {
        CacheStore::new(dir.path().join("nested").join("merged_problems.csv"))
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let data = table(
            &["Title", "Frequency", "Topics", "Company", "SourceFile"],
            &[
                &["Two Sum", "100.0", "Array, Hash Table", "Google", "Google/5. All.csv"],
                &["LRU Cache", "", "", "Meta", "Meta/5. All.csv"],
            ],
        );

        store.save(&data).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.columns(), data.columns());
        assert_eq!(loaded.len(), data.len());
        assert_eq!(loaded, data);
        assert!(store.modified_at().is_ok());
    }

    #[test]
    fn test_save_replaces_previous() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store
            .save(&table(&["A", "B"], &[&["1", "2"], &["3", "4"]]))
            .unwrap();
        store.save(&table(&["C"], &[&["x"]])).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, table(&["C"], &[&["x"]]));
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        assert!(store_in(&temp_dir).load().is_none());
    }

    #[test]
    fn test_empty_table_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.save(&MergedTable::default()).unwrap();
        assert!(store.path().exists());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_cache_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "A,B\n1,2,3,4\n").unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        // A non-empty directory at the cache path makes the final rename fail.
        fs::create_dir_all(store.path().join("occupied")).unwrap();

        assert!(store.save(&table(&["A"], &[&["1"]])).is_err());
        assert!(!store.path().with_extension("tmp").exists());
        assert!(store.path().is_dir());
    }
}
