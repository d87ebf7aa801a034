// Data module.
// Merged problem table, the fetch-and-merge pipeline, and the filter engine.

pub mod filter;
pub mod merge;
pub mod table;

pub use filter::{CompanyFilter, FilterCriteria, RecencyBucket, apply_filters};
pub use merge::{DataLoad, RefreshReport, TableSource, load_or_fetch, refresh};
pub use table::MergedTable;
