// Results state for the Problems tab.
// Holds the filtered view of the current table snapshot and its scroll position.

use ratatui::widgets::TableState;

use crate::data::{FilterCriteria, MergedTable, apply_filters};

/// Loading state for data that arrives from the network or cache.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Loading,
    Loaded(T),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Outcome of filtering the current snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsView {
    /// No table, or a table without columns.
    #[default]
    NoData,
    Matches(MergedTable),
    /// The criteria could not be applied (for example a missing column).
    Failed(String),
}

/// Kind of a user-facing notice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ResultsState {
    pub view: ResultsView,
    pub table_state: TableState,
}

impl ResultsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-run the filter pass over `table` and reset the scroll position.
    pub fn recompute(&mut self, table: &MergedTable, criteria: &FilterCriteria) {
        self.view = if !table.has_columns() {
            ResultsView::NoData
        } else {
            match apply_filters(table, criteria) {
                Ok(matches) => ResultsView::Matches(matches),
                Err(e) => ResultsView::Failed(e.to_string()),
            }
        };
        self.reset_selection();
    }

    /// Forget any filtered rows.
    pub fn clear(&mut self) {
        self.view = ResultsView::NoData;
        self.reset_selection();
    }

    pub fn row_count(&self) -> usize {
        match &self.view {
            ResultsView::Matches(table) => table.len(),
            _ => 0,
        }
    }

    /// Notice describing the current view.
    pub fn notice(&self) -> Notice {
        match &self.view {
            ResultsView::NoData => Notice::new(
                NoticeKind::Info,
                "No data loaded. Press Ctrl-R to fetch from GitHub.",
            ),
            ResultsView::Matches(table) if table.is_empty() => Notice::new(
                NoticeKind::Warning,
                "No results found. Try adjusting your search or filter.",
            ),
            ResultsView::Matches(table) => Notice::new(
                NoticeKind::Success,
                format!("Found {} matching result(s)", table.len()),
            ),
            ResultsView::Failed(e) => Notice::new(NoticeKind::Error, e.clone()),
        }
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self, page: usize) {
        self.move_selection(page as isize);
    }

    pub fn page_up(&mut self, page: usize) {
        self.move_selection(-(page as isize));
    }

    pub fn select_first(&mut self) {
        if self.row_count() > 0 {
            self.table_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.table_state.select(Some(count - 1));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let target = (current + delta).clamp(0, count as isize - 1);
        self.table_state.select(Some(target as usize));
    }

    fn reset_selection(&mut self) {
        let selection = (self.row_count() > 0).then_some(0);
        self.table_state = TableState::default().with_selected(selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RecencyBucket;
    use crate::data::table::tests::table;

    fn sample() -> MergedTable {
        table(
            &["Title", "Frequency", "Company"],
            &[
                &["Two Sum", "85", "Google"],
                &["LRU Cache", "50", "Meta"],
                &["Jump Game", "70", "Google"],
            ],
        )
    }

    #[test]
    fn test_recompute_success_notice() {
        let mut results = ResultsState::new();
        results.recompute(&sample(), &FilterCriteria::default());

        assert_eq!(results.row_count(), 3);
        assert_eq!(results.notice().kind, NoticeKind::Success);
        assert_eq!(results.notice().message, "Found 3 matching result(s)");
        assert_eq!(results.table_state.selected(), Some(0));
    }

    #[test]
    fn test_empty_result_warns() {
        let mut results = ResultsState::new();
        let criteria = FilterCriteria {
            query: "nothing like this".to_string(),
            ..Default::default()
        };
        results.recompute(&sample(), &criteria);

        assert!(matches!(results.view, ResultsView::Matches(ref t) if t.is_empty()));
        assert_eq!(results.notice().kind, NoticeKind::Warning);
        assert_eq!(results.table_state.selected(), None);
    }

    #[test]
    fn test_columnless_table_is_no_data() {
        let mut results = ResultsState::new();
        let criteria = FilterCriteria {
            recency: RecencyBucket::Last3Months,
            ..Default::default()
        };
        results.recompute(&MergedTable::default(), &criteria);

        assert_eq!(results.view, ResultsView::NoData);
        assert_eq!(results.notice().kind, NoticeKind::Info);
    }

    #[test]
    fn test_missing_column_is_error_notice() {
        let mut results = ResultsState::new();
        let criteria = FilterCriteria {
            recency: RecencyBucket::Last6Months,
            ..Default::default()
        };
        results.recompute(&table(&["Title"], &[&["Two Sum"]]), &criteria);

        assert!(matches!(results.view, ResultsView::Failed(_)));
        assert_eq!(results.notice().kind, NoticeKind::Error);
        assert!(results.notice().message.contains("Frequency"));
    }

    #[test]
    fn test_selection_clamps() {
        let mut results = ResultsState::new();
        results.recompute(&sample(), &FilterCriteria::default());

        results.page_down(10);
        assert_eq!(results.table_state.selected(), Some(2));
        results.select_next();
        assert_eq!(results.table_state.selected(), Some(2));
        results.page_up(10);
        assert_eq!(results.table_state.selected(), Some(0));
        results.select_last();
        results.select_prev();
        assert_eq!(results.table_state.selected(), Some(1));
        results.select_first();
        assert_eq!(results.table_state.selected(), Some(0));
    }
}
