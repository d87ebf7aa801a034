// Merged problem table.
// Column-union concatenation plus CSV parsing and serialization.

use std::collections::BTreeSet;
use std::io::Write;

use crate::error::{LeetfindError, Result};

/// A single value; `None` is an empty or absent field.
pub type Cell = Option<String>;

pub const COMPANY_COLUMN: &str = "Company";
pub const SOURCE_FILE_COLUMN: &str = "SourceFile";
pub const FREQUENCY_COLUMN: &str = "Frequency";

/// Ordered rows sharing one ordered set of column names.
///
/// Every row holds exactly one cell per column. A table without columns is
/// the "no data" state and is distinct from a table whose rows were all
/// filtered away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl MergedTable {
    /// Create a table with the given columns and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns: dedupe_columns(columns),
            rows: Vec::new(),
        }
    }

    /// Create a table from columns and rows; short rows are padded with `None`.
    #[cfg(test)]
    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the table has at least one column.
    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Look up a cell by row index and column name.
    #[cfg(test)]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)?.as_deref()
    }

    /// Append a row, padding it with `None` up to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) -> Result<()> {
        if row.len() > self.columns.len() {
            return Err(LeetfindError::Other(format!(
                "expected at most {} fields, found {}",
                self.columns.len(),
                row.len()
            )));
        }
        row.resize(self.columns.len(), None);
        self.rows.push(row);
        Ok(())
    }

    /// Set every row's value in `column`, adding the column if it is new.
    pub fn fill_column(&mut self, column: &str, value: &str) {
        let index = self.ensure_column(column);
        for row in &mut self.rows {
            row[index] = Some(value.to_string());
        }
    }

    /// Append all rows of `other`, unioning the column sets.
    ///
    /// Columns first seen in `other` go after the existing ones; rows that
    /// lack a column hold `None` there.
    pub fn append(&mut self, other: MergedTable) {
        let mapping: Vec<usize> = other
            .columns
            .iter()
            .map(|column| self.ensure_column(column))
            .collect();

        let width = self.columns.len();
        for row in other.rows {
            let mut mapped = vec![None; width];
            for (cell, &target) in row.into_iter().zip(&mapping) {
                mapped[target] = cell;
            }
            self.rows.push(mapped);
        }
    }

    /// Concatenate tables in order.
    pub fn concat(tables: impl IntoIterator<Item = MergedTable>) -> MergedTable {
        tables.into_iter().fold(MergedTable::default(), |mut acc, table| {
            acc.append(table);
            acc
        })
    }

    /// Copy of this table keeping only rows for which `keep` is true.
    pub fn retain_rows(&self, mut keep: impl FnMut(&[Cell]) -> bool) -> MergedTable {
        MergedTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| keep(row.as_slice())).cloned().collect(),
        }
    }

    /// Column indices in display order: `Company` first, the rest unchanged.
    pub fn display_columns(&self) -> Vec<usize> {
        let company = self.column_index(COMPANY_COLUMN);
        company
            .into_iter()
            .chain((0..self.columns.len()).filter(|&i| Some(i) != company))
            .collect()
    }

    /// Distinct non-empty `Company` values, sorted.
    pub fn companies(&self) -> Vec<String> {
        let Some(index) = self.column_index(COMPANY_COLUMN) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row[index].as_deref())
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Parse comma-separated text whose first row is the header.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(LeetfindError::Other("no header row".to_string()));
        }

        let mut table = Self::new(headers);
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: Vec<Cell> = record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect();
            table
                .push_row(row)
                .map_err(|e| LeetfindError::Other(format!("line {}: {}", line, e)))?;
        }

        Ok(table)
    }

    /// Write the table as CSV with a header row. A table without columns
    /// writes nothing.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        if self.columns.is_empty() {
            return Ok(());
        }

        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn ensure_column(&mut self, column: &str) -> usize {
        if let Some(index) = self.column_index(column) {
            return index;
        }
        self.columns.push(column.to_string());
        for row in &mut self.rows {
            row.push(None);
        }
        self.columns.len() - 1
    }
}

/// Rename repeated headers to `name.1`, `name.2`, ... so names stay unique.
fn dedupe_columns(columns: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        let mut name = column.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", column, n);
            n += 1;
        }
        seen.push(name);
    }
    seen
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a table from string literals; `""` becomes `None`.
    pub(crate) fn table(columns: &[&str], rows: &[&[&str]]) -> MergedTable {
        MergedTable::with_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|v| (!v.is_empty()).then(|| v.to_string()))
                        .collect()
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_from_csv() {
        let text = "Difficulty,Title,Frequency\nEASY,Two Sum,100.0\nMEDIUM,\"Add, Two Numbers\",87.5\n";
        let table = MergedTable::from_csv(text).unwrap();

        assert_eq!(table.columns(), ["Difficulty", "Title", "Frequency"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "Title"), Some("Add, Two Numbers"));
        assert_eq!(table.cell(0, "Frequency"), Some("100.0"));
    }

    #[test]
    fn test_from_csv_pads_short_rows() {
        let table = MergedTable::from_csv("A,B,C\n1,2\n4,,6\n").unwrap();
        assert_eq!(table.rows()[0], vec![Some("1".to_string()), Some("2".to_string()), None]);
        assert_eq!(table.rows()[1][1], None);
    }

    #[test]
    fn test_from_csv_rejects_long_rows() {
        let err = MergedTable::from_csv("A,B\n1,2,3\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_from_csv_rejects_empty_input() {
        assert!(MergedTable::from_csv("").is_err());
    }

    #[test]
    fn test_duplicate_headers_renamed() {
        let table = MergedTable::from_csv("Title,Title,Title\na,b,c\n").unwrap();
        assert_eq!(table.columns(), ["Title", "Title.1", "Title.2"]);
    }

    #[test]
    fn test_append_unions_columns() {
        let mut merged = table(&["Title", "Frequency"], &[&["Two Sum", "90"]]);
        merged.append(table(&["Title", "Topics"], &[&["LRU Cache", "Design"]]));

        assert_eq!(merged.columns(), ["Title", "Frequency", "Topics"]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.rows()[0][2], None);
        assert_eq!(merged.rows()[1][1], None);
        assert_eq!(merged.cell(1, "Topics"), Some("Design"));
    }

    #[test]
    fn test_concat_empty_is_columnless() {
        let merged = MergedTable::concat(Vec::new());
        assert!(!merged.has_columns());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_fill_column_overwrites() {
        let mut t = table(&["Company", "Title"], &[&["old", "Two Sum"]]);
        t.fill_column("Company", "Google");
        t.fill_column("SourceFile", "google/All.csv");

        assert_eq!(t.columns(), ["Company", "Title", "SourceFile"]);
        assert_eq!(t.cell(0, "Company"), Some("Google"));
        assert_eq!(t.cell(0, "SourceFile"), Some("google/All.csv"));
    }

    #[test]
    fn test_display_columns_company_first() {
        let t = table(&["Title", "Frequency", "Company", "SourceFile"], &[]);
        assert_eq!(t.display_columns(), vec![2, 0, 1, 3]);

        let no_company = table(&["Title", "Frequency"], &[]);
        assert_eq!(no_company.display_columns(), vec![0, 1]);
    }

    #[test]
    fn test_companies_sorted_distinct() {
        let t = table(
            &["Company", "Title"],
            &[&["Meta", "a"], &["Amazon", "b"], &["Meta", "c"], &["", "d"]],
        );
        assert_eq!(t.companies(), vec!["Amazon", "Meta"]);
    }

    #[test]
    fn test_write_csv() {
        let t = table(&["Title", "Topics"], &[&["Two Sum", ""], &["a,b", "x"]]);
        let mut out = Vec::new();
        t.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Title,Topics\nTwo Sum,\n\"a,b\",x\n");

        let mut out = Vec::new();
        MergedTable::default().write_csv(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
