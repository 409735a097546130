//! Point-in-time copy of grid values

use std::fmt;

/// All cell values of a grid, row by row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    rows: Vec<Vec<String>>,
}

impl GridSnapshot {
    /// Create a snapshot from row values
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Row values
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (0 for an empty snapshot)
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Value at a cell
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
    }

    /// Values of one column, top to bottom
    pub fn column(&self, col: usize) -> Option<Vec<&str>> {
        self.rows
            .iter()
            .map(|cells| cells.get(col).map(String::as_str))
            .collect()
    }

    /// Consume the snapshot, returning the row values
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl fmt::Display for GridSnapshot {
    /// Renders the values as a left-aligned table, one line per row
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .flatten()
            .map(|value| value.chars().count())
            .max()
            .unwrap_or(0);

        for row in &self.rows {
            let line = row
                .iter()
                .map(|value| format!("{:<width$}", value, width = width))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
