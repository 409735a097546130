//! Rectangular cell storage
//!
//! Rows are stored in order, each as an ordered `Vec<Cell>`. Every row holds
//! exactly `columns` cells; the push/pop operations below are the only way
//! the shape changes and each one keeps that invariant.

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::event::GridRead;
use crate::label;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Grid {
    rows: Vec<Vec<Cell>>,
    columns: usize,
}

impl Grid {
    /// Square grid of side `size`, seeded with labels starting at `first`
    pub fn seeded(first: char, size: usize) -> Self {
        let rows = (0..size)
            .map(|row| label::seed_row(first, row, size))
            .collect();
        Self {
            rows,
            columns: size,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn check(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows.len() {
            return Err(Error::RowOutOfBounds(row, self.rows.len()));
        }
        if col >= self.columns {
            return Err(Error::ColumnOutOfBounds(col, self.columns));
        }
        Ok(())
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell> {
        self.check(row, col)?;
        Ok(&self.rows[row][col])
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        self.check(row, col)?;
        Ok(&mut self.rows[row][col])
    }

    /// Last cell of the last row
    pub fn last_cell(&self) -> Option<&Cell> {
        self.rows.last().and_then(|cells| cells.last())
    }

    pub fn push_row(&mut self, cells: Vec<Cell>) {
        assert_eq!(cells.len(), self.columns, "row width mismatch");
        self.rows.push(cells);
    }

    pub fn pop_row(&mut self) -> Option<Vec<Cell>> {
        self.rows.pop()
    }

    /// Append one cell to every row, `cells[i]` going to row `i`
    pub fn push_column(&mut self, cells: Vec<Cell>) {
        assert_eq!(cells.len(), self.rows.len(), "column height mismatch");
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row.push(cell);
        }
        self.columns += 1;
    }

    /// Remove the last cell of every row
    pub fn pop_column(&mut self) -> Option<Vec<Cell>> {
        if self.columns == 0 {
            return None;
        }
        let removed = self
            .rows
            .iter_mut()
            .filter_map(|row| row.pop())
            .collect();
        self.columns -= 1;
        Some(removed)
    }

    pub fn values(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.value().to_string()).collect())
            .collect()
    }

    #[cfg(test)]
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.columns)
    }
}

impl GridRead for Grid {
    fn row_count(&self) -> usize {
        self.rows()
    }

    fn column_count(&self) -> usize {
        self.columns()
    }

    fn cell_value(&self, row: usize, column: usize) -> Option<&str> {
        self.cell(row, column).ok().map(Cell::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seeded() {
        let grid = Grid::seeded('A', 3);
        assert_eq!(
            grid.values(),
            vec![
                vec!["1A", "1B", "1C"],
                vec!["2A", "2B", "2C"],
                vec!["3A", "3B", "3C"],
            ]
        );
        assert_eq!(grid.last_cell().map(Cell::value), Some("3C"));
    }

    #[test]
    fn test_check() {
        let grid = Grid::seeded('A', 2);
        assert!(grid.check(1, 1).is_ok());
        assert_eq!(grid.check(2, 0), Err(Error::RowOutOfBounds(2, 2)));
        assert_eq!(grid.check(0, 5), Err(Error::ColumnOutOfBounds(5, 2)));
    }

    #[test]
    fn test_push_pop_keep_rectangular() {
        let mut grid = Grid::seeded('A', 2);
        grid.push_column(label::seed_column("C", 2));
        assert_eq!(grid.columns(), 3);
        assert!(grid.is_rectangular());

        grid.push_row(label::seed_row('A', 2, 3));
        assert_eq!(grid.rows(), 3);
        assert!(grid.is_rectangular());

        let removed = grid.pop_column().unwrap();
        assert_eq!(removed, vec![Cell::new("1C"), Cell::new("2C"), Cell::new("3C")]);
        assert_eq!(grid.columns(), 2);
        assert!(grid.is_rectangular());
    }

    #[test]
    #[should_panic(expected = "row width mismatch")]
    fn test_push_row_rejects_wrong_width() {
        let mut grid = Grid::seeded('A', 2);
        grid.push_row(vec![Cell::new("3A")]);
    }

    #[test]
    fn test_read_trait() {
        let grid = Grid::seeded('A', 2);
        let read: &dyn GridRead = &grid;
        assert_eq!(read.row_count(), 2);
        assert_eq!(read.column_count(), 2);
        assert_eq!(read.cell_value(1, 0), Some("2A"));
        assert_eq!(read.cell_value(2, 0), None);
    }
}
