//! Cell type

use std::fmt;

/// A single grid cell holding one string value.
///
/// Cells carry no identity beyond their position in the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    value: String,
}

impl Cell {
    /// Create a new cell with a value
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the cell's value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the cell's value, returning the previous one
    pub fn set_value<S: Into<String>>(&mut self, value: S) -> String {
        std::mem::replace(&mut self.value, value.into())
    }

    /// Consume the cell, returning its value
    pub fn into_value(self) -> String {
        self.value
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::new(s)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::new(s)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
