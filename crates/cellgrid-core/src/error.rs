//! Error types for cellgrid-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cellgrid-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Row index out of bounds
    #[error("Row index {0} out of bounds (count: {1})")]
    RowOutOfBounds(usize, usize),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (count: {1})")]
    ColumnOutOfBounds(usize, usize),

    /// Rejected grid configuration
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),

    /// Role id with no matching [`Role`](crate::Role)
    #[error("Unknown role id: {0}")]
    UnknownRole(i32),
}

impl Error {
    /// Create an invalid-configuration error with a message
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Whether this error reports a coordinate outside the grid
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            Error::RowOutOfBounds(..) | Error::ColumnOutOfBounds(..)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::RowOutOfBounds(10, 4).to_string(),
            "Row index 10 out of bounds (count: 4)"
        );
        assert_eq!(Error::UnknownRole(7).to_string(), "Unknown role id: 7");
        assert_eq!(
            Error::invalid_config("max_size must be >= 1").to_string(),
            "Invalid grid configuration: max_size must be >= 1"
        );
    }

    #[test]
    fn test_is_out_of_bounds() {
        assert!(Error::RowOutOfBounds(1, 1).is_out_of_bounds());
        assert!(Error::ColumnOutOfBounds(3, 2).is_out_of_bounds());
        assert!(!Error::UnknownRole(2).is_out_of_bounds());
    }
}
