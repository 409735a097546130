//! Grid configuration

use crate::error::{Error, Result};
use crate::{DEFAULT_FIRST_LETTER, DEFAULT_INITIAL_SIZE, MAX_SIZE};

/// Shape and labeling parameters for a [`GridModel`](crate::GridModel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Side of the square grid built at construction
    pub initial_size: usize,
    /// Cap on both the row count and the column count
    pub max_size: usize,
    /// Letter of the first column
    pub first_letter: char,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_SIZE,
            max_size: MAX_SIZE,
            first_letter: DEFAULT_FIRST_LETTER,
        }
    }
}

impl GridConfig {
    /// Create the default configuration (4x4, capped at 26, starting at 'A')
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial side length
    pub fn with_initial_size(mut self, size: usize) -> Self {
        self.initial_size = size;
        self
    }

    /// Set the row/column cap
    pub fn with_max_size(mut self, max: usize) -> Self {
        self.max_size = max;
        self
    }

    /// Set the first column letter
    pub fn with_first_letter(mut self, letter: char) -> Self {
        self.first_letter = letter;
        self
    }

    /// Check that the configuration describes a grid whose every column up
    /// to the cap gets a single-letter label.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::invalid_config("max_size must be >= 1"));
        }
        if self.initial_size == 0 || self.initial_size > self.max_size {
            return Err(Error::invalid_config(format!(
                "initial_size {} must be within 1..={}",
                self.initial_size, self.max_size
            )));
        }
        if !self.first_letter.is_ascii_alphabetic() {
            return Err(Error::invalid_config(format!(
                "first_letter {:?} is not an ASCII letter",
                self.first_letter
            )));
        }

        let last = if self.first_letter.is_ascii_uppercase() {
            'Z'
        } else {
            'z'
        };
        let available = (last as usize) - (self.first_letter as usize) + 1;
        if self.max_size > available {
            return Err(Error::invalid_config(format!(
                "max_size {} needs more than the {} letters from {:?} to {:?}",
                self.max_size, available, self.first_letter, last
            )));
        }

        Ok(())
    }
}
