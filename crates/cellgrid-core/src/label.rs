//! Label generation for newly created cells
//!
//! A label is the display string a cell gets when it is created: its 1-based
//! row number followed by its column letter (`"1A"`, `"12D"`). Labels are
//! stored as plain strings, so growing the grid by a column has to parse the
//! letter back out of an existing cell before it can compute the next one.

use std::fmt;

use crate::cell::Cell;

/// Letter of the column at `column` (0-based), counting from `first`.
///
/// `first` must be an ASCII letter; [`GridConfig::validate`] guarantees the
/// result stays a letter for every column below the cap.
///
/// [`GridConfig::validate`]: crate::GridConfig::validate
pub fn column_letter(first: char, column: usize) -> char {
    debug_assert!(first.is_ascii_alphabetic());
    (first as u8).wrapping_add(column as u8) as char
}

/// Label for a cell created at `row` (0-based) in the column `letter`.
///
/// ```
/// use cellgrid_core::label::cell_label;
///
/// assert_eq!(cell_label(0, 'A'), "1A");
/// assert_eq!(cell_label(11, "D"), "12D");
/// ```
pub fn cell_label<L: fmt::Display>(row: usize, letter: L) -> String {
    format!("{}{}", row + 1, letter)
}

/// Derive the column part of a new column's labels from the label of an
/// existing cell.
///
/// Leading row digits are stripped and the last remaining character is
/// advanced by one code point. If the advanced character is alphabetic it
/// becomes the new column letter; otherwise the whole stripped suffix is
/// reused as-is. Returns `None` when nothing is left after stripping the
/// digits.
///
/// ```
/// use cellgrid_core::label::next_column_suffix;
///
/// assert_eq!(next_column_suffix("4D").as_deref(), Some("E"));
/// assert_eq!(next_column_suffix("26Y").as_deref(), Some("Z"));
/// assert_eq!(next_column_suffix("1A2").as_deref(), Some("A2"));
/// assert_eq!(next_column_suffix("12"), None);
/// ```
pub fn next_column_suffix(label: &str) -> Option<String> {
    let suffix = label.trim_start_matches(|c: char| c.is_ascii_digit());
    let last = suffix.chars().next_back()?;

    match char::from_u32(last as u32 + 1) {
        Some(next) if next.is_alphabetic() => Some(next.to_string()),
        _ => Some(suffix.to_string()),
    }
}

/// Cells of a new row at `row` (0-based) spanning `columns` columns.
pub fn seed_row(first: char, row: usize, columns: usize) -> Vec<Cell> {
    (0..columns)
        .map(|col| Cell::new(cell_label(row, column_letter(first, col))))
        .collect()
}

/// Cells of a new column labeled with `suffix`, one per row for `rows` rows.
pub fn seed_column(suffix: &str, rows: usize) -> Vec<Cell> {
    (0..rows).map(|row| Cell::new(cell_label(row, suffix))).collect()
}
