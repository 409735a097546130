//! The grid model
//!
//! [`GridModel`] owns the cell storage behind a single mutex. Every public
//! operation, reads included, holds the lock for its whole body, so
//! operations are fully serialized. Notifications are delivered while the
//! lock is held:
//!
//! - begin events before storage is mutated,
//! - end events after the mutation and before the lock is released,
//! - value-change events after the value is written.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use tracing::{debug, trace, warn};

use crate::config::GridConfig;
use crate::error::Result;
use crate::event::{GridEvent, GridObserver, ObserverId};
use crate::grid::Grid;
use crate::label;
use crate::role::Role;
use crate::snapshot::GridSnapshot;

struct Inner {
    grid: Grid,
    observers: Vec<(ObserverId, Arc<dyn GridObserver>)>,
    next_observer: u64,
}

impl Inner {
    fn emit(&self, event: GridEvent) {
        for (_, observer) in &self.observers {
            observer.notify(&event, &self.grid);
        }
    }
}

/// A resizable two-dimensional grid of string cells that notifies observers
/// of every structural and value change.
///
/// ```
/// use cellgrid_core::{EventLog, GridEvent, GridModel};
///
/// let model = GridModel::new();
/// let log = EventLog::new();
/// model.subscribe(log.clone());
///
/// model.add_row();
/// assert_eq!(model.row_count(), 5);
/// assert_eq!(model.cell_value(4, 0), "5A");
/// assert_eq!(
///     log.events(),
///     vec![
///         GridEvent::RowsAboutToBeInserted { first: 4, last: 4 },
///         GridEvent::RowsInserted { first: 4, last: 4 },
///     ]
/// );
/// ```
///
/// Observers must not call back into the model that notified them: the lock
/// is not reentrant and such a call deadlocks. Use the [`GridRead`] view
/// passed to [`GridObserver::notify`] instead. Formatting the model with
/// `{:?}` is the one exception; while the lock is held it prints
/// `grid: <locked>` instead of the shape.
///
/// [`GridRead`]: crate::GridRead
pub struct GridModel {
    config: GridConfig,
    inner: Mutex<Inner>,
}

impl GridModel {
    /// Create a 4x4 grid seeded `"1A"` through `"4D"`
    pub fn new() -> Self {
        Self::build(GridConfig::default())
    }

    /// Create a grid from a configuration
    pub fn with_config(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GridConfig) -> Self {
        let grid = Grid::seeded(config.first_letter, config.initial_size);
        debug!(
            size = config.initial_size,
            max = config.max_size,
            first = %config.first_letter,
            "grid created"
        );
        Self {
            config,
            inner: Mutex::new(Inner {
                grid,
                observers: Vec::new(),
                next_observer: 0,
            }),
        }
    }

    /// The configuration this grid was built with
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    // === Observers ===

    /// Register an observer; it receives every event from now on
    pub fn subscribe<O: GridObserver + 'static>(&self, observer: O) -> ObserverId {
        let mut inner = self.lock();
        let id = ObserverId(inner.next_observer);
        inner.next_observer += 1;
        inner.observers.push((id, Arc::new(observer)));
        trace!(id = id.0, "observer subscribed");
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(registered, _)| *registered != id);
        inner.observers.len() != before
    }

    // === Queries ===

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.lock().grid.rows()
    }

    /// Number of columns, shared by every row
    pub fn column_count(&self) -> usize {
        self.lock().grid.columns()
    }

    /// Current value of a cell
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn cell_value(&self, row: usize, col: usize) -> String {
        self.try_cell_value(row, col)
            .unwrap_or_else(|err| panic!("{}", err))
    }

    /// Current value of a cell, or an out-of-bounds error
    pub fn try_cell_value(&self, row: usize, col: usize) -> Result<String> {
        let inner = self.lock();
        Ok(inner.grid.cell(row, col)?.value().to_string())
    }

    /// Cell data for a role. Only [`Role::Display`] carries data.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn data(&self, row: usize, col: usize, role: Role) -> Option<String> {
        let value = self.cell_value(row, col);
        match role {
            Role::Display => Some(value),
            other => {
                warn!(role = %other, "data requested for a role without data");
                None
            }
        }
    }

    /// Copy of every value, taken under a single lock
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.lock().grid.values())
    }

    // === Value Writes ===

    /// Set a cell's value.
    ///
    /// Returns `false` without notifying when the value is unchanged.
    /// Otherwise writes the value, raises [`GridEvent::ValueChanged`] for
    /// that cell and returns `true`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range. Coordinates are checked
    /// before storage is touched.
    pub fn set_cell_value<S: Into<String>>(&self, row: usize, col: usize, value: S) -> bool {
        self.try_set_cell_value(row, col, value)
            .unwrap_or_else(|err| panic!("{}", err))
    }

    /// Like [`set_cell_value`](Self::set_cell_value) but reports
    /// out-of-range coordinates as an error.
    pub fn try_set_cell_value<S: Into<String>>(
        &self,
        row: usize,
        col: usize,
        value: S,
    ) -> Result<bool> {
        let value = value.into();
        let mut inner = self.lock();

        let cell = inner.grid.cell_mut(row, col)?;
        if cell.value() == value {
            trace!(row, col, "value unchanged");
            return Ok(false);
        }
        cell.set_value(value);

        inner.emit(GridEvent::ValueChanged { row, column: col });
        trace!(row, col, "value changed");
        Ok(true)
    }

    /// Write a cell under a role. Only [`Role::Edit`] is accepted; any other
    /// role returns `false` and leaves the grid untouched.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn set_data<S: Into<String>>(
        &self,
        row: usize,
        col: usize,
        value: S,
        role: Role,
    ) -> bool {
        if role != Role::Edit {
            let inner = self.lock();
            inner.grid.check(row, col).unwrap_or_else(|err| panic!("{}", err));
            debug!(role = %role, "write rejected for non-edit role");
            return false;
        }
        self.set_cell_value(row, col, value)
    }

    // === Structural Changes ===

    /// Append a row labeled with the next row number.
    ///
    /// No-op (returns `false`) when there are no columns or the row cap is
    /// reached.
    pub fn add_row(&self) -> bool {
        let mut inner = self.lock();
        let rows = inner.grid.rows();
        let columns = inner.grid.columns();
        if columns == 0 || rows >= self.config.max_size {
            debug!(rows, columns, max = self.config.max_size, "add_row skipped");
            return false;
        }

        let cells = label::seed_row(self.config.first_letter, rows, columns);
        inner.emit(GridEvent::RowsAboutToBeInserted {
            first: rows,
            last: rows,
        });
        inner.grid.push_row(cells);
        inner.emit(GridEvent::RowsInserted {
            first: rows,
            last: rows,
        });

        debug!(row = rows, "row added");
        true
    }

    /// Remove the last row. No-op (returns `false`) when only one row is left.
    pub fn remove_row(&self) -> bool {
        let mut inner = self.lock();
        let rows = inner.grid.rows();
        if rows <= 1 {
            debug!(rows, "remove_row skipped");
            return false;
        }

        let last = rows - 1;
        inner.emit(GridEvent::RowsAboutToBeRemoved { first: last, last });
        inner.grid.pop_row();
        inner.emit(GridEvent::RowsRemoved { first: last, last });

        debug!(row = last, "row removed");
        true
    }

    /// Append a column to every row.
    ///
    /// The new letter is derived from the last cell of the last row (see
    /// [`label::next_column_suffix`]); each row's new cell is labeled with
    /// its own row number. If that cell holds no letter to advance, the
    /// positional letter for the new column is used.
    ///
    /// No-op (returns `false`) when there are no rows or the column cap is
    /// reached.
    pub fn add_column(&self) -> bool {
        let mut inner = self.lock();
        let rows = inner.grid.rows();
        let columns = inner.grid.columns();
        if rows == 0 || columns >= self.config.max_size {
            debug!(rows, columns, max = self.config.max_size, "add_column skipped");
            return false;
        }

        let suffix = inner
            .grid
            .last_cell()
            .and_then(|cell| label::next_column_suffix(cell.value()))
            .unwrap_or_else(|| {
                label::column_letter(self.config.first_letter, columns).to_string()
            });
        let cells = label::seed_column(&suffix, rows);

        inner.emit(GridEvent::ColumnsAboutToBeInserted {
            first: columns,
            last: columns,
        });
        inner.grid.push_column(cells);
        inner.emit(GridEvent::ColumnsInserted {
            first: columns,
            last: columns,
        });

        debug!(column = columns, suffix = %suffix, "column added");
        true
    }

    /// Remove the last column from every row. No-op (returns `false`) when
    /// only one column is left.
    pub fn remove_column(&self) -> bool {
        let mut inner = self.lock();
        let columns = inner.grid.columns();
        if columns <= 1 {
            debug!(columns, "remove_column skipped");
            return false;
        }

        let last = columns - 1;
        inner.emit(GridEvent::ColumnsAboutToBeRemoved { first: last, last });
        inner.grid.pop_column();
        inner.emit(GridEvent::ColumnsRemoved { first: last, last });

        debug!(column = last, "column removed");
        true
    }

    // A panicking observer poisons the lock, but storage is only mutated
    // after validation so the grid is still rectangular.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("GridModel");
        debug.field("config", &self.config);
        match self.inner.try_lock() {
            Ok(inner) => debug
                .field("rows", &inner.grid.rows())
                .field("columns", &inner.grid.columns())
                .field("observers", &inner.observers.len()),
            Err(TryLockError::Poisoned(poisoned)) => {
                let inner = poisoned.into_inner();
                debug
                    .field("rows", &inner.grid.rows())
                    .field("columns", &inner.grid.columns())
                    .field("observers", &inner.observers.len())
            }
            Err(TryLockError::WouldBlock) => debug.field("grid", &format_args!("<locked>")),
        };
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventLog, GridRead};
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn model_with_log() -> (GridModel, EventLog) {
        let model = GridModel::new();
        let log = EventLog::new();
        model.subscribe(log.clone());
        (model, log)
    }

    #[test]
    fn test_new_model() {
        let model = GridModel::new();
        assert_eq!(model.row_count(), 4);
        assert_eq!(model.column_count(), 4);
        assert_eq!(model.cell_value(0, 0), "1A");
        assert_eq!(model.cell_value(3, 3), "4D");
        assert_eq!(model.cell_value(2, 1), "3B");
    }

    #[test]
    fn test_with_config() {
        let model = GridModel::with_config(
            GridConfig::new()
                .with_initial_size(2)
                .with_max_size(16)
                .with_first_letter('k'),
        )
        .unwrap();
        assert_eq!(
            model.snapshot().into_rows(),
            vec![vec!["1k", "1l"], vec!["2k", "2l"]]
        );

        let err = GridModel::with_config(GridConfig::new().with_initial_size(30)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        // 'k'..='z' leaves room for 16 columns only
        let err = GridModel::with_config(GridConfig::new().with_first_letter('k')).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_add_row_labels() {
        let (model, log) = model_with_log();
        assert!(model.add_row());
        assert_eq!(model.row_count(), 5);
        assert_eq!(model.snapshot().rows()[4], vec!["5A", "5B", "5C", "5D"]);
        assert_eq!(
            log.events(),
            vec![
                GridEvent::RowsAboutToBeInserted { first: 4, last: 4 },
                GridEvent::RowsInserted { first: 4, last: 4 },
            ]
        );
    }

    #[test]
    fn test_add_column_labels() {
        let (model, log) = model_with_log();
        assert!(model.add_column());
        assert_eq!(model.column_count(), 5);
        assert_eq!(
            model.snapshot().column(4),
            Some(vec!["1E", "2E", "3E", "4E"])
        );
        assert_eq!(
            log.events(),
            vec![
                GridEvent::ColumnsAboutToBeInserted { first: 4, last: 4 },
                GridEvent::ColumnsInserted { first: 4, last: 4 },
            ]
        );
    }

    #[test]
    fn test_add_column_follows_edited_last_cell() {
        let model = GridModel::new();
        assert!(model.set_cell_value(3, 3, "4K"));
        assert!(model.add_column());
        assert_eq!(model.snapshot().column(4), Some(vec!["1L", "2L", "3L", "4L"]));
    }

    #[test]
    fn test_add_column_reuses_suffix_that_cannot_advance() {
        let model = GridModel::new();
        assert!(model.set_cell_value(3, 3, "4A2"));
        assert!(model.add_column());
        assert_eq!(model.snapshot().column(4), Some(vec!["1A2", "2A2", "3A2", "4A2"]));

        // the new last cell carries the same suffix forward
        assert!(model.add_column());
        assert_eq!(model.snapshot().column(5), Some(vec!["1A2", "2A2", "3A2", "4A2"]));
    }

    #[test]
    fn test_add_column_falls_back_to_position() {
        let model = GridModel::new();
        assert!(model.set_cell_value(3, 3, "123"));
        assert!(model.add_column());
        assert_eq!(model.cell_value(0, 4), "1E");
    }

    #[test]
    fn test_remove_row_and_column() {
        let (model, log) = model_with_log();
        assert!(model.remove_row());
        assert!(model.remove_column());
        assert_eq!(model.row_count(), 3);
        assert_eq!(model.column_count(), 3);
        assert_eq!(model.cell_value(2, 2), "3C");
        assert_eq!(
            log.events(),
            vec![
                GridEvent::RowsAboutToBeRemoved { first: 3, last: 3 },
                GridEvent::RowsRemoved { first: 3, last: 3 },
                GridEvent::ColumnsAboutToBeRemoved { first: 3, last: 3 },
                GridEvent::ColumnsRemoved { first: 3, last: 3 },
            ]
        );
    }

    #[test]
    fn test_shrink_stops_at_one() {
        let (model, log) = model_with_log();
        while model.remove_row() {}
        while model.remove_column() {}
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.column_count(), 1);
        log.clear();

        let before = model.snapshot();
        assert!(!model.remove_row());
        assert!(!model.remove_column());
        assert_eq!(model.snapshot(), before);
        assert!(log.is_empty());
    }

    #[test]
    fn test_growth_stops_at_cap() {
        let (model, log) = model_with_log();
        while model.add_row() {}
        while model.add_column() {}
        assert_eq!(model.row_count(), 26);
        assert_eq!(model.column_count(), 26);
        assert_eq!(model.cell_value(25, 25), "26Z");
        log.clear();

        let before = model.snapshot();
        assert!(!model.add_row());
        assert!(!model.add_column());
        assert_eq!(model.snapshot(), before);
        assert!(log.is_empty());
    }

    #[test]
    fn test_set_cell_value() {
        let (model, log) = model_with_log();
        assert!(!model.set_cell_value(0, 0, "1A"));
        assert!(log.is_empty());

        assert!(model.set_cell_value(0, 0, "X"));
        assert_eq!(model.cell_value(0, 0), "X");
        assert_eq!(log.events(), vec![GridEvent::ValueChanged { row: 0, column: 0 }]);
    }

    #[test]
    #[should_panic(expected = "Row index 10 out of bounds")]
    fn test_set_cell_value_out_of_range_panics() {
        GridModel::new().set_cell_value(10, 10, "X");
    }

    #[test]
    #[should_panic(expected = "Column index 4 out of bounds")]
    fn test_cell_value_out_of_range_panics() {
        GridModel::new().cell_value(0, 4);
    }

    #[test]
    fn test_try_variants() {
        let (model, log) = model_with_log();
        assert_eq!(
            model.try_set_cell_value(10, 10, "X"),
            Err(Error::RowOutOfBounds(10, 4))
        );
        assert_eq!(
            model.try_cell_value(0, 9),
            Err(Error::ColumnOutOfBounds(9, 4))
        );
        assert_eq!(model.try_cell_value(1, 1), Ok("2B".to_string()));
        assert!(log.is_empty());
    }

    #[test]
    fn test_roles() {
        let (model, log) = model_with_log();
        assert_eq!(model.data(0, 1, Role::Display), Some("1B".to_string()));
        assert_eq!(model.data(0, 1, Role::Edit), None);

        assert!(!model.set_data(0, 1, "Y", Role::Display));
        assert_eq!(model.cell_value(0, 1), "1B");
        assert!(log.is_empty());

        assert!(model.set_data(0, 1, "Y", Role::Edit));
        assert_eq!(model.data(0, 1, Role::Display), Some("Y".to_string()));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_observers_see_shape_at_delivery() {
        let (model, log) = model_with_log();
        model.add_row();
        model.remove_column();

        let shapes: Vec<(usize, usize)> = log
            .entries()
            .iter()
            .map(|entry| (entry.row_count, entry.column_count))
            .collect();
        assert_eq!(shapes, vec![(4, 4), (5, 4), (5, 4), (5, 3)]);
    }

    #[test]
    fn test_observer_reads_new_cells_at_end() {
        let model = GridModel::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        model.subscribe(move |event: &GridEvent, grid: &dyn GridRead| {
            if let GridEvent::ColumnsInserted { first, .. } = *event {
                let values: Vec<String> = (0..grid.row_count())
                    .filter_map(|row| grid.cell_value(row, first).map(str::to_string))
                    .collect();
                sink.lock().unwrap().push(values);
            }
        });

        model.add_column();
        assert_eq!(*seen.lock().unwrap(), vec![vec!["1E", "2E", "3E", "4E"]]);
    }

    #[test]
    fn test_unsubscribe() {
        let (model, log) = model_with_log();
        let other = EventLog::new();
        let id = model.subscribe(other.clone());

        model.add_row();
        assert!(model.unsubscribe(id));
        assert!(!model.unsubscribe(id));
        model.add_row();

        assert_eq!(other.len(), 2);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GridModel>();
    }

    #[test]
    fn test_debug() {
        let debug = format!("{:?}", GridModel::new());
        assert!(debug.contains("rows: 4"));
        assert!(debug.contains("observers: 0"));
    }

    #[test]
    fn test_debug_while_locked_does_not_block() {
        let model = GridModel::new();
        let guard = model.lock();
        let debug = format!("{:?}", model);
        drop(guard);
        assert!(debug.contains("grid: <locked>"));
        assert!(!debug.contains("rows:"));
    }
}
