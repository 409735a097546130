//! Change notifications
//!
//! Every structural change is bracketed by a begin event ("about to be")
//! delivered before storage is touched and an end event delivered after the
//! mutation completes. Both carry the inclusive `first..=last` range of the
//! affected rows or columns. Value edits raise a single
//! [`GridEvent::ValueChanged`] after the value has been written.
//!
//! Observers run synchronously while the model's lock is held. They receive a
//! [`GridRead`] view of the locked storage and must not call back into the
//! [`GridModel`](crate::GridModel) that notified them; doing so deadlocks.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Direction of a structural change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Rows inserted or removed
    Row,
    /// Columns inserted or removed
    Column,
}

/// A notification raised by the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum GridEvent {
    RowsAboutToBeInserted { first: usize, last: usize },
    RowsInserted { first: usize, last: usize },
    RowsAboutToBeRemoved { first: usize, last: usize },
    RowsRemoved { first: usize, last: usize },
    ColumnsAboutToBeInserted { first: usize, last: usize },
    ColumnsInserted { first: usize, last: usize },
    ColumnsAboutToBeRemoved { first: usize, last: usize },
    ColumnsRemoved { first: usize, last: usize },
    /// The value at one cell changed
    ValueChanged { row: usize, column: usize },
}

impl GridEvent {
    /// Axis of a structural event, `None` for value changes
    pub fn axis(&self) -> Option<Axis> {
        use GridEvent::*;
        match self {
            RowsAboutToBeInserted { .. }
            | RowsInserted { .. }
            | RowsAboutToBeRemoved { .. }
            | RowsRemoved { .. } => Some(Axis::Row),
            ColumnsAboutToBeInserted { .. }
            | ColumnsInserted { .. }
            | ColumnsAboutToBeRemoved { .. }
            | ColumnsRemoved { .. } => Some(Axis::Column),
            ValueChanged { .. } => None,
        }
    }

    /// Inclusive index range of a structural event
    pub fn range(&self) -> Option<(usize, usize)> {
        use GridEvent::*;
        match *self {
            RowsAboutToBeInserted { first, last }
            | RowsInserted { first, last }
            | RowsAboutToBeRemoved { first, last }
            | RowsRemoved { first, last }
            | ColumnsAboutToBeInserted { first, last }
            | ColumnsInserted { first, last }
            | ColumnsAboutToBeRemoved { first, last }
            | ColumnsRemoved { first, last } => Some((first, last)),
            ValueChanged { .. } => None,
        }
    }

    /// Whether this opens a begin/end bracket
    pub fn is_begin(&self) -> bool {
        self.closing().is_some()
    }

    /// Whether this closes a begin/end bracket
    pub fn is_end(&self) -> bool {
        use GridEvent::*;
        matches!(
            self,
            RowsInserted { .. }
                | RowsRemoved { .. }
                | ColumnsInserted { .. }
                | ColumnsRemoved { .. }
        )
    }

    /// The end event that must follow this begin event
    pub fn closing(&self) -> Option<GridEvent> {
        use GridEvent::*;
        match *self {
            RowsAboutToBeInserted { first, last } => Some(RowsInserted { first, last }),
            RowsAboutToBeRemoved { first, last } => Some(RowsRemoved { first, last }),
            ColumnsAboutToBeInserted { first, last } => Some(ColumnsInserted { first, last }),
            ColumnsAboutToBeRemoved { first, last } => Some(ColumnsRemoved { first, last }),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        use GridEvent::*;
        match self {
            RowsAboutToBeInserted { .. } => "rowsAboutToBeInserted",
            RowsInserted { .. } => "rowsInserted",
            RowsAboutToBeRemoved { .. } => "rowsAboutToBeRemoved",
            RowsRemoved { .. } => "rowsRemoved",
            ColumnsAboutToBeInserted { .. } => "columnsAboutToBeInserted",
            ColumnsInserted { .. } => "columnsInserted",
            ColumnsAboutToBeRemoved { .. } => "columnsAboutToBeRemoved",
            ColumnsRemoved { .. } => "columnsRemoved",
            ValueChanged { .. } => "valueChanged",
        }
    }
}

impl fmt::Display for GridEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.range()) {
            (_, Some((first, last))) => write!(f, "{}({}, {})", self.name(), first, last),
            (GridEvent::ValueChanged { row, column }, None) => {
                write!(f, "{}({}, {})", self.name(), row, column)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Read access to grid storage
pub trait GridRead {
    /// Number of rows
    fn row_count(&self) -> usize;

    /// Width shared by every row
    fn column_count(&self) -> usize;

    /// Value at a cell, `None` when out of range
    fn cell_value(&self, row: usize, column: usize) -> Option<&str>;
}

/// Receiver of grid notifications
pub trait GridObserver: Send + Sync {
    /// Called for every event, inside the model's exclusive section
    fn notify(&self, event: &GridEvent, grid: &dyn GridRead);
}

impl<F> GridObserver for F
where
    F: Fn(&GridEvent, &dyn GridRead) + Send + Sync,
{
    fn notify(&self, event: &GridEvent, grid: &dyn GridRead) {
        self(event, grid)
    }
}

/// Handle returned by [`GridModel::subscribe`](crate::GridModel::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

/// An event together with the grid shape visible when it was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoggedEvent {
    pub event: GridEvent,
    pub row_count: usize,
    pub column_count: usize,
}

/// Observer that records every notification it receives.
///
/// Clones share the same log, so one clone can be subscribed while another
/// is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<LoggedEvent>>>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded entries, oldest first
    pub fn entries(&self) -> Vec<LoggedEvent> {
        self.lock().clone()
    }

    /// Recorded events without the shape information
    pub fn events(&self) -> Vec<GridEvent> {
        self.lock().iter().map(|entry| entry.event).collect()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drain the log, returning what was recorded
    pub fn take(&self) -> Vec<LoggedEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LoggedEvent>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GridObserver for EventLog {
    fn notify(&self, event: &GridEvent, grid: &dyn GridRead) {
        self.lock().push(LoggedEvent {
            event: *event,
            row_count: grid.row_count(),
            column_count: grid.column_count(),
        });
    }
}
