//! # cellgrid-core
//!
//! A small, resizable two-dimensional grid of string cells that notifies
//! observers of every structural and value change, so a view can patch its
//! rendering incrementally instead of re-reading the whole grid.
//!
//! This crate provides:
//! - [`GridModel`] - The grid: queries, value writes, row/column growth
//! - [`GridEvent`] and [`GridObserver`] - The notification protocol
//! - [`EventLog`] - An observer that records what it receives
//! - [`label`] - Label generation for newly created cells
//!
//! ## Example
//!
//! ```rust
//! use cellgrid_core::{GridModel, Role};
//!
//! let model = GridModel::new();
//! assert_eq!(model.cell_value(3, 3), "4D");
//!
//! model.add_column();
//! assert_eq!(model.cell_value(0, 4), "1E");
//!
//! assert!(model.set_cell_value(0, 0, "hello"));
//! assert_eq!(model.data(0, 0, Role::Display).as_deref(), Some("hello"));
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod event;
mod grid;
pub mod label;
pub mod model;
pub mod role;
pub mod snapshot;

// Re-exports for convenience
pub use cell::Cell;
pub use config::GridConfig;
pub use error::{Error, Result};
pub use event::{Axis, EventLog, GridEvent, GridObserver, GridRead, LoggedEvent, ObserverId};
pub use model::GridModel;
pub use role::{role_names, Role};
pub use snapshot::GridSnapshot;

/// Maximum number of rows and of columns (one label letter per column)
pub const MAX_SIZE: usize = 26;

/// Side of a default-constructed grid
pub const DEFAULT_INITIAL_SIZE: usize = 4;

/// Letter of the first column in a default-constructed grid
pub const DEFAULT_FIRST_LETTER: char = 'A';
