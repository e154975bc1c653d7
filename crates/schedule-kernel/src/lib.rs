//! Schedule Kernel: weekly grid composition for a course catalog.
//!
//! Turns catalog subjects into colored blocks on a fixed weekly grid.
//!
//! ## Pieces
//!
//! - [`Grid`]: 6 days × 16 hourly rows, addressable by (day, hour)
//! - [`ColorAssignor`]: stable pastel color per subject code
//! - [`PlacementEngine`]: places a subject's selected group onto the grid
//! - [`ScheduleSummary`]: credits and per-day totals for what is on the grid
//!
//! Everything here is synchronous and I/O free. Fetching catalog data and
//! drawing the grid live in the application crate.

pub mod catalog;
pub mod color;
pub mod config;
pub mod grid;
pub mod placement;
pub mod summary;

pub use catalog::{Day, Group, Session, Subject};
pub use color::{Color, ColorAssignor};
pub use config::{AppConfig, ConfigError};
pub use grid::{Cell, Grid, GridLayout, GridRow, PlacedBlock};
pub use placement::{PlacementEngine, PlacementOutcome, SelectionStrategy, SkipReason};
pub use summary::{CreditLoad, ScheduleSummary};
