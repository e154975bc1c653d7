//! Catalog Schedule: browse a course catalog and compose a weekly timetable.
//!
//! ## Flow
//!
//! 1. [`CatalogClient`] fetches subject summaries and details over HTTP
//! 2. [`ScheduleBoard`] places fetched subjects onto one shared grid
//! 3. [`render_grid_text`] and the views turn the model into terminal text
//!
//! Grid layout, colors and placement rules live in `schedule_kernel`.

pub mod board;
pub mod catalog_client;
pub mod render;
pub mod views;

pub use board::{AddReport, ScheduleBoard};
pub use catalog_client::{CatalogClient, CatalogError};
pub use render::{render_grid_text, TextStyle};
pub use views::{filter_subjects, render_subject_detail, render_subject_list};
