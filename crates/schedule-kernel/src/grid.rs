//! The weekly schedule grid: 6 days × 16 hourly rows (7:00 to 22:00).
//!
//! The grid is a declarative render model. It knows where blocks are anchored
//! and how many rows they span, but nothing about how a frontend draws them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Day;
use crate::color::Color;

/// First start hour shown on the grid.
pub const FIRST_HOUR: u32 = 7;

/// Last start hour shown on the grid.
pub const LAST_HOUR: u32 = 22;

/// Number of hourly rows.
pub const HOUR_ROWS: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// Presentation constants for block sizing.
///
/// A block spanning `n` rows is `n * row_height - block_gap` units tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub row_height: u32,
    pub block_gap: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            row_height: 60,
            block_gap: 4,
        }
    }
}

impl GridLayout {
    pub fn block_height(&self, span_rows: u32) -> u32 {
        (span_rows * self.row_height).saturating_sub(self.block_gap)
    }
}

/// Format an hour on the 12-hour clock ("7:00 AM", "12:00 PM", "10:00 PM").
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", display, suffix)
}

/// A session drawn on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    pub subject_code: String,
    pub subject_name: String,
    pub group_name: String,
    /// "Name (Ggroup)"
    pub label: String,
    pub color: Color,
    pub day: Day,
    /// Anchor row's start hour.
    pub hour: u32,
    /// Rows covered, at least 1.
    pub span_rows: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// One addressable (day, hour) cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub day: Day,
    pub hour: u32,
    pub blocks: Vec<PlacedBlock>,
}

/// A labeled hour row with one cell per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub hour: u32,
    pub label: String,
    pub cells: Vec<Cell>,
}

/// The full weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    days: Vec<Day>,
    rows: Vec<GridRow>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::build()
    }
}

impl Grid {
    /// Build an empty grid with all day headers and hour rows.
    pub fn build() -> Self {
        let rows = (FIRST_HOUR..=LAST_HOUR)
            .map(|hour| GridRow {
                hour,
                label: hour_label(hour),
                cells: Day::ALL
                    .iter()
                    .map(|&day| Cell {
                        day,
                        hour,
                        blocks: Vec::new(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            days: Day::ALL.to_vec(),
            rows,
        }
    }

    /// Discard all placed blocks.
    pub fn rebuild(&mut self) {
        *self = Self::build();
    }

    pub fn day_headers(&self) -> &[Day] {
        &self.days
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    fn row_index(hour: u32) -> Option<usize> {
        if (FIRST_HOUR..=LAST_HOUR).contains(&hour) {
            Some((hour - FIRST_HOUR) as usize)
        } else {
            None
        }
    }

    /// Look up a cell; `None` when the hour is off the grid.
    pub fn cell_at(&self, day: Day, hour: u32) -> Option<&Cell> {
        self.rows.get(Self::row_index(hour)?)?.cells.get(day.index())
    }

    pub fn cell_at_mut(&mut self, day: Day, hour: u32) -> Option<&mut Cell> {
        self.rows
            .get_mut(Self::row_index(hour)?)?
            .cells
            .get_mut(day.index())
    }

    /// Blocks anchored at (day, hour); empty when none or off-grid.
    pub fn blocks_at(&self, day: Day, hour: u32) -> &[PlacedBlock] {
        self.cell_at(day, hour)
            .map(|cell| cell.blocks.as_slice())
            .unwrap_or(&[])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    /// All placed blocks, row by row then day by day.
    pub fn blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.cells().flat_map(|cell| cell.blocks.iter())
    }

    pub fn block_count(&self) -> usize {
        self.cells().map(|cell| cell.blocks.len()).sum()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grid: {} days × {} hours ({}-{}), {} blocks",
            self.days.len(),
            self.rows.len(),
            hour_label(FIRST_HOUR),
            hour_label(LAST_HOUR),
            self.block_count()
        )
    }
}
