//! Text rendering of the weekly grid.
//!
//! Each hour row grows to as many lines as its busiest day needs. A block's
//! label is printed in its anchor row; the rows it spans below are marked with
//! `⋮` so overlapping sessions stay visible.

use schedule_kernel::grid::FIRST_HOUR;
use schedule_kernel::{Color, Day, Grid};

const HOUR_COLUMN_WIDTH: usize = 8;

/// Options for [`render_grid_text`].
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Characters per day column.
    pub column_width: usize,
    /// Paint blocks with ANSI 24-bit background colors.
    pub color: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            column_width: 18,
            color: true,
        }
    }
}

struct Entry {
    text: String,
    color: Color,
}

/// Truncate or right-pad `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

fn paint(text: &str, color: Color) -> String {
    let [r, g, b] = color.to_rgb();
    format!("\x1b[48;2;{};{};{}m\x1b[30m{}\x1b[0m", r, g, b, text)
}

/// Blocks visible in (day, hour): continuations from earlier rows, then
/// blocks anchored here.
fn entries_for(grid: &Grid, day: Day, hour: u32) -> Vec<Entry> {
    let continuing = (FIRST_HOUR..hour).flat_map(move |earlier| {
        grid.blocks_at(day, earlier)
            .iter()
            .filter(move |b| earlier + b.span_rows > hour)
            .map(|b| Entry {
                text: format!("⋮ {}", b.label),
                color: b.color,
            })
    });
    let anchored = grid.blocks_at(day, hour).iter().map(|b| Entry {
        text: b.label.clone(),
        color: b.color,
    });
    continuing.chain(anchored).collect()
}

/// Render the grid as a fixed-width table.
pub fn render_grid_text(grid: &Grid, style: &TextStyle) -> String {
    let width = style.column_width.max(2);
    let mut lines = Vec::new();

    let mut header = fit("", HOUR_COLUMN_WIDTH);
    for day in grid.day_headers() {
        header.push_str(" | ");
        header.push_str(&fit(day.label(), width));
    }
    lines.push(header.trim_end().to_string());
    lines.push("-".repeat(HOUR_COLUMN_WIDTH + grid.day_headers().len() * (width + 3)));

    for row in grid.rows() {
        let columns: Vec<Vec<Entry>> = grid
            .day_headers()
            .iter()
            .map(|&day| entries_for(grid, day, row.hour))
            .collect();
        let height = columns.iter().map(Vec::len).max().unwrap_or(0).max(1);

        for line_index in 0..height {
            let label = if line_index == 0 { row.label.as_str() } else { "" };
            let mut line = fit(label, HOUR_COLUMN_WIDTH);
            for column in &columns {
                line.push_str(" | ");
                match column.get(line_index) {
                    Some(entry) if style.color => {
                        line.push_str(&paint(&fit(&entry.text, width), entry.color))
                    }
                    Some(entry) => line.push_str(&fit(&entry.text, width)),
                    None => line.push_str(&fit("", width)),
                }
            }
            lines.push(line.trim_end().to_string());
        }
    }

    lines.join("\n")
}
