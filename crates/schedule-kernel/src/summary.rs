//! Schedule summary and credit load classification.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::catalog::Day;
use crate::grid::Grid;

/// How heavy a schedule's total credit count is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditLoad {
    Low,
    Normal,
    High,
    Excessive,
}

impl CreditLoad {
    pub fn classify(total_credits: u32) -> Self {
        match total_credits {
            0..12 => CreditLoad::Low,
            12..=18 => CreditLoad::Normal,
            19..=22 => CreditLoad::High,
            _ => CreditLoad::Excessive,
        }
    }

    /// Only an excessive load is outside what a student may take.
    pub fn is_acceptable(self) -> bool {
        self != CreditLoad::Excessive
    }

    pub fn message(self) -> &'static str {
        match self {
            CreditLoad::Low => "low credit load; consider adding subjects",
            CreditLoad::Normal => "normal credit load",
            CreditLoad::High => "high credit load; make sure the workload is manageable",
            CreditLoad::Excessive => "excessive credit load; reduce the number of credits",
        }
    }
}

/// Totals for the subjects currently drawn on a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    /// Distinct subject codes, sorted.
    pub subjects: Vec<String>,
    pub total_credits: u32,
    /// Mean credits per distinct subject; 0 for an empty grid.
    pub average_credits: f64,
    pub total_blocks: usize,
    pub blocks_per_day: Vec<(Day, usize)>,
    pub credit_load: CreditLoad,
}

impl ScheduleSummary {
    /// Summarize `grid`. Each distinct subject's credits count once; codes
    /// missing from `credits` count as zero.
    pub fn from_grid(grid: &Grid, credits: &HashMap<String, u32>) -> Self {
        let subjects: BTreeSet<&str> = grid.blocks().map(|b| b.subject_code.as_str()).collect();
        let total_credits = subjects
            .iter()
            .map(|code| credits.get(*code).copied().unwrap_or(0))
            .sum();

        let blocks_per_day = Day::ALL
            .iter()
            .map(|&day| (day, grid.blocks().filter(|b| b.day == day).count()))
            .collect();

        let average_credits = if subjects.is_empty() {
            0.0
        } else {
            f64::from(total_credits) / subjects.len() as f64
        };

        Self {
            subjects: subjects.into_iter().map(str::to_string).collect(),
            total_credits,
            average_credits,
            total_blocks: grid.block_count(),
            blocks_per_day,
            credit_load: CreditLoad::classify(total_credits),
        }
    }
}

impl fmt::Display for ScheduleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} subjects • {} credits • {} blocks",
            self.subjects.len(),
            self.total_credits,
            self.total_blocks
        )?;
        let per_day: Vec<String> = self
            .blocks_per_day
            .iter()
            .map(|(day, count)| format!("{} {}", day.short_label(), count))
            .collect();
        writeln!(f, "  Per day: {}", per_day.join(", "))?;
        writeln!(f, "  Average: {:.1} credits per subject", self.average_credits)?;
        if self.credit_load.is_acceptable() {
            write!(f, "  Load: {}", self.credit_load.message())
        } else {
            write!(f, "  Load: {} [over the limit]", self.credit_load.message())
        }
    }
}
