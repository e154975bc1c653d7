//! The schedule board: one grid and one color assignor for a whole session.
//!
//! Subjects added together are fetched concurrently, one independent request
//! each. Each response is placed as soon as it arrives, so the order blocks
//! land in a shared cell follows response arrival, not request order. There is
//! no sequencing or cancellation between requests.

use std::collections::HashMap;

use futures::stream::{FuturesUnordered, StreamExt};
use schedule_kernel::{
    ColorAssignor, Grid, PlacementEngine, PlacementOutcome, ScheduleSummary, Subject,
};
use tracing::{info, warn};

use crate::catalog_client::{CatalogClient, CatalogError};

/// What happened to one requested subject.
#[derive(Debug)]
pub struct AddReport {
    pub code: String,
    pub result: Result<PlacementOutcome, CatalogError>,
}

impl AddReport {
    /// Line to show the user, if any.
    pub fn message(&self) -> Option<String> {
        match &self.result {
            Ok(outcome) => outcome.notice().map(|notice| format!("{}: {}", self.code, notice)),
            Err(err) => Some(format!("{}: {}", self.code, err)),
        }
    }
}

pub struct ScheduleBoard {
    client: CatalogClient,
    engine: PlacementEngine,
    grid: Grid,
    colors: ColorAssignor,
    credits: HashMap<String, u32>,
}

impl ScheduleBoard {
    pub fn new(client: CatalogClient, engine: PlacementEngine) -> Self {
        Self {
            client,
            engine,
            grid: Grid::build(),
            colors: ColorAssignor::new(),
            credits: HashMap::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn colors(&self) -> &ColorAssignor {
        &self.colors
    }

    /// Record credits from catalog summaries; the detail endpoint omits them.
    pub fn remember_credits<'a>(&mut self, subjects: impl IntoIterator<Item = &'a Subject>) {
        for subject in subjects {
            if subject.credits > 0 {
                self.credits.insert(subject.code.clone(), subject.credits);
            }
        }
    }

    /// Place an already fetched subject.
    pub fn place(&mut self, subject: &Subject) -> PlacementOutcome {
        self.remember_credits([subject]);
        self.engine.place(subject, &mut self.grid, &mut self.colors)
    }

    /// Fetch and place each code, in response arrival order.
    ///
    /// Fetch failures are reported per code and never stop the others.
    pub async fn add_subjects(&mut self, codes: &[String]) -> Vec<AddReport> {
        let mut pending: FuturesUnordered<_> = codes
            .iter()
            .map(|code| {
                let client = self.client.clone();
                let code = code.clone();
                async move {
                    let result = client.subject_detail(&code).await;
                    (code, result)
                }
            })
            .collect();

        let mut reports = Vec::with_capacity(codes.len());
        while let Some((code, result)) = pending.next().await {
            let result = match result {
                Ok(subject) => Ok(self.place(&subject)),
                Err(err) => {
                    warn!(code = %code, error = %err, "Failed to fetch subject");
                    Err(err)
                }
            };
            reports.push(AddReport { code, result });
        }

        info!(
            requested = codes.len(),
            blocks = self.grid.block_count(),
            "Finished adding subjects"
        );
        reports
    }

    /// Remove every block. Assigned colors are kept.
    pub fn clear(&mut self) {
        self.grid.rebuild();
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_grid(&self.grid, &self.credits)
    }
}
