//! Session placement: turning a subject's sessions into grid blocks.
//!
//! Placement is additive. Blocks already on the grid are never moved or
//! removed, overlapping sessions stack in the same cell, and placing the same
//! subject twice draws its blocks twice. Sessions that cannot be resolved onto
//! the grid (unknown day, unparsable or off-grid start hour) are skipped
//! without raising an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{Group, Subject};
use crate::color::ColorAssignor;
use crate::grid::{Grid, GridLayout, PlacedBlock};

/// Notice reported when a subject has no groups to place.
pub const NO_GROUPS_NOTICE: &str = "no groups available for this subject";

/// Which of a subject's groups gets placed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// The first group in catalog order.
    #[default]
    First,
    /// The group with this exact section label.
    Named(String),
}

impl SelectionStrategy {
    pub fn select<'a>(&self, groups: &'a [Group]) -> Option<&'a Group> {
        match self {
            SelectionStrategy::First => groups.first(),
            SelectionStrategy::Named(name) => groups.iter().find(|g| &g.name == name),
        }
    }
}

/// Why a session was left off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnknownDay,
    UnparsableHour,
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSession {
    /// Position in the group's session list.
    pub index: usize,
    pub day: String,
    pub start: String,
    pub reason: SkipReason,
}

/// Result of placing one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlacementOutcome {
    Placed {
        group: String,
        placed: usize,
        skipped: Vec<SkippedSession>,
    },
    NoGroups,
    GroupNotFound {
        requested: String,
    },
}

impl PlacementOutcome {
    /// User-facing notice, if this outcome warrants one.
    pub fn notice(&self) -> Option<String> {
        match self {
            PlacementOutcome::Placed { .. } => None,
            PlacementOutcome::NoGroups => Some(NO_GROUPS_NOTICE.to_string()),
            PlacementOutcome::GroupNotFound { requested } => {
                Some(format!("group {} not found for this subject", requested))
            }
        }
    }

    pub fn placed_count(&self) -> usize {
        match self {
            PlacementOutcome::Placed { placed, .. } => *placed,
            _ => 0,
        }
    }
}

/// Visual extent of a session in rows.
///
/// Zero, negative and unknown lengths all become a single row.
pub fn session_span(start_hour: u32, end_hour: Option<u32>) -> u32 {
    end_hour
        .map(|end| end.saturating_sub(start_hour))
        .unwrap_or(0)
        .max(1)
}

/// Places subjects onto a grid using a group selection policy.
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    strategy: SelectionStrategy,
    layout: GridLayout,
}

impl PlacementEngine {
    pub fn new(strategy: SelectionStrategy, layout: GridLayout) -> Self {
        Self { strategy, layout }
    }

    /// Place the selected group's sessions of `subject` onto `grid`.
    pub fn place(
        &self,
        subject: &Subject,
        grid: &mut Grid,
        colors: &mut ColorAssignor,
    ) -> PlacementOutcome {
        if subject.groups.is_empty() {
            info!(code = %subject.code, "Subject has no groups; nothing placed");
            return PlacementOutcome::NoGroups;
        }

        let Some(group) = self.strategy.select(&subject.groups) else {
            let requested = match &self.strategy {
                SelectionStrategy::Named(name) => name.clone(),
                SelectionStrategy::First => String::new(),
            };
            info!(code = %subject.code, group = %requested, "Requested group not found");
            return PlacementOutcome::GroupNotFound { requested };
        };

        let mut placed = 0;
        let mut skipped = Vec::new();

        for (index, session) in group.sessions.iter().enumerate() {
            let mut skip = |reason: SkipReason| {
                debug!(
                    code = %subject.code,
                    group = %group.name,
                    day = %session.day,
                    start = %session.start,
                    ?reason,
                    "Skipping session"
                );
                skipped.push(SkippedSession {
                    index,
                    day: session.day.clone(),
                    start: session.start.clone(),
                    reason,
                });
            };

            let Some(day) = session.resolved_day() else {
                skip(SkipReason::UnknownDay);
                continue;
            };
            let Some(start_hour) = session.start_hour() else {
                skip(SkipReason::UnparsableHour);
                continue;
            };
            let span_rows = session_span(start_hour, session.end_hour());

            let Some(cell) = grid.cell_at_mut(day, start_hour) else {
                skip(SkipReason::OutOfRange);
                continue;
            };

            let color = colors.color_for(&subject.code);
            cell.blocks.push(PlacedBlock {
                subject_code: subject.code.clone(),
                subject_name: subject.name.clone(),
                group_name: group.name.clone(),
                label: format!("{} (G{})", subject.name, group.name),
                color,
                day,
                hour: start_hour,
                span_rows,
                height: self.layout.block_height(span_rows),
                room: session.room.clone(),
            });
            placed += 1;
        }

        info!(
            code = %subject.code,
            group = %group.name,
            placed,
            skipped = skipped.len(),
            "Placed subject"
        );

        PlacementOutcome::Placed {
            group: group.name.clone(),
            placed,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Day, Session};

    fn session(day: &str, start: &str, end: &str) -> Session {
        Session {
            day: day.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            room: None,
        }
    }

    fn group(name: &str, sessions: Vec<Session>) -> Group {
        Group {
            name: name.to_string(),
            instructor: None,
            capacity: None,
            sessions,
        }
    }

    fn subject(code: &str, name: &str, groups: Vec<Group>) -> Subject {
        Subject {
            code: code.to_string(),
            name: name.to_string(),
            credits: 3,
            instructor: None,
            groups,
        }
    }

    fn calculo() -> Subject {
        subject(
            "MAT101",
            "Cálculo I",
            vec![group("A", vec![session("Lunes", "08:00", "10:00")])],
        )
    }

    #[test]
    fn test_single_session_scenario() {
        let engine = PlacementEngine::default();
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();

        let outcome = engine.place(&calculo(), &mut grid, &mut colors);
        assert_eq!(outcome.placed_count(), 1);
        assert!(outcome.notice().is_none());
        assert_eq!(grid.block_count(), 1);

        let blocks = grid.blocks_at(Day::Monday, 8);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label, "Cálculo I (GA)");
        assert_eq!(blocks[0].span_rows, 2);
        assert_eq!(blocks[0].height, 116);
        assert_eq!(blocks[0].color, colors.color_for("MAT101"));
    }

    #[test]
    fn test_no_groups_reports_notice() {
        let engine = PlacementEngine::default();
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();

        let outcome = engine.place(&subject("X", "Vacía", vec![]), &mut grid, &mut colors);
        assert_eq!(outcome, PlacementOutcome::NoGroups);
        assert_eq!(outcome.notice().as_deref(), Some(NO_GROUPS_NOTICE));
        assert_eq!(grid.block_count(), 0);
        assert!(colors.is_empty());
    }

    #[test]
    fn test_first_group_is_selected() {
        let engine = PlacementEngine::default();
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();
        let s = subject(
            "FIS202",
            "Física II",
            vec![
                group("B", vec![session("Martes", "09:00", "10:00")]),
                group("A", vec![session("Jueves", "14:00", "16:00")]),
            ],
        );

        let outcome = engine.place(&s, &mut grid, &mut colors);
        assert!(matches!(outcome, PlacementOutcome::Placed { ref group, .. } if group == "B"));
        assert_eq!(grid.blocks_at(Day::Tuesday, 9).len(), 1);
        assert!(grid.blocks_at(Day::Thursday, 14).is_empty());
    }

    #[test]
    fn test_named_strategy() {
        let engine = PlacementEngine::new(
            SelectionStrategy::Named("A".to_string()),
            GridLayout::default(),
        );
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();
        let s = subject(
            "FIS202",
            "Física II",
            vec![
                group("B", vec![session("Martes", "09:00", "10:00")]),
                group("A", vec![session("Jueves", "14:00", "16:00")]),
            ],
        );

        engine.place(&s, &mut grid, &mut colors);
        assert_eq!(grid.blocks_at(Day::Thursday, 14)[0].label, "Física II (GA)");

        let missing = PlacementEngine::new(
            SelectionStrategy::Named("Z".to_string()),
            GridLayout::default(),
        );
        let outcome = missing.place(&s, &mut grid, &mut colors);
        assert_eq!(
            outcome,
            PlacementOutcome::GroupNotFound {
                requested: "Z".to_string()
            }
        );
        assert!(outcome.notice().is_some());
        assert_eq!(grid.block_count(), 1);
    }

    #[test]
    fn test_null_hour_session_is_skipped_not_fatal() {
        let json = r#"{
            "codigo": "MAT101",
            "nombre": "Cálculo I",
            "grupos": [{"nombre": "A", "sesiones": [
                {"dia": "Lunes", "hora_inicio": "08:00", "hora_fin": "10:00"},
                {"dia": "Martes", "hora_inicio": null, "hora_fin": null},
                {"dia": null, "hora_inicio": "09:00", "hora_fin": "10:00"}
            ]}]
        }"#;
        let s: Subject = serde_json::from_str(json).unwrap();
        let engine = PlacementEngine::default();
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();

        let outcome = engine.place(&s, &mut grid, &mut colors);
        assert_eq!(outcome.placed_count(), 1);
        let PlacementOutcome::Placed { skipped, .. } = outcome else {
            panic!("expected a placement");
        };
        let reasons: Vec<SkipReason> = skipped.iter().map(|s| s.reason).collect();
        assert_eq!(reasons, vec![SkipReason::UnparsableHour, SkipReason::UnknownDay]);
        assert_eq!(grid.blocks_at(Day::Monday, 8)[0].span_rows, 2);
    }

    #[test]
    fn test_float_end_hour_truncates() {
        let json = r#"{"codigo": "X1", "nombre": "Uno", "grupos": [{"nombre": "A", "sesiones": [
            {"dia": "Jueves", "hora_inicio": 9.0, "hora_fin": 11.5}
        ]}]}"#;
        let s: Subject = serde_json::from_str(json).unwrap();
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();

        PlacementEngine::default().place(&s, &mut grid, &mut colors);
        assert_eq!(grid.blocks_at(Day::Thursday, 9)[0].span_rows, 2);
    }

    #[test]
    fn test_session_span_clamps_to_one_row() {
        assert_eq!(session_span(10, Some(10)), 1);
        assert_eq!(session_span(10, Some(8)), 1);
        assert_eq!(session_span(10, None), 1);
        assert_eq!(session_span(10, Some(13)), 3);
    }

    #[test]
    fn test_non_positive_duration_placed_as_one_row() {
        let engine = PlacementEngine::default();
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();
        let s = subject(
            "Q1",
            "Química",
            vec![group(
                "A",
                vec![
                    session("Viernes", "10:00", "10:00"),
                    session("Viernes", "15:00", "12:00"),
                    session("Viernes", "17:00", "??"),
                ],
            )],
        );

        engine.place(&s, &mut grid, &mut colors);
        assert_eq!(grid.block_count(), 3);
        assert!(grid.blocks().all(|b| b.span_rows == 1 && b.height == 56));
    }

    #[test]
    fn test_malformed_sessions_skipped_silently() {
        let engine = PlacementEngine::default();
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();
        let s = subject(
            "M1",
            "Mixta",
            vec![group(
                "A",
                vec![
                    session("Domingo", "08:00", "10:00"),
                    session("Lunes", "06:00", "08:00"),
                    session("Lunes", "23:00", "23:30"),
                    session("Lunes", "temprano", "10:00"),
                    session("Sábado", "22:00", "23:00"),
                ],
            )],
        );

        let outcome = engine.place(&s, &mut grid, &mut colors);
        let PlacementOutcome::Placed { placed, skipped, .. } = outcome else {
            panic!("expected placement");
        };
        assert_eq!(placed, 1);
        let reasons: Vec<_> = skipped.iter().map(|s| (s.index, s.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (0, SkipReason::UnknownDay),
                (1, SkipReason::OutOfRange),
                (2, SkipReason::OutOfRange),
                (3, SkipReason::UnparsableHour),
            ]
        );
        assert_eq!(grid.blocks_at(Day::Saturday, 22).len(), 1);
    }

    #[test]
    fn test_placement_is_additive() {
        let engine = PlacementEngine::default();
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();
        let other = subject(
            "FIS202",
            "Física II",
            vec![group("C", vec![session("Lunes", "08:00", "09:00")])],
        );

        engine.place(&calculo(), &mut grid, &mut colors);
        engine.place(&other, &mut grid, &mut colors);
        engine.place(&calculo(), &mut grid, &mut colors);

        let labels: Vec<_> = grid
            .blocks_at(Day::Monday, 8)
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Cálculo I (GA)", "Física II (GC)", "Cálculo I (GA)"]);
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn test_colors_stay_distinct_across_calls() {
        let engine = PlacementEngine::default();
        let mut grid = Grid::build();
        let mut colors = ColorAssignor::new();
        let a = subject("AAA", "Uno", vec![group("A", vec![session("Martes", "07:00", "08:00")])]);
        let b = subject("AAB", "Dos", vec![group("A", vec![session("Martes", "07:00", "08:00")])]);

        engine.place(&a, &mut grid, &mut colors);
        engine.place(&b, &mut grid, &mut colors);
        engine.place(&a, &mut grid, &mut colors);

        let blocks = grid.blocks_at(Day::Tuesday, 7);
        assert_eq!(blocks.len(), 3);
        assert_ne!(blocks[0].color, blocks[1].color);
        assert_eq!(blocks[0].color, blocks[2].color);
    }

    #[test]
    fn test_strategy_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            selection: SelectionStrategy,
        }
        let first: Wrapper = toml::from_str(r#"selection = "first""#).unwrap();
        assert_eq!(first.selection, SelectionStrategy::First);
        let named: Wrapper = toml::from_str(r#"selection = { named = "B" }"#).unwrap();
        assert_eq!(named.selection, SelectionStrategy::Named("B".to_string()));
    }
}
