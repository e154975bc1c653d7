//! Plain-text subject list and detail views.

use schedule_kernel::placement::NO_GROUPS_NOTICE;
use schedule_kernel::Subject;

/// Placeholder shown when the catalog (or a search) yields no subjects.
pub const NO_SUBJECTS_PLACEHOLDER: &str = "No subjects found.";

/// Subjects whose name or code contains `term`, ignoring case.
///
/// A blank term keeps everything. Catalog order is preserved.
pub fn filter_subjects<'a>(subjects: &'a [Subject], term: &str) -> Vec<&'a Subject> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return subjects.iter().collect();
    }
    subjects
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&term) || s.code.to_lowercase().contains(&term))
        .collect()
}

/// One card per subject, or the empty-catalog placeholder.
pub fn render_subject_list<'a>(subjects: impl IntoIterator<Item = &'a Subject>) -> String {
    let cards: Vec<String> = subjects
        .into_iter()
        .map(|subject| {
            format!(
                "[{}] {}\n    Credits: {}",
                subject.code, subject.name, subject.credits
            )
        })
        .collect();

    if cards.is_empty() {
        NO_SUBJECTS_PLACEHOLDER.to_string()
    } else {
        cards.join("\n")
    }
}

/// A subject's groups and their sessions.
pub fn render_subject_detail(subject: &Subject) -> String {
    let mut lines = vec![format!("{} ({})", subject.name, subject.code)];
    if subject.credits > 0 {
        lines.push(format!("Credits: {}", subject.credits));
    }
    if let Some(instructor) = &subject.instructor {
        lines.push(format!("Instructor: {}", instructor));
    }

    if subject.groups.is_empty() {
        lines.push(NO_GROUPS_NOTICE.to_string());
        return lines.join("\n");
    }

    for group in &subject.groups {
        let mut header = format!("Group {}", group.name);
        if let Some(instructor) = &group.instructor {
            header.push_str(&format!(" • {}", instructor));
        }
        if let Some(capacity) = group.capacity {
            header.push_str(&format!(" • {} seats", capacity));
        }
        lines.push(String::new());
        lines.push(header);

        if group.sessions.is_empty() {
            lines.push("  no sessions".to_string());
            continue;
        }
        for session in &group.sessions {
            let mut line = format!("  {} {}-{}", session.day, session.start, session.end);
            if let Some(room) = &session.room {
                line.push_str(&format!(" ({})", room));
            }
            lines.push(line);
        }
    }

    lines.join("\n")
}
