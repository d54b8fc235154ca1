//! Plain-text rendering of settled lookups for stdout.

use std::fmt::Write as _;

use semres_core::{
    is_pass_worthy, AllSemesterResult, GpaBand, PerformanceCategory, PerformanceTrend,
    RequestKind, SemesterSummary, SubjectResult,
};
use semres_session::SessionState;
use semres_store::RecentSearchEntry;

pub(crate) const NOT_RELEASED_NOTICE: &str = "Results Not Yet Released for this Semester";

/// Renders whatever the last lookup in `state` produced.
pub(crate) fn render_state(state: &SessionState) -> String {
    match state.request_kind() {
        Some(RequestKind::SingleSemester) => match (state.results(), state.summary()) {
            (Some(results), Some(summary)) => render_semester(results, summary),
            _ => String::new(),
        },
        Some(RequestKind::FullHistory) => render_history(state.full_history(), state.trend()),
        None => String::new(),
    }
}

pub(crate) fn render_semester(results: &[SubjectResult], summary: &SemesterSummary) -> String {
    if results.is_empty() {
        return format!("{NOT_RELEASED_NOTICE}\n");
    }

    let width = results
        .iter()
        .map(|r| r.subject.chars().count())
        .max()
        .unwrap_or(0)
        .max("SUBJECT".len())
        + 2;

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}GRADE", "SUBJECT");
    for result in results {
        let _ = writeln!(out, "{:<width$}{}", result.subject, result.grade);
    }
    out.push('\n');
    let _ = writeln!(out, "{}", summary_line("SGPA", &summary.sgpa));
    let _ = writeln!(out, "{}", summary_line("CGPA", &summary.cgpa));
    out
}

/// `SGPA: 8.2 [good, pass-worthy]`; sentinels are printed bare.
pub(crate) fn summary_line(label: &str, value: &str) -> String {
    match GpaBand::classify_str(value) {
        Some(band) if is_pass_worthy(value) => format!("{label}: {value} [{band}, pass-worthy]"),
        Some(band) => format!("{label}: {value} [{band}]"),
        None => format!("{label}: {value}"),
    }
}

pub(crate) fn render_history(
    history: Option<&[AllSemesterResult]>,
    trend: Option<&PerformanceTrend>,
) -> String {
    let mut out = String::new();

    match history {
        Some(rows) if !rows.is_empty() => {
            let _ = writeln!(out, "{:<16}{:<8}CGPA", "SEMESTER", "SGPA");
            for row in rows {
                let _ = writeln!(out, "{:<16}{:<8}{}", row.semester, row.sgpa, row.cgpa);
            }
        }
        _ => out.push_str("no semester results available\n"),
    }

    if let Some(trend) = trend {
        out.push('\n');
        out.push_str("Grade trend:\n");
        for (index, value) in trend.grade_trend.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>2}. {value:.2} [{}]",
                index + 1,
                GpaBand::classify(*value)
            );
        }
        if let Some(category) = PerformanceCategory::from_trend(trend) {
            let _ = writeln!(out, "Overall performance: {category}");
        }
    }

    out
}

pub(crate) fn render_recent(entries: &[RecentSearchEntry]) -> String {
    if entries.is_empty() {
        return "no recent searches\n".to_owned();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<16}{:<16}SEARCHED", "REGD NO", "SEMESTER");
    for entry in entries {
        let searched = entry.searched_at.map_or_else(
            || "-".to_owned(),
            |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
        );
        let _ = writeln!(
            out,
            "{:<16}{:<16}{}",
            entry.registration_number, entry.semester_label, searched
        );
    }
    out
}
