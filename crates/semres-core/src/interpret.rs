//! Turns raw service responses into presentation-ready outcomes and
//! classifies GPA-like values into display bands.

use crate::types::{
    AllSemesterResult, FullHistoryResponse, PerformanceTrend, ResultsResponse, SemesterSummary,
    SingleSemesterResponse, SubjectResult,
};

/// Summary sentinel for a semester whose results have not been published.
pub const NOT_RELEASED: &str = "Results Not Yet Released";

/// Summary sentinel for a value the service left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Minimum value for a summary to count as pass-worthy.
pub const PASS_WORTHY_THRESHOLD: f64 = 7.5;

/// What a settled lookup shows, one variant per endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpretedOutcome {
    SingleSemester {
        /// Empty when results are not yet released.
        subjects: Vec<SubjectResult>,
        summary: SemesterSummary,
    },
    FullHistory {
        semester_results: Option<Vec<AllSemesterResult>>,
        trend: Option<PerformanceTrend>,
    },
}

/// Interprets a decoded response.
///
/// Single-semester responses that are `null` or carry an explicitly empty
/// subject list become the [`NOT_RELEASED`] outcome. Otherwise subjects pass
/// through verbatim and missing or empty SGPA/CGPA become [`NOT_AVAILABLE`].
/// Full-history responses pass through without any defaulting.
#[must_use]
pub fn interpret(response: ResultsResponse) -> InterpretedOutcome {
    match response {
        ResultsResponse::SingleSemester(body) => interpret_single(body),
        ResultsResponse::FullHistory(body) => interpret_history(body),
    }
}

fn interpret_single(body: Option<SingleSemesterResponse>) -> InterpretedOutcome {
    let Some(body) = body else {
        return not_released();
    };
    if body.subjects.as_ref().is_some_and(Vec::is_empty) {
        return not_released();
    }

    InterpretedOutcome::SingleSemester {
        subjects: body.subjects.unwrap_or_default(),
        summary: SemesterSummary {
            sgpa: or_not_available(body.sgpa),
            cgpa: or_not_available(body.cgpa),
        },
    }
}

fn interpret_history(body: Option<FullHistoryResponse>) -> InterpretedOutcome {
    let body = body.unwrap_or_default();
    InterpretedOutcome::FullHistory {
        semester_results: body.semester_results,
        trend: body.performance_trend,
    }
}

fn not_released() -> InterpretedOutcome {
    InterpretedOutcome::SingleSemester {
        subjects: Vec::new(),
        summary: SemesterSummary {
            sgpa: NOT_RELEASED.to_owned(),
            cgpa: NOT_RELEASED.to_owned(),
        },
    }
}

fn or_not_available(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

/// Display band for a GPA-like value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpaBand {
    High,
    Good,
    Moderate,
    Low,
}

impl GpaBand {
    /// Thresholds are inclusive and checked from the top: 8.5, 7.5, 6.5.
    #[must_use]
    pub fn classify(value: f64) -> Self {
        if value >= 8.5 {
            GpaBand::High
        } else if value >= 7.5 {
            GpaBand::Good
        } else if value >= 6.5 {
            GpaBand::Moderate
        } else {
            GpaBand::Low
        }
    }

    /// Classifies a summary string, `None` for sentinels and other non-numbers.
    #[must_use]
    pub fn classify_str(value: &str) -> Option<Self> {
        parse_gpa(value).map(Self::classify)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GpaBand::High => "high",
            GpaBand::Good => "good",
            GpaBand::Moderate => "moderate",
            GpaBand::Low => "low",
        }
    }
}

impl std::fmt::Display for GpaBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a summary value as a finite decimal number.
#[must_use]
pub fn parse_gpa(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// A summary value is pass-worthy when it parses and is at least 7.5.
///
/// The [`NOT_AVAILABLE`] and [`NOT_RELEASED`] sentinels never parse.
#[must_use]
pub fn is_pass_worthy(value: &str) -> bool {
    parse_gpa(value).is_some_and(|v| v >= PASS_WORTHY_THRESHOLD)
}

/// The service's overall performance verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerformanceCategory {
    Excellent,
    VeryGood,
    Good,
    /// Any other string, kept verbatim.
    Unclassified(String),
}

impl PerformanceCategory {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Excellent" => PerformanceCategory::Excellent,
            "Very Good" => PerformanceCategory::VeryGood,
            "Good" => PerformanceCategory::Good,
            other => PerformanceCategory::Unclassified(other.to_owned()),
        }
    }

    #[must_use]
    pub fn from_trend(trend: &PerformanceTrend) -> Option<Self> {
        trend.overall_performance.as_deref().map(Self::parse)
    }
}

impl std::fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceCategory::Excellent => f.write_str("Excellent"),
            PerformanceCategory::VeryGood => f.write_str("Very Good"),
            PerformanceCategory::Good => f.write_str("Good"),
            PerformanceCategory::Unclassified(raw) => write!(f, "{raw} (unclassified)"),
        }
    }
}
