//! The per-session record the orchestrator drives and the renderer reads.

use chrono::{DateTime, Utc};

use semres_core::{
    AllSemesterResult, LookupRequest, PerformanceTrend, RequestKind, SemesterSummary,
    SubjectResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPhase {
    /// Nothing submitted yet, or the last submission was rejected.
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Everything the presentation layer needs about the current lookup.
///
/// Fields are only mutated by [`crate::Orchestrator`]. A new lookup replaces
/// the whole record, so results from an earlier lookup are never shown next
/// to a newer one.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) token: u64,
    pub(crate) phase: LookupPhase,
    pub(crate) request: Option<LookupRequest>,
    pub(crate) kind: Option<RequestKind>,
    pub(crate) error: Option<String>,
    pub(crate) results: Option<Vec<SubjectResult>>,
    pub(crate) summary: Option<SemesterSummary>,
    pub(crate) trend: Option<PerformanceTrend>,
    pub(crate) full_history: Option<Vec<AllSemesterResult>>,
    pub(crate) settled_at: Option<DateTime<Utc>>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh record for a lookup that is about to be issued.
    pub(crate) fn in_flight(token: u64, request: LookupRequest, kind: RequestKind) -> Self {
        Self {
            token,
            phase: LookupPhase::InFlight,
            request: Some(request),
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Token of the most recently issued lookup; 0 before the first one.
    #[must_use]
    pub fn token(&self) -> u64 {
        self.token
    }

    #[must_use]
    pub fn phase(&self) -> LookupPhase {
        self.phase
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.phase == LookupPhase::InFlight
    }

    #[must_use]
    pub fn request(&self) -> Option<&LookupRequest> {
        self.request.as_ref()
    }

    #[must_use]
    pub fn request_kind(&self) -> Option<RequestKind> {
        self.kind
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `None` means no single-semester lookup has completed; `Some(empty)`
    /// means one completed and the semester has no published subjects.
    #[must_use]
    pub fn results(&self) -> Option<&[SubjectResult]> {
        self.results.as_deref()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SemesterSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn trend(&self) -> Option<&PerformanceTrend> {
        self.trend.as_ref()
    }

    #[must_use]
    pub fn full_history(&self) -> Option<&[AllSemesterResult]> {
        self.full_history.as_deref()
    }

    #[must_use]
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }
}
