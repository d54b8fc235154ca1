//! Drives a lookup from form submission to a settled [`SessionState`].
//!
//! A lookup runs in three steps:
//!
//! 1. [`Orchestrator::begin`] validates the form, replaces the session state,
//!    records the search and hands back a [`PendingLookup`] stamped with a
//!    fresh token. All of this happens before any network I/O.
//! 2. [`Orchestrator::fetch`] issues exactly one request for that lookup.
//! 3. [`Orchestrator::complete`] interprets the response into the state, or
//!    drops it if a newer lookup has been issued since.
//!
//! [`Orchestrator::submit`] runs all three in sequence. Callers that overlap
//! lookups can drive the steps themselves; stale responses are discarded by
//! token instead of overwriting newer results.

use chrono::Utc;

use semres_client::{ClientError, ResultsService};
use semres_core::{
    interpret, translate, InterpretedOutcome, LookupPayload, LookupRequest, RequestKind,
    ResultsResponse,
};
use semres_store::{RecentSearchCache, RecentSearchEntry, SearchStorage};

use crate::error::LookupError;
use crate::state::{LookupPhase, SessionState};

/// A validated lookup waiting for its response.
#[derive(Debug, Clone)]
pub struct PendingLookup {
    token: u64,
    kind: RequestKind,
    payload: LookupPayload,
}

impl PendingLookup {
    #[must_use]
    pub fn token(&self) -> u64 {
        self.token
    }

    #[must_use]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    #[must_use]
    pub fn payload(&self) -> &LookupPayload {
        &self.payload
    }
}

/// How a submission ended. Details live in the [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected,
    Succeeded,
    Failed,
    /// A newer lookup was issued before this one settled; its response was dropped.
    Superseded,
}

pub struct Orchestrator<S, T> {
    service: S,
    recent: RecentSearchCache<T>,
}

impl<S, T> Orchestrator<S, T>
where
    S: ResultsService,
    T: SearchStorage,
{
    pub fn new(service: S, recent: RecentSearchCache<T>) -> Self {
        Self { service, recent }
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    #[must_use]
    pub fn recent(&self) -> &RecentSearchCache<T> {
        &self.recent
    }

    /// Validates `request` and prepares it for sending.
    ///
    /// On success the session state is replaced by a fresh in-flight record
    /// and the search is recorded in the recent-search cache.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Validation`] if either form field is empty. The
    /// message is stored in `state` and nothing else changes.
    pub fn begin(
        &mut self,
        state: &mut SessionState,
        request: LookupRequest,
        kind: RequestKind,
    ) -> Result<PendingLookup, LookupError> {
        if !request.is_complete() {
            let err = LookupError::Validation;
            tracing::debug!(%kind, "rejecting incomplete lookup form");
            state.error = Some(err.to_string());
            return Err(err);
        }

        let token = state.token + 1;
        let semester = translate(&request.semester_code);
        let payload = LookupPayload {
            regd_no: request.registration_number.clone(),
            semester: semester.to_owned(),
        };

        *state = SessionState::in_flight(token, request, kind);
        self.recent.record(RecentSearchEntry::new(&payload.regd_no, semester));

        tracing::info!(
            token,
            %kind,
            regd_no = %payload.regd_no,
            semester = %payload.semester,
            "lookup issued"
        );

        Ok(PendingLookup {
            token,
            kind,
            payload,
        })
    }

    /// Sends the single request for `pending`.
    ///
    /// # Errors
    ///
    /// Propagates the service's [`ClientError`] unchanged.
    pub async fn fetch(&self, pending: &PendingLookup) -> Result<ResultsResponse, ClientError> {
        self.service.fetch(pending.kind, &pending.payload).await
    }

    /// Settles `pending` into `state`.
    ///
    /// Returns [`SubmitOutcome::Superseded`] without touching `state` when a
    /// newer lookup has been issued since `pending` began.
    #[allow(clippy::unused_self)]
    pub fn complete(
        &self,
        state: &mut SessionState,
        pending: PendingLookup,
        result: Result<ResultsResponse, ClientError>,
    ) -> SubmitOutcome {
        if pending.token != state.token {
            tracing::debug!(
                token = pending.token,
                current = state.token,
                "discarding response for superseded lookup"
            );
            return SubmitOutcome::Superseded;
        }

        let outcome = match result {
            Ok(response) => {
                match interpret(response) {
                    InterpretedOutcome::SingleSemester { subjects, summary } => {
                        tracing::info!(
                            token = pending.token,
                            subjects = subjects.len(),
                            sgpa = %summary.sgpa,
                            cgpa = %summary.cgpa,
                            "semester results settled"
                        );
                        state.results = Some(subjects);
                        state.summary = Some(summary);
                    }
                    InterpretedOutcome::FullHistory {
                        semester_results,
                        trend,
                    } => {
                        tracing::info!(
                            token = pending.token,
                            semesters = semester_results.as_ref().map_or(0, Vec::len),
                            "full history settled"
                        );
                        state.full_history = semester_results;
                        state.trend = trend;
                    }
                }
                state.phase = LookupPhase::Succeeded;
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!(
                    token = pending.token,
                    regd_no = %pending.payload.regd_no,
                    error = %e,
                    "results request failed"
                );
                state.error = Some(LookupError::Transport(e).to_string());
                state.phase = LookupPhase::Failed;
                SubmitOutcome::Failed
            }
        };
        state.settled_at = Some(Utc::now());
        outcome
    }

    /// Validates, sends and settles one lookup.
    ///
    /// Never returns an error: failures are reported through `state` and the
    /// returned [`SubmitOutcome`]. If the returned future is dropped before
    /// it completes, the lookup is marked failed rather than left in flight.
    pub async fn submit(
        &mut self,
        state: &mut SessionState,
        request: LookupRequest,
        kind: RequestKind,
    ) -> SubmitOutcome {
        let Ok(pending) = self.begin(state, request, kind) else {
            return SubmitOutcome::Rejected;
        };

        let mut guard = InFlightGuard {
            state,
            token: pending.token,
        };
        let result = self.fetch(&pending).await;
        self.complete(&mut *guard.state, pending, result)
    }
}

/// Clears the in-flight phase if a `submit` future is dropped mid-request.
struct InFlightGuard<'a> {
    state: &'a mut SessionState,
    token: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.state.token == self.token && self.state.is_in_flight() {
            tracing::debug!(token = self.token, "lookup dropped before it settled");
            self.state.error = Some(LookupError::Cancelled.to_string());
            self.state.phase = LookupPhase::Failed;
            self.state.settled_at = Some(Utc::now());
        }
    }
}
