//! End-to-end lookups through `Orchestrator` against a wiremock results service.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use semres_client::ResultsClient;
use semres_core::{LookupRequest, RequestKind, NOT_AVAILABLE, NOT_RELEASED};
use semres_session::{LookupPhase, Orchestrator, SessionState, SubmitOutcome};
use semres_store::{MemoryStorage, RecentSearchCache};

fn orchestrator(base_url: &str) -> Orchestrator<ResultsClient, MemoryStorage> {
    let client = ResultsClient::with_base_url(5, "semres-test/0.1", base_url)
        .expect("client construction should not fail");
    Orchestrator::new(client, RecentSearchCache::load(MemoryStorage::new()))
}

#[tokio::test]
async fn semester_lookup_shows_subjects_and_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getResults"))
        .and(body_json(json!({ "regdNo": "21A91A0501", "semester": "Semester-III" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subjects": [{ "subject": "DS", "grade": "A" }],
            "sgpa": "8.2",
            "cgpa": "8.0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut orch = orchestrator(&server.uri());
    let mut state = SessionState::new();
    let outcome = orch
        .submit(
            &mut state,
            LookupRequest::new("21A91A0501", "3"),
            RequestKind::SingleSemester,
        )
        .await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert_eq!(state.phase(), LookupPhase::Succeeded);
    assert!(state.error().is_none());
    let results = state.results().expect("results should be set");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].subject, "DS");
    assert_eq!(results[0].grade, "A");
    let summary = state.summary().expect("summary should be set");
    assert_eq!(summary.sgpa, "8.2");
    assert_eq!(summary.cgpa, "8.0");

    let recent = orch.recent().all();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].registration_number, "21A91A0501");
    assert_eq!(recent[0].semester_label, "Semester-III");
}

#[tokio::test]
async fn unpublished_semester_reads_not_released() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getResults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "subjects": [] })))
        .mount(&server)
        .await;

    let mut orch = orchestrator(&server.uri());
    let mut state = SessionState::new();
    orch.submit(
        &mut state,
        LookupRequest::new("21A91A0501", "5"),
        RequestKind::SingleSemester,
    )
    .await;

    assert_eq!(state.results().map(<[_]>::len), Some(0));
    let summary = state.summary().expect("summary should be set");
    assert_eq!(summary.sgpa, NOT_RELEASED);
    assert_eq!(summary.cgpa, NOT_RELEASED);
}

#[tokio::test]
async fn missing_gpas_read_not_available() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getResults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subjects": [{ "subject": "OS", "grade": "B" }]
        })))
        .mount(&server)
        .await;

    let mut orch = orchestrator(&server.uri());
    let mut state = SessionState::new();
    orch.submit(
        &mut state,
        LookupRequest::new("21A91A0501", "2"),
        RequestKind::SingleSemester,
    )
    .await;

    let summary = state.summary().expect("summary should be set");
    assert_eq!(summary.sgpa, NOT_AVAILABLE);
    assert_eq!(summary.cgpa, NOT_AVAILABLE);
}

#[tokio::test]
async fn server_error_sets_message_and_clears_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getResults"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut orch = orchestrator(&server.uri());
    let mut state = SessionState::new();
    let outcome = orch
        .submit(
            &mut state,
            LookupRequest::new("21A91A0501", "3"),
            RequestKind::SingleSemester,
        )
        .await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(state.error(), Some("Failed to fetch results"));
    assert!(state.results().is_none());
    assert!(state.summary().is_none());
    assert!(!state.is_in_flight());
    assert_eq!(orch.recent().len(), 1);
}

#[tokio::test]
async fn incomplete_form_never_reaches_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut orch = orchestrator(&server.uri());
    let mut state = SessionState::new();
    let outcome = orch
        .submit(
            &mut state,
            LookupRequest::new("", "3"),
            RequestKind::SingleSemester,
        )
        .await;

    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert_eq!(state.error(), Some("Please fill in all fields"));
    assert!(orch.recent().is_empty());
}

#[tokio::test]
async fn full_history_lookup_fills_history_and_trend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getAllResults"))
        .and(body_json(json!({ "regdNo": "21A91A0501", "semester": "Semester-IV" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "semesterResults": [
                { "semester": "Semester-I", "sgpa": "7.2", "cgpa": "7.2" },
                { "semester": "Semester-II", "sgpa": 8.6, "cgpa": 7.9 }
            ],
            "performanceTrend": {
                "gradeTrend": [7.2, 8.6],
                "overallPerformance": "Very Good"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut orch = orchestrator(&server.uri());
    let mut state = SessionState::new();
    let outcome = orch
        .submit(
            &mut state,
            LookupRequest::new("21A91A0501", "4"),
            RequestKind::FullHistory,
        )
        .await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    let history = state.full_history().expect("history should be set");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].sgpa, "8.6");
    let trend = state.trend().expect("trend should be set");
    assert_eq!(trend.grade_trend, vec![7.2, 8.6]);
    assert_eq!(trend.overall_performance.as_deref(), Some("Very Good"));
    assert!(state.results().is_none());
    assert!(state.summary().is_none());
}

#[tokio::test]
async fn full_history_with_null_fields_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getAllResults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "semesterResults": [
                { "semester": "Semester-I", "sgpa": null, "cgpa": null }
            ],
            "performanceTrend": { "gradeTrend": null, "overallPerformance": null }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut orch = orchestrator(&server.uri());
    let mut state = SessionState::new();
    let outcome = orch
        .submit(
            &mut state,
            LookupRequest::new("21A91A0501", "1"),
            RequestKind::FullHistory,
        )
        .await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert!(state.error().is_none());
    let history = state.full_history().expect("history should be set");
    assert_eq!(history[0].semester, "Semester-I");
    assert_eq!(history[0].sgpa, "");
    let trend = state.trend().expect("trend should be set");
    assert!(trend.grade_trend.is_empty());
    assert!(trend.overall_performance.is_none());
}

#[tokio::test]
async fn new_lookup_replaces_previous_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getResults"))
        .and(body_json(json!({ "regdNo": "21A91A0501", "semester": "Semester-I" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subjects": [{ "subject": "M1", "grade": "A" }],
            "sgpa": "9.0",
            "cgpa": "9.0"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/getResults"))
        .and(body_json(json!({ "regdNo": "21A91A0501", "semester": "Semester-II" })))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut orch = orchestrator(&server.uri());
    let mut state = SessionState::new();
    orch.submit(
        &mut state,
        LookupRequest::new("21A91A0501", "1"),
        RequestKind::SingleSemester,
    )
    .await;
    assert!(state.results().is_some());

    orch.submit(
        &mut state,
        LookupRequest::new("21A91A0501", "2"),
        RequestKind::SingleSemester,
    )
    .await;

    assert!(state.results().is_none());
    assert_eq!(state.error(), Some("Failed to fetch results"));
    assert_eq!(orch.recent().len(), 2);
    assert_eq!(orch.recent().all()[0].semester_label, "Semester-II");
}
