//! Data model shared by the client, session and CLI crates.
//!
//! Response structs mirror the JSON returned by the results service. Field
//! names follow the service's camelCase via `#[serde(rename)]`.

use serde::{Deserialize, Deserializer, Serialize};

/// Selects which results endpoint a lookup is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// One semester: subject grades plus SGPA/CGPA.
    SingleSemester,
    /// Every semester so far plus the performance trend.
    FullHistory,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::SingleSemester => write!(f, "single-semester"),
            RequestKind::FullHistory => write!(f, "full-history"),
        }
    }
}

/// Form fields as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    pub registration_number: String,
    /// Numeric semester choice, `"1"` through `"8"`.
    pub semester_code: String,
}

impl LookupRequest {
    pub fn new(registration_number: impl Into<String>, semester_code: impl Into<String>) -> Self {
        Self {
            registration_number: registration_number.into(),
            semester_code: semester_code.into(),
        }
    }

    /// Both fields are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.registration_number.is_empty() && !self.semester_code.is_empty()
    }
}

/// JSON body posted to both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupPayload {
    #[serde(rename = "regdNo")]
    pub regd_no: String,
    /// Translated label, e.g. `"Semester-III"`.
    pub semester: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectResult {
    pub subject: String,
    pub grade: String,
}

/// SGPA/CGPA pair for display. Values are decimal strings or one of the
/// sentinels [`crate::NOT_AVAILABLE`] / [`crate::NOT_RELEASED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub sgpa: String,
    pub cgpa: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTrend {
    /// One GPA-like value per semester, oldest first.
    #[serde(rename = "gradeTrend", default, deserialize_with = "null_as_empty")]
    pub grade_trend: Vec<f64>,
    #[serde(rename = "overallPerformance", default)]
    pub overall_performance: Option<String>,
}

/// One row of the full-history table.
///
/// A `null` or missing GPA is kept as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllSemesterResult {
    pub semester: String,
    #[serde(default, deserialize_with = "string_or_number_or_empty")]
    pub sgpa: String,
    #[serde(default, deserialize_with = "string_or_number_or_empty")]
    pub cgpa: String,
}

/// Body of a single-semester response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSemesterResponse {
    #[serde(default)]
    pub subjects: Option<Vec<SubjectResult>>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub sgpa: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub cgpa: Option<String>,
}

/// Body of a full-history response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullHistoryResponse {
    #[serde(rename = "semesterResults", default)]
    pub semester_results: Option<Vec<AllSemesterResult>>,
    #[serde(rename = "performanceTrend", default)]
    pub performance_trend: Option<PerformanceTrend>,
}

/// A decoded response, tagged by the endpoint that produced it.
///
/// `None` inside a variant means the service answered with a JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsResponse {
    SingleSemester(Option<SingleSemesterResponse>),
    FullHistory(Option<FullHistoryResponse>),
}

impl ResultsResponse {
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            ResultsResponse::SingleSemester(_) => RequestKind::SingleSemester,
            ResultsResponse::FullHistory(_) => RequestKind::FullHistory,
        }
    }
}

/// The service is inconsistent about quoting GPAs; accept both `"8.2"` and `8.2`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Num(n) => n.to_string(),
        }
    }
}

fn string_or_number_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    opt_string_or_number(deserializer).map(Option::unwrap_or_default)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_service_field_names() {
        let payload = LookupPayload {
            regd_no: "21A91A0501".to_owned(),
            semester: "Semester-III".to_owned(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "regdNo": "21A91A0501", "semester": "Semester-III" })
        );
    }

    #[test]
    fn single_semester_accepts_numeric_gpas() {
        let body: SingleSemesterResponse = serde_json::from_value(serde_json::json!({
            "subjects": [{ "subject": "DS", "grade": "A" }],
            "sgpa": 8.2,
            "cgpa": "8.0"
        }))
        .unwrap();
        assert_eq!(body.sgpa.as_deref(), Some("8.2"));
        assert_eq!(body.cgpa.as_deref(), Some("8.0"));
    }

    #[test]
    fn single_semester_missing_fields_are_none() {
        let body: SingleSemesterResponse = serde_json::from_str("{}").unwrap();
        assert!(body.subjects.is_none());
        assert!(body.sgpa.is_none());
        assert!(body.cgpa.is_none());
    }

    #[test]
    fn null_gpa_is_none() {
        let body: SingleSemesterResponse =
            serde_json::from_str(r#"{"subjects": [], "sgpa": null}"#).unwrap();
        assert!(body.sgpa.is_none());
    }

    #[test]
    fn full_history_parses_trend() {
        let body: FullHistoryResponse = serde_json::from_value(serde_json::json!({
            "semesterResults": [
                { "semester": "Semester-I", "sgpa": "7.9", "cgpa": 7.9 }
            ],
            "performanceTrend": { "gradeTrend": [7.9, 8.4], "overallPerformance": "Very Good" }
        }))
        .unwrap();
        let rows = body.semester_results.unwrap();
        assert_eq!(rows[0].cgpa, "7.9");
        let trend = body.performance_trend.unwrap();
        assert_eq!(trend.grade_trend, vec![7.9, 8.4]);
        assert_eq!(trend.overall_performance.as_deref(), Some("Very Good"));
    }

    #[test]
    fn full_history_tolerates_nulls() {
        let body: FullHistoryResponse = serde_json::from_str(
            r#"{
                "semesterResults": [
                    { "semester": "Semester-I", "sgpa": null, "cgpa": 7.1 },
                    { "semester": "Semester-II", "cgpa": null }
                ],
                "performanceTrend": { "gradeTrend": null, "overallPerformance": null }
            }"#,
        )
        .unwrap();
        let rows = body.semester_results.unwrap();
        assert_eq!(rows[0].sgpa, "");
        assert_eq!(rows[0].cgpa, "7.1");
        assert_eq!(rows[1].sgpa, "");
        assert_eq!(rows[1].cgpa, "");
        let trend = body.performance_trend.unwrap();
        assert!(trend.grade_trend.is_empty());
        assert!(trend.overall_performance.is_none());
    }

    #[test]
    fn full_history_null_sections_are_none() {
        let body: FullHistoryResponse =
            serde_json::from_str(r#"{"semesterResults": null, "performanceTrend": null}"#)
                .unwrap();
        assert!(body.semester_results.is_none());
        assert!(body.performance_trend.is_none());
    }

    #[test]
    fn lookup_request_requires_both_fields() {
        assert!(LookupRequest::new("21A91A0501", "3").is_complete());
        assert!(!LookupRequest::new("", "3").is_complete());
        assert!(!LookupRequest::new("21A91A0501", "").is_complete());
    }

    #[test]
    fn response_reports_its_kind() {
        assert_eq!(
            ResultsResponse::SingleSemester(None).kind(),
            RequestKind::SingleSemester
        );
        assert_eq!(
            ResultsResponse::FullHistory(None).kind(),
            RequestKind::FullHistory
        );
    }
}
