//! HTTP client for the remote results service.
//!
//! Both endpoints take the same `{ regdNo, semester }` JSON body via POST and
//! answer with endpoint-specific JSON. Any non-2xx status is surfaced as
//! [`ClientError::UnexpectedStatus`] without reading the body.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use semres_core::{
    AppConfig, FullHistoryResponse, LookupPayload, RequestKind, ResultsResponse,
    SingleSemesterResponse,
};

use crate::error::ClientError;

const SINGLE_SEMESTER_PATH: &str = "getResults";
const FULL_HISTORY_PATH: &str = "getAllResults";

/// Client for the results service.
///
/// Use [`ResultsClient::from_app_config`] in the binary or
/// [`ResultsClient::with_base_url`] to point at a mock server in tests.
pub struct ResultsClient {
    client: Client,
    single_semester_url: Url,
    full_history_url: Url,
}

impl ResultsClient {
    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ResultsClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            config.request_timeout_secs,
            &config.user_agent,
            &config.service_url,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// Endpoint paths are resolved relative to the base, so
    /// `https://host/api` posts to `https://host/api/getResults`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_owned()));
        }
        let single_semester_url = base
            .join(SINGLE_SEMESTER_PATH)
            .map_err(|e| invalid(e.to_string()))?;
        let full_history_url = base
            .join(FULL_HISTORY_PATH)
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            single_semester_url,
            full_history_url,
        })
    }

    /// Endpoint URL for the given request kind.
    #[must_use]
    pub fn endpoint(&self, kind: RequestKind) -> &Url {
        match kind {
            RequestKind::SingleSemester => &self.single_semester_url,
            RequestKind::FullHistory => &self.full_history_url,
        }
    }

    /// Fetches one semester's subject grades and SGPA/CGPA.
    ///
    /// Returns `Ok(None)` when the service answers with a JSON `null`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not the expected shape.
    pub async fn fetch_semester(
        &self,
        payload: &LookupPayload,
    ) -> Result<Option<SingleSemesterResponse>, ClientError> {
        self.post_json(RequestKind::SingleSemester, payload).await
    }

    /// Fetches the per-semester summary table and performance trend.
    ///
    /// # Errors
    ///
    /// Same as [`ResultsClient::fetch_semester`].
    pub async fn fetch_history(
        &self,
        payload: &LookupPayload,
    ) -> Result<Option<FullHistoryResponse>, ClientError> {
        self.post_json(RequestKind::FullHistory, payload).await
    }

    /// Fetches from the endpoint selected by `kind`, tagging the decoded body.
    ///
    /// # Errors
    ///
    /// Same as [`ResultsClient::fetch_semester`].
    pub async fn fetch_results(
        &self,
        kind: RequestKind,
        payload: &LookupPayload,
    ) -> Result<ResultsResponse, ClientError> {
        match kind {
            RequestKind::SingleSemester => self
                .fetch_semester(payload)
                .await
                .map(ResultsResponse::SingleSemester),
            RequestKind::FullHistory => self
                .fetch_history(payload)
                .await
                .map(ResultsResponse::FullHistory),
        }
    }

    /// POSTs `payload` as JSON, asserts a 2xx status and decodes the body.
    async fn post_json<T: DeserializeOwned>(
        &self,
        kind: RequestKind,
        payload: &LookupPayload,
    ) -> Result<Option<T>, ClientError> {
        let url = self.endpoint(kind);
        tracing::debug!(
            %url,
            %kind,
            regd_no = %payload.regd_no,
            semester = %payload.semester,
            "posting results request"
        );

        // `json` sets `Content-Type: application/json`.
        let response = self.client.post(url.clone()).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: format!("{kind} response from {url}"),
            source: e,
        })
    }
}
