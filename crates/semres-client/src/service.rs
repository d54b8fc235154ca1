//! Seam between the lookup orchestrator and the network.

use std::future::Future;

use semres_core::{LookupPayload, RequestKind, ResultsResponse};

use crate::client::ResultsClient;
use crate::error::ClientError;

/// Anything that can answer a results lookup.
///
/// [`ResultsClient`] is the production implementation; tests substitute
/// scripted fakes.
pub trait ResultsService {
    /// Issues exactly one request to the endpoint selected by `kind`.
    fn fetch(
        &self,
        kind: RequestKind,
        payload: &LookupPayload,
    ) -> impl Future<Output = Result<ResultsResponse, ClientError>> + Send;
}

impl ResultsService for ResultsClient {
    fn fetch(
        &self,
        kind: RequestKind,
        payload: &LookupPayload,
    ) -> impl Future<Output = Result<ResultsResponse, ClientError>> + Send {
        self.fetch_results(kind, payload)
    }
}
