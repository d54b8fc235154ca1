use semres_client::ClientError;
use thiserror::Error;

/// Why a lookup ended without results. `Display` is the user-facing message.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Please fill in all fields")]
    Validation,

    /// Network failure, non-2xx status or an undecodable body.
    #[error("Failed to fetch results")]
    Transport(#[source] ClientError),

    #[error("Lookup was cancelled before it settled")]
    Cancelled,
}
