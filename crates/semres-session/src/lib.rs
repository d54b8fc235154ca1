pub mod error;
pub mod orchestrator;
pub mod state;

pub use error::LookupError;
pub use orchestrator::{Orchestrator, PendingLookup, SubmitOutcome};
pub use state::{LookupPhase, SessionState};
