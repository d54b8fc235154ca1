pub mod client;
pub mod error;
pub mod service;

pub use client::ResultsClient;
pub use error::ClientError;
pub use service::ResultsService;
