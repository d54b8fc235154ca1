pub mod app_config;
pub mod config;
pub mod error;
pub mod interpret;
pub mod semester;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use interpret::{
    interpret, is_pass_worthy, parse_gpa, GpaBand, InterpretedOutcome, PerformanceCategory,
    NOT_AVAILABLE, NOT_RELEASED,
};
pub use semester::{translate, SEMESTER_CODES};
pub use types::{
    AllSemesterResult, FullHistoryResponse, LookupPayload, LookupRequest, PerformanceTrend,
    RequestKind, ResultsResponse, SemesterSummary, SingleSemesterResponse, SubjectResult,
};
