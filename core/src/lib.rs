//! Deterministic synthetic compliance data for the application review
//! dashboard.
//!
//! identifier -> seed -> draws -> outcomes -> assembled records.
//! Same identifier in, same records out, on every call.

pub mod config;
pub mod deviation;
pub mod error;
pub mod flags;
pub mod generator;
pub mod report;
pub mod rng;
pub mod sampler;
pub mod seed;
pub mod types;

pub use deviation::Deviation;
pub use error::{SynthError, SynthResult};
pub use generator::{build_deviations, build_report, SyntheticGenerator};
pub use report::{ComplianceCategory, ComplianceCheck, ReportSummary};
pub use types::{CheckStatus, DeviationStatus, LifecycleState};
