//! Shared primitive types used across the generator.

use serde::{Deserialize, Serialize};

/// Opaque string naming the entity under review (e.g. an application
/// reference). Only ever used as hash input.
pub type Identifier = String;

/// Non-negative integer derived from an identifier.
pub type Seed = u64;

/// Identifier used when the caller has no real one.
pub const DEFAULT_IDENTIFIER: &str = "default";

/// Outcome of a single compliance check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
    Warning,
    Pending,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed  => "passed",
            Self::Failed  => "failed",
            Self::Warning => "warning",
            Self::Pending => "pending",
        }
    }
}

/// Approval workflow status of a deviation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeviationStatus {
    Open,
    UnderReview,
    Approved,
    Rejected,
}

impl DeviationStatus {
    /// Approved and rejected deviations carry approver metadata.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open        => "open",
            Self::UnderReview => "under_review",
            Self::Approved    => "approved",
            Self::Rejected    => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeviationType {
    Kyc,
    Aml,
    Pep,
    Regulatory,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Lifecycle state of the parent application. Gates deviation statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Pending,
    Review,
    Approved,
    Rejected,
    Flagged,
    /// Any label the dashboard sends that we don't recognise.
    #[serde(other)]
    Unknown,
}

impl LifecycleState {
    /// Never fails: unrecognised labels become `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "pending"  => Self::Pending,
            "review"   => Self::Review,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "flagged"  => Self::Flagged,
            _          => Self::Unknown,
        }
    }
}

impl From<&str> for LifecycleState {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}
