use crate::types::DeviationStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Cannot read {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Category '{name}' has no checks")]
    EmptyCategory { name: String },

    #[error("Checks '{first}' and '{second}' share offset {offset}")]
    DuplicateCheckOffset {
        offset: u64,
        first: String,
        second: String,
    },

    #[error("Weight table for '{table}' has invalid mass {mass}")]
    InvalidWeight { table: String, mass: f64 },

    #[error("No flag groups configured")]
    NoFlagGroups,

    #[error("Flag group '{name}' has {len} phrases, need at least {min}")]
    FlagGroupTooSmall { name: String, len: usize, min: usize },

    #[error("Deviation template pool is empty")]
    EmptyTemplatePool,

    #[error("Invalid timestamp '{value}' for {field}")]
    InvalidTimestamp { field: String, value: String },

    #[error("Cannot decide deviation {id} as '{}': not a terminal status", .status.as_str())]
    InvalidDecision { id: String, status: DeviationStatus },
}

pub type SynthResult<T> = Result<T, SynthError>;
