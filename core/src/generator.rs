//! Entry points consumed by the dashboard.
//!
//! `SyntheticGenerator` only holds immutable configuration; every call
//! recomputes from its inputs, so one instance can be shared freely
//! across threads and call sites.

use crate::{
    config::SynthConfig,
    deviation::{build_deviations_with, Deviation},
    error::SynthResult,
    report::{build_report_with, ComplianceCategory, ReportSummary},
    types::LifecycleState,
};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticGenerator {
    config: SynthConfig,
}

impl SyntheticGenerator {
    pub fn new(config: SynthConfig) -> SynthResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn builtin() -> Self {
        Self { config: SynthConfig::builtin() }
    }

    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> SynthResult<Self> {
        Ok(Self { config: SynthConfig::load(data_dir)? })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn build_report(&self, identifier: &str) -> Vec<ComplianceCategory> {
        build_report_with(&self.config, identifier)
    }

    pub fn build_deviations(&self, identifier: &str, state: LifecycleState) -> Vec<Deviation> {
        build_deviations_with(&self.config, identifier, state)
    }

    pub fn summarize(&self, identifier: &str) -> ReportSummary {
        ReportSummary::from_categories(&self.build_report(identifier))
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_generator() -> &'static SyntheticGenerator {
    static BUILTIN: OnceLock<SyntheticGenerator> = OnceLock::new();
    BUILTIN.get_or_init(SyntheticGenerator::builtin)
}

/// Compliance report for `identifier` using the builtin taxonomy.
pub fn build_report(identifier: &str) -> Vec<ComplianceCategory> {
    builtin_generator().build_report(identifier)
}

/// Deviations for `identifier` under `state` using the builtin templates.
pub fn build_deviations(identifier: &str, state: LifecycleState) -> Vec<Deviation> {
    builtin_generator().build_deviations(identifier, state)
}
