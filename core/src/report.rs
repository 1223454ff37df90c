//! Compliance report assembly.
//!
//! For each configured check:
//!   1. check_seed  = identifier seed + check offset
//!   2. status      = weighted sample of draw(check_seed)
//!   3. flags       = flag selection on draw(check_seed + 100),
//!                    ordered by draw(check_seed + 200)
//!
//! Narrative and timestamp come straight from the config.

use crate::{
    config::{CheckConfig, SynthConfig},
    flags::select_flags_ordered,
    rng::draw_at,
    seed::derive_seed,
    types::{CheckStatus, Seed},
};
use serde::{Deserialize, Serialize};

const FLAG_DRAW_OFFSET: u64 = 100;
const FLAG_ORDER_OFFSET: u64 = 200;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCheck {
    pub name: String,
    pub status: CheckStatus,
    pub details: String,
    pub last_checked: String,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceCategory {
    pub name: String,
    pub checks: Vec<ComplianceCheck>,
}

impl ComplianceCategory {
    /// Worst status among the category's checks.
    pub fn overall_status(&self) -> CheckStatus {
        rollup(self.checks.iter().map(|c| c.status))
    }
}

/// Status counts across a whole report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warning: usize,
    pub pending: usize,
    pub overall: CheckStatus,
}

impl ReportSummary {
    pub fn from_categories(categories: &[ComplianceCategory]) -> Self {
        let statuses: Vec<CheckStatus> = categories
            .iter()
            .flat_map(|c| c.checks.iter().map(|check| check.status))
            .collect();

        let count = |s: CheckStatus| statuses.iter().filter(|&&x| x == s).count();

        Self {
            total: statuses.len(),
            passed: count(CheckStatus::Passed),
            failed: count(CheckStatus::Failed),
            warning: count(CheckStatus::Warning),
            pending: count(CheckStatus::Pending),
            overall: rollup(statuses.iter().copied()),
        }
    }
}

/// failed > warning > pending > passed. Nothing to roll up counts as passed.
fn rollup(statuses: impl Iterator<Item = CheckStatus>) -> CheckStatus {
    statuses
        .max_by_key(|s| match s {
            CheckStatus::Passed  => 0,
            CheckStatus::Pending => 1,
            CheckStatus::Warning => 2,
            CheckStatus::Failed  => 3,
        })
        .unwrap_or(CheckStatus::Passed)
}

pub fn build_report_with(config: &SynthConfig, identifier: &str) -> Vec<ComplianceCategory> {
    let base_seed = derive_seed(identifier);

    let categories: Vec<ComplianceCategory> = config
        .categories
        .iter()
        .map(|category| ComplianceCategory {
            name: category.name.clone(),
            checks: category
                .checks
                .iter()
                .map(|check| build_check(config, check, base_seed))
                .collect(),
        })
        .collect();

    log::debug!(
        "report for '{identifier}' (seed={base_seed}): {} categories, {} checks",
        categories.len(),
        config.check_count(),
    );
    categories
}

fn build_check(config: &SynthConfig, check: &CheckConfig, base_seed: Seed) -> ComplianceCheck {
    let check_seed = base_seed.wrapping_add(check.offset);
    let status = check.weights.sample(draw_at(check_seed, 0));
    let flags = select_flags_ordered(
        draw_at(check_seed, FLAG_DRAW_OFFSET),
        draw_at(check_seed, FLAG_ORDER_OFFSET),
        status,
        &config.flag_groups,
    );

    log::trace!(
        "check '{}' seed={check_seed} status={} flags={}",
        check.name,
        status.as_str(),
        flags.len()
    );

    ComplianceCheck {
        name: check.name.clone(),
        status,
        details: check.details.clone(),
        last_checked: check.last_checked.clone(),
        flags,
    }
}
