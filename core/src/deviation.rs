//! Deviation list assembly and reviewer overlays.
//!
//! Generated deviations depend only on (identifier, lifecycle state):
//!   - count     = floor(draw(seed) * 4), so 0..=3
//!   - slot i    uses slot_seed = seed + 1000 * (i + 1)
//!   - template  = uniform pick on draw(slot_seed)
//!   - status    = lifecycle policy sampled on draw(slot_seed + 1)
//!
//! Approver fields are present exactly when the status is terminal.

use crate::{
    config::{DeviationTemplate, SynthConfig},
    error::{SynthError, SynthResult},
    rng::{draw_at, index_for},
    sampler::WeightTable,
    seed::derive_seed,
    types::{DeviationStatus, DeviationType, LifecycleState, Severity},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_GENERATED_DEVIATIONS: usize = 3;
const SLOT_STRIDE: u64 = 1000;
const STATUS_DRAW_OFFSET: u64 = 1;
const ID_PREFIX: &str = "DEV-";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deviation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DeviationType,
    pub severity: Severity,
    pub status: DeviationStatus,
    pub description: String,
    pub justification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<String>,
    /// Only user-authored deviations carry attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
}

impl Deviation {
    /// A deviation raised by a reviewer in the dashboard. Starts open.
    pub fn user_authored(
        id: String,
        kind: DeviationType,
        severity: Severity,
        description: String,
        justification: String,
        documents: Vec<String>,
    ) -> Self {
        Self {
            id,
            kind,
            severity,
            status: DeviationStatus::Open,
            description,
            justification,
            approved_by: None,
            approval_date: None,
            documents: Some(documents),
        }
    }

    /// Record a reviewer decision. Only approved/rejected are decisions.
    pub fn decide(
        &self,
        status: DeviationStatus,
        approver: &str,
        at: DateTime<Utc>,
    ) -> SynthResult<Self> {
        if !status.is_terminal() {
            return Err(SynthError::InvalidDecision {
                id: self.id.clone(),
                status,
            });
        }

        log::info!("deviation {} decided {} by {approver}", self.id, status.as_str());

        Ok(Self {
            status,
            approved_by: Some(approver.to_string()),
            approval_date: Some(at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ..self.clone()
        })
    }

    pub fn has_approver(&self) -> bool {
        self.approved_by.is_some() && self.approval_date.is_some()
    }
}

/// Next free `DEV-NNN` id. Ids not in that shape are ignored.
pub fn next_deviation_id(existing: &[Deviation]) -> String {
    let highest = existing
        .iter()
        .filter_map(|d| d.id.strip_prefix(ID_PREFIX)?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format_id(highest as usize + 1)
}

fn format_id(n: usize) -> String {
    format!("{ID_PREFIX}{n:03}")
}

/// Status distribution for deviations under a given lifecycle state.
/// A finalised approval leaves no deviation open or under review.
pub fn status_policy(state: LifecycleState) -> WeightTable<DeviationStatus> {
    use DeviationStatus::*;

    match state {
        LifecycleState::Approved => WeightTable::new(vec![(Approved, 0.8)], Rejected),
        LifecycleState::Rejected => {
            WeightTable::new(vec![(Rejected, 0.6), (Open, 0.2)], UnderReview)
        }
        LifecycleState::Pending
        | LifecycleState::Review
        | LifecycleState::Flagged
        | LifecycleState::Unknown => WeightTable::new(
            vec![(Approved, 0.3), (UnderReview, 0.3), (Open, 0.2)],
            Rejected,
        ),
    }
}

pub fn build_deviations_with(
    config: &SynthConfig,
    identifier: &str,
    state: LifecycleState,
) -> Vec<Deviation> {
    let templates = &config.deviations.templates;
    if templates.is_empty() {
        return Vec::new();
    }

    let base_seed = derive_seed(identifier);
    let count = index_for(draw_at(base_seed, 0), MAX_GENERATED_DEVIATIONS + 1);
    let policy = status_policy(state);

    let deviations: Vec<Deviation> = (0..count)
        .map(|slot| {
            let slot_seed = base_seed.wrapping_add(SLOT_STRIDE * (slot as u64 + 1));
            let template = &templates[index_for(draw_at(slot_seed, 0), templates.len())];
            let status = policy.sample(draw_at(slot_seed, STATUS_DRAW_OFFSET));
            log::trace!("slot {slot} seed={slot_seed} status={}", status.as_str());
            generated(config, template, format_id(slot + 1), status)
        })
        .collect();

    log::debug!(
        "deviations for '{identifier}' (seed={base_seed}, state={state:?}): {}",
        deviations.len()
    );
    deviations
}

fn generated(
    config: &SynthConfig,
    template: &DeviationTemplate,
    id: String,
    status: DeviationStatus,
) -> Deviation {
    let (approved_by, approval_date) = if status.is_terminal() {
        (
            Some(config.deviations.approver.clone()),
            Some(config.deviations.approval_date.clone()),
        )
    } else {
        (None, None)
    };

    Deviation {
        id,
        kind: template.kind,
        severity: template.severity,
        status,
        description: template.description.clone(),
        justification: template.justification.clone(),
        approved_by,
        approval_date,
        documents: None,
    }
}
