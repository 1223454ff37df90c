//! Static configuration tables for the generator.
//!
//! The check taxonomy, weight tables, flag phrases and deviation templates
//! are data, not branches. `SynthConfig::builtin()` is the reference set;
//! `SynthConfig::load()` reads the same shape from a data directory.
//!
//! RULE: Check offsets are assigned once. Changing an offset changes
//! every report generated for every identifier.

use crate::{
    error::{SynthError, SynthResult},
    flags::{FlagGroup, MAX_FLAGS},
    sampler::WeightTable,
    types::{CheckStatus, DeviationType, Severity},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckConfig {
    pub name: String,
    /// Added to the identifier seed to get this check's seed.
    pub offset: u64,
    pub weights: WeightTable<CheckStatus>,
    pub details: String,
    pub last_checked: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryConfig {
    pub name: String,
    pub checks: Vec<CheckConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviationTemplate {
    #[serde(rename = "type")]
    pub kind: DeviationType,
    pub severity: Severity,
    pub description: String,
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviationConfig {
    pub templates: Vec<DeviationTemplate>,
    /// Recorded on every approved or rejected generated deviation.
    pub approver: String,
    pub approval_date: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TaxonomyFile {
    categories: Vec<CategoryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct FlagGroupsFile {
    groups: Vec<FlagGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthConfig {
    pub categories: Vec<CategoryConfig>,
    pub flag_groups: Vec<FlagGroup>,
    pub deviations: DeviationConfig,
}

impl SynthConfig {
    /// Load from a data directory containing `taxonomy.json`,
    /// `flag_groups.json` and `deviations.json`.
    pub fn load(data_dir: impl AsRef<Path>) -> SynthResult<Self> {
        let data_dir = data_dir.as_ref();

        let taxonomy: TaxonomyFile = read_json(&data_dir.join("taxonomy.json"))?;
        let flag_groups: FlagGroupsFile = read_json(&data_dir.join("flag_groups.json"))?;
        let deviations: DeviationConfig = read_json(&data_dir.join("deviations.json"))?;

        let config = Self {
            categories: taxonomy.categories,
            flag_groups: flag_groups.groups,
            deviations,
        };
        config.validate()?;

        log::info!(
            "loaded synth config from {}: {} categories, {} checks, {} deviation templates",
            data_dir.display(),
            config.categories.len(),
            config.check_count(),
            config.deviations.templates.len(),
        );
        Ok(config)
    }

    /// The reference taxonomy: 4 categories, 13 checks.
    pub fn builtin() -> Self {
        use CheckStatus::*;

        let categories = vec![
            category(
                "KYC Verification",
                "2024-01-15T09:30:00Z",
                vec![
                    check(1, "Identity Document Verification", &[(Passed, 0.85), (Warning, 0.08), (Failed, 0.04)], Pending,
                        "Government-issued identity documents verified for all directors."),
                    check(2, "Business Registration Check", &[(Passed, 0.88), (Warning, 0.06), (Failed, 0.03)], Pending,
                        "Company registration confirmed against the official business registry."),
                    check(3, "Beneficial Ownership Verification", &[(Passed, 0.70), (Warning, 0.15), (Pending, 0.10)], Failed,
                        "Ultimate beneficial owners above the 25% threshold identified and verified."),
                    check(4, "Address Verification", &[(Passed, 0.80), (Warning, 0.10), (Failed, 0.05)], Pending,
                        "Registered and trading addresses matched to supporting documents."),
                ],
            ),
            category(
                "AML Screening",
                "2024-01-15T10:15:00Z",
                vec![
                    check(5, "Sanctions List Screening", &[(Passed, 0.90), (Warning, 0.05), (Failed, 0.03)], Pending,
                        "Entity and associated parties screened against consolidated sanctions lists."),
                    check(6, "Adverse Media Screening", &[(Passed, 0.75), (Warning, 0.15), (Failed, 0.05)], Pending,
                        "Global news and media sources searched for negative coverage."),
                    check(7, "Transaction Pattern Analysis", &[(Passed, 0.70), (Warning, 0.15), (Pending, 0.10)], Failed,
                        "Expected account activity compared with the declared business profile."),
                ],
            ),
            category(
                "PEP Screening",
                "2024-01-15T11:00:00Z",
                vec![
                    check(8, "PEP Database Check", &[(Passed, 0.85), (Warning, 0.10), (Failed, 0.03)], Pending,
                        "Directors and beneficial owners checked against PEP databases."),
                    check(9, "Family Member Screening", &[(Passed, 0.88), (Warning, 0.08), (Failed, 0.02)], Pending,
                        "Immediate family members of key individuals screened for PEP status."),
                    check(10, "Close Associate Screening", &[(Passed, 0.85), (Warning, 0.10), (Failed, 0.02)], Pending,
                        "Known close associates of key individuals screened for PEP status."),
                ],
            ),
            category(
                "Regulatory Compliance",
                "2024-01-15T11:45:00Z",
                vec![
                    check(11, "Enhanced Due Diligence", &[(Warning, 0.40), (Pending, 0.30), (Passed, 0.20)], Failed,
                        "Enhanced due diligence assessment for higher-risk business profile."),
                    check(12, "Source of Funds Verification", &[(Passed, 0.65), (Warning, 0.20), (Pending, 0.10)], Failed,
                        "Origin of initial deposit and ongoing funding sources documented."),
                    check(13, "Regulatory Reporting Check", &[(Passed, 0.90), (Pending, 0.05), (Warning, 0.03)], Failed,
                        "Reporting obligations and regulatory filings reviewed for completeness."),
                ],
            ),
        ];

        let flag_groups = vec![
            flag_group(
                "kyc",
                &[
                    "Document expires within 90 days",
                    "Name mismatch across documents",
                    "Incomplete ownership chart",
                    "Low-quality document scan",
                ],
            ),
            flag_group(
                "aml",
                &[
                    "Partial sanctions list match",
                    "Adverse media mention",
                    "High-risk jurisdiction exposure",
                    "Unusual transaction volume",
                ],
            ),
            flag_group(
                "pep",
                &[
                    "Potential PEP match",
                    "PEP family member identified",
                    "Close associate of PEP",
                    "Former public office holder",
                ],
            ),
            flag_group(
                "regulatory",
                &[
                    "Enhanced due diligence required",
                    "Source of funds unclear",
                    "Complex ownership structure",
                    "Missing regulatory filing",
                ],
            ),
        ];

        let templates = vec![
            template(
                DeviationType::Kyc,
                Severity::Medium,
                "Proof of address older than 90 days accepted",
                "Customer provided a recent bank statement as supporting evidence; updated utility bill requested within 30 days.",
            ),
            template(
                DeviationType::Aml,
                Severity::High,
                "Partial sanctions match cleared manually",
                "Date of birth and nationality differ from the listed individual; match confirmed as a false positive.",
            ),
            template(
                DeviationType::Pep,
                Severity::High,
                "Domestic PEP onboarded with enhanced monitoring",
                "Senior management approval obtained; source of wealth documented and transaction monitoring thresholds lowered.",
            ),
            template(
                DeviationType::Regulatory,
                Severity::Low,
                "Late beneficial ownership filing accepted",
                "Filing submitted to the registry after the deadline; confirmation of submission received.",
            ),
            template(
                DeviationType::Kyc,
                Severity::Critical,
                "Director identity verification deferred",
                "Director is travelling; certified passport copy to be provided before account activation.",
            ),
            template(
                DeviationType::Aml,
                Severity::Medium,
                "Cash-intensive business accepted",
                "Business model reviewed; expected cash volumes are consistent with the sector and declared turnover.",
            ),
        ];

        Self {
            categories,
            flag_groups,
            deviations: DeviationConfig {
                templates,
                approver: "Sarah Mitchell".to_string(),
                approval_date: "2024-01-16T14:20:00Z".to_string(),
            },
        }
    }

    pub fn check_count(&self) -> usize {
        self.categories.iter().map(|c| c.checks.len()).sum()
    }

    pub fn validate(&self) -> SynthResult<()> {
        let mut offsets: HashMap<u64, &str> = HashMap::new();

        for category in &self.categories {
            if category.checks.is_empty() {
                return Err(SynthError::EmptyCategory {
                    name: category.name.clone(),
                });
            }

            for check in &category.checks {
                if let Some(first) = offsets.insert(check.offset, check.name.as_str()) {
                    return Err(SynthError::DuplicateCheckOffset {
                        offset: check.offset,
                        first: first.to_string(),
                        second: check.name.clone(),
                    });
                }

                for (_, mass) in &check.weights.entries {
                    if !mass.is_finite() || !(0.0..=1.0).contains(mass) {
                        return Err(SynthError::InvalidWeight {
                            table: check.name.clone(),
                            mass: *mass,
                        });
                    }
                }

                let total = check.weights.total_mass();
                if total > 1.0 + f64::EPSILON {
                    log::warn!(
                        "weight table for '{}' sums to {total:.3}; later outcomes are shadowed",
                        check.name
                    );
                }

                validate_timestamp(&format!("{}.last_checked", check.name), &check.last_checked)?;
            }
        }

        if self.flag_groups.is_empty() {
            return Err(SynthError::NoFlagGroups);
        }
        for group in &self.flag_groups {
            if group.phrases.len() < MAX_FLAGS {
                return Err(SynthError::FlagGroupTooSmall {
                    name: group.name.clone(),
                    len: group.phrases.len(),
                    min: MAX_FLAGS,
                });
            }
        }

        if self.deviations.templates.is_empty() {
            return Err(SynthError::EmptyTemplatePool);
        }
        validate_timestamp("deviations.approval_date", &self.deviations.approval_date)?;

        Ok(())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> SynthResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| SynthError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn validate_timestamp(field: &str, value: &str) -> SynthResult<()> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|_| SynthError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        })
}

// ── Builtin table helpers ────────────────────────────────────────────────────

fn category(name: &str, last_checked: &str, checks: Vec<CheckConfig>) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        checks: checks
            .into_iter()
            .map(|c| CheckConfig {
                last_checked: last_checked.to_string(),
                ..c
            })
            .collect(),
    }
}

fn check(
    offset: u64,
    name: &str,
    entries: &[(CheckStatus, f64)],
    residual: CheckStatus,
    details: &str,
) -> CheckConfig {
    CheckConfig {
        name: name.to_string(),
        offset,
        weights: WeightTable::new(entries.to_vec(), residual),
        details: details.to_string(),
        last_checked: String::new(),
    }
}

fn flag_group(name: &str, phrases: &[&str]) -> FlagGroup {
    FlagGroup {
        name: name.to_string(),
        phrases: phrases.iter().map(|p| p.to_string()).collect(),
    }
}

fn template(
    kind: DeviationType,
    severity: Severity,
    description: &str,
    justification: &str,
) -> DeviationTemplate {
    DeviationTemplate {
        kind,
        severity,
        description: description.to_string(),
        justification: justification.to_string(),
    }
}
