//! Deviation list assembly, lifecycle gating and reviewer overlays.

use chrono::{TimeZone, Utc};
use kyb_synth_core::{
    build_deviations,
    deviation::{next_deviation_id, status_policy, Deviation},
    types::{DeviationType, Severity},
    DeviationStatus, LifecycleState, SynthError,
};

const ALL_STATES: [LifecycleState; 6] = [
    LifecycleState::Pending,
    LifecycleState::Review,
    LifecycleState::Approved,
    LifecycleState::Rejected,
    LifecycleState::Flagged,
    LifecycleState::Unknown,
];

fn sample_ids() -> impl Iterator<Item = String> {
    (0..200).map(|i| format!("APP-{i:03}"))
}

#[test]
fn pinned_counts() {
    assert_eq!(build_deviations("APP-001", LifecycleState::Pending).len(), 2);
    assert_eq!(build_deviations("default", LifecycleState::Pending).len(), 3);
    assert!(build_deviations("", LifecycleState::Pending).is_empty());
}

#[test]
fn count_depends_only_on_identifier() {
    for id in sample_ids() {
        let counts: Vec<usize> = ALL_STATES
            .iter()
            .map(|&state| build_deviations(&id, state).len())
            .collect();
        assert!(counts.iter().all(|&c| c == counts[0]), "{id}: counts differ by state {counts:?}");
        assert!(counts[0] <= 3, "{id}: {} deviations", counts[0]);
    }
}

#[test]
fn approved_application_has_only_decided_deviations() {
    let deviations = build_deviations("APP-001", LifecycleState::Approved);
    assert_eq!(deviations.len(), 2);

    assert_eq!(deviations[0].id, "DEV-001");
    assert_eq!(deviations[0].kind, DeviationType::Regulatory);
    assert_eq!(deviations[0].severity, Severity::Low);
    assert_eq!(deviations[1].id, "DEV-002");
    assert_eq!(deviations[1].kind, DeviationType::Pep);
    assert_eq!(deviations[1].severity, Severity::High);

    for d in &deviations {
        assert_eq!(d.status, DeviationStatus::Approved);
        assert_eq!(d.approved_by.as_deref(), Some("Sarah Mitchell"));
        assert_eq!(d.approval_date.as_deref(), Some("2024-01-16T14:20:00Z"));
    }

    for id in sample_ids() {
        for d in build_deviations(&id, LifecycleState::Approved) {
            assert!(
                d.status.is_terminal(),
                "{id}: {} is {:?} under an approved application",
                d.id,
                d.status
            );
        }
    }
}

#[test]
fn pending_application_mixes_statuses() {
    let statuses: Vec<DeviationStatus> = build_deviations("APP-001", LifecycleState::Pending)
        .iter()
        .map(|d| d.status)
        .collect();
    assert_eq!(statuses, vec![DeviationStatus::Open, DeviationStatus::UnderReview]);
}

#[test]
fn approver_fields_present_iff_terminal() {
    for id in sample_ids() {
        for state in ALL_STATES {
            for d in build_deviations(&id, state) {
                assert_eq!(
                    d.status.is_terminal(),
                    d.has_approver(),
                    "{id}/{state:?}: {} status {:?} approver {:?}",
                    d.id,
                    d.status,
                    d.approved_by
                );
                assert_eq!(d.approved_by.is_some(), d.approval_date.is_some());
                assert!(d.documents.is_none(), "generated deviations have no documents");
            }
        }
    }
}

#[test]
fn unknown_state_uses_fallback_policy() {
    assert_eq!(status_policy(LifecycleState::Unknown), status_policy(LifecycleState::Pending));
    assert_eq!(status_policy(LifecycleState::Flagged), status_policy(LifecycleState::Review));
    assert_eq!(LifecycleState::from_label("archived"), LifecycleState::Unknown);
    assert_eq!(
        build_deviations("APP-007", LifecycleState::from_label("archived")),
        build_deviations("APP-007", LifecycleState::Pending)
    );
}

#[test]
fn lifecycle_labels_deserialize() {
    let state: LifecycleState = serde_json::from_str("\"review\"").expect("known label");
    assert_eq!(state, LifecycleState::Review);
    let state: LifecycleState = serde_json::from_str("\"escalated\"").expect("unknown label");
    assert_eq!(state, LifecycleState::Unknown);
}

#[test]
fn policy_outcome_sets() {
    use DeviationStatus::*;
    assert_eq!(status_policy(LifecycleState::Approved).outcomes(), vec![Approved, Rejected]);
    assert_eq!(
        status_policy(LifecycleState::Rejected).outcomes(),
        vec![Rejected, Open, UnderReview]
    );
    assert_eq!(
        status_policy(LifecycleState::Pending).outcomes(),
        vec![Approved, UnderReview, Open, Rejected]
    );
}

#[test]
fn deviation_serializes_with_dashboard_field_names() {
    let deviations = build_deviations("APP-001", LifecycleState::Approved);
    let json = serde_json::to_value(&deviations[0]).expect("serialize");
    assert_eq!(json["id"], "DEV-001");
    assert_eq!(json["type"], "regulatory");
    assert_eq!(json["severity"], "low");
    assert_eq!(json["status"], "approved");
    assert_eq!(json["approvedBy"], "Sarah Mitchell");
    assert_eq!(json["approvalDate"], "2024-01-16T14:20:00Z");
    assert!(json.get("documents").is_none());

    let open = build_deviations("APP-001", LifecycleState::Pending);
    let json = serde_json::to_value(&open[1]).expect("serialize");
    assert_eq!(json["status"], "under_review");
    assert!(json.get("approvedBy").is_none());
}

#[test]
fn user_authored_deviation_lifecycle() {
    let existing = build_deviations("default", LifecycleState::Review);
    let id = next_deviation_id(&existing);
    assert_eq!(id, "DEV-004");

    let raised = Deviation::user_authored(
        id,
        DeviationType::Kyc,
        Severity::Medium,
        "Trading address differs from registered address".to_string(),
        "Director confirmed the move; lease agreement attached.".to_string(),
        vec!["lease_agreement.pdf".to_string()],
    );
    assert_eq!(raised.status, DeviationStatus::Open);
    assert!(!raised.has_approver());
    assert_eq!(raised.documents.as_deref(), Some(&["lease_agreement.pdf".to_string()][..]));

    let at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
    let approved = raised
        .decide(DeviationStatus::Approved, "Head of Compliance", at)
        .expect("approve");
    assert_eq!(approved.status, DeviationStatus::Approved);
    assert_eq!(approved.approved_by.as_deref(), Some("Head of Compliance"));
    assert_eq!(approved.approval_date.as_deref(), Some("2024-02-01T09:00:00Z"));
    assert_eq!(approved.documents, raised.documents);
    // The original value is untouched.
    assert_eq!(raised.status, DeviationStatus::Open);
}

#[test]
fn non_terminal_decisions_are_rejected() {
    let raised = Deviation::user_authored(
        "DEV-001".to_string(),
        DeviationType::Aml,
        Severity::High,
        "desc".to_string(),
        "why".to_string(),
        Vec::new(),
    );
    let at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
    for status in [DeviationStatus::Open, DeviationStatus::UnderReview] {
        match raised.decide(status, "someone", at) {
            Err(SynthError::InvalidDecision { id, .. }) => assert_eq!(id, "DEV-001"),
            other => panic!("expected InvalidDecision, got {other:?}"),
        }
    }
}

#[test]
fn next_id_skips_foreign_ids() {
    assert_eq!(next_deviation_id(&[]), "DEV-001");

    let mut d = Deviation::user_authored(
        "EXT-77".to_string(),
        DeviationType::Pep,
        Severity::Low,
        String::new(),
        String::new(),
        Vec::new(),
    );
    assert_eq!(next_deviation_id(std::slice::from_ref(&d)), "DEV-001");
    d.id = "DEV-041".to_string();
    assert_eq!(next_deviation_id(&[d]), "DEV-042");
}
