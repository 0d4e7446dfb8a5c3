//! Flag engine tests — the eight detectors, deduplication, and ordering.

use clarity_core::config::{ScoringThresholds, VariantConfig};
use clarity_core::registry::QuestionRegistry;
use clarity_core::types::{
    Answer, AnswerType, AnswerValue, ConfidencePart, Dimension, QuestionDefinition, Role,
    Severity, TimePhase, TradeOffSide, TriadPart,
};

use clarity_analysis::flags::engine::FlagEngine;
use clarity_analysis::flags::types::{FlagId, NOTHING_IMPACTED_SENTINEL, NO_OWNER_SENTINEL};
use clarity_analysis::flags::{DetectionContext, KeywordClassifier};
use clarity_analysis::snapshot::AnswerSnapshot;

fn select(id: &str, role: Role, dimension: Dimension) -> QuestionDefinition {
    QuestionDefinition {
        answer_type: AnswerType::SingleSelect,
        ..QuestionDefinition::likert(id, role, dimension)
    }
}

/// A catalog exercising every detector's grouping tags.
fn catalog() -> Vec<QuestionDefinition> {
    vec![
        // Reverse pair within operations.
        QuestionDefinition {
            reverse_pair_id: Some("ops_benefit".into()),
            ..QuestionDefinition::likert("ops_benefit_claim", Role::Operations, Dimension::Readiness)
        },
        QuestionDefinition {
            is_reverse: true,
            reverse_pair_id: Some("ops_benefit".into()),
            ..QuestionDefinition::likert("ops_benefit_doubt", Role::Operations, Dimension::Readiness)
        },
        // ROI triad for the executive.
        QuestionDefinition {
            triad_group: Some("roi".into()),
            triad_part: Some(TriadPart::Claim),
            ..QuestionDefinition::likert("exec_roi_claim", Role::Executive, Dimension::ValueEconomics)
        },
        QuestionDefinition {
            triad_group: Some("roi".into()),
            triad_part: Some(TriadPart::Evidence),
            ..select("exec_roi_evidence", Role::Executive, Dimension::ValueEconomics)
        },
        QuestionDefinition {
            triad_group: Some("roi".into()),
            triad_part: Some(TriadPart::Consequence),
            ..select("exec_roi_consequence", Role::Executive, Dimension::ValueEconomics)
        },
        // Savings confidence pair for finance.
        QuestionDefinition {
            confidence_pair_id: Some("savings".into()),
            confidence_part: Some(ConfidencePart::Confidence),
            ..QuestionDefinition::likert("fin_savings_confidence", Role::Finance, Dimension::ValueEconomics)
        },
        QuestionDefinition {
            confidence_pair_id: Some("savings".into()),
            confidence_part: Some(ConfidencePart::Evidence),
            ..select("fin_savings_evidence", Role::Finance, Dimension::ValueEconomics)
        },
        // Data readiness rated by technology and operations.
        QuestionDefinition {
            contradiction_group: Some("data_readiness".into()),
            ..QuestionDefinition::likert("tech_data_quality", Role::Technology, Dimension::Readiness)
        },
        QuestionDefinition {
            contradiction_group: Some("data_readiness".into()),
            ..QuestionDefinition::likert("ops_data_quality", Role::Operations, Dimension::Readiness)
        },
        // Timeline rated by executive and operations (non-critical group).
        QuestionDefinition {
            contradiction_group: Some("timeline".into()),
            ..QuestionDefinition::likert("exec_timeline", Role::Executive, Dimension::StrategicIntent)
        },
        QuestionDefinition {
            contradiction_group: Some("timeline".into()),
            ..QuestionDefinition::likert("ops_timeline", Role::Operations, Dimension::StrategicIntent)
        },
        // Process ownership asked of two roles.
        QuestionDefinition {
            ownership_group: Some("process_owner".into()),
            ..select("exec_process_owner", Role::Executive, Dimension::Governance)
        },
        QuestionDefinition {
            ownership_group: Some("process_owner".into()),
            ..select("ops_process_owner", Role::Operations, Dimension::Governance)
        },
        // Delivery trade-off, business vs technology side.
        QuestionDefinition {
            trade_off_group: Some("delivery".into()),
            trade_off_side: Some(TradeOffSide::Business),
            ..select("fin_tradeoff", Role::Finance, Dimension::ValueEconomics)
        },
        QuestionDefinition {
            trade_off_group: Some("delivery".into()),
            trade_off_side: Some(TradeOffSide::Technology),
            ..select("tech_tradeoff", Role::Technology, Dimension::Readiness)
        },
        // Complexity time pair for the executive.
        QuestionDefinition {
            time_pair_id: Some("complexity".into()),
            time_phase: Some(TimePhase::Early),
            ..QuestionDefinition::likert("exec_simple_early", Role::Executive, Dimension::Risk)
        },
        QuestionDefinition {
            time_pair_id: Some("complexity".into()),
            time_phase: Some(TimePhase::Late),
            ..QuestionDefinition::likert("exec_complex_late", Role::Executive, Dimension::Risk)
        },
        // Free-text concerns from end users.
        QuestionDefinition {
            answer_type: AnswerType::FreeText,
            ..QuestionDefinition::likert("enduser_concerns", Role::EndUser, Dimension::Risk)
        },
    ]
}

fn run_flags(answers: &[Answer]) -> clarity_analysis::flags::engine::FlagEngineResult {
    let registry = QuestionRegistry::build(catalog()).unwrap();
    let variant = VariantConfig::full_diagnostic();
    let thresholds = ScoringThresholds::default();
    let classifier = KeywordClassifier::new();
    let (snapshot, _) = AnswerSnapshot::build(&registry, answers, &variant);
    let ctx = DetectionContext {
        snapshot: &snapshot,
        registry: &registry,
        thresholds: &thresholds,
        classifier: &classifier,
    };
    FlagEngine::new().run(&ctx)
}

fn ids(result: &clarity_analysis::flags::engine::FlagEngineResult) -> Vec<FlagId> {
    result.flags.iter().map(|f| f.id).collect()
}

#[test]
fn reversed_pair_both_high_warns() {
    // Agreeing with the claim AND normalizing high on its reverse twin.
    let result = run_flags(&[
        Answer::new("ops_benefit_claim", "p1", Role::Operations, AnswerValue::Likert(5)),
        Answer::new("ops_benefit_doubt", "p1", Role::Operations, AnswerValue::Likert(1)),
    ]);
    assert_eq!(ids(&result), vec![FlagId::ReversedPairConflict]);
    assert_eq!(result.flags[0].severity, Severity::Warn);
}

#[test]
fn reversed_pair_requires_same_participant() {
    let result = run_flags(&[
        Answer::new("ops_benefit_claim", "p1", Role::Operations, AnswerValue::Likert(5)),
        Answer::new("ops_benefit_doubt", "p2", Role::Operations, AnswerValue::Likert(1)),
    ]);
    assert!(ids(&result).is_empty());
}

#[test]
fn triad_weak_evidence_unowned_consequence_is_critical() {
    let result = run_flags(&[
        Answer::new("exec_roi_claim", "p1", Role::Executive, AnswerValue::Likert(5)),
        Answer::new(
            "exec_roi_evidence",
            "p1",
            Role::Executive,
            AnswerValue::Selection("gut_feeling".into()),
        ),
        Answer::new(
            "exec_roi_consequence",
            "p1",
            Role::Executive,
            AnswerValue::Selection(NO_OWNER_SENTINEL.into()),
        ),
    ]);
    // Exactly one flag: the critical pattern supersedes both WARN variants.
    assert_eq!(ids(&result), vec![FlagId::NarrativeInflationRisk]);
    assert_eq!(result.flags[0].severity, Severity::Critical);
}

#[test]
fn triad_weak_evidence_owned_consequence_is_a_proof_gap() {
    let result = run_flags(&[
        Answer::new("exec_roi_claim", "p1", Role::Executive, AnswerValue::Likert(5)),
        Answer::new(
            "exec_roi_evidence",
            "p1",
            Role::Executive,
            AnswerValue::Selection("informal_review".into()),
        ),
        Answer::new(
            "exec_roi_consequence",
            "p1",
            Role::Executive,
            AnswerValue::Selection("operations_lead".into()),
        ),
    ]);
    assert_eq!(ids(&result), vec![FlagId::ProofGap]);
    assert_eq!(result.flags[0].severity, Severity::Warn);
}

#[test]
fn triad_strong_evidence_unowned_consequence_warns_on_ownership() {
    let result = run_flags(&[
        Answer::new("exec_roi_claim", "p1", Role::Executive, AnswerValue::Likert(4)),
        Answer::new(
            "exec_roi_evidence",
            "p1",
            Role::Executive,
            AnswerValue::Selection("measured_data".into()),
        ),
        Answer::new(
            "exec_roi_consequence",
            "p1",
            Role::Executive,
            AnswerValue::Selection(NO_OWNER_SENTINEL.into()),
        ),
    ]);
    assert_eq!(ids(&result), vec![FlagId::ConsequenceUnowned]);
}

#[test]
fn triad_low_claim_never_fires() {
    let result = run_flags(&[
        Answer::new("exec_roi_claim", "p1", Role::Executive, AnswerValue::Likert(3)),
        Answer::new(
            "exec_roi_evidence",
            "p1",
            Role::Executive,
            AnswerValue::Selection("gut_feeling".into()),
        ),
        Answer::new(
            "exec_roi_consequence",
            "p1",
            Role::Executive,
            AnswerValue::Selection(NO_OWNER_SENTINEL.into()),
        ),
    ]);
    assert!(ids(&result).is_empty());
}

#[test]
fn confidence_with_anecdotal_evidence_is_critical() {
    let result = run_flags(&[
        Answer::new("fin_savings_confidence", "p1", Role::Finance, AnswerValue::Likert(5)),
        Answer::new(
            "fin_savings_evidence",
            "p1",
            Role::Finance,
            AnswerValue::Selection("anecdotes".into()),
        ),
    ]);
    assert_eq!(ids(&result), vec![FlagId::ConfidenceWithoutEvidence]);
    assert_eq!(result.flags[0].severity, Severity::Critical);
}

#[test]
fn confidence_with_partial_evidence_warns() {
    let result = run_flags(&[
        Answer::new("fin_savings_confidence", "p1", Role::Finance, AnswerValue::Likert(4)),
        Answer::new(
            "fin_savings_evidence",
            "p1",
            Role::Finance,
            AnswerValue::Selection("partial_indicators".into()),
        ),
    ]);
    assert_eq!(result.flags[0].severity, Severity::Warn);
}

#[test]
fn confidence_with_verified_evidence_is_clean() {
    let result = run_flags(&[
        Answer::new("fin_savings_confidence", "p1", Role::Finance, AnswerValue::Likert(5)),
        Answer::new(
            "fin_savings_evidence",
            "p1",
            Role::Finance,
            AnswerValue::Selection("measured_data".into()),
        ),
    ]);
    assert!(ids(&result).is_empty());
}

#[test]
fn cross_role_gap_on_data_readiness_is_critical() {
    // Technology says 5, operations says 1: gap of 4 adjusted points.
    let result = run_flags(&[
        Answer::new("tech_data_quality", "p1", Role::Technology, AnswerValue::Likert(5)),
        Answer::new("ops_data_quality", "p2", Role::Operations, AnswerValue::Likert(1)),
    ]);
    assert_eq!(ids(&result), vec![FlagId::CrossRoleMismatch]);
    assert_eq!(result.flags[0].severity, Severity::Critical);
}

#[test]
fn cross_role_gap_on_other_groups_warns() {
    let result = run_flags(&[
        Answer::new("exec_timeline", "p1", Role::Executive, AnswerValue::Likert(5)),
        Answer::new("ops_timeline", "p2", Role::Operations, AnswerValue::Likert(2)),
    ]);
    assert_eq!(ids(&result), vec![FlagId::CrossRoleMismatch]);
    assert_eq!(result.flags[0].severity, Severity::Warn);
}

#[test]
fn cross_role_gap_at_threshold_does_not_fire() {
    // Executive mean 5.0 vs operations mean 3.5: the gap of exactly 1.5
    // adjusted points is not "exceeds".
    let result = run_flags(&[
        Answer::new("exec_timeline", "p1", Role::Executive, AnswerValue::Likert(5)),
        Answer::new("ops_timeline", "p2", Role::Operations, AnswerValue::Likert(3)),
        Answer::new("ops_timeline", "p3", Role::Operations, AnswerValue::Likert(4)),
    ]);
    assert!(ids(&result).is_empty());
}

#[test]
fn ownership_sentinel_is_critical_even_with_two_distinct_answers() {
    let result = run_flags(&[
        Answer::new(
            "exec_process_owner",
            "p1",
            Role::Executive,
            AnswerValue::Selection("finance_team".into()),
        ),
        Answer::new(
            "ops_process_owner",
            "p2",
            Role::Operations,
            AnswerValue::Selection(NO_OWNER_SENTINEL.into()),
        ),
    ]);
    assert_eq!(ids(&result), vec![FlagId::OwnershipDiffusion]);
    assert_eq!(result.flags[0].severity, Severity::Critical);
}

#[test]
fn ownership_three_distinct_owners_is_critical() {
    let result = run_flags(&[
        Answer::new(
            "exec_process_owner",
            "p1",
            Role::Executive,
            AnswerValue::Selection("finance_team".into()),
        ),
        Answer::new(
            "exec_process_owner",
            "p2",
            Role::Executive,
            AnswerValue::Selection("it_team".into()),
        ),
        Answer::new(
            "ops_process_owner",
            "p3",
            Role::Operations,
            AnswerValue::Selection("operations_team".into()),
        ),
    ]);
    assert_eq!(result.flags[0].severity, Severity::Critical);
}

#[test]
fn ownership_two_distinct_owners_warns() {
    let result = run_flags(&[
        Answer::new(
            "exec_process_owner",
            "p1",
            Role::Executive,
            AnswerValue::Selection("finance_team".into()),
        ),
        Answer::new(
            "ops_process_owner",
            "p2",
            Role::Operations,
            AnswerValue::Selection("it_team".into()),
        ),
    ]);
    assert_eq!(result.flags[0].severity, Severity::Warn);
}

#[test]
fn ownership_agreement_is_clean() {
    let result = run_flags(&[
        Answer::new(
            "exec_process_owner",
            "p1",
            Role::Executive,
            AnswerValue::Selection("Finance_Team".into()),
        ),
        Answer::new(
            "ops_process_owner",
            "p2",
            Role::Operations,
            AnswerValue::Selection("finance_team".into()),
        ),
    ]);
    assert!(ids(&result).is_empty());
}

#[test]
fn capacity_illusion_one_side_warns() {
    let result = run_flags(&[
        Answer::new(
            "fin_tradeoff",
            "p1",
            Role::Finance,
            AnswerValue::Selection(NOTHING_IMPACTED_SENTINEL.into()),
        ),
        Answer::new(
            "tech_tradeoff",
            "p2",
            Role::Technology,
            AnswerValue::Selection("release_cadence".into()),
        ),
    ]);
    assert_eq!(ids(&result), vec![FlagId::CapacityIllusionBusiness]);
}

#[test]
fn capacity_illusion_both_sides_is_critical_and_supersedes() {
    let result = run_flags(&[
        Answer::new(
            "fin_tradeoff",
            "p1",
            Role::Finance,
            AnswerValue::Selection(NOTHING_IMPACTED_SENTINEL.into()),
        ),
        Answer::new(
            "tech_tradeoff",
            "p2",
            Role::Technology,
            AnswerValue::Selection(NOTHING_IMPACTED_SENTINEL.into()),
        ),
    ]);
    // Only the confirmed flag; the two role-specific WARNs are absorbed.
    assert_eq!(ids(&result), vec![FlagId::CapacityIllusionConfirmed]);
    assert_eq!(result.flags[0].severity, Severity::Critical);
}

#[test]
fn time_pair_high_on_both_phases_warns() {
    let result = run_flags(&[
        Answer::new("exec_simple_early", "p1", Role::Executive, AnswerValue::Likert(5)),
        Answer::new("exec_complex_late", "p1", Role::Executive, AnswerValue::Likert(4)),
    ]);
    assert_eq!(ids(&result), vec![FlagId::TimeInconsistency]);
}

#[test]
fn time_pair_different_participants_do_not_fire() {
    let result = run_flags(&[
        Answer::new("exec_simple_early", "p1", Role::Executive, AnswerValue::Likert(5)),
        Answer::new("exec_complex_late", "p2", Role::Executive, AnswerValue::Likert(5)),
    ]);
    assert!(ids(&result).is_empty());
}

#[test]
fn open_text_classification_emits_info_without_raw_text() {
    let result = run_flags(&[Answer::new(
        "enduser_concerns",
        "p1",
        Role::EndUser,
        AnswerValue::Text("The legacy integration is full of technical debt".into()),
    )]);
    assert_eq!(ids(&result), vec![FlagId::BlindSpot]);
    assert_eq!(result.flags[0].severity, Severity::Info);
    assert_eq!(result.flags[0].evidence.values[0], "technical_uncertainty");
    // The respondent's words never enter the evidence payload.
    assert!(!result.flags[0].evidence.detail.contains("legacy"));
}

#[test]
fn missing_questions_produce_no_flags_and_no_errors() {
    let registry = QuestionRegistry::build(vec![QuestionDefinition::likert(
        "lone",
        Role::Executive,
        Dimension::Risk,
    )])
    .unwrap();
    let variant = VariantConfig::full_diagnostic();
    let thresholds = ScoringThresholds::default();
    let classifier = KeywordClassifier::new();
    let answers = [Answer::new("lone", "p1", Role::Executive, AnswerValue::Likert(5))];
    let (snapshot, _) = AnswerSnapshot::build(&registry, &answers, &variant);
    let ctx = DetectionContext {
        snapshot: &snapshot,
        registry: &registry,
        thresholds: &thresholds,
        classifier: &classifier,
    };
    let result = FlagEngine::new().run(&ctx);
    assert!(result.flags.is_empty());
}

#[test]
fn output_is_severity_sorted_and_stable_across_runs() {
    let answers = vec![
        // INFO blind spot.
        Answer::new(
            "enduser_concerns",
            "p5",
            Role::EndUser,
            AnswerValue::Text("workaround culture, ad hoc fixes".into()),
        ),
        // WARN time inconsistency.
        Answer::new("exec_simple_early", "p1", Role::Executive, AnswerValue::Likert(5)),
        Answer::new("exec_complex_late", "p1", Role::Executive, AnswerValue::Likert(5)),
        // CRITICAL capacity illusion.
        Answer::new(
            "fin_tradeoff",
            "p2",
            Role::Finance,
            AnswerValue::Selection(NOTHING_IMPACTED_SENTINEL.into()),
        ),
        Answer::new(
            "tech_tradeoff",
            "p3",
            Role::Technology,
            AnswerValue::Selection(NOTHING_IMPACTED_SENTINEL.into()),
        ),
    ];

    let first = run_flags(&answers);
    let severities: Vec<Severity> = first.flags.iter().map(|f| f.severity).collect();
    assert_eq!(severities, vec![Severity::Critical, Severity::Warn, Severity::Info]);
    assert_eq!(first.counts.critical, 1);
    assert_eq!(first.counts.warn, 1);
    assert_eq!(first.counts.info, 1);

    // Parallel execution must not leak into output ordering.
    for _ in 0..10 {
        let again = run_flags(&answers);
        assert_eq!(ids(&again), ids(&first));
    }
}

#[test]
fn duplicate_evidence_is_deduplicated() {
    // The early answer recorded twice makes the detector fire twice with
    // identical evidence; one flag survives.
    let result = run_flags(&[
        Answer::new("exec_simple_early", "p1", Role::Executive, AnswerValue::Likert(5)),
        Answer::new("exec_simple_early", "p1", Role::Executive, AnswerValue::Likert(5)),
        Answer::new("exec_complex_late", "p1", Role::Executive, AnswerValue::Likert(5)),
    ]);
    assert_eq!(result.flags.len(), 1);
    assert_eq!(result.diagnostics.raw_count, 2);
    assert_eq!(result.diagnostics.deduped_count, 1);
}
