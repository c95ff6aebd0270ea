//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for eligibility decisions and
//! classifications that give more meaningful error messages than standard
//! assertions.

use core_kernel::WorkerId;
use domain_enrollment::{
    ClassificationSource, InsuranceDecision, InsuranceDecisions, ReasonCode, WorkerClassification,
};

/// Asserts that a decision is required
pub fn assert_required(decision: &InsuranceDecision) {
    assert!(
        decision.required,
        "Expected required, got exempt with reason: {}",
        decision.reason
    );
}

/// Asserts that a decision is exempt for the given reason
pub fn assert_exempt_because(decision: &InsuranceDecision, reason: &ReasonCode) {
    assert!(
        !decision.required,
        "Expected exempt ({}), got required with reason: {}",
        reason,
        decision.reason
    );
    assert_eq!(&decision.reason, reason, "Exempt for an unexpected reason");
}

/// Asserts that Employment Insurance and Industrial Accident are required
///
/// # Panics
///
/// Panics if either is exempt
pub fn assert_always_applicable_required(decisions: &InsuranceDecisions) {
    assert!(
        decisions.employment_insurance.required,
        "Employment insurance must always be required, reason: {}",
        decisions.employment_insurance.reason
    );
    assert!(
        decisions.industrial_accident.required,
        "Industrial accident insurance must always be required, reason: {}",
        decisions.industrial_accident.reason
    );
    assert_eq!(decisions.industrial_accident.reason, ReasonCode::MandatoryForAllWorkers);
}

/// Asserts that a worker ended up in exactly the given bucket
pub fn assert_classified_as(
    classification: &WorkerClassification,
    worker_id: WorkerId,
    source: ClassificationSource,
) {
    let matches: Vec<_> = classification
        .iter()
        .filter(|c| c.worker_id() == worker_id)
        .collect();

    assert_eq!(
        matches.len(),
        1,
        "Expected worker {} in exactly one bucket, found {}",
        worker_id,
        matches.len()
    );
    assert_eq!(
        matches[0].source, source,
        "Worker {} classified in the wrong bucket",
        worker_id
    );
}

/// Asserts that a worker appears in no bucket
pub fn assert_not_classified(classification: &WorkerClassification, worker_id: WorkerId) {
    assert!(
        classification.iter().all(|c| c.worker_id() != worker_id),
        "Expected worker {} to be excluded from classification",
        worker_id
    );
}
