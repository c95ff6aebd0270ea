//! Eligibility DTOs

use serde::{Deserialize, Serialize};

use core_kernel::{WorkerId, YearMonth};
use domain_enrollment::{
    DailyWorkRecord, EnrollmentStatus, InsuranceDecision, InsuranceDecisions, ReasonCode,
    WorkHistory, Worker,
};

/// Evaluate one worker
///
/// The work history is either given directly or aggregated from
/// `dailyRecords` for `yearMonth`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub worker: Worker,
    #[serde(default)]
    pub work_history: Option<WorkHistory>,
    #[serde(default)]
    pub daily_records: Vec<DailyWorkRecord>,
    pub year_month: Option<YearMonth>,
    pub enrollment_status: Option<EnrollmentStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDto {
    pub required: bool,
    pub reason: ReasonCode,
    pub message: String,
}

impl From<&InsuranceDecision> for DecisionDto {
    fn from(decision: &InsuranceDecision) -> Self {
        Self {
            required: decision.required,
            reason: decision.reason.clone(),
            message: decision.reason.message(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionsDto {
    pub national_pension: DecisionDto,
    pub health_insurance: DecisionDto,
    pub employment_insurance: DecisionDto,
    pub industrial_accident: DecisionDto,
}

impl From<&InsuranceDecisions> for DecisionsDto {
    fn from(decisions: &InsuranceDecisions) -> Self {
        Self {
            national_pension: (&decisions.national_pension).into(),
            health_insurance: (&decisions.health_insurance).into(),
            employment_insurance: (&decisions.employment_insurance).into(),
            industrial_accident: (&decisions.industrial_accident).into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub worker_id: WorkerId,
    pub age: u32,
    pub work_history: WorkHistory,
    pub decisions: DecisionsDto,
}
