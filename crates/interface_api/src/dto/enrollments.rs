//! Enrollment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{SiteId, UserId, WorkerId, YearMonth};
use domain_enrollment::{
    ClassificationSource, ClassifiedWorker, EnrollmentSettingsRecord, InsuranceDecisions, SiteSnapshot,
};

use crate::dto::eligibility::DecisionsDto;

/// A site's snapshot for one month
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMonthRequest {
    pub site_id: SiteId,
    pub year_month: YearMonth,
    pub snapshot: SiteSnapshot,
}

/// A classified worker with its decisions, if evaluated
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedWorkerDto {
    pub worker_id: WorkerId,
    pub name: String,
    /// Masked resident number
    pub resident_number: String,
    pub source: ClassificationSource,
    pub has_current_work: bool,
    pub has_active_enrollment: bool,
    pub can_re_enroll: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decisions: Option<DecisionsDto>,
}

impl ClassifiedWorkerDto {
    pub fn new(classified: &ClassifiedWorker, decisions: Option<&InsuranceDecisions>) -> Self {
        Self {
            worker_id: classified.worker_id(),
            name: classified.worker.name.clone(),
            resident_number: classified.worker.resident_number.masked(),
            source: classified.source,
            has_current_work: classified.has_current_work,
            has_active_enrollment: classified.has_active_enrollment,
            can_re_enroll: classified.can_re_enroll,
            decisions: decisions.map(DecisionsDto::from),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub site_id: SiteId,
    pub year_month: YearMonth,
    pub new_enrollment: Vec<ClassifiedWorkerDto>,
    pub active_enrollment: Vec<ClassifiedWorkerDto>,
    pub loss_candidates: Vec<ClassifiedWorkerDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub site_id: SiteId,
    pub year_month: YearMonth,
    pub confirmed_by: UserId,
    pub confirmed_at: DateTime<Utc>,
    pub count: usize,
    pub settings: Vec<EnrollmentSettingsRecord>,
}
