//! Enrollment settings rows
//!
//! Combines engine decisions with the work-history snapshot into rows ready
//! for a bulk upsert into the enrollment settings table. Manual overrides are
//! applied upstream; rows produced here carry automatic statuses only.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{SiteId, UserId, WorkerId, Won, YearMonth};

use crate::classification::{ClassificationSource, ClassifiedWorker};
use crate::eligibility::InsuranceDecisions;
use crate::enrollment::{InsuranceStatus, RecordStatus};
use crate::work_history::WorkHistory;

/// Who confirmed which site and month, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub site_id: SiteId,
    pub year_month: YearMonth,
    pub confirmed_by: UserId,
    pub confirmed_at: DateTime<Utc>,
}

/// A persistence-ready enrollment settings row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentSettingsRecord {
    pub worker_id: WorkerId,
    pub site_id: SiteId,
    pub year_month: YearMonth,

    pub national_pension_status: InsuranceStatus,
    pub health_insurance_status: InsuranceStatus,
    pub employment_insurance_status: InsuranceStatus,
    pub industrial_accident_status: InsuranceStatus,

    pub previous_month_work_days: u32,
    pub previous_month_work_hours: Decimal,
    pub current_month_work_days: u32,
    pub current_month_work_hours: Decimal,
    pub first_work_date: Option<NaiveDate>,
    pub last_work_date: Option<NaiveDate>,
    pub monthly_wage: Won,

    pub classification_source: ClassificationSource,
    pub enrollment_status: RecordStatus,
    pub user_confirmed: bool,
    pub confirmed_by: UserId,
    pub user_confirmed_at: DateTime<Utc>,
}

impl EnrollmentSettingsRecord {
    /// Builds a confirmed row from a decision and its work-history snapshot
    pub fn confirmed(
        classified: &ClassifiedWorker,
        decisions: &InsuranceDecisions,
        history: &WorkHistory,
        confirmation: &Confirmation,
    ) -> Self {
        Self {
            worker_id: classified.worker_id(),
            site_id: confirmation.site_id,
            year_month: confirmation.year_month,
            national_pension_status: InsuranceStatus::automatic(decisions.national_pension.required),
            health_insurance_status: InsuranceStatus::automatic(decisions.health_insurance.required),
            employment_insurance_status: InsuranceStatus::automatic(decisions.employment_insurance.required),
            industrial_accident_status: InsuranceStatus::automatic(decisions.industrial_accident.required),
            previous_month_work_days: history.previous_month_work_days,
            previous_month_work_hours: history.previous_month_work_hours,
            current_month_work_days: history.current_month_work_days,
            current_month_work_hours: history.current_month_work_hours,
            first_work_date: history.first_work_date,
            last_work_date: history.last_work_date_this_month,
            monthly_wage: history.monthly_wage,
            classification_source: classified.source,
            enrollment_status: RecordStatus::Confirmed,
            user_confirmed: true,
            confirmed_by: confirmation.confirmed_by,
            user_confirmed_at: confirmation.confirmed_at,
        }
    }
}

/// Prepares settings rows for every classified worker that has a decision
///
/// Workers without a decision are skipped. A worker without a work-history
/// entry gets an all-zero snapshot.
pub fn prepare_settings_data<'a>(
    workers: impl IntoIterator<Item = &'a ClassifiedWorker>,
    decisions: &HashMap<WorkerId, InsuranceDecisions>,
    work_history_map: &HashMap<WorkerId, WorkHistory>,
    confirmation: &Confirmation,
) -> Vec<EnrollmentSettingsRecord> {
    let empty = WorkHistory::default();

    workers
        .into_iter()
        .filter_map(|classified| {
            let worker_id = classified.worker_id();
            let Some(decision) = decisions.get(&worker_id) else {
                debug!(%worker_id, source = ?classified.source, "No decision, skipping settings row");
                return None;
            };
            let history = work_history_map.get(&worker_id).unwrap_or(&empty);
            Some(EnrollmentSettingsRecord::confirmed(classified, decision, history, confirmation))
        })
        .collect()
}
