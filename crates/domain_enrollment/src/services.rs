//! Enrollment domain services
//!
//! Orchestrates one site's monthly enrollment run: classify workers, evaluate
//! the engine for each classified worker, and prepare the settings rows a
//! user confirms.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use core_kernel::{SiteId, UserId, WorkerId, YearMonth};

use crate::classification::{classify_workers, ClassificationSource, WorkerClassification};
use crate::eligibility::{EligibilityEngine, EligibilityRules, EnrollmentStatus, InsuranceDecisions};
use crate::enrollment::{enrollment_status_from_records, EnrollmentRecord};
use crate::settings::{prepare_settings_data, Confirmation, EnrollmentSettingsRecord};
use crate::work_history::WorkHistory;
use crate::worker::Worker;

/// Everything known about one site for one month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSnapshot {
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub work_histories: HashMap<WorkerId, WorkHistory>,
    #[serde(default)]
    pub enrollments: HashMap<WorkerId, Vec<EnrollmentRecord>>,
}

/// Result of preparing a confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationBatch {
    pub classification: WorkerClassification,
    pub decisions: HashMap<WorkerId, InsuranceDecisions>,
    pub settings: Vec<EnrollmentSettingsRecord>,
}

/// Service running the eligibility engine over a site's workers
#[derive(Debug, Clone, Default)]
pub struct EnrollmentService {
    engine: EligibilityEngine,
}

impl EnrollmentService {
    /// Creates a service aging workers as of `reference_date`
    pub fn new(rules: EligibilityRules, reference_date: NaiveDate) -> Self {
        Self {
            engine: EligibilityEngine::new(rules, reference_date),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Evaluates a single worker
    pub fn evaluate(
        &self,
        worker: &Worker,
        history: &WorkHistory,
        enrollment_status: Option<&EnrollmentStatus>,
    ) -> InsuranceDecisions {
        self.engine.determine(worker, history, enrollment_status)
    }

    /// Classifies a snapshot's workers for `year_month`
    pub fn classify(&self, snapshot: &SiteSnapshot, year_month: YearMonth) -> WorkerClassification {
        classify_workers(
            &snapshot.workers,
            &snapshot.work_histories,
            &snapshot.enrollments,
            year_month,
        )
    }

    /// Evaluates the engine for new-enrollment and maintained workers
    ///
    /// Maintained workers have their active National Pension and Health
    /// Insurance frozen. Loss candidates are not evaluated.
    pub fn evaluate_classification(
        &self,
        classification: &WorkerClassification,
        snapshot: &SiteSnapshot,
    ) -> HashMap<WorkerId, InsuranceDecisions> {
        let empty = WorkHistory::default();

        classification
            .iter()
            .filter(|c| c.source != ClassificationSource::LossCandidate)
            .map(|classified| {
                let worker_id = classified.worker_id();
                let history = snapshot.work_histories.get(&worker_id).unwrap_or(&empty);

                let enrollment_status = match classified.source {
                    ClassificationSource::ActiveEnrollment => {
                        let records = snapshot
                            .enrollments
                            .get(&worker_id)
                            .map(Vec::as_slice)
                            .unwrap_or(&[]);
                        Some(enrollment_status_from_records(records))
                    }
                    _ => None,
                };

                let decisions = self.evaluate(&classified.worker, history, enrollment_status.as_ref());
                (worker_id, decisions)
            })
            .collect()
    }

    /// Classifies, evaluates and prepares confirmed settings rows
    #[instrument(skip(self, snapshot), fields(workers = snapshot.workers.len()))]
    pub fn prepare_confirmation(
        &self,
        snapshot: &SiteSnapshot,
        site_id: SiteId,
        year_month: YearMonth,
        confirmed_by: UserId,
        confirmed_at: DateTime<Utc>,
    ) -> ConfirmationBatch {
        let classification = self.classify(snapshot, year_month);
        let decisions = self.evaluate_classification(&classification, snapshot);

        let confirmation = Confirmation {
            site_id,
            year_month,
            confirmed_by,
            confirmed_at,
        };
        let settings = prepare_settings_data(
            classification.iter(),
            &decisions,
            &snapshot.work_histories,
            &confirmation,
        );

        info!(
            %site_id,
            %year_month,
            %confirmed_by,
            rows = settings.len(),
            "Enrollment confirmation prepared"
        );

        ConfirmationBatch {
            classification,
            decisions,
            settings,
        }
    }
}
