//! Worker classification for monthly enrollment processing
//!
//! Buckets the workers of a site for a month into:
//!
//! | bucket            | current work | active enrollment | can re-enroll |
//! |-------------------|--------------|-------------------|---------------|
//! | new enrollment    | yes          | no                | yes           |
//! | active/maintained | yes          | yes               | -             |
//! | loss candidate    | no           | yes               | -             |
//!
//! Everything else is excluded, as is any worker whose record for the target
//! month is terminated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{WorkerId, YearMonth};

use crate::enrollment::{can_re_enroll_after_loss, has_active_insurance_enrollment, EnrollmentRecord};
use crate::work_history::{has_current_month_work, WorkHistory};
use crate::worker::Worker;

/// The bucket a classified worker came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    NewEnrollment,
    ActiveEnrollment,
    LossCandidate,
}

/// A worker placed in a bucket, with the facts that placed it there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedWorker {
    pub worker: Worker,
    pub source: ClassificationSource,
    pub has_current_work: bool,
    pub has_active_enrollment: bool,
    pub can_re_enroll: bool,
}

impl ClassifiedWorker {
    pub fn worker_id(&self) -> WorkerId {
        self.worker.worker_id
    }
}

/// Result of classifying a site's workers for one month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerClassification {
    pub new_enrollment: Vec<ClassifiedWorker>,
    pub active_enrollment: Vec<ClassifiedWorker>,
    pub loss_candidates: Vec<ClassifiedWorker>,
}

impl WorkerClassification {
    /// All classified workers, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedWorker> {
        self.new_enrollment
            .iter()
            .chain(self.active_enrollment.iter())
            .chain(self.loss_candidates.iter())
    }

    pub fn len(&self) -> usize {
        self.new_enrollment.len() + self.active_enrollment.len() + self.loss_candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, classified: ClassifiedWorker) {
        match classified.source {
            ClassificationSource::NewEnrollment => self.new_enrollment.push(classified),
            ClassificationSource::ActiveEnrollment => self.active_enrollment.push(classified),
            ClassificationSource::LossCandidate => self.loss_candidates.push(classified),
        }
    }
}

/// Classifies one worker, or returns `None` if it belongs to no bucket
pub fn classify_worker(
    worker: &Worker,
    history: Option<&WorkHistory>,
    records: &[EnrollmentRecord],
    year_month: YearMonth,
) -> Option<ClassifiedWorker> {
    let terminated_this_month = records
        .iter()
        .any(|r| r.year_month == year_month && r.is_terminated());
    if terminated_this_month {
        debug!(worker_id = %worker.worker_id, %year_month, "Skipping terminated worker");
        return None;
    }

    let has_current_work = history.is_some_and(has_current_month_work);
    let has_active_enrollment = has_active_insurance_enrollment(records);
    let can_re_enroll = can_re_enroll_after_loss(year_month, records);

    let source = match (has_current_work, has_active_enrollment) {
        (true, false) if can_re_enroll => ClassificationSource::NewEnrollment,
        (true, true) => ClassificationSource::ActiveEnrollment,
        (false, true) => ClassificationSource::LossCandidate,
        _ => return None,
    };

    Some(ClassifiedWorker {
        worker: worker.clone(),
        source,
        has_current_work,
        has_active_enrollment,
        can_re_enroll,
    })
}

/// Classifies a site's workers for `year_month`
///
/// Workers missing from `work_history_map` are treated as having no work;
/// workers missing from `enrollment_map` as having no records.
#[instrument(skip_all, fields(year_month = %year_month, workers = workers.len()))]
pub fn classify_workers(
    workers: &[Worker],
    work_history_map: &HashMap<WorkerId, WorkHistory>,
    enrollment_map: &HashMap<WorkerId, Vec<EnrollmentRecord>>,
    year_month: YearMonth,
) -> WorkerClassification {
    let mut classification = WorkerClassification::default();

    for worker in workers {
        let history = work_history_map.get(&worker.worker_id);
        let records = enrollment_map
            .get(&worker.worker_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if let Some(classified) = classify_worker(worker, history, records, year_month) {
            classification.push(classified);
        }
    }

    debug!(
        new_enrollment = classification.new_enrollment.len(),
        active_enrollment = classification.active_enrollment.len(),
        loss_candidates = classification.loss_candidates.len(),
        "Workers classified"
    );

    classification
}
