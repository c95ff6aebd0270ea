//! Enrollment domain errors
//!
//! The eligibility engine itself never fails: every outcome is a decision with
//! a reason. These errors cover mutations of enrollment records.

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{CoreError, WorkerId, YearMonth};

use crate::enrollment::InsuranceType;

/// Errors that can occur in the enrollment domain
#[derive(Debug, Error)]
pub enum EnrollmentError {
    /// Loss date precedes the acquisition date
    #[error("Loss date {loss_date} for {insurance_type} is before acquisition date {acquisition_date}")]
    LossBeforeAcquisition {
        insurance_type: InsuranceType,
        acquisition_date: NaiveDate,
        loss_date: NaiveDate,
    },

    /// Record has been terminated and can no longer change
    #[error("Enrollment record for {worker_id} in {year_month} is terminated")]
    RecordTerminated {
        worker_id: WorkerId,
        year_month: YearMonth,
    },

    /// None of the requested insurance types is currently active
    #[error("No active insurance to process for {worker_id} in {year_month}")]
    NoActiveInsurance {
        worker_id: WorkerId,
        year_month: YearMonth,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Kernel error
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EnrollmentError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        EnrollmentError::Validation(message.into())
    }
}
