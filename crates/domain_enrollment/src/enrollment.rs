//! Enrollment records and their state
//!
//! An `EnrollmentRecord` is written for each worker, site and month a user
//! confirms. Records are updated when loss is processed or the record is
//! terminated, never deleted.
//!
//! # Record lifecycle
//!
//! ```text
//! Pending -> Confirmed -> (loss dates set per insurance) -> Terminated
//! ```
//!
//! An insurance type is active only when it has an acquisition date, no loss
//! date and a required status. Terminated records contribute nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use core_kernel::{SiteId, WorkerId, YearMonth};

use crate::eligibility::{EnrollmentFlag, EnrollmentStatus};
use crate::error::EnrollmentError;

/// The four major insurances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceType {
    /// 국민연금
    NationalPension,
    /// 건강보험
    HealthInsurance,
    /// 고용보험
    EmploymentInsurance,
    /// 산재보험
    IndustrialAccident,
}

impl InsuranceType {
    pub const ALL: [InsuranceType; 4] = [
        InsuranceType::NationalPension,
        InsuranceType::HealthInsurance,
        InsuranceType::EmploymentInsurance,
        InsuranceType::IndustrialAccident,
    ];

    /// Column prefix used by the enrollment settings table
    pub fn column_prefix(&self) -> &'static str {
        match self {
            InsuranceType::NationalPension => "national_pension",
            InsuranceType::HealthInsurance => "health_insurance",
            InsuranceType::EmploymentInsurance => "employment_insurance",
            InsuranceType::IndustrialAccident => "industrial_accident",
        }
    }

    pub fn korean_name(&self) -> &'static str {
        match self {
            InsuranceType::NationalPension => "국민연금",
            InsuranceType::HealthInsurance => "건강보험",
            InsuranceType::EmploymentInsurance => "고용보험",
            InsuranceType::IndustrialAccident => "산재보험",
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.korean_name())
    }
}

/// Per-insurance enrollment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceStatus {
    AutoRequired,
    AutoExempted,
    ManualRequired,
    ManualExempted,
}

impl InsuranceStatus {
    /// Status produced by the eligibility engine
    pub fn automatic(required: bool) -> Self {
        if required {
            InsuranceStatus::AutoRequired
        } else {
            InsuranceStatus::AutoExempted
        }
    }

    /// Status set by a user override
    pub fn manual(required: bool) -> Self {
        if required {
            InsuranceStatus::ManualRequired
        } else {
            InsuranceStatus::ManualExempted
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, InsuranceStatus::AutoRequired | InsuranceStatus::ManualRequired)
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, InsuranceStatus::ManualRequired | InsuranceStatus::ManualExempted)
    }
}

/// Record-level status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Pending,
    Confirmed,
    Terminated,
}

/// Acquisition/loss state of one insurance type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsuranceEnrollment {
    /// 취득일
    pub acquisition_date: Option<NaiveDate>,
    /// 상실일
    pub loss_date: Option<NaiveDate>,
    pub status: Option<InsuranceStatus>,
}

impl InsuranceEnrollment {
    pub fn acquired(acquisition_date: NaiveDate, status: InsuranceStatus) -> Self {
        Self {
            acquisition_date: Some(acquisition_date),
            loss_date: None,
            status: Some(status),
        }
    }

    /// Acquired, not lost, and required
    pub fn is_active(&self) -> bool {
        self.acquisition_date.is_some()
            && self.loss_date.is_none()
            && self.status.is_some_and(|s| s.is_required())
    }
}

/// Enrollment state of one worker at one site for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    pub worker_id: WorkerId,
    pub site_id: SiteId,
    pub year_month: YearMonth,
    #[serde(default)]
    pub national_pension: InsuranceEnrollment,
    #[serde(default)]
    pub health_insurance: InsuranceEnrollment,
    #[serde(default)]
    pub employment_insurance: InsuranceEnrollment,
    #[serde(default)]
    pub industrial_accident: InsuranceEnrollment,
    #[serde(default)]
    pub enrollment_status: Option<RecordStatus>,
}

impl EnrollmentRecord {
    pub fn new(worker_id: WorkerId, site_id: SiteId, year_month: YearMonth) -> Self {
        Self {
            worker_id,
            site_id,
            year_month,
            national_pension: InsuranceEnrollment::default(),
            health_insurance: InsuranceEnrollment::default(),
            employment_insurance: InsuranceEnrollment::default(),
            industrial_accident: InsuranceEnrollment::default(),
            enrollment_status: None,
        }
    }

    pub fn enrollment(&self, insurance_type: InsuranceType) -> &InsuranceEnrollment {
        match insurance_type {
            InsuranceType::NationalPension => &self.national_pension,
            InsuranceType::HealthInsurance => &self.health_insurance,
            InsuranceType::EmploymentInsurance => &self.employment_insurance,
            InsuranceType::IndustrialAccident => &self.industrial_accident,
        }
    }

    pub fn enrollment_mut(&mut self, insurance_type: InsuranceType) -> &mut InsuranceEnrollment {
        match insurance_type {
            InsuranceType::NationalPension => &mut self.national_pension,
            InsuranceType::HealthInsurance => &mut self.health_insurance,
            InsuranceType::EmploymentInsurance => &mut self.employment_insurance,
            InsuranceType::IndustrialAccident => &mut self.industrial_accident,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.enrollment_status == Some(RecordStatus::Terminated)
    }

    /// Returns true if the insurance type is active on a non-terminated record
    pub fn is_active(&self, insurance_type: InsuranceType) -> bool {
        !self.is_terminated() && self.enrollment(insurance_type).is_active()
    }

    pub fn active_insurance_types(&self) -> Vec<InsuranceType> {
        InsuranceType::ALL
            .into_iter()
            .filter(|t| self.is_active(*t))
            .collect()
    }

    /// Latest loss date across all insurance types
    pub fn latest_loss_date(&self) -> Option<NaiveDate> {
        InsuranceType::ALL
            .into_iter()
            .filter_map(|t| self.enrollment(t).loss_date)
            .max()
    }

    /// Records an acquisition for one insurance type
    pub fn record_acquisition(
        &mut self,
        insurance_type: InsuranceType,
        acquisition_date: NaiveDate,
        status: InsuranceStatus,
    ) -> Result<(), EnrollmentError> {
        self.ensure_not_terminated()?;
        *self.enrollment_mut(insurance_type) = InsuranceEnrollment::acquired(acquisition_date, status);
        Ok(())
    }

    /// Sets the loss date on every listed insurance type that is active
    ///
    /// Either all listed active types are updated or none is. Returns the
    /// types that were updated.
    ///
    /// # Errors
    ///
    /// - `RecordTerminated` if the record is terminated
    /// - `NoActiveInsurance` if none of the listed types is active
    /// - `LossBeforeAcquisition` if the loss date precedes an acquisition date
    pub fn process_loss(
        &mut self,
        loss_date: NaiveDate,
        insurance_types: &[InsuranceType],
    ) -> Result<Vec<InsuranceType>, EnrollmentError> {
        self.ensure_not_terminated()?;

        let targets: Vec<InsuranceType> = insurance_types
            .iter()
            .copied()
            .filter(|t| self.is_active(*t))
            .collect();

        if targets.is_empty() {
            return Err(EnrollmentError::NoActiveInsurance {
                worker_id: self.worker_id,
                year_month: self.year_month,
            });
        }

        for insurance_type in &targets {
            if let Some(acquisition_date) = self.enrollment(*insurance_type).acquisition_date {
                if loss_date < acquisition_date {
                    return Err(EnrollmentError::LossBeforeAcquisition {
                        insurance_type: *insurance_type,
                        acquisition_date,
                        loss_date,
                    });
                }
            }
        }

        for insurance_type in &targets {
            self.enrollment_mut(*insurance_type).loss_date = Some(loss_date);
        }

        debug!(
            worker_id = %self.worker_id,
            year_month = %self.year_month,
            %loss_date,
            count = targets.len(),
            "Loss processed"
        );

        Ok(targets)
    }

    /// Marks the record terminated
    pub fn terminate(&mut self) -> Result<(), EnrollmentError> {
        self.ensure_not_terminated()?;
        self.enrollment_status = Some(RecordStatus::Terminated);
        Ok(())
    }

    /// Replaces the status of one insurance type with a user decision
    pub fn apply_manual_override(
        &mut self,
        insurance_type: InsuranceType,
        required: bool,
    ) -> Result<(), EnrollmentError> {
        self.ensure_not_terminated()?;
        self.enrollment_mut(insurance_type).status = Some(InsuranceStatus::manual(required));
        Ok(())
    }

    fn ensure_not_terminated(&self) -> Result<(), EnrollmentError> {
        if self.is_terminated() {
            return Err(EnrollmentError::RecordTerminated {
                worker_id: self.worker_id,
                year_month: self.year_month,
            });
        }
        Ok(())
    }
}

/// Returns true if any insurance type in any non-terminated record is active
pub fn has_active_insurance_enrollment(records: &[EnrollmentRecord]) -> bool {
    records
        .iter()
        .any(|record| InsuranceType::ALL.into_iter().any(|t| record.is_active(t)))
}

/// Returns true if `year_month` is on or after the month following the latest
/// loss date across all records
///
/// Workers that never lost an insurance can always enroll. A loss in the
/// last representable month leaves no month to re-enroll in.
pub fn can_re_enroll_after_loss(year_month: YearMonth, records: &[EnrollmentRecord]) -> bool {
    let latest_loss = records.iter().filter_map(EnrollmentRecord::latest_loss_date).max();

    match latest_loss {
        Some(loss_date) => YearMonth::from_date(loss_date)
            .next()
            .is_ok_and(|first_eligible| year_month >= first_eligible),
        None => true,
    }
}

/// Derives the existing-enrollment override from active records
///
/// Only National Pension and Health Insurance can be frozen; Employment and
/// Industrial Accident are always required.
pub fn enrollment_status_from_records(records: &[EnrollmentRecord]) -> EnrollmentStatus {
    let enrolled = |insurance_type: InsuranceType| records.iter().any(|r| r.is_active(insurance_type));

    EnrollmentStatus {
        national_pension: EnrollmentFlag {
            is_enrolled: enrolled(InsuranceType::NationalPension),
        },
        health_insurance: EnrollmentFlag {
            is_enrolled: enrolled(InsuranceType::HealthInsurance),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> EnrollmentRecord {
        EnrollmentRecord::new(WorkerId::new(1), SiteId::new(10), YearMonth::new(2025, 3).unwrap())
    }

    #[test]
    fn test_active_requires_all_three_conditions() {
        let mut enrollment = InsuranceEnrollment::acquired(date(2025, 3, 1), InsuranceStatus::AutoRequired);
        assert!(enrollment.is_active());

        enrollment.status = Some(InsuranceStatus::ManualExempted);
        assert!(!enrollment.is_active());

        enrollment.status = Some(InsuranceStatus::ManualRequired);
        enrollment.loss_date = Some(date(2025, 4, 1));
        assert!(!enrollment.is_active());

        let unacquired = InsuranceEnrollment {
            acquisition_date: None,
            loss_date: None,
            status: Some(InsuranceStatus::AutoRequired),
        };
        assert!(!unacquired.is_active());
    }

    #[test]
    fn test_process_loss_is_all_or_nothing() {
        let mut rec = record();
        rec.record_acquisition(InsuranceType::NationalPension, date(2025, 3, 1), InsuranceStatus::AutoRequired)
            .unwrap();
        rec.record_acquisition(InsuranceType::HealthInsurance, date(2025, 3, 20), InsuranceStatus::AutoRequired)
            .unwrap();

        let result = rec.process_loss(
            date(2025, 3, 10),
            &[InsuranceType::NationalPension, InsuranceType::HealthInsurance],
        );

        assert!(matches!(
            result,
            Err(EnrollmentError::LossBeforeAcquisition {
                insurance_type: InsuranceType::HealthInsurance,
                ..
            })
        ));
        assert!(rec.national_pension.loss_date.is_none());
    }

    #[test]
    fn test_process_loss_skips_inactive_types() {
        let mut rec = record();
        rec.record_acquisition(InsuranceType::EmploymentInsurance, date(2025, 3, 1), InsuranceStatus::AutoRequired)
            .unwrap();

        let updated = rec
            .process_loss(date(2025, 4, 1), &InsuranceType::ALL)
            .unwrap();

        assert_eq!(updated, vec![InsuranceType::EmploymentInsurance]);
        assert_eq!(rec.employment_insurance.loss_date, Some(date(2025, 4, 1)));
        assert!(rec.active_insurance_types().is_empty());
    }

    #[test]
    fn test_terminated_record_rejects_changes() {
        let mut rec = record();
        rec.terminate().unwrap();

        assert!(matches!(rec.terminate(), Err(EnrollmentError::RecordTerminated { .. })));
        assert!(rec
            .apply_manual_override(InsuranceType::NationalPension, true)
            .is_err());
    }

    #[test]
    fn test_manual_override_status() {
        let mut rec = record();
        rec.apply_manual_override(InsuranceType::HealthInsurance, false).unwrap();
        assert_eq!(rec.health_insurance.status, Some(InsuranceStatus::ManualExempted));
    }
}
