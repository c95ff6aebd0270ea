//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{ResidentNumber, SiteId, WorkerId, Won, YearMonth};
use domain_enrollment::{
    EnrollmentRecord, InsuranceEnrollment, InsuranceStatus, InsuranceType, RecordStatus,
    WorkHistory, Worker, WorkerType,
};
use rust_decimal::Decimal;

use crate::fixtures::{IdFixtures, ResidentFixtures, TemporalFixtures, WorkHistoryFixtures};

/// Builder for constructing test workers
pub struct TestWorkerBuilder {
    worker_id: WorkerId,
    name: String,
    resident_number: ResidentNumber,
    age: Option<u32>,
    worker_type: WorkerType,
}

impl Default for TestWorkerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkerBuilder {
    /// Creates a new builder for a 35-year-old day laborer
    pub fn new() -> Self {
        Self {
            worker_id: IdFixtures::worker_id(),
            name: "김건설".to_string(),
            resident_number: ResidentNumber::new(ResidentFixtures::born_1990()),
            age: None,
            worker_type: WorkerType::Daily,
        }
    }

    pub fn with_worker_id(mut self, id: impl Into<WorkerId>) -> Self {
        self.worker_id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_resident_number(mut self, resident_number: impl Into<ResidentNumber>) -> Self {
        self.resident_number = resident_number.into();
        self
    }

    /// Sets a precomputed age, bypassing the resident number
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_worker_type(mut self, worker_type: WorkerType) -> Self {
        self.worker_type = worker_type;
        self
    }

    pub fn build(self) -> Worker {
        Worker {
            worker_id: self.worker_id,
            name: self.name,
            resident_number: self.resident_number,
            age: self.age,
            worker_type: self.worker_type,
        }
    }
}

/// Builder for constructing work history snapshots
///
/// Starts from [`WorkHistoryFixtures::eligible`].
pub struct TestWorkHistoryBuilder {
    history: WorkHistory,
}

impl Default for TestWorkHistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkHistoryBuilder {
    pub fn new() -> Self {
        Self {
            history: WorkHistoryFixtures::eligible(),
        }
    }

    /// Starts from a history with no work at all
    pub fn empty() -> Self {
        Self {
            history: WorkHistory::default(),
        }
    }

    pub fn with_previous_month(mut self, days: u32, hours: Decimal) -> Self {
        self.history.previous_month_work_days = days;
        self.history.previous_month_work_hours = hours;
        self
    }

    pub fn with_current_month(mut self, days: u32, hours: Decimal) -> Self {
        self.history.current_month_work_days = days;
        self.history.current_month_work_hours = hours;
        self
    }

    pub fn with_monthly_wage(mut self, wage: i64) -> Self {
        self.history.monthly_wage = Won::from_i64(wage);
        self
    }

    pub fn with_first_work_date(mut self, date: Option<NaiveDate>) -> Self {
        self.history.first_work_date = date;
        self
    }

    pub fn with_last_work_date(mut self, date: Option<NaiveDate>) -> Self {
        self.history.last_work_date_this_month = date;
        self
    }

    pub fn registered(mut self) -> Self {
        self.history.is_registered_in_current_month = true;
        self
    }

    pub fn build(self) -> WorkHistory {
        self.history
    }
}

/// Builder for constructing enrollment records
pub struct TestEnrollmentRecordBuilder {
    record: EnrollmentRecord,
}

impl Default for TestEnrollmentRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnrollmentRecordBuilder {
    /// Creates a confirmed record for the previous month with nothing acquired
    pub fn new() -> Self {
        let mut record = EnrollmentRecord::new(
            IdFixtures::worker_id(),
            IdFixtures::site_id(),
            TemporalFixtures::previous_month(),
        );
        record.enrollment_status = Some(RecordStatus::Confirmed);
        Self { record }
    }

    pub fn with_worker_id(mut self, id: impl Into<WorkerId>) -> Self {
        self.record.worker_id = id.into();
        self
    }

    pub fn with_site_id(mut self, id: SiteId) -> Self {
        self.record.site_id = id;
        self
    }

    pub fn with_year_month(mut self, year_month: YearMonth) -> Self {
        self.record.year_month = year_month;
        self
    }

    /// Marks the insurance type acquired with an automatic required status
    pub fn acquired(mut self, insurance_type: InsuranceType, date: NaiveDate) -> Self {
        *self.record.enrollment_mut(insurance_type) =
            InsuranceEnrollment::acquired(date, InsuranceStatus::AutoRequired);
        self
    }

    /// Marks all four insurance types acquired on `date`
    pub fn acquired_all(mut self, date: NaiveDate) -> Self {
        for insurance_type in InsuranceType::ALL {
            self = self.acquired(insurance_type, date);
        }
        self
    }

    /// Sets a loss date on an insurance type
    pub fn lost(mut self, insurance_type: InsuranceType, date: NaiveDate) -> Self {
        self.record.enrollment_mut(insurance_type).loss_date = Some(date);
        self
    }

    pub fn with_status(mut self, insurance_type: InsuranceType, status: InsuranceStatus) -> Self {
        self.record.enrollment_mut(insurance_type).status = Some(status);
        self
    }

    pub fn terminated(mut self) -> Self {
        self.record.enrollment_status = Some(RecordStatus::Terminated);
        self
    }

    pub fn build(self) -> EnrollmentRecord {
        self.record
    }
}
