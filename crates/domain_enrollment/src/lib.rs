//! Four-Major-Insurance Enrollment Domain
//!
//! This crate decides which of the four major Korean social insurances a
//! construction worker must be enrolled in for a given month, and buckets a
//! site's workers for monthly enrollment processing.
//!
//! # Architecture
//!
//! The domain is pure and infrastructure-agnostic. Callers supply snapshots;
//! nothing here performs I/O.
//! - **Inputs**: `Worker`, `WorkHistory` (or daily records to aggregate),
//!   `EnrollmentRecord`s
//! - **Engine**: `EligibilityEngine` producing `InsuranceDecisions`
//! - **Classification**: new enrollment / maintained / loss candidate
//! - **Settings**: rows ready for the enrollment settings table
//!
//! # Monthly flow
//!
//! ```text
//! daily records -> WorkHistory ─┐
//! EnrollmentRecords ────────────┼-> classify_workers -> determine -> prepare_settings_data
//! Workers ──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_enrollment::{determine_insurance_status, Worker, WorkHistory};
//!
//! let worker = Worker::new(worker_id, "홍길동", "900101-1234567");
//! let decisions = determine_insurance_status(&worker, &history, None);
//!
//! if decisions.national_pension.required {
//!     println!("{}", decisions.national_pension.reason);
//! }
//! ```

pub mod worker;
pub mod work_history;
pub mod enrollment;
pub mod eligibility;
pub mod classification;
pub mod settings;
pub mod services;
pub mod error;

pub use worker::{Worker, WorkerType};
pub use work_history::{has_current_month_work, DailyWorkRecord, WorkHistory};
pub use enrollment::{
    can_re_enroll_after_loss, enrollment_status_from_records, has_active_insurance_enrollment,
    EnrollmentRecord, InsuranceEnrollment, InsuranceStatus, InsuranceType, RecordStatus,
};
pub use eligibility::{
    determine_insurance_status, EligibilityEngine, EligibilityRules, EnrollmentFlag,
    EnrollmentStatus, InsuranceDecision, InsuranceDecisions, ReasonCode,
};
pub use classification::{
    classify_worker, classify_workers, ClassificationSource, ClassifiedWorker, WorkerClassification,
};
pub use settings::{prepare_settings_data, Confirmation, EnrollmentSettingsRecord};
pub use services::{ConfirmationBatch, EnrollmentService, SiteSnapshot};
pub use error::EnrollmentError;
