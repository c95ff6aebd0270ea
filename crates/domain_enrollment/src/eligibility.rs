//! Insurance eligibility engine
//!
//! Decides, for one worker in one month, whether each of the four major
//! insurances is required. The engine is a pure function of the worker, the
//! work history snapshot and an optional existing-enrollment override; it
//! never fails and always explains its decision with a [`ReasonCode`].
//!
//! # Evaluation order
//!
//! ```text
//! 1. Employment Insurance and Industrial Accident: always required (당연적용)
//! 2. Existing enrollees (override): NP/HI frozen as required, per type
//! 3. No previous-month work, no override     -> NP/HI exempt, stop
//! 4. One month not elapsed, no override      -> HI exempt, NP exempt
//!                                                unless the wage rule applies, stop
//! 5. NP: age bounds -> wage >= 2.2M -> month elapsed and (8 days or 60 hours)
//! 6. HI: month elapsed and 60 hours
//! ```
//!
//! The wage rule enrolls National Pension immediately, without waiting for a
//! month to elapse and regardless of days and hours worked.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

use core_kernel::{is_one_month_passed_from_first_work, today_in_korea, Won};

use crate::enrollment::InsuranceType;
use crate::work_history::WorkHistory;
use crate::worker::Worker;

/// Statutory thresholds used by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityRules {
    /// Youngest age subject to National Pension
    pub pension_min_age: u32,
    /// Oldest age subject to National Pension
    pub pension_max_age: u32,
    /// Monthly wage enrolling National Pension immediately
    pub pension_wage_threshold: Won,
    /// Cumulative days over previous and current month for National Pension
    pub min_cumulative_days: u32,
    /// Cumulative hours over previous and current month for NP and HI
    pub min_cumulative_hours: Decimal,
    /// Age from which the Employment Insurance special rule applies
    pub employment_senior_age: u32,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            pension_min_age: 18,
            pension_max_age: 60,
            pension_wage_threshold: Won::from_i64(2_200_000),
            min_cumulative_days: 8,
            min_cumulative_hours: dec!(60),
            employment_senior_age: 65,
        }
    }
}

/// Why an insurance was or was not required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ReasonCode {
    /// Already enrolled; status retained
    ExistingEnrollee,
    /// No work in the previous month; new enrollment not applicable
    NoPreviousMonthWork,
    /// Less than one calendar month since the first work date
    OneMonthNotElapsed,
    /// Last work date of the month is unknown
    MissingLastWorkDate,
    UnderMinimumAge { age: u32, minimum: u32 },
    OverMaximumAge { age: u32, maximum: u32 },
    /// Monthly wage at or above the threshold: immediate enrollment
    WageOverride { monthly_wage: Won, threshold: Won },
    WorkThresholdMet {
        total_days: u32,
        total_hours: Decimal,
        days_met: bool,
        hours_met: bool,
    },
    InsufficientCumulativeWork { total_days: u32, total_hours: Decimal },
    HoursThresholdMet { total_hours: Decimal },
    InsufficientCumulativeHours { total_hours: Decimal },
    /// Employment Insurance for day laborers
    DayLaborerMandatory,
    /// Employment Insurance for workers at or above the senior age
    SeniorSpecialRule { age: u32 },
    /// Industrial Accident covers every worker
    MandatoryForAllWorkers,
}

impl ReasonCode {
    /// Human-readable message shown next to the decision
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonCode::ExistingEnrollee => write!(f, "기존 가입자 - 가입 상태 유지"),
            ReasonCode::NoPreviousMonthWork => {
                write!(f, "전월 근무 이력 없음 - 신규 가입 대상 아님")
            }
            ReasonCode::OneMonthNotElapsed => {
                write!(f, "최초 근무일로부터 1개월 미경과 (마지막 근무일 기준)")
            }
            ReasonCode::MissingLastWorkDate => write!(f, "마지막 근무일 정보 없음"),
            ReasonCode::UnderMinimumAge { age, minimum } => {
                write!(f, "{}세 미만 (만 {}세)", minimum, age)
            }
            ReasonCode::OverMaximumAge { age, maximum } => {
                write!(f, "{}세 초과 (만 {}세)", maximum, age)
            }
            ReasonCode::WageOverride { monthly_wage, threshold } => write!(
                f,
                "월 소득 {}M 이상 - 즉시 가입 (월 소득 {})",
                (threshold.amount() / dec!(1000000)).normalize(),
                monthly_wage
            ),
            ReasonCode::WorkThresholdMet { total_days, total_hours, days_met, hours_met } => {
                let mut met = Vec::with_capacity(2);
                if *days_met {
                    met.push(format!("근무일수 {}일", total_days));
                }
                if *hours_met {
                    met.push(format!("근무시간 {}시간", total_hours.normalize()));
                }
                write!(f, "1개월 경과 및 누적 {} 충족", met.join(", "))
            }
            ReasonCode::InsufficientCumulativeWork { total_days, total_hours } => write!(
                f,
                "누적 근무 부족 (근무일수 {}일, 근무시간 {}시간)",
                total_days,
                total_hours.normalize()
            ),
            ReasonCode::HoursThresholdMet { total_hours } => {
                write!(f, "1개월 경과 및 누적 근무시간 {}시간 충족", total_hours.normalize())
            }
            ReasonCode::InsufficientCumulativeHours { total_hours } => {
                write!(f, "누적 근무시간 부족 ({}시간)", total_hours.normalize())
            }
            ReasonCode::DayLaborerMandatory => write!(f, "일용근로자 당연 적용"),
            ReasonCode::SeniorSpecialRule { age } => {
                write!(f, "65세 이상 특례 적용 (만 {}세)", age)
            }
            ReasonCode::MandatoryForAllWorkers => write!(f, "모든 근로자 당연 적용"),
        }
    }
}

/// Decision for a single insurance type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceDecision {
    pub required: bool,
    pub reason: ReasonCode,
}

impl InsuranceDecision {
    pub fn required(reason: ReasonCode) -> Self {
        Self { required: true, reason }
    }

    pub fn exempt(reason: ReasonCode) -> Self {
        Self { required: false, reason }
    }
}

/// Decisions for all four insurances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceDecisions {
    pub national_pension: InsuranceDecision,
    pub health_insurance: InsuranceDecision,
    pub employment_insurance: InsuranceDecision,
    pub industrial_accident: InsuranceDecision,
}

impl InsuranceDecisions {
    pub fn get(&self, insurance_type: InsuranceType) -> &InsuranceDecision {
        match insurance_type {
            InsuranceType::NationalPension => &self.national_pension,
            InsuranceType::HealthInsurance => &self.health_insurance,
            InsuranceType::EmploymentInsurance => &self.employment_insurance,
            InsuranceType::IndustrialAccident => &self.industrial_accident,
        }
    }

    /// Insurance types decided as required
    pub fn required_types(&self) -> Vec<InsuranceType> {
        InsuranceType::ALL
            .into_iter()
            .filter(|t| self.get(*t).required)
            .collect()
    }
}

/// Existing-enrollment flag for one insurance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollmentFlag {
    pub is_enrolled: bool,
}

/// Existing enrollments that freeze a prior decision instead of re-deriving it
///
/// Supplying this value at all, even with both flags false, also disables the
/// early exits for missing previous-month work and an unelapsed month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollmentStatus {
    pub national_pension: EnrollmentFlag,
    pub health_insurance: EnrollmentFlag,
}

impl EnrollmentStatus {
    pub fn enrolled(national_pension: bool, health_insurance: bool) -> Self {
        Self {
            national_pension: EnrollmentFlag { is_enrolled: national_pension },
            health_insurance: EnrollmentFlag { is_enrolled: health_insurance },
        }
    }
}

/// Cumulative work over the previous and current month
#[derive(Debug, Clone, Copy)]
struct CumulativeWork {
    days: u32,
    hours: Decimal,
}

impl CumulativeWork {
    fn from_history(history: &WorkHistory) -> Self {
        Self {
            days: history.total_days(),
            hours: history.total_hours(),
        }
    }
}

/// Eligibility engine bound to a rule set and a reference date for ages
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    rules: EligibilityRules,
    reference_date: NaiveDate,
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(EligibilityRules::default(), today_in_korea())
    }
}

impl EligibilityEngine {
    pub fn new(rules: EligibilityRules, reference_date: NaiveDate) -> Self {
        Self { rules, reference_date }
    }

    pub fn rules(&self) -> &EligibilityRules {
        &self.rules
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Determines the insurance decisions for one worker
    ///
    /// # Arguments
    ///
    /// * `worker` - The worker being evaluated
    /// * `history` - Work history for the target month at one site
    /// * `enrollment_status` - Existing enrollments to freeze, if any
    #[instrument(skip_all, fields(worker_id = %worker.worker_id))]
    pub fn determine(
        &self,
        worker: &Worker,
        history: &WorkHistory,
        enrollment_status: Option<&EnrollmentStatus>,
    ) -> InsuranceDecisions {
        let age = worker.age_on(self.reference_date);
        let override_supplied = enrollment_status.is_some();

        if !override_supplied && !history.has_previous_month_work() {
            debug!(age, "No previous-month work");
            return self.assemble(
                InsuranceDecision::exempt(ReasonCode::NoPreviousMonthWork),
                InsuranceDecision::exempt(ReasonCode::NoPreviousMonthWork),
                age,
            );
        }

        let one_month_passed = is_one_month_passed_from_first_work(
            history.first_work_date,
            history.last_work_date_this_month,
        );
        let elapsed_reason = if history.last_work_date_this_month.is_none() {
            ReasonCode::MissingLastWorkDate
        } else {
            ReasonCode::OneMonthNotElapsed
        };

        if !one_month_passed && !override_supplied {
            debug!(age, "One month not elapsed since first work");
            let national_pension = self
                .wage_override(age, history.monthly_wage)
                .unwrap_or_else(|| InsuranceDecision::exempt(elapsed_reason.clone()));
            return self.assemble(
                national_pension,
                InsuranceDecision::exempt(elapsed_reason),
                age,
            );
        }

        let work = CumulativeWork::from_history(history);

        let national_pension = match enrollment_status {
            Some(status) if status.national_pension.is_enrolled => {
                InsuranceDecision::required(ReasonCode::ExistingEnrollee)
            }
            _ => self.national_pension(age, history.monthly_wage, one_month_passed, work, &elapsed_reason),
        };

        let health_insurance = match enrollment_status {
            Some(status) if status.health_insurance.is_enrolled => {
                InsuranceDecision::required(ReasonCode::ExistingEnrollee)
            }
            _ => self.health_insurance(one_month_passed, work, &elapsed_reason),
        };

        debug!(
            age,
            one_month_passed,
            total_days = work.days,
            total_hours = %work.hours,
            national_pension = national_pension.required,
            health_insurance = health_insurance.required,
            "Insurance status determined"
        );

        self.assemble(national_pension, health_insurance, age)
    }

    fn national_pension(
        &self,
        age: u32,
        monthly_wage: Won,
        one_month_passed: bool,
        work: CumulativeWork,
        elapsed_reason: &ReasonCode,
    ) -> InsuranceDecision {
        if age < self.rules.pension_min_age {
            return InsuranceDecision::exempt(ReasonCode::UnderMinimumAge {
                age,
                minimum: self.rules.pension_min_age,
            });
        }
        if age > self.rules.pension_max_age {
            return InsuranceDecision::exempt(ReasonCode::OverMaximumAge {
                age,
                maximum: self.rules.pension_max_age,
            });
        }
        if let Some(decision) = self.wage_override(age, monthly_wage) {
            return decision;
        }
        if !one_month_passed {
            return InsuranceDecision::exempt(elapsed_reason.clone());
        }

        let days_met = work.days >= self.rules.min_cumulative_days;
        let hours_met = work.hours >= self.rules.min_cumulative_hours;

        if days_met || hours_met {
            InsuranceDecision::required(ReasonCode::WorkThresholdMet {
                total_days: work.days,
                total_hours: work.hours,
                days_met,
                hours_met,
            })
        } else {
            InsuranceDecision::exempt(ReasonCode::InsufficientCumulativeWork {
                total_days: work.days,
                total_hours: work.hours,
            })
        }
    }

    fn health_insurance(
        &self,
        one_month_passed: bool,
        work: CumulativeWork,
        elapsed_reason: &ReasonCode,
    ) -> InsuranceDecision {
        if !one_month_passed {
            return InsuranceDecision::exempt(elapsed_reason.clone());
        }
        if work.hours >= self.rules.min_cumulative_hours {
            InsuranceDecision::required(ReasonCode::HoursThresholdMet { total_hours: work.hours })
        } else {
            InsuranceDecision::exempt(ReasonCode::InsufficientCumulativeHours { total_hours: work.hours })
        }
    }

    /// Immediate National Pension enrollment for high wages within the age bounds
    fn wage_override(&self, age: u32, monthly_wage: Won) -> Option<InsuranceDecision> {
        let within_age = (self.rules.pension_min_age..=self.rules.pension_max_age).contains(&age);
        if within_age && monthly_wage >= self.rules.pension_wage_threshold {
            Some(InsuranceDecision::required(ReasonCode::WageOverride {
                monthly_wage,
                threshold: self.rules.pension_wage_threshold,
            }))
        } else {
            None
        }
    }

    fn employment_insurance(&self, age: u32) -> InsuranceDecision {
        if age >= self.rules.employment_senior_age {
            InsuranceDecision::required(ReasonCode::SeniorSpecialRule { age })
        } else {
            InsuranceDecision::required(ReasonCode::DayLaborerMandatory)
        }
    }

    fn assemble(
        &self,
        national_pension: InsuranceDecision,
        health_insurance: InsuranceDecision,
        age: u32,
    ) -> InsuranceDecisions {
        InsuranceDecisions {
            national_pension,
            health_insurance,
            employment_insurance: self.employment_insurance(age),
            industrial_accident: InsuranceDecision::required(ReasonCode::MandatoryForAllWorkers),
        }
    }
}

/// Determines insurance decisions with the default rules, aging workers as of
/// today in Korea
pub fn determine_insurance_status(
    worker: &Worker,
    work_history: &WorkHistory,
    enrollment_status: Option<&EnrollmentStatus>,
) -> InsuranceDecisions {
    EligibilityEngine::default().determine(worker, work_history, enrollment_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::WorkerId;

    fn engine() -> EligibilityEngine {
        EligibilityEngine::new(
            EligibilityRules::default(),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        )
    }

    fn worker(age: u32) -> Worker {
        Worker::new(WorkerId::new(1), "홍길동", "900101-1234567").with_age(age)
    }

    fn history() -> WorkHistory {
        WorkHistory {
            previous_month_work_days: 6,
            previous_month_work_hours: dec!(48),
            current_month_work_days: 4,
            current_month_work_hours: dec!(32),
            monthly_wage: Won::from_i64(600_000),
            first_work_date: NaiveDate::from_ymd_opt(2025, 5, 2),
            last_work_date_this_month: NaiveDate::from_ymd_opt(2025, 6, 12),
            is_registered_in_current_month: false,
        }
    }

    #[test]
    fn test_both_thresholds_named() {
        let decisions = engine().determine(&worker(40), &history(), None);

        assert!(decisions.national_pension.required);
        assert_eq!(
            decisions.national_pension.reason,
            ReasonCode::WorkThresholdMet {
                total_days: 10,
                total_hours: dec!(80),
                days_met: true,
                hours_met: true,
            }
        );
        assert!(decisions.health_insurance.required);
    }

    #[test]
    fn test_senior_employment_reason() {
        let decisions = engine().determine(&worker(67), &history(), None);

        assert_eq!(decisions.employment_insurance.reason, ReasonCode::SeniorSpecialRule { age: 67 });
        assert!(decisions.employment_insurance.required);
        assert_eq!(
            decisions.national_pension.reason,
            ReasonCode::OverMaximumAge { age: 67, maximum: 60 }
        );
    }

    #[test]
    fn test_wage_message_mentions_threshold() {
        let reason = ReasonCode::WageOverride {
            monthly_wage: Won::from_i64(2_500_000),
            threshold: Won::from_i64(2_200_000),
        };
        let message = reason.message();

        assert!(message.contains("2.2M"));
        assert!(message.contains("즉시 가입"));
    }

    #[test]
    fn test_reason_serializes_with_code_tag() {
        let json = serde_json::to_value(ReasonCode::NoPreviousMonthWork).unwrap();
        assert_eq!(json["code"], "no_previous_month_work");
    }
}
