//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::{WorkerId, Won, YearMonth};
use domain_enrollment::{EnrollmentStatus, WorkHistory, Worker};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for valid year-months between 1950 and 2100
pub fn year_month_strategy() -> impl Strategy<Value = YearMonth> {
    (1950i32..=2100i32, 1u32..=12u32).prop_map(|(year, month)| YearMonth::new(year, month).unwrap())
}

/// Strategy for dates between 2000-01-01 and roughly 2049
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..18_000i64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// Strategy for ages a worker can plausibly have
pub fn age_strategy() -> impl Strategy<Value = u32> {
    1u32..=90u32
}

/// Strategy for monthly wages up to 5,000,000 won
pub fn wage_strategy() -> impl Strategy<Value = Won> {
    (0i64..=5_000_000i64).prop_map(Won::from_i64)
}

/// Strategy for work hours in half-hour steps up to 250 hours
pub fn hours_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=500i64).prop_map(|halves| Decimal::new(halves * 5, 1))
}

/// Strategy for well-formed resident numbers born 1930..=2015
pub fn resident_number_strategy() -> impl Strategy<Value = String> {
    (1930i32..=2015i32, 1u32..=12u32, 1u32..=28u32, 0u32..=999_999u32, any::<bool>()).prop_map(
        |(year, month, day, serial, female)| {
            let marker = match (year >= 2000, female) {
                (false, false) => 1,
                (false, true) => 2,
                (true, false) => 3,
                (true, true) => 4,
            };
            format!("{:02}{:02}{:02}-{}{:06}", year % 100, month, day, marker, serial)
        },
    )
}

/// Strategy for workers with a precomputed age
pub fn worker_strategy() -> impl Strategy<Value = Worker> {
    (1i64..100_000i64, age_strategy()).prop_map(|(id, age)| {
        Worker::new(WorkerId::new(id), "테스트", "900101-1234567").with_age(age)
    })
}

/// Strategy for arbitrary work history snapshots
///
/// Dates are unconstrained relative to each other, so the last work date may
/// precede the first.
pub fn work_history_strategy() -> impl Strategy<Value = WorkHistory> {
    (
        0u32..=31u32,
        hours_strategy(),
        0u32..=31u32,
        hours_strategy(),
        wage_strategy(),
        proptest::option::of(date_strategy()),
        proptest::option::of(date_strategy()),
        any::<bool>(),
    )
        .prop_map(
            |(prev_days, prev_hours, cur_days, cur_hours, wage, first, last, registered)| WorkHistory {
                previous_month_work_days: prev_days,
                previous_month_work_hours: prev_hours,
                current_month_work_days: cur_days,
                current_month_work_hours: cur_hours,
                monthly_wage: wage,
                first_work_date: first,
                last_work_date_this_month: last,
                is_registered_in_current_month: registered,
            },
        )
}

/// Strategy for an optional existing-enrollment override
pub fn enrollment_status_strategy() -> impl Strategy<Value = Option<EnrollmentStatus>> {
    proptest::option::of(
        (any::<bool>(), any::<bool>()).prop_map(|(np, hi)| EnrollmentStatus::enrolled(np, hi)),
    )
}
