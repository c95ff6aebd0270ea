//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the enrollment domain. Every fixture is
//! anchored to [`TemporalFixtures::reference_date`] so ages and month
//! arithmetic stay predictable regardless of when the suite runs.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{SiteId, UserId, WorkerId, Won, YearMonth};
use domain_enrollment::{EligibilityEngine, EligibilityRules, WorkHistory, Worker};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Date ages are computed against (June 15, 2025)
    pub fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    /// Month being processed (2025-06)
    pub fn target_month() -> YearMonth {
        YearMonth::new(2025, 6).unwrap()
    }

    /// Month before the target month (2025-05)
    pub fn previous_month() -> YearMonth {
        YearMonth::new(2025, 5).unwrap()
    }

    /// Confirmation timestamp
    pub fn confirmed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 9, 0, 0).unwrap()
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn worker_id() -> WorkerId {
        WorkerId::new(1001)
    }

    pub fn site_id() -> SiteId {
        SiteId::new(7)
    }

    /// A fixed user so confirmation rows compare equal across runs
    pub fn user_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x5f0c_2a1e_7d3b_4c88_9e21_6a4b_3c2d_1e0f))
    }
}

/// Fixture for resident registration numbers
pub struct ResidentFixtures;

impl ResidentFixtures {
    /// Born January 1, 1990 (male, 1900s)
    pub fn born_1990() -> &'static str {
        "900101-1234567"
    }

    /// Born March 15, 2010 (male, 2000s); 15 on the reference date
    pub fn born_2010() -> &'static str {
        "100315-3234567"
    }

    /// Born May 20, 1958 (female, 1900s); 67 on the reference date
    pub fn born_1958() -> &'static str {
        "580520-2234567"
    }

    /// Born January 1, 1964; turned 61 before the reference date
    pub fn born_1964() -> &'static str {
        "640101-1234567"
    }

    /// Too short to parse
    pub fn malformed() -> &'static str {
        "900101-12"
    }
}

/// Fixture for workers
pub struct WorkerFixtures;

impl WorkerFixtures {
    /// A 35-year-old day laborer
    pub fn adult() -> Worker {
        Worker::new(IdFixtures::worker_id(), "김건설", ResidentFixtures::born_1990())
    }

    /// A 15-year-old worker
    pub fn minor() -> Worker {
        Worker::new(WorkerId::new(1002), "이청년", ResidentFixtures::born_2010())
    }

    /// A 67-year-old worker
    pub fn senior() -> Worker {
        Worker::new(WorkerId::new(1003), "박노장", ResidentFixtures::born_1958())
    }
}

/// Fixture for work history snapshots of the target month
pub struct WorkHistoryFixtures;

impl WorkHistoryFixtures {
    /// Worked since early last month; meets both thresholds
    pub fn eligible() -> WorkHistory {
        WorkHistory {
            previous_month_work_days: 6,
            previous_month_work_hours: dec!(48),
            current_month_work_days: 4,
            current_month_work_hours: dec!(32),
            monthly_wage: Won::from_i64(600_000),
            first_work_date: Some(TemporalFixtures::date(2025, 5, 2)),
            last_work_date_this_month: Some(TemporalFixtures::date(2025, 6, 12)),
            is_registered_in_current_month: false,
        }
    }

    /// Month elapsed but only 7 days and 56 hours in total
    pub fn insufficient() -> WorkHistory {
        WorkHistory {
            previous_month_work_days: 4,
            previous_month_work_hours: dec!(32),
            current_month_work_days: 3,
            current_month_work_hours: dec!(24),
            monthly_wage: Won::from_i64(450_000),
            first_work_date: Some(TemporalFixtures::date(2025, 5, 2)),
            last_work_date_this_month: Some(TemporalFixtures::date(2025, 6, 12)),
            is_registered_in_current_month: false,
        }
    }

    /// Started late last month; less than a month has elapsed
    pub fn recent_start() -> WorkHistory {
        WorkHistory {
            previous_month_work_days: 2,
            previous_month_work_hours: dec!(16),
            current_month_work_days: 8,
            current_month_work_hours: dec!(64),
            monthly_wage: Won::from_i64(1_200_000),
            first_work_date: Some(TemporalFixtures::date(2025, 5, 28)),
            last_work_date_this_month: Some(TemporalFixtures::date(2025, 6, 20)),
            is_registered_in_current_month: false,
        }
    }

    /// Only worked this month
    pub fn current_month_only() -> WorkHistory {
        WorkHistory {
            previous_month_work_days: 0,
            previous_month_work_hours: dec!(0),
            current_month_work_days: 10,
            current_month_work_hours: dec!(80),
            monthly_wage: Won::from_i64(1_500_000),
            first_work_date: Some(TemporalFixtures::date(2025, 6, 2)),
            last_work_date_this_month: Some(TemporalFixtures::date(2025, 6, 20)),
            is_registered_in_current_month: false,
        }
    }

    /// Worked last month only
    pub fn previous_month_only() -> WorkHistory {
        WorkHistory {
            previous_month_work_days: 5,
            previous_month_work_hours: dec!(40),
            current_month_work_days: 0,
            current_month_work_hours: dec!(0),
            monthly_wage: Won::zero(),
            first_work_date: Some(TemporalFixtures::date(2025, 5, 2)),
            last_work_date_this_month: None,
            is_registered_in_current_month: false,
        }
    }
}

/// Fixture for engines
pub struct EngineFixtures;

impl EngineFixtures {
    /// Default rules, aging workers as of the reference date
    pub fn standard() -> EligibilityEngine {
        EligibilityEngine::new(EligibilityRules::default(), TemporalFixtures::reference_date())
    }
}
