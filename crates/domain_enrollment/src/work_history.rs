//! Work history snapshots
//!
//! A `WorkHistory` is the per worker × site × month view the eligibility
//! engine consumes. It is usually supplied by the caller, but can also be
//! aggregated from daily work records with [`WorkHistory::aggregate`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Won, YearMonth};

/// One day of work (or a placeholder registration) at a site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWorkRecord {
    pub work_date: NaiveDate,
    #[serde(default)]
    pub work_hours: Decimal,
    #[serde(default)]
    pub daily_wage: Won,
    /// Registered for the month without any actual work
    #[serde(default)]
    pub registration_only: bool,
}

impl DailyWorkRecord {
    pub fn worked(work_date: NaiveDate, work_hours: Decimal, daily_wage: Won) -> Self {
        Self {
            work_date,
            work_hours,
            daily_wage,
            registration_only: false,
        }
    }

    pub fn registration(work_date: NaiveDate) -> Self {
        Self {
            work_date,
            work_hours: Decimal::ZERO,
            daily_wage: Won::zero(),
            registration_only: true,
        }
    }

    fn is_work(&self) -> bool {
        !self.registration_only
    }
}

/// Aggregated work for one worker at one site, relative to a target month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkHistory {
    pub previous_month_work_days: u32,
    pub previous_month_work_hours: Decimal,
    pub current_month_work_days: u32,
    pub current_month_work_hours: Decimal,
    pub monthly_wage: Won,
    /// Earliest work date ever recorded at this site
    pub first_work_date: Option<NaiveDate>,
    pub last_work_date_this_month: Option<NaiveDate>,
    pub is_registered_in_current_month: bool,
}

impl WorkHistory {
    /// Aggregates daily records of a single worker at a single site
    ///
    /// Records after the target month are ignored. Days are counted as
    /// distinct dates; registration placeholders count neither as days nor
    /// towards the first work date.
    pub fn aggregate(records: &[DailyWorkRecord], year_month: YearMonth) -> Self {
        let previous_month = year_month.previous().ok();
        let mut history = WorkHistory::default();
        let mut previous_days = BTreeSet::new();
        let mut current_days = BTreeSet::new();

        for record in records {
            if YearMonth::from_date(record.work_date) > year_month {
                continue;
            }

            if !record.is_work() {
                if year_month.contains(record.work_date) {
                    history.is_registered_in_current_month = true;
                }
                continue;
            }

            history.first_work_date = Some(match history.first_work_date {
                Some(first) => first.min(record.work_date),
                None => record.work_date,
            });

            if year_month.contains(record.work_date) {
                current_days.insert(record.work_date);
                history.current_month_work_hours =
                    history.current_month_work_hours.saturating_add(record.work_hours);
                history.monthly_wage += record.daily_wage;
                history.last_work_date_this_month = Some(match history.last_work_date_this_month {
                    Some(last) => last.max(record.work_date),
                    None => record.work_date,
                });
            } else if previous_month.is_some_and(|month| month.contains(record.work_date)) {
                previous_days.insert(record.work_date);
                history.previous_month_work_hours =
                    history.previous_month_work_hours.saturating_add(record.work_hours);
            }
        }

        history.previous_month_work_days = previous_days.len() as u32;
        history.current_month_work_days = current_days.len() as u32;
        history
    }

    pub fn has_previous_month_work(&self) -> bool {
        self.previous_month_work_days > 0 || self.previous_month_work_hours > Decimal::ZERO
    }

    /// Previous plus current month work days, saturating at `u32::MAX`
    pub fn total_days(&self) -> u32 {
        self.previous_month_work_days
            .saturating_add(self.current_month_work_days)
    }

    /// Previous plus current month work hours, saturating at `Decimal::MAX`
    pub fn total_hours(&self) -> Decimal {
        self.previous_month_work_hours
            .saturating_add(self.current_month_work_hours)
    }
}

/// Returns true if the worker worked, or is registered, in the current month
pub fn has_current_month_work(work_history: &WorkHistory) -> bool {
    work_history.current_month_work_days > 0
        || work_history.current_month_work_hours > Decimal::ZERO
        || work_history.is_registered_in_current_month
}
