//! Calendar handling for monthly enrollment processing
//!
//! Enrollment is processed one reporting month at a time. This module provides:
//! - `YearMonth`: a typed `"YYYY-MM"` value ordered like its zero-padded string
//! - Adjacent-month arithmetic with year rollover
//! - The one-calendar-month elapsed test used by the eligibility engine
//!
//! # Month-end rule
//!
//! Adding one calendar month to a date uses chrono's `checked_add_months`,
//! which clamps to the last valid day of the target month: Jan 31 + 1 month
//! is Feb 28 (Feb 29 in leap years), not Mar 3.

use chrono::{Datelike, Months, NaiveDate, Utc};
use chrono_tz::Asia::Seoul;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid year-month '{0}': expected YYYY-MM")]
    InvalidYearMonth(String),

    #[error("Month out of range: {0}")]
    MonthOutOfRange(u32),

    #[error("Year out of range: {0}")]
    YearOutOfRange(i32),

    #[error("Invalid month direction '{0}': expected 'previous' or 'next'")]
    InvalidDirection(String),
}

/// Direction used when stepping to an adjacent month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthDirection {
    Previous,
    Next,
}

impl FromStr for MonthDirection {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "previous" | "prev" => Ok(MonthDirection::Previous),
            "next" => Ok(MonthDirection::Next),
            other => Err(TemporalError::InvalidDirection(other.to_string())),
        }
    }
}

/// A reporting month
///
/// Ordering is chronological, which matches lexicographic ordering of the
/// zero-padded `"YYYY-MM"` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month, validating the month and the four-digit year
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::MonthOutOfRange(month));
        }
        if !(1..=9999).contains(&year) {
            return Err(TemporalError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month before this one, rolling back over January
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::YearOutOfRange` when stepping back from 0001-01.
    pub fn previous(self) -> Result<Self, TemporalError> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// The month after this one, rolling over December
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::YearOutOfRange` when stepping past 9999-12.
    pub fn next(self) -> Result<Self, TemporalError> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Steps one month in the given direction
    pub fn adjacent(self, direction: MonthDirection) -> Result<Self, TemporalError> {
        match direction {
            MonthDirection::Previous => self.previous(),
            MonthDirection::Next => self.next(),
        }
    }

    /// Returns true if the date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TemporalError::InvalidYearMonth(s.to_string());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        YearMonth::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Returns the previous or next `"YYYY-MM"` string
///
/// # Errors
///
/// Returns `TemporalError::InvalidYearMonth` if the input is not `YYYY-MM`,
/// and `TemporalError::YearOutOfRange` if the step leaves years 0001..=9999.
///
/// # Example
///
/// ```
/// use core_kernel::{get_adjacent_month, MonthDirection};
///
/// assert_eq!(get_adjacent_month("2025-01", MonthDirection::Previous).unwrap(), "2024-12");
/// assert_eq!(get_adjacent_month("2025-12", MonthDirection::Next).unwrap(), "2026-01");
/// ```
pub fn get_adjacent_month(year_month: &str, direction: MonthDirection) -> Result<String, TemporalError> {
    let parsed: YearMonth = year_month.parse()?;
    Ok(parsed.adjacent(direction)?.to_string())
}

/// Adds one calendar month, clamping to the end of the target month
pub fn add_one_calendar_month(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(1))
}

/// Returns true if at least one calendar month has elapsed between the first
/// work date and the last work date of the current month
///
/// Missing dates never count as elapsed.
pub fn is_one_month_passed_from_first_work(
    first_work_date: Option<NaiveDate>,
    last_work_date_this_month: Option<NaiveDate>,
) -> bool {
    match (first_work_date, last_work_date_this_month) {
        (Some(first), Some(last)) => {
            add_one_calendar_month(first).is_some_and(|threshold| last >= threshold)
        }
        _ => false,
    }
}

/// Today's date in Korea Standard Time
pub fn today_in_korea() -> NaiveDate {
    Utc::now().with_timezone(&Seoul).date_naive()
}
