//! Resident registration numbers (주민등록번호)
//!
//! A resident number is 13 digits, usually written `YYMMDD-GNNNNNN`. The
//! first two digits are the last two digits of the birth year and the seventh
//! digit (`G`) encodes the century together with gender:
//!
//! | digit   | century |
//! |---------|---------|
//! | 1, 2    | 1900s   |
//! | 3, 4    | 2000s   |
//! | 9, 0    | 1800s   |
//! | other   | 1900s   |
//!
//! Age derivation fails soft: anything that is not 13 characters once hyphens
//! are removed yields age 0. Callers treat 0 as "unknown"; for National
//! Pension purposes such workers fall under the minimum age.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const RESIDENT_NUMBER_LEN: usize = 13;

/// A resident registration number as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResidentNumber(String);

impl ResidentNumber {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number with hyphens and whitespace removed
    pub fn normalized(&self) -> String {
        self.0
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect()
    }

    /// Returns true if the normalized number has exactly 13 characters
    pub fn is_well_formed(&self) -> bool {
        self.normalized().chars().count() == RESIDENT_NUMBER_LEN
    }

    /// Full four-digit birth year, if the number is well formed
    pub fn birth_year(&self) -> Option<i32> {
        let digits: Vec<char> = self.normalized().chars().collect();
        if digits.len() != RESIDENT_NUMBER_LEN {
            return None;
        }

        let tens = digits[0].to_digit(10)?;
        let ones = digits[1].to_digit(10)?;
        let two_digit_year = (tens * 10 + ones) as i32;

        let century = match digits[6] {
            '1' | '2' => 1900,
            '3' | '4' => 2000,
            '9' | '0' => 1800,
            _ => 1900,
        };

        Some(century + two_digit_year)
    }

    /// Age as the difference of calendar years relative to `today`
    ///
    /// Returns 0 for malformed numbers and for birth years after `today`.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        self.birth_year()
            .map(|year| (today.year() - year).max(0) as u32)
            .unwrap_or(0)
    }

    /// Masked form safe for logs: birth date and century digit only
    pub fn masked(&self) -> String {
        let normalized = self.normalized();
        if normalized.chars().count() != RESIDENT_NUMBER_LEN {
            return "*".repeat(normalized.chars().count());
        }
        let birth_date: String = normalized.chars().take(6).collect();
        let marker: String = normalized.chars().skip(6).take(1).collect();
        format!("{}-{}{}", birth_date, marker, "*".repeat(6))
    }
}

impl fmt::Display for ResidentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<&str> for ResidentNumber {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ResidentNumber {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Derives an age from a resident number relative to `today`
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use core_kernel::calculate_age_from_resident_number;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(calculate_age_from_resident_number("900101-1234567", today), 35);
/// assert_eq!(calculate_age_from_resident_number("12345", today), 0);
/// ```
pub fn calculate_age_from_resident_number(resident_number: &str, today: NaiveDate) -> u32 {
    ResidentNumber::new(resident_number).age_on(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_century_digits() {
        assert_eq!(ResidentNumber::new("9001011234567").birth_year(), Some(1990));
        assert_eq!(ResidentNumber::new("0503154234567").birth_year(), Some(2005));
        assert_eq!(ResidentNumber::new("8501019234567").birth_year(), Some(1885));
        assert_eq!(ResidentNumber::new("8501010234567").birth_year(), Some(1885));
    }

    #[test]
    fn test_foreign_digits_default_to_1900s() {
        assert_eq!(ResidentNumber::new("900101-5234567").birth_year(), Some(1990));
        assert_eq!(ResidentNumber::new("050101-7234567").birth_year(), Some(1905));
    }

    #[test]
    fn test_malformed_is_age_zero() {
        assert_eq!(calculate_age_from_resident_number("", today()), 0);
        assert_eq!(calculate_age_from_resident_number("900101-123456", today()), 0);
        assert_eq!(calculate_age_from_resident_number("AB0101-1234567", today()), 0);
    }

    #[test]
    fn test_future_birth_year_is_zero() {
        assert_eq!(calculate_age_from_resident_number("300101-3000000", today()), 0);
    }

    #[test]
    fn test_masked_hides_serial() {
        assert_eq!(ResidentNumber::new("9001011234567").masked(), "900101-1******");
    }
}
