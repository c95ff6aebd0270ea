//! Tests for year-month arithmetic and the one-month elapsed rule

use chrono::NaiveDate;
use core_kernel::temporal::{add_one_calendar_month, TemporalError};
use core_kernel::{get_adjacent_month, is_one_month_passed_from_first_work, MonthDirection, YearMonth};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod adjacent_month {
    use super::*;

    #[test]
    fn test_previous_rolls_back_over_january() {
        assert_eq!(get_adjacent_month("2025-01", MonthDirection::Previous).unwrap(), "2024-12");
    }

    #[test]
    fn test_next_rolls_over_december() {
        assert_eq!(get_adjacent_month("2025-12", MonthDirection::Next).unwrap(), "2026-01");
    }

    #[test]
    fn test_mid_year_steps() {
        assert_eq!(get_adjacent_month("2025-06", MonthDirection::Previous).unwrap(), "2025-05");
        assert_eq!(get_adjacent_month("2025-06", MonthDirection::Next).unwrap(), "2025-07");
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        assert!(matches!(
            get_adjacent_month("2025-00", MonthDirection::Next),
            Err(TemporalError::MonthOutOfRange(0))
        ));
        assert!(matches!(
            get_adjacent_month("January", MonthDirection::Next),
            Err(TemporalError::InvalidYearMonth(_))
        ));
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("previous".parse::<MonthDirection>().unwrap(), MonthDirection::Previous);
        assert_eq!("next".parse::<MonthDirection>().unwrap(), MonthDirection::Next);
        assert!("sideways".parse::<MonthDirection>().is_err());
    }

    #[test]
    fn test_stepping_past_year_range_is_rejected() {
        assert_eq!(
            get_adjacent_month("9999-12", MonthDirection::Next),
            Err(TemporalError::YearOutOfRange(10000))
        );
        assert_eq!(
            get_adjacent_month("0001-01", MonthDirection::Previous),
            Err(TemporalError::YearOutOfRange(0))
        );
        assert_eq!(get_adjacent_month("9999-12", MonthDirection::Previous).unwrap(), "9999-11");
        assert_eq!(get_adjacent_month("0001-01", MonthDirection::Next).unwrap(), "0001-02");
    }

    proptest! {
        #[test]
        fn prop_next_then_previous_is_identity(year in 1i32..=9999, month in 1u32..=12) {
            let original = YearMonth::new(year, month).unwrap().to_string();
            match get_adjacent_month(&original, MonthDirection::Next) {
                Ok(next) => {
                    prop_assert!(next.parse::<YearMonth>().is_ok());
                    let back = get_adjacent_month(&next, MonthDirection::Previous).unwrap();
                    prop_assert_eq!(back, original);
                }
                Err(err) => {
                    prop_assert_eq!((year, month), (9999, 12));
                    prop_assert_eq!(err, TemporalError::YearOutOfRange(10000));
                }
            }
        }

        #[test]
        fn prop_previous_then_next_is_identity(year in 1i32..=9999, month in 1u32..=12) {
            let original = YearMonth::new(year, month).unwrap();
            match original.previous() {
                Ok(previous) => prop_assert_eq!(previous.next().unwrap(), original),
                Err(err) => {
                    prop_assert_eq!((year, month), (1, 1));
                    prop_assert_eq!(err, TemporalError::YearOutOfRange(0));
                }
            }
        }

        #[test]
        fn prop_string_order_matches_typed_order(
            a in (1i32..=9999, 1u32..=12),
            b in (1i32..=9999, 1u32..=12),
        ) {
            let left = YearMonth::new(a.0, a.1).unwrap();
            let right = YearMonth::new(b.0, b.1).unwrap();
            prop_assert_eq!(left.cmp(&right), left.to_string().cmp(&right.to_string()));
        }
    }
}

mod year_month {
    use super::*;

    #[test]
    fn test_serde_uses_string_form() {
        let ym = YearMonth::new(2025, 3).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2025-03\"");

        let parsed: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ym);
    }

    #[test]
    fn test_contains_date() {
        let ym = YearMonth::new(2025, 3).unwrap();
        assert!(ym.contains(date(2025, 3, 31)));
        assert!(!ym.contains(date(2025, 4, 1)));
        assert!(!ym.contains(date(2024, 3, 15)));
    }

    #[test]
    fn test_from_date() {
        assert_eq!(YearMonth::from_date(date(2024, 12, 31)).to_string(), "2024-12");
    }
}

mod one_month_elapsed {
    use super::*;

    #[test]
    fn test_forty_days_is_elapsed() {
        let first = date(2025, 2, 20);
        let last = date(2025, 4, 1);
        assert!(is_one_month_passed_from_first_work(Some(first), Some(last)));
    }

    #[test]
    fn test_same_month_is_not_elapsed() {
        assert!(!is_one_month_passed_from_first_work(
            Some(date(2025, 5, 1)),
            Some(date(2025, 5, 31)),
        ));
    }

    #[test]
    fn test_calendar_month_not_thirty_days() {
        // Feb 1 -> Mar 1 is 28 days but one full calendar month.
        assert!(is_one_month_passed_from_first_work(
            Some(date(2025, 2, 1)),
            Some(date(2025, 3, 1)),
        ));
        // Mar 1 -> Mar 31 is 30 days but not a calendar month.
        assert!(!is_one_month_passed_from_first_work(
            Some(date(2025, 3, 1)),
            Some(date(2025, 3, 31)),
        ));
    }

    /// Month-end starts clamp to the last day of the following month.
    /// Rolling over would land Jan 31 on Mar 3, so a last work date of
    /// Feb 28 counts here but would not under rollover.
    #[test]
    fn test_month_end_start_clamps_instead_of_rolling_over() {
        assert_eq!(add_one_calendar_month(date(2025, 1, 31)), Some(date(2025, 2, 28)));
        assert_eq!(add_one_calendar_month(date(2024, 1, 31)), Some(date(2024, 2, 29)));

        assert!(is_one_month_passed_from_first_work(
            Some(date(2025, 1, 31)),
            Some(date(2025, 2, 28)),
        ));
        assert!(!is_one_month_passed_from_first_work(
            Some(date(2025, 1, 31)),
            Some(date(2025, 2, 27)),
        ));
    }

    #[test]
    fn test_missing_last_work_date() {
        assert!(!is_one_month_passed_from_first_work(Some(date(2025, 1, 1)), None));
    }
}
