//! Core Kernel - Foundational types for the insurance enrollment system
//!
//! This crate provides the building blocks shared by the enrollment domain and
//! the API layer:
//! - Strongly-typed identifiers for workers, sites and users
//! - `YearMonth` and calendar-month arithmetic used by eligibility checks
//! - Resident registration numbers and the age derived from them
//! - KRW amounts with precise decimal arithmetic

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod resident;
pub mod error;

pub use money::Won;
pub use temporal::{
    YearMonth, MonthDirection, TemporalError,
    get_adjacent_month, is_one_month_passed_from_first_work, today_in_korea,
};
pub use identifiers::{WorkerId, SiteId, UserId};
pub use resident::{ResidentNumber, calculate_age_from_resident_number};
pub use error::CoreError;
