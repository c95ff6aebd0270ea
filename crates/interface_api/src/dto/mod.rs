//! Request and response data transfer objects

pub mod eligibility;
pub mod enrollments;
pub mod calendar;
