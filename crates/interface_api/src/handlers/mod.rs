//! Request handlers

pub mod health;
pub mod eligibility;
pub mod enrollments;
pub mod calendar;
