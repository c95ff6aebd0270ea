//! Calendar DTOs

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacentMonthQuery {
    pub year_month: String,
    pub direction: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacentMonthResponse {
    pub year_month: String,
    pub direction: String,
    pub adjacent: String,
}
