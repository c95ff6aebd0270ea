//! Calendar handlers

use axum::extract::Query;
use axum::Json;

use core_kernel::{get_adjacent_month, MonthDirection};

use crate::dto::calendar::*;
use crate::error::ApiError;

/// Returns the month before or after `year_month`
pub async fn adjacent_month(
    Query(query): Query<AdjacentMonthQuery>,
) -> Result<Json<AdjacentMonthResponse>, ApiError> {
    let direction: MonthDirection = query.direction.parse()?;
    let adjacent = get_adjacent_month(&query.year_month, direction)?;

    Ok(Json(AdjacentMonthResponse {
        year_month: query.year_month,
        direction: query.direction,
        adjacent,
    }))
}
