//! Eligibility handlers

use axum::{extract::State, Extension, Json};
use tracing::debug;

use domain_enrollment::WorkHistory;

use crate::auth::{permissions, Claims};
use crate::dto::eligibility::*;
use crate::{error::ApiError, AppState};

/// Evaluates the four insurances for one worker
pub async fn evaluate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    claims.require(permissions::ELIGIBILITY_READ)?;

    let work_history = match (request.work_history, request.daily_records.is_empty()) {
        (Some(history), true) => history,
        (Some(_), false) => {
            return Err(ApiError::Validation(
                "Provide either workHistory or dailyRecords, not both".to_string(),
            ))
        }
        (None, false) => {
            let year_month = request.year_month.ok_or_else(|| {
                ApiError::Validation("yearMonth is required with dailyRecords".to_string())
            })?;
            WorkHistory::aggregate(&request.daily_records, year_month)
        }
        (None, true) => WorkHistory::default(),
    };

    let service = state.service();
    let decisions = service.evaluate(&request.worker, &work_history, request.enrollment_status.as_ref());
    let age = request.worker.age_on(service.engine().reference_date());

    debug!(
        worker_id = %request.worker.worker_id,
        required = ?decisions.required_types(),
        "Eligibility evaluated"
    );

    Ok(Json(EvaluateResponse {
        worker_id: request.worker.worker_id,
        age,
        work_history,
        decisions: (&decisions).into(),
    }))
}
