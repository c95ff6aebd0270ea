//! Enrollment handlers

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use tracing::info;

use crate::auth::{permissions, Claims};
use crate::dto::enrollments::*;
use crate::{error::ApiError, AppState};

/// Classifies a site's workers for a month and evaluates each bucket
pub async fn classify(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<SiteMonthRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    claims.require(permissions::ENROLLMENT_READ)?;

    let service = state.service();
    let classification = service.classify(&request.snapshot, request.year_month);
    let decisions = service.evaluate_classification(&classification, &request.snapshot);

    let to_dto = |workers: &[domain_enrollment::ClassifiedWorker]| -> Vec<ClassifiedWorkerDto> {
        workers
            .iter()
            .map(|w| ClassifiedWorkerDto::new(w, decisions.get(&w.worker_id())))
            .collect()
    };

    Ok(Json(ClassifyResponse {
        site_id: request.site_id,
        year_month: request.year_month,
        new_enrollment: to_dto(&classification.new_enrollment),
        active_enrollment: to_dto(&classification.active_enrollment),
        loss_candidates: to_dto(&classification.loss_candidates),
    }))
}

/// Confirms a site's month, producing settings rows stamped with the caller
pub async fn confirm(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<SiteMonthRequest>,
) -> Result<Json<ConfirmResponse>, ApiError> {
    claims.require(permissions::ENROLLMENT_CONFIRM)?;
    let confirmed_by = claims.user_id()?;
    let confirmed_at = Utc::now();

    let batch = state.service().prepare_confirmation(
        &request.snapshot,
        request.site_id,
        request.year_month,
        confirmed_by,
        confirmed_at,
    );

    info!(
        site_id = %request.site_id,
        year_month = %request.year_month,
        %confirmed_by,
        rows = batch.settings.len(),
        "Enrollment confirmed"
    );

    Ok(Json(ConfirmResponse {
        site_id: request.site_id,
        year_month: request.year_month,
        confirmed_by,
        confirmed_at,
        count: batch.settings.len(),
        settings: batch.settings,
    }))
}
