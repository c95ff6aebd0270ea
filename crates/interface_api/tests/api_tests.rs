//! HTTP endpoint tests for interface_api

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::UserId;
use interface_api::auth::{create_token, permissions};
use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::TemporalFixtures;

const SECRET: &str = "test-secret";

fn app() -> Router {
    let config = ApiConfig {
        jwt_secret: SECRET.to_string(),
        reference_date: Some(TemporalFixtures::reference_date()),
        ..ApiConfig::default()
    };
    create_router(config)
}

fn token_for(user: &UserId, roles: &[&str]) -> String {
    create_token(user, roles.iter().map(|r| r.to_string()).collect(), SECRET, 300).unwrap()
}

fn token(roles: &[&str]) -> String {
    token_for(&UserId::new(), roles)
}

fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn eligible_worker(id: i64) -> Value {
    json!({ "workerId": id, "name": "김건설", "residentNumber": "900101-1234567" })
}

fn eligible_history() -> Value {
    json!({
        "previousMonthWorkDays": 6,
        "previousMonthWorkHours": 48,
        "currentMonthWorkDays": 4,
        "currentMonthWorkHours": 32,
        "monthlyWage": 600000,
        "firstWorkDate": "2025-05-02",
        "lastWorkDateThisMonth": "2025-06-12"
    })
}

fn site_request() -> Value {
    json!({
        "siteId": 7,
        "yearMonth": "2025-06",
        "snapshot": {
            "workers": [eligible_worker(1), eligible_worker(2), eligible_worker(3)],
            "workHistories": {
                "1": eligible_history(),
                "2": eligible_history(),
                "3": { "previousMonthWorkDays": 5, "previousMonthWorkHours": 40 }
            },
            "enrollments": {
                "3": [{
                    "workerId": 3,
                    "siteId": 7,
                    "yearMonth": "2025-05",
                    "nationalPension": { "acquisitionDate": "2025-05-02", "status": "auto_required" },
                    "enrollmentStatus": "confirmed"
                }]
            }
        }
    })
}

// ============================================================================
// Public Route Tests
// ============================================================================

mod public_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get("/health", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_api_requires_token() {
        let (status, _) = send(post(
            "/api/v1/eligibility/evaluate",
            None,
            json!({ "worker": eligible_worker(1) }),
        ))
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let (status, _) = send(get(
            "/api/v1/calendar/adjacent-month?yearMonth=2025-01&direction=previous",
            Some("not-a-jwt"),
        ))
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

// ============================================================================
// Eligibility Tests
// ============================================================================

mod eligibility_tests {
    use super::*;

    #[tokio::test]
    async fn test_evaluate_with_history() {
        let token = token(&[permissions::ELIGIBILITY_READ]);
        let body = json!({ "worker": eligible_worker(1), "workHistory": eligible_history() });

        let (status, body) = send(post("/api/v1/eligibility/evaluate", Some(&token), body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["workerId"], 1);
        assert_eq!(body["age"], 35);
        assert_eq!(body["decisions"]["nationalPension"]["required"], true);
        assert_eq!(body["decisions"]["nationalPension"]["reason"]["code"], "work_threshold_met");
        assert_eq!(body["decisions"]["healthInsurance"]["required"], true);
        assert_eq!(body["decisions"]["employmentInsurance"]["required"], true);
        assert_eq!(body["decisions"]["industrialAccident"]["required"], true);
        assert!(!body["decisions"]["nationalPension"]["message"]
            .as_str()
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_from_daily_records() {
        let token = token(&[permissions::ELIGIBILITY_READ]);
        let records: Vec<Value> = ["2025-05-02", "2025-05-09", "2025-06-02", "2025-06-05"]
            .iter()
            .map(|d| json!({ "workDate": d, "workHours": 8, "dailyWage": 1200000 }))
            .collect();
        let body = json!({
            "worker": eligible_worker(1),
            "dailyRecords": records,
            "yearMonth": "2025-06"
        });

        let (status, body) = send(post("/api/v1/eligibility/evaluate", Some(&token), body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["workHistory"]["previousMonthWorkDays"], 2);
        assert_eq!(body["workHistory"]["currentMonthWorkDays"], 2);
        assert_eq!(body["decisions"]["nationalPension"]["reason"]["code"], "wage_override");
        assert_eq!(body["decisions"]["healthInsurance"]["required"], false);
    }

    #[tokio::test]
    async fn test_oversized_day_counts_are_evaluated() {
        let token = token(&[permissions::ELIGIBILITY_READ]);
        let mut history = eligible_history();
        history["previousMonthWorkDays"] = json!(u32::MAX);
        let body = json!({ "worker": eligible_worker(1), "workHistory": history });

        let (status, body) = send(post("/api/v1/eligibility/evaluate", Some(&token), body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["decisions"]["nationalPension"]["required"], true);
        assert_eq!(body["decisions"]["nationalPension"]["reason"]["code"], "work_threshold_met");
        assert_eq!(body["decisions"]["nationalPension"]["reason"]["total_days"], u32::MAX);
    }

    #[tokio::test]
    async fn test_daily_records_require_year_month() {
        let token = token(&[permissions::ELIGIBILITY_READ]);
        let body = json!({
            "worker": eligible_worker(1),
            "dailyRecords": [{ "workDate": "2025-06-02", "workHours": 8 }]
        });

        let (status, body) = send(post("/api/v1/eligibility/evaluate", Some(&token), body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_evaluate_requires_permission() {
        let token = token(&[permissions::ENROLLMENT_READ]);
        let body = json!({ "worker": eligible_worker(1) });

        let (status, body) = send(post("/api/v1/eligibility/evaluate", Some(&token), body)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden");
    }
}

// ============================================================================
// Enrollment Tests
// ============================================================================

mod enrollment_tests {
    use super::*;

    #[tokio::test]
    async fn test_classify_returns_buckets_with_decisions() {
        let token = token(&[permissions::ENROLLMENT_READ]);

        let (status, body) = send(post("/api/v1/enrollments/classify", Some(&token), site_request())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["newEnrollment"].as_array().unwrap().len(), 2);
        assert_eq!(body["activeEnrollment"].as_array().unwrap().len(), 0);

        let loss = &body["lossCandidates"][0];
        assert_eq!(loss["workerId"], 3);
        assert_eq!(loss["source"], "loss_candidate");
        assert!(loss.get("decisions").is_none());

        let new_worker = &body["newEnrollment"][0];
        assert_eq!(new_worker["residentNumber"], "900101-1******");
        assert_eq!(new_worker["decisions"]["nationalPension"]["required"], true);
    }

    #[tokio::test]
    async fn test_confirm_stamps_authenticated_user() {
        let user = UserId::new();
        let token = token_for(&user, &[permissions::ENROLLMENT_CONFIRM]);

        let (status, body) = send(post("/api/v1/enrollments/confirm", Some(&token), site_request())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["confirmedBy"], user.to_string());

        let row = &body["settings"][0];
        assert_eq!(row["enrollmentStatus"], "confirmed");
        assert_eq!(row["userConfirmed"], true);
        assert_eq!(row["confirmedBy"], user.to_string());
        assert_eq!(row["nationalPensionStatus"], "auto_required");
        assert_eq!(row["classificationSource"], "new_enrollment");
    }

    #[tokio::test]
    async fn test_confirm_requires_confirm_permission() {
        let token = token(&[permissions::ENROLLMENT_READ]);

        let (status, _) = send(post("/api/v1/enrollments/confirm", Some(&token), site_request())).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_malformed_year_month_rejected() {
        let token = token(&[permissions::ENROLLMENT_READ]);
        let mut request = site_request();
        request["yearMonth"] = json!("2025-13");

        let (status, _) = send(post("/api/v1/enrollments/classify", Some(&token), request)).await;

        assert!(status.is_client_error());
    }
}

// ============================================================================
// Calendar Tests
// ============================================================================

mod calendar_tests {
    use super::*;

    #[tokio::test]
    async fn test_previous_month_wraps_year() {
        let token = token(&[]);

        let (status, body) = send(get(
            "/api/v1/calendar/adjacent-month?yearMonth=2025-01&direction=previous",
            Some(&token),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["adjacent"], "2024-12");
    }

    #[tokio::test]
    async fn test_next_month_wraps_year() {
        let token = token(&[]);

        let (status, body) = send(get(
            "/api/v1/calendar/adjacent-month?yearMonth=2025-12&direction=next",
            Some(&token),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["adjacent"], "2026-01");
    }

    #[tokio::test]
    async fn test_invalid_month_is_bad_request() {
        let token = token(&[]);

        let (status, body) = send(get(
            "/api/v1/calendar/adjacent-month?yearMonth=2025-1&direction=next",
            Some(&token),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_stepping_past_last_year_is_bad_request() {
        let token = token(&[]);

        let (status, body) = send(get(
            "/api/v1/calendar/adjacent-month?yearMonth=9999-12&direction=next",
            Some(&token),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_invalid_direction_is_bad_request() {
        let token = token(&[]);

        let (status, _) = send(get(
            "/api/v1/calendar/adjacent-month?yearMonth=2025-01&direction=sideways",
            Some(&token),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
