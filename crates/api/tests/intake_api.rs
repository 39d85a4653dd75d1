//! HTTP-level integration tests for the public order intake endpoint.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. The abuse scorer is scripted so tests
//! control verification outcomes and can count scorer calls.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{auth_get, body_json, get, post_json, ScriptedScorer};
use eventworks_db::repositories::OrderRepo;
use sqlx::PgPool;
use tower::ServiceExt;

/// A complete, valid order payload as the public form submits it.
fn valid_order() -> serde_json::Value {
    serde_json::json!({
        "name": "山田太郎",
        "email": "taro@example.com",
        "phone": "090-1234-5678",
        "type": "イベント企画",
        "budgetRange": "10000-20000",
        "deadline": "1month",
        "meeting": "Zoom",
        "details": "社内周年イベントの企画をお願いしたいです。"
    })
}

/// Wrap an order payload in the intake wire format.
fn intake_body(order: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "recaptchaToken": "tok-valid",
        "order": order,
    })
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn valid_submission_returns_ok_with_id(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/orders", intake_body(valid_order())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);

    let id = json["id"].as_str().expect("id must be a string");
    uuid::Uuid::parse_str(id).expect("id must be a UUID");

    // The stored row carries the submission plus scoring audit fields.
    let app = common::build_test_app(pool);
    let response = auth_get(
        app,
        &format!("/api/v1/admin/orders/{id}"),
        &common::admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = body_json(response).await;
    assert_eq!(stored["data"]["name"], "山田太郎");
    assert_eq!(stored["data"]["type"], "イベント企画");
    assert_eq!(stored["data"]["budgetRange"], "10000-20000");
    assert_eq!(stored["data"]["status"], "unhandled");
    assert_eq!(stored["data"]["adminMemo"], "");
    assert_eq!(stored["data"]["meetingUnavailable"], "");
    assert_eq!(stored["data"]["abuseScore"], 0.9);
    assert_eq!(stored["data"]["scorerHostname"], "example.test");
    assert_eq!(stored["data"]["scorerAction"], "create_order");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_fields_are_trimmed_and_coerced(pool: PgPool) {
    let mut order = valid_order();
    order["email"] = serde_json::json!("  taro@example.com  ");
    order["budgetRange"] = serde_json::json!(10000);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/orders", intake_body(order)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = auth_get(
        app,
        &format!("/api/v1/admin/orders/{id}"),
        &common::admin_token(),
    )
    .await;
    let stored = body_json(response).await;
    assert_eq!(stored["data"]["email"], "taro@example.com");
    assert_eq!(stored["data"]["budgetRange"], "10000");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn optional_meeting_unavailable_is_carried(pool: PgPool) {
    let mut order = valid_order();
    order["meetingUnavailable"] = serde_json::json!("平日は難しいです");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/orders", intake_body(order)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = auth_get(
        app,
        &format!("/api/v1/admin/orders/{id}"),
        &common::admin_token(),
    )
    .await;
    let stored = body_json(response).await;
    assert_eq!(stored["data"]["meetingUnavailable"], "平日は難しいです");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_submissions_are_both_accepted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let first = post_json(app, "/api/v1/orders", intake_body(valid_order())).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first_id = body_json(first).await["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let second = post_json(app, "/api/v1/orders", intake_body(valid_order())).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second_id = body_json(second).await["id"].as_str().unwrap().to_string();

    assert_ne!(first_id, second_id, "resubmission must create a new order");
    assert_eq!(OrderRepo::count_all(&pool).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Token presence gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_token_is_rejected_without_scorer_call(pool: PgPool) {
    let scorer = Arc::new(ScriptedScorer::succeeding(0.9));

    let app = common::build_test_app_with_scorer(pool.clone(), scorer.clone());
    let response = post_json(
        app,
        "/api/v1/orders",
        serde_json::json!({"order": valid_order()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "Missing recaptchaToken");

    // Whitespace-only tokens are equally absent.
    let app = common::build_test_app_with_scorer(pool.clone(), scorer.clone());
    let response = post_json(
        app,
        "/api/v1/orders",
        serde_json::json!({"recaptchaToken": "   ", "order": valid_order()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(scorer.calls(), 0, "scorer must not be consulted");
    assert_eq!(OrderRepo::count_all(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Abuse verification gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_verification_blocks_without_score(pool: PgPool) {
    let scorer = Arc::new(ScriptedScorer::rejecting());

    let app = common::build_test_app_with_scorer(pool.clone(), scorer);
    let response = post_json(app, "/api/v1/orders", intake_body(valid_order())).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["blocked"], true);
    assert_eq!(json["reason"], "verification_failed");
    assert!(
        json.get("score").is_none(),
        "verification_failed must not expose a score"
    );

    assert_eq!(OrderRepo::count_all(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn low_score_blocks_with_score(pool: PgPool) {
    let scorer = Arc::new(ScriptedScorer::succeeding(0.02));

    let app = common::build_test_app_with_scorer(pool.clone(), scorer);
    let response = post_json(app, "/api/v1/orders", intake_body(valid_order())).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["blocked"], true);
    assert_eq!(json["reason"], "low_score");
    assert_eq!(json["score"], 0.02);

    assert_eq!(OrderRepo::count_all(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn score_at_threshold_passes(pool: PgPool) {
    // The block condition is strictly below the 0.1 test threshold.
    let scorer = Arc::new(ScriptedScorer::succeeding(0.1));

    let app = common::build_test_app_with_scorer(pool.clone(), scorer);
    let response = post_json(app, "/api/v1/orders", intake_body(valid_order())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(OrderRepo::count_all(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scorer_backend_failure_returns_internal_error(pool: PgPool) {
    let scorer = Arc::new(ScriptedScorer::failing());

    let app = common::build_test_app_with_scorer(pool.clone(), scorer);
    let response = post_json(app, "/api/v1/orders", intake_body(valid_order())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "Internal error");

    assert_eq!(OrderRepo::count_all(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Validation gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_required_field_is_rejected_after_scoring(pool: PgPool) {
    let scorer = Arc::new(ScriptedScorer::succeeding(0.9));

    let mut order = valid_order();
    order.as_object_mut().unwrap().remove("email");

    let app = common::build_test_app_with_scorer(pool.clone(), scorer.clone());
    let response = post_json(app, "/api/v1/orders", intake_body(order)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "Missing email");

    // Validation runs after verification, so the scorer was consulted.
    assert_eq!(scorer.calls(), 1);
    assert_eq!(OrderRepo::count_all(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_missing_field_wins(pool: PgPool) {
    let mut order = valid_order();
    order.as_object_mut().unwrap().remove("phone");
    order.as_object_mut().unwrap().remove("deadline");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/orders", intake_body(order)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing phone");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparseable_body_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/orders")
        .header("content-type", "application/json")
        .body(Body::from("this is not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "Invalid JSON body");

    assert_eq!(OrderRepo::count_all(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Method and CORS gates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_post_method_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/orders").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_configured_origin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/orders")
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:3000");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_omits_header_for_unlisted_origin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/orders")
        .header("Origin", "http://evil.test")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none(),
        "unlisted origins must not receive an allow-origin header"
    );
}
