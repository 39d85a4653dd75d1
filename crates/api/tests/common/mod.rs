use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use eventworks_api::auth::jwt::{mint_token, JwtVerifier};
use eventworks_api::auth::AuthConfig;
use eventworks_api::config::ServerConfig;
use eventworks_api::routes;
use eventworks_api::state::AppState;
use eventworks_events::EventBus;
use eventworks_recaptcha::{AbuseScorer, ScorerError, VerifyOutcome};

/// Signing secret shared by the test verifier and [`mint_token`] callers.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Subject on the test admin allow-list.
pub const ADMIN_SUBJECT: &str = "ops-admin";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default),
/// the default `0.1` score threshold, and a single allow-listed admin.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        score_threshold: 0.1,
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            admin_subjects: vec![ADMIN_SUBJECT.to_string()],
        },
    }
}

// ---------------------------------------------------------------------------
// Scripted abuse scorer
// ---------------------------------------------------------------------------

/// What the scripted scorer answers with.
#[derive(Clone)]
pub enum Script {
    /// Answer every call with this outcome.
    Outcome(VerifyOutcome),
    /// Fail every call with a backend error.
    Fail,
}

/// An [`AbuseScorer`] that follows a fixed script and counts its calls.
///
/// Hold the `Arc` in the test to assert on [`ScriptedScorer::calls`] after
/// requests have been served.
pub struct ScriptedScorer {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedScorer {
    /// Scorer that accepts every token with the given score.
    pub fn succeeding(score: f64) -> Self {
        Self {
            script: Script::Outcome(VerifyOutcome {
                success: true,
                score,
                hostname: "example.test".to_string(),
                action: "create_order".to_string(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Scorer that reports `success=false` for every token.
    pub fn rejecting() -> Self {
        Self {
            script: Script::Outcome(VerifyOutcome {
                success: false,
                score: 0.0,
                hostname: String::new(),
                action: String::new(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Scorer whose backend is unreachable.
    pub fn failing() -> Self {
        Self {
            script: Script::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `verify` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AbuseScorer for ScriptedScorer {
    async fn verify(
        &self,
        _token: &str,
        _remote_ip: Option<&str>,
    ) -> Result<VerifyOutcome, ScorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Outcome(outcome) => Ok(outcome.clone()),
            Script::Fail => Err(ScorerError::Api {
                status: 502,
                body: "scripted backend failure".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, a scripted
/// always-accepting scorer, and the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_scorer(pool, Arc::new(ScriptedScorer::succeeding(0.9)))
}

/// Same as [`build_test_app`] but with a caller-provided scorer.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app_with_scorer(pool: PgPool, scorer: Arc<dyn AbuseScorer>) -> Router {
    let config = test_config();
    let verifier = Arc::new(JwtVerifier::new(TEST_JWT_SECRET));
    let event_bus = Arc::new(EventBus::default());

    let state = AppState {
        pool,
        config: Arc::new(config),
        scorer,
        verifier,
        event_bus,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Mint a bearer token for the allow-listed admin subject.
pub fn admin_token() -> String {
    token_for(ADMIN_SUBJECT)
}

/// Mint a bearer token for an arbitrary subject.
pub fn token_for(subject: &str) -> String {
    mint_token(TEST_JWT_SECRET, subject, 15).expect("test token minting should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a GET request with a bearer token.
pub async fn auth_get(app: Router, uri: &str, token: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a PUT request with a JSON body and a bearer token.
pub async fn auth_put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
