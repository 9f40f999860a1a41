//! Integration tests for the request pipeline against a local fake backend.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde_json::{Value, json};

use autoguide_client::http::RequestPipeline;
use autoguide_client::router::Navigator;
use autoguide_core::config::api::ApiConfig;
use autoguide_core::traits::storage::{SessionStorage, TOKEN_KEY, USERNAME_KEY};
use autoguide_storage::memory::MemorySessionStorage;

fn forge(exp_offset_seconds: i64) -> String {
    let claims = json!({
        "exp": Utc::now().timestamp() + exp_offset_seconds,
        "realm_access": {"roles": ["operator"]}
    });
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{header}.{payload}.sig")
}

/// Fake backend: `/echo` reflects the Authorization header, `/secure`
/// always rejects with 401 and an AutoGuide-shaped error body.
async fn spawn_backend() -> String {
    async fn echo(headers: HeaderMap) -> axum::Json<Value> {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        axum::Json(json!({ "authorization": authorization }))
    }

    async fn secure() -> (StatusCode, axum::Json<Value>) {
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({
                "code": "UNAUTHORIZED",
                "message": "Token rejected",
                "timestamp": "2026-01-01T00:00:00Z"
            })),
        )
    }

    let app = Router::new()
        .route("/echo", get(echo))
        .route("/secure", get(secure));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

struct TestClient {
    pipeline: RequestPipeline,
    storage: Arc<MemorySessionStorage>,
    navigator: Arc<Navigator>,
}

async fn test_client(location: &str, require_auth: bool) -> TestClient {
    let base_url = spawn_backend().await;
    let storage = Arc::new(MemorySessionStorage::new());
    let navigator = Arc::new(Navigator::new(location));
    let pipeline = RequestPipeline::new(
        &ApiConfig {
            base_url,
            timeout_seconds: 5,
        },
        storage.clone(),
        navigator.clone(),
        require_auth,
    )
    .unwrap();
    TestClient {
        pipeline,
        storage,
        navigator,
    }
}

#[tokio::test]
async fn valid_token_is_attached_as_bearer() {
    let client = test_client("/bookings", true).await;
    let token = forge(3600);
    client.storage.set(TOKEN_KEY, &token);

    let body: Value = client.pipeline.get_json("/echo").await.unwrap();
    assert_eq!(
        body["authorization"].as_str(),
        Some(format!("Bearer {token}").as_str())
    );
}

#[tokio::test]
async fn missing_token_sends_unauthenticated() {
    let client = test_client("/bookings", true).await;
    let body: Value = client.pipeline.get_json("/echo").await.unwrap();
    assert!(body["authorization"].is_null());
}

#[tokio::test]
async fn expired_token_is_cleared_and_the_request_still_goes_out() {
    let client = test_client("/bookings", true).await;
    client.storage.set(TOKEN_KEY, &forge(-3600));
    client.storage.set(USERNAME_KEY, "alice");

    let body: Value = client.pipeline.get_json("/echo").await.unwrap();
    assert!(body["authorization"].is_null());
    assert!(client.storage.get(TOKEN_KEY).is_none());
    assert!(client.storage.get(USERNAME_KEY).is_none());
}

#[tokio::test]
async fn concurrent_401s_redirect_to_login_exactly_once() {
    let client = test_client("/bookings", true).await;
    client.storage.set(TOKEN_KEY, &forge(3600));
    client.storage.set(USERNAME_KEY, "alice");

    let (a, b, c) = tokio::join!(
        client.pipeline.get_json::<Value>("/secure"),
        client.pipeline.get_json::<Value>("/secure"),
        client.pipeline.get_json::<Value>("/secure"),
    );

    for result in [a, b, c] {
        let err = result.unwrap_err();
        assert!(err.is_status(401));
        assert_eq!(err.message, "Token rejected");
    }

    assert!(client.storage.get(TOKEN_KEY).is_none());
    assert!(client.storage.get(USERNAME_KEY).is_none());
    assert_eq!(
        client.navigator.pending_redirect().as_deref(),
        Some("/login?next=%2Fbookings")
    );
    assert!(client.navigator.redirect_in_flight());
}

#[tokio::test]
async fn no_redirect_when_auth_is_not_globally_required() {
    let client = test_client("/bookings", false).await;
    client.storage.set(TOKEN_KEY, &forge(3600));

    let err = client
        .pipeline
        .get_json::<Value>("/secure")
        .await
        .unwrap_err();
    assert!(err.is_status(401));
    // Session is still cleared; the caller decides what to display.
    assert!(client.storage.get(TOKEN_KEY).is_none());
    assert!(client.navigator.pending_redirect().is_none());
}

#[tokio::test]
async fn no_redirect_when_already_on_an_auth_route() {
    let client = test_client("/login?next=%2Fbookings", true).await;
    client.storage.set(TOKEN_KEY, &forge(3600));

    client
        .pipeline
        .get_json::<Value>("/secure")
        .await
        .unwrap_err();
    assert!(client.navigator.pending_redirect().is_none());
}

#[tokio::test]
async fn a_401_without_a_token_leaves_storage_alone() {
    let client = test_client("/bookings", true).await;
    client.storage.set(USERNAME_KEY, "stale");

    client
        .pipeline
        .get_json::<Value>("/secure")
        .await
        .unwrap_err();
    assert_eq!(client.storage.get(USERNAME_KEY).as_deref(), Some("stale"));
    assert!(client.navigator.pending_redirect().is_none());
}
