#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use devdocs_api::auth::jwt::{generate_access_token, JwtConfig};
use devdocs_api::auth::password::hash_password;
use devdocs_api::config::{AdminCredentials, ServerConfig};
use devdocs_api::router::build_app_router;
use devdocs_api::settings_cache::SettingsCache;
use devdocs_api::state::AppState;

/// Plaintext admin password matching the hash in [`test_config`].
pub const TEST_ADMIN_PASSWORD: &str = "integration-test-password";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        admin: AdminCredentials {
            username: "admin".to_string(),
            password_hash: hash_password(TEST_ADMIN_PASSWORD)
                .expect("test password should hash"),
        },
        settings_cache_ttl_secs: 60,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` (via the shared
/// `build_app_router`) so integration tests exercise the same stack
/// that production uses. The AI client slot is left empty: AI endpoints
/// answer 503, which is itself under test.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let settings_cache = Arc::new(SettingsCache::new(Duration::from_secs(
        config.settings_cache_ttl_secs,
    )));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ai: None,
        settings_cache,
    };

    build_app_router(state, &config)
}

/// A valid admin bearer token for the test JWT config.
pub fn bearer_token() -> String {
    generate_access_token("admin", &test_config().jwt).expect("token should generate")
}

/// Send a request through the router.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    json: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match json {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(json)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    json: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(json)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    json: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(json)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
