//! Integration tests for the settings document, its cache, and social links.

mod common;

use axum::http::{Method, StatusCode};
use common::{bearer_token, body_json, delete_auth, get, post_json_auth, put_json_auth, send};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn defaults_are_served_from_an_empty_database(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/settings").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["hero"]["title"], "Personal");
    assert_eq!(body["data"]["site"]["logoText"], "DevDocs");
    assert!(body["data"]["social"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn single_section_falls_back_to_its_default(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = body_json(get(app, "/api/v1/settings/hero").await).await;
    assert_eq!(body["data"]["badge"], "Documentation & Tutorials");
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_section_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/settings/nonsense").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_invalidates_the_cache(pool: PgPool) {
    // Warm the cache with the defaults.
    let app = common::build_test_app(pool.clone());
    let warm = body_json(get(app, "/api/v1/settings").await).await;
    assert_eq!(warm["data"]["hero"]["title"], "Personal");

    // The update and the follow-up read go through the same app (and
    // therefore the same cache instance).
    let app = common::build_test_app(pool);

    let updated = put_json_auth(
        app.clone(),
        "/api/v1/settings",
        &bearer_token(),
        json!({"hero": {"title": "Changed", "badge": "New Badge"}}),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);

    let fresh = body_json(get(app, "/api/v1/settings").await).await;
    assert_eq!(fresh["data"]["hero"]["title"], "Changed");
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_rejects_unknown_sections_and_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let bad_section = put_json_auth(
        app,
        "/api/v1/settings",
        &bearer_token(),
        json!({"social": []}),
    )
    .await;
    assert_eq!(bad_section.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let unauthenticated = send(
        app,
        Method::PUT,
        "/api/v1/settings",
        None,
        Some(json!({"hero": {"title": "X"}})),
    )
    .await;
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn reset_restores_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);

    put_json_auth(
        app.clone(),
        "/api/v1/settings",
        &bearer_token(),
        json!({"hero": {"title": "Changed"}}),
    )
    .await;

    let reset = send(
        app.clone(),
        Method::POST,
        "/api/v1/settings/reset",
        Some(&bearer_token()),
        None,
    )
    .await;
    assert_eq!(reset.status(), StatusCode::OK);

    let body = body_json(get(app, "/api/v1/settings").await).await;
    assert_eq!(body["data"]["hero"]["title"], "Personal");
}

#[sqlx::test(migrations = "../../migrations")]
async fn social_links_replace_all_assigns_display_order(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let replaced = body_json(
        put_json_auth(
            app,
            "/api/v1/social-links",
            &bearer_token(),
            json!([
                {"platform": "GitHub", "url": "https://github.com/dev", "icon": "Github"},
                {"platform": "Twitter", "url": "https://twitter.com/dev", "icon": "Twitter"}
            ]),
        )
        .await,
    )
    .await;

    let links = replaced["data"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["display_order"], 1);
    assert_eq!(links[1]["display_order"], 2);

    // Appending a link continues the order.
    let app = common::build_test_app(pool.clone());
    let appended = body_json(
        post_json_auth(
            app,
            "/api/v1/social-links",
            &bearer_token(),
            json!({"platform": "YouTube", "url": "https://youtube.com/@dev", "icon": "Youtube"}),
        )
        .await,
    )
    .await;
    assert_eq!(appended["data"]["display_order"], 3);

    // Public list is ordered and the settings document embeds it.
    let app = common::build_test_app(pool.clone());
    let listed = body_json(get(app, "/api/v1/social-links").await).await;
    let platforms: Vec<&str> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["platform"].as_str().unwrap())
        .collect();
    assert_eq!(platforms, vec!["GitHub", "Twitter", "YouTube"]);

    let app = common::build_test_app(pool);
    let settings = body_json(get(app, "/api/v1/settings").await).await;
    assert_eq!(settings["data"]["social"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn social_link_update_and_delete(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json_auth(
            app,
            "/api/v1/social-links",
            &bearer_token(),
            json!({"platform": "GitHub", "url": "https://github.com/dev", "icon": "Github"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let updated = body_json(
        put_json_auth(
            app,
            &format!("/api/v1/social-links/{id}"),
            &bearer_token(),
            json!({"platform": "GitHub", "url": "https://github.com/other", "icon": "Github"}),
        )
        .await,
    )
    .await;
    assert_eq!(updated["data"]["url"], "https://github.com/other");

    let app = common::build_test_app(pool.clone());
    let deleted = delete_auth(app, &format!("/api/v1/social-links/{id}"), &bearer_token()).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let missing_url = post_json_auth(
        app,
        "/api/v1/social-links",
        &bearer_token(),
        json!({"platform": "GitHub", "url": "  "}),
    )
    .await;
    assert_eq!(missing_url.status(), StatusCode::BAD_REQUEST);
}
