//! Integration tests for the premium tutorial unlock gate.

mod common;

use axum::http::StatusCode;
use common::{
    bearer_token, body_json, delete_auth, get, get_auth, post_json, post_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

/// Create a tutorial through the API, returning its id.
async fn create_tutorial(
    pool: &PgPool,
    title: &str,
    premium: bool,
    code: Option<&str>,
) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/tutorials",
        &bearer_token(),
        json!({
            "title": title,
            "is_premium": premium,
            "unlock_code": code,
            "published": true,
            "steps": [{"title": "Step one", "content": "Do the thing"}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn non_premium_tutorials_are_always_unlocked(pool: PgPool) {
    let id = create_tutorial(&pool, "Free Tutorial", false, None).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/tutorials/{id}/unlock?visitor_id=v1")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["unlocked"], true);
}

#[sqlx::test(migrations = "../../migrations")]
async fn premium_tutorials_start_locked(pool: PgPool) {
    let id = create_tutorial(&pool, "Premium Tutorial", true, Some("AB12-CD34-EF56")).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/tutorials/{id}/unlock?visitor_id=v1")).await;

    let body = body_json(response).await;
    assert_eq!(body["data"]["unlocked"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn wrong_code_fails_and_records_nothing(pool: PgPool) {
    let id = create_tutorial(&pool, "Premium Tutorial", true, Some("AB12-CD34-EF56")).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/tutorials/{id}/unlock"),
        json!({"visitor_id": "v1", "code": "XXXX-YYYY-ZZZZ"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["success"], false);

    // Still locked afterwards.
    let app = common::build_test_app(pool);
    let check = body_json(get(app, &format!("/api/v1/tutorials/{id}/unlock?visitor_id=v1")).await).await;
    assert_eq!(check["data"]["unlocked"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn correct_code_unlocks_and_repeats_idempotently(pool: PgPool) {
    let id = create_tutorial(&pool, "Premium Tutorial", true, Some("AB12-CD34-EF56")).await;

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/tutorials/{id}/unlock"),
            json!({"visitor_id": "v1", "code": "AB12-CD34-EF56"}),
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["data"]["success"], true, "both attempts must succeed");
    }

    // Exactly one unlock row exists.
    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tutorial_unlocks WHERE tutorial_id = $1 AND user_identifier = 'v1'",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(rows, 1);

    let app = common::build_test_app(pool);
    let check = body_json(get(app, &format!("/api/v1/tutorials/{id}/unlock?visitor_id=v1")).await).await;
    assert_eq!(check["data"]["unlocked"], true);
}

#[sqlx::test(migrations = "../../migrations")]
async fn code_comparison_ignores_dashes_and_case(pool: PgPool) {
    let id = create_tutorial(&pool, "Premium Tutorial", true, Some("AB12-CD34-EF56")).await;

    for supplied in ["ab12cd34ef56", "AB12CD34EF56", "ab12-cd34-ef56"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/tutorials/{id}/unlock"),
            json!({"visitor_id": format!("visitor-{supplied}"), "code": supplied}),
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["data"]["success"], true, "variant {supplied} must match");
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn premium_without_a_code_can_never_unlock(pool: PgPool) {
    let id = create_tutorial(&pool, "Broken Premium", true, None).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/tutorials/{id}/unlock"),
        json!({"visitor_id": "v1", "code": "AB12-CD34-EF56"}),
    )
    .await;

    let body = body_json(response).await;
    assert_eq!(body["data"]["success"], false);
    assert!(
        body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("no access code"),
        "no-code state must be reported distinctly"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn attempt_on_missing_tutorial_does_not_reveal_existence(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tutorials/999999/unlock",
        json!({"visitor_id": "v1", "code": "AB12-CD34-EF56"}),
    )
    .await;

    // An outcome, not an HTTP error.
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["success"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn unlocked_list_returns_the_visitor_ids(pool: PgPool) {
    let a = create_tutorial(&pool, "Prem A", true, Some("AAAA-BBBB-CCCC")).await;
    let b = create_tutorial(&pool, "Prem B", true, Some("DDDD-EEEE-FFFF")).await;

    for (id, code) in [(a, "AAAA-BBBB-CCCC"), (b, "DDDD-EEEE-FFFF")] {
        let app = common::build_test_app(pool.clone());
        post_json(
            app,
            &format!("/api/v1/tutorials/{id}/unlock"),
            json!({"visitor_id": "v1", "code": code}),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let body = body_json(get(app, "/api/v1/tutorials/unlocked?visitor_id=v1").await).await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();

    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&a));
    assert!(ids.contains(&b));
}

#[sqlx::test(migrations = "../../migrations")]
async fn revoking_an_unlock_locks_the_tutorial_again(pool: PgPool) {
    let id = create_tutorial(&pool, "Premium Tutorial", true, Some("AB12-CD34-EF56")).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/tutorials/{id}/unlock"),
        json!({"visitor_id": "v1", "code": "AB12-CD34-EF56"}),
    )
    .await;

    // Revoke requires auth.
    let app = common::build_test_app(pool.clone());
    let unauthenticated = common::send(
        app,
        axum::http::Method::DELETE,
        &format!("/api/v1/tutorials/{id}/unlock?visitor_id=v1"),
        None,
        None,
    )
    .await;
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let revoked = delete_auth(
        app,
        &format!("/api/v1/tutorials/{id}/unlock?visitor_id=v1"),
        &bearer_token(),
    )
    .await;
    assert_eq!(revoked.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let check = body_json(get(app, &format!("/api/v1/tutorials/{id}/unlock?visitor_id=v1")).await).await;
    assert_eq!(check["data"]["unlocked"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn missing_visitor_id_is_a_validation_error(pool: PgPool) {
    let id = create_tutorial(&pool, "Premium Tutorial", true, Some("AB12-CD34-EF56")).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/tutorials/{id}/unlock"),
        json!({"visitor_id": "  ", "code": "AB12-CD34-EF56"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../migrations")]
async fn generated_codes_have_the_expected_shape(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let unauthenticated = get(app, "/api/v1/tutorials/unlock-code").await;
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/tutorials/unlock-code", &bearer_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let code = body["data"]["code"].as_str().unwrap();

    assert_eq!(code.len(), 14);
    assert_eq!(&code[4..5], "-");
    assert_eq!(&code[9..10], "-");
}
