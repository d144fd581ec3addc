//! Catalog movies, tags, ratings, and Oscar nominations over HTTP.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, delete_auth, get_auth, post_json_auth, put_json_auth, user_token,
    KNOWN_TMDB_ID,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_movie(app: axum::Router, token: &str, body: serde_json::Value) -> i64 {
    let response = post_json_auth(app, "/api/v1/movies", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_get_movie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = user_token("alice");

    let id = create_movie(
        app.clone(),
        &token,
        json!({ "title": "Heat", "tmdb_id": 949, "release_date": "1995-12-15" }),
    )
    .await;

    let response = get_auth(app, &format!("/api/v1/movies/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Heat");
    assert_eq!(json["data"]["release_date"], "1995-12-15");
    assert_eq!(json["data"]["tags"].as_array().unwrap().len(), 0);
    assert!(json["data"]["my_rating"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_tmdb_id_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = user_token("alice");
    create_movie(app.clone(), &token, json!({ "title": "Heat", "tmdb_id": 949 })).await;

    let response = post_json_auth(
        app,
        "/api/v1/movies",
        json!({ "title": "Heat again", "tmdb_id": 949 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_import_copies_tmdb_details(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = user_token("alice");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/movies/import",
        json!({ "tmdb_id": KNOWN_TMDB_ID }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Inception");
    assert_eq!(json["data"]["director"], "Christopher Nolan");
    assert_eq!(json["data"]["release_date"], "2010-07-15");

    let again = post_json_auth(
        app.clone(),
        "/api/v1/movies/import",
        json!({ "tmdb_id": KNOWN_TMDB_ID }),
        &token,
    )
    .await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);

    let unknown = post_json_auth(app, "/api/v1/movies/import", json!({ "tmdb_id": 1 }), &token).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_movies_searches_titles(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = user_token("alice");
    create_movie(app.clone(), &token, json!({ "title": "Heat" })).await;
    create_movie(app.clone(), &token, json!({ "title": "The Heat" })).await;
    create_movie(app.clone(), &token, json!({ "title": "Alien" })).await;

    let json = body_json(get_auth(app.clone(), "/api/v1/movies?search=heat", &token).await).await;
    assert_eq!(json["data"]["pagination"]["total"], 2);

    let json = body_json(get_auth(app, "/api/v1/movies?limit=1", &token).await).await;
    assert_eq!(json["data"]["movies"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["pagination"]["hasMore"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unparseable_limit_is_reported_as_json(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = user_token("alice");

    let response = get_auth(app, "/api/v1/movies?limit=abc", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");

    let logged: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM error_logs WHERE endpoint = '/api/v1/movies' AND status_code = 400",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(logged, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete_are_admin_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = user_token("alice");
    let admin = admin_token();
    let id = create_movie(app.clone(), &alice, json!({ "title": "Heat" })).await;
    let uri = format!("/api/v1/movies/{id}");

    let forbidden = put_json_auth(app.clone(), &uri, json!({ "title": "Cold" }), &alice).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let updated = put_json_auth(app.clone(), &uri, json!({ "title": "Heat (1995)" }), &admin).await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["data"]["title"], "Heat (1995)");

    assert_eq!(
        delete_auth(app.clone(), &uri, &alice).await.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        delete_auth(app.clone(), &uri, &admin).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        get_auth(app, &uri, &alice).await.status(),
        StatusCode::NOT_FOUND
    );
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_tags_and_filter_by_tag(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = user_token("alice");
    let heat = create_movie(app.clone(), &token, json!({ "title": "Heat" })).await;
    create_movie(app.clone(), &token, json!({ "title": "Alien" })).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/movies/{heat}/tags"),
        json!({ "tag_names": ["Crime", "  crime ", "Los Angeles"] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get_auth(app.clone(), "/api/v1/movies?tag=CRIME", &token).await).await;
    assert_eq!(json["data"]["pagination"]["total"], 1);
    assert_eq!(json["data"]["movies"][0]["title"], "Heat");

    let all = body_json(get_auth(app, "/api/v1/tags", &token).await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_validation_and_removal(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = user_token("alice");
    let heat = create_movie(app.clone(), &token, json!({ "title": "Heat" })).await;
    let uri = format!("/api/v1/movies/{heat}/tags");

    let empty = post_json_auth(app.clone(), &uri, json!({ "tag_names": [] }), &token).await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let long = "x".repeat(51);
    let too_long = post_json_auth(app.clone(), &uri, json!({ "tag_names": [long] }), &token).await;
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);

    let applied = body_json(
        post_json_auth(app.clone(), &uri, json!({ "tag_names": ["Crime"] }), &token).await,
    )
    .await;
    let tag_id = applied["data"][0]["id"].as_i64().unwrap();

    let removed = delete_auth(app.clone(), &format!("{uri}/{tag_id}"), &token).await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let again = delete_auth(app, &format!("{uri}/{tag_id}"), &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = user_token("alice");
    let heat = create_movie(app.clone(), &token, json!({ "title": "Heat" })).await;
    let uri = format!("/api/v1/movies/{heat}/rating");

    let saved = put_json_auth(
        app.clone(),
        &uri,
        json!({ "rating": 9.5, "watched_at": "2024-03-01" }),
        &token,
    )
    .await;
    assert_eq!(saved.status(), StatusCode::OK);
    assert_eq!(body_json(saved).await["data"]["rating"], 9.5);

    let history = body_json(get_auth(app.clone(), "/api/v1/me/history", &token).await).await;
    assert_eq!(history["data"][0]["title"], "Heat");
    assert_eq!(history["data"][0]["watched_at"], "2024-03-01");

    let detail = body_json(get_auth(app.clone(), &format!("/api/v1/movies/{heat}"), &token).await).await;
    assert_eq!(detail["data"]["my_rating"]["rating"], 9.5);

    assert_eq!(
        delete_auth(app.clone(), &uri, &token).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        delete_auth(app, &uri, &token).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_ratings_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = user_token("alice");
    let heat = create_movie(app.clone(), &token, json!({ "title": "Heat" })).await;
    let uri = format!("/api/v1/movies/{heat}/rating");

    for body in [
        json!({ "rating": 11.0 }),
        json!({ "rating": 7.3 }),
        json!({ "watched_at": "yesterday" }),
        json!({}),
    ] {
        let response = put_json_auth(app.clone(), &uri, body.clone(), &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }

    let missing = put_json_auth(
        app,
        "/api/v1/movies/999999/rating",
        json!({ "rating": 8.0 }),
        &token,
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Oscars
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_oscar_nominations(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = user_token("alice");
    let admin = admin_token();
    let id = create_movie(app.clone(), &alice, json!({ "title": "Parasite" })).await;
    let uri = format!("/api/v1/movies/{id}/oscars");
    let body = json!({ "ceremony_year": 2020, "category": "Best Picture", "is_winner": true });

    let forbidden = post_json_auth(app.clone(), &uri, body.clone(), &alice).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let created = post_json_auth(app.clone(), &uri, body, &admin).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let bad_year = post_json_auth(
        app.clone(),
        &uri,
        json!({ "ceremony_year": 1900, "category": "Best Picture" }),
        &admin,
    )
    .await;
    assert_eq!(bad_year.status(), StatusCode::BAD_REQUEST);

    let list = body_json(get_auth(app, &uri, &alice).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
    assert_eq!(list["data"][0]["is_winner"], true);
}
