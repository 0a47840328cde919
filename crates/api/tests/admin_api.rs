//! Admin character mutations: session enforcement, validation, CRUD against
//! the in-memory store, and demo-mode acknowledgement.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, login, patch_json_auth, post_json, post_json_auth,
    valid_character,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Session enforcement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_without_token_is_401() {
    let response = post_json(common::memory_app(), "/api/v1/admin/characters", valid_character()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_401() {
    let app = common::memory_app();
    let response = delete_auth(app, "/api/v1/admin/characters/abc", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// CRUD against the memory store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_get_update_delete_round_trip() {
    let app = common::memory_app();
    let token = login(app.clone(), "admin").await;

    // Create.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/characters",
        &token,
        valid_character(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().expect("id assigned").to_string();
    assert_eq!(created["data"]["name"], "Gandalf");

    // Read back.
    let json = body_json(get(app.clone(), &format!("/api/v1/characters/{id}")).await).await;
    assert_eq!(json["data"]["universe"], "The Lord of the Rings");

    // Partial update keeps untouched fields.
    let response = patch_json_auth(
        app.clone(),
        &format!("/api/v1/admin/characters/{id}"),
        &token,
        json!({ "abilities": "Shadowfax" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app.clone(), &format!("/api/v1/characters/{id}")).await).await;
    assert_eq!(json["data"]["abilities"], "Shadowfax");
    assert_eq!(json["data"]["name"], "Gandalf");

    // Delete, then delete again.
    let uri = format!("/api/v1/admin/characters/{id}");
    assert_eq!(
        delete_auth(app.clone(), &uri, &token).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        delete_auth(app.clone(), &uri, &token).await.status(),
        StatusCode::NO_CONTENT
    );

    let response = get(app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn created_character_shows_up_in_search() {
    let app = common::memory_app();
    let token = login(app.clone(), "admin").await;
    post_json_auth(app.clone(), "/api/v1/admin/characters", &token, valid_character()).await;

    let json = body_json(get(app, "/api/v1/characters/search?q=gand").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Gandalf");
}

#[tokio::test]
async fn update_of_missing_character_is_404() {
    let app = common::memory_app();
    let token = login(app.clone(), "admin").await;

    let response = patch_json_auth(
        app.clone(),
        "/api/v1/admin/characters/ghost",
        &token,
        json!({ "name": "Casper" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // No record was materialised by the failed update.
    let json = body_json(get(app, "/api/v1/characters").await).await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = common::memory_app();
    let token = login(app.clone(), "admin").await;

    let mut missing_name = valid_character();
    missing_name["name"] = json!("");
    let response =
        post_json_auth(app.clone(), "/api/v1/admin/characters", &token, missing_name).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut bad_url = valid_character();
    bad_url["imageUrl"] = json!("not a url");
    let response = post_json_auth(app.clone(), "/api/v1/admin/characters", &token, bad_url).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json_auth(
        app,
        "/api/v1/admin/characters/abc",
        &token,
        json!({ "universe": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_id_is_400_on_writes() {
    let app = common::memory_app();
    let token = login(app.clone(), "admin").await;

    let response = delete_auth(app, "/api/v1/admin/characters/bad.key", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_ID");
}

// ---------------------------------------------------------------------------
// Demo mode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn demo_mutations_succeed_without_persisting() {
    let app = common::demo_app();
    let token = login(app.clone(), "admin").await;

    let response =
        post_json_auth(app.clone(), "/api/v1/admin/characters", &token, valid_character()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert!(created["data"].get("id").is_none());

    let response = patch_json_auth(
        app.clone(),
        "/api/v1/admin/characters/1",
        &token,
        json!({ "name": "Harry" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app.clone(), "/api/v1/admin/characters/2", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The fixture is unchanged.
    let json = body_json(get(app, "/api/v1/characters").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 4);
    assert_eq!(data[0]["name"], "Harry Potter");
    assert_eq!(data[1]["name"], "Iron Man");
}
