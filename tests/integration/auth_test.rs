//! Integration tests for registration, login, refresh, and revoke.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/healthz", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_register_creates_user_account() {
    let app = TestApp::new();
    let response = app.register("mage@example.com", "fireball").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["email"], "mage@example.com");
    assert_eq!(response.body["data"]["role"], "user");
    assert!(response.body["data"].get("password_hash").is_none());
    assert_eq!(app.store.account_count(), 1);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = TestApp::new();

    let short = app.register("mage@example.com", "abc").await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let invalid = app.register("not-an-email", "fireball").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let disposable = app.register("mage@mailinator.com", "fireball").await;
    assert_eq!(disposable.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.register("mage@example.com", "fireball").await.status, StatusCode::CREATED);
    let duplicate = app.register("mage@example.com", "fireball").await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_refresh_revoke_scenario() {
    let app = TestApp::new();
    app.register("mage@example.com", "fireball").await;

    let login = app.login("mage@example.com", "fireball").await;
    let access = login["token"].as_str().unwrap().to_string();
    let refresh = login["refresh_token"].as_str().unwrap().to_string();

    assert_eq!(refresh.len(), 64);
    assert!(refresh.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let expires_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(login["expires_at"].clone()).unwrap();
    let remaining = expires_at - chrono::Utc::now();
    assert!(remaining > chrono::Duration::seconds(3590));
    assert!(remaining <= chrono::Duration::seconds(3601));

    let me = app.request("GET", "/api/users/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["account_id"], login["id"]);

    let refreshed = app.request("POST", "/api/refresh", None, Some(&refresh)).await;
    assert_eq!(refreshed.status, StatusCode::OK);
    let new_access = refreshed.body["data"]["token"].as_str().unwrap().to_string();
    let me = app.request("GET", "/api/users/me", None, Some(&new_access)).await;
    assert_eq!(me.status, StatusCode::OK);

    let revoked = app.request("POST", "/api/revoke", None, Some(&refresh)).await;
    assert_eq!(revoked.status, StatusCode::NO_CONTENT);

    let again = app.request("POST", "/api/refresh", None, Some(&refresh)).await;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("mage@example.com", "fireball").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "email": "mage@example.com", "password": "frostbolt" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "email": "ghost@example.com", "password": "fireball" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_refresh_requires_bearer() {
    let app = TestApp::new();

    let missing = app.request("POST", "/api/refresh", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let unknown = app
        .request("POST", "/api/refresh", None, Some(&"ab".repeat(32)))
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_account() {
    let app = TestApp::new();
    app.register("mage@example.com", "fireball").await;
    let login = app.login("mage@example.com", "fireball").await;
    let access = login["token"].as_str().unwrap();
    let refresh = login["refresh_token"].as_str().unwrap();

    let wrong = app
        .request(
            "POST",
            "/api/users/delete",
            Some(serde_json::json!({ "password": "frostbolt" })),
            Some(access),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let deleted = app
        .request(
            "POST",
            "/api/users/delete",
            Some(serde_json::json!({ "password": "fireball" })),
            Some(access),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(app.store.account_count(), 0);

    let refreshed = app.request("POST", "/api/refresh", None, Some(refresh)).await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_account() {
    let app = TestApp::new();
    let created = app.register("mage@example.com", "fireball").await;
    let login = app.login("mage@example.com", "fireball").await;
    let access = login["token"].as_str().unwrap();

    let body = serde_json::json!({ "email": "Sorcerer@Example.com", "password": "frostbolt" });
    let anonymous = app.request("PUT", "/api/users", Some(body.clone()), None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let updated = app.request("PUT", "/api/users", Some(body), Some(access)).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["id"], created.body["data"]["id"]);
    assert_eq!(updated.body["data"]["email"], "sorcerer@example.com");
    assert_eq!(updated.body["data"]["role"], "user");
    assert!(updated.body["data"].get("password_hash").is_none());

    let old = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "email": "mage@example.com", "password": "fireball" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    app.login("sorcerer@example.com", "frostbolt").await;

    // registration still answers on the same path
    assert_eq!(app.register("mage@example.com", "fireball").await.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_update_account_rejects_bad_input() {
    let app = TestApp::new();
    app.register("mage@example.com", "fireball").await;
    app.register("arch@example.com", "fireball").await;
    let login = app.login("mage@example.com", "fireball").await;
    let access = login["token"].as_str().unwrap();

    let short = app
        .request("PUT", "/api/users", Some(serde_json::json!({ "password": "abc" })), Some(access))
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let disposable = app
        .request(
            "PUT",
            "/api/users",
            Some(serde_json::json!({ "email": "mage@yopmail.com" })),
            Some(access),
        )
        .await;
    assert_eq!(disposable.status, StatusCode::BAD_REQUEST);

    let taken = app
        .request(
            "PUT",
            "/api/users",
            Some(serde_json::json!({ "email": "arch@example.com" })),
            Some(access),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);

    app.login("mage@example.com", "fireball").await;
}
