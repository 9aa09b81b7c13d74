//! Integration tests for `authenticate` and `require_privileged`.

use chrono::Duration;
use http::StatusCode;

use spellbook_auth::SigningSecret;
use spellbook_auth::error::GENERIC_AUTH_MESSAGE;
use spellbook_auth::jwt;
use spellbook_core::types::AccountId;
use spellbook_entity::account::Role;

use crate::helpers::TestApp;

fn new_admin_body() -> serde_json::Value {
    serde_json::json!({ "email": "apprentice@example.com", "password": "fireball" })
}

#[tokio::test]
async fn test_missing_and_malformed_headers_are_401() {
    let app = TestApp::new();
    let token = jwt::issue(AccountId::new(), Role::User, &app.secret(), Duration::seconds(60))
        .unwrap();

    let headers = [
        None,
        Some(String::new()),
        Some("Bearer ".to_string()),
        Some(format!("bearer {token}")),
        Some(format!("Basic {token}")),
        Some(token.clone()),
    ];

    for header in headers {
        let response = app
            .request_with_authorization("GET", "/api/users/me", None, header.as_deref())
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "header {header:?}");
        assert_eq!(response.body["message"], GENERIC_AUTH_MESSAGE);
    }

    let ok = app
        .request_with_authorization(
            "GET",
            "/api/users/me",
            None,
            Some(&format!("Bearer   {token}  ")),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_and_foreign_tokens_look_alike() {
    let app = TestApp::new();
    let id = AccountId::new();

    let expired = jwt::issue(id, Role::User, &app.secret(), Duration::zero()).unwrap();
    let foreign = jwt::issue(
        id,
        Role::User,
        &SigningSecret::from("some-other-secret"),
        Duration::seconds(60),
    )
    .unwrap();

    let expired = app.request("GET", "/api/users/me", None, Some(&expired)).await;
    let foreign = app.request("GET", "/api/users/me", None, Some(&foreign)).await;

    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert_eq!(foreign.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.body, foreign.body);
}

#[tokio::test]
async fn test_identity_reaches_handler() {
    let app = TestApp::new();
    let id = AccountId::new();
    let token = jwt::issue(id, Role::Admin, &app.secret(), Duration::seconds(60)).unwrap();

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["account_id"], id.to_string());
    assert_eq!(response.body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_privileged_route_admits_admin() {
    let app = TestApp::new();
    let admin = app
        .state
        .session_manager
        .create_admin("archmage@example.com", "fireball")
        .await
        .unwrap();
    let login = app.login("archmage@example.com", "fireball").await;
    assert_eq!(login["id"], admin.id.to_string());

    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(new_admin_body()),
            login["token"].as_str(),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_privileged_route_refuses_user() {
    let app = TestApp::new();
    app.register("mage@example.com", "fireball").await;
    let login = app.login("mage@example.com", "fireball").await;

    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(new_admin_body()),
            login["token"].as_str(),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.account_count(), 1);
}

#[tokio::test]
async fn test_privileged_route_requires_authentication_first() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/admin/users", Some(new_admin_body()), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_is_read_from_token() {
    let app = TestApp::new();
    app.register("mage@example.com", "fireball").await;
    let login = app.login("mage@example.com", "fireball").await;
    let id: AccountId = login["id"].as_str().unwrap().parse().unwrap();

    // A token claiming admin for a stored user passes; validation never
    // consults the store.
    let elevated =
        jwt::issue(id, Role::Admin, &app.secret(), Duration::seconds(60)).unwrap();
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(new_admin_body()),
            Some(&elevated),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}
