//! Route guard: signed-out visitors, role allow-lists and unknown paths.

use axum::http::StatusCode;

use ims_integration_tests::TestClient;

const SCREENS: &[&str] = &[
    "/",
    "/inventory",
    "/orders",
    "/warehouses",
    "/customers",
    "/shipments",
    "/reports",
    "/settings",
    "/profile",
    "/users",
];

#[tokio::test]
async fn test_health_needs_no_session() {
    let mut client = TestClient::new();
    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_signed_out_visitors_go_to_login() {
    let mut client = TestClient::new();
    for path in SCREENS {
        client.get(path).await.assert_redirect("/auth/login");
    }
    client
        .post("/inventory/001/delete", &[])
        .await
        .assert_redirect("/auth/login");
}

#[tokio::test]
async fn test_signed_out_api_is_unauthorized() {
    let mut client = TestClient::new();
    assert_eq!(client.get("/api/me").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_every_screen_renders_for_admin() {
    let mut client = TestClient::new();
    client.login("admin@example.com").await;
    for path in SCREENS {
        let response = client.get(path).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_user_role_cannot_manage_records() {
    let mut client = TestClient::new();
    client.login("user@example.com").await;

    let table = client.get("/inventory").await;
    assert_eq!(table.status, StatusCode::OK);
    assert!(!table.body.contains("/inventory/new"));
    assert!(!table.body.contains("/inventory/001/delete"));

    client.get("/inventory/new").await.assert_redirect("/");
    client.get("/orders/ORD-001/edit").await.assert_redirect("/");
    client
        .post("/inventory/001/delete", &[])
        .await
        .assert_redirect("/");

    // Nothing was deleted.
    assert!(client.get("/inventory").await.body.contains("Smartphone X"));
}

#[tokio::test]
async fn test_only_admins_see_user_administration() {
    let mut manager = TestClient::new();
    manager.login("manager@example.com").await;

    let dashboard = manager.get("/").await;
    assert!(!dashboard.body.contains("href=\"/users\""));
    manager.get("/users").await.assert_redirect("/");
    manager.get("/users/new").await.assert_redirect("/");

    // Managers may still manage records.
    assert_eq!(manager.get("/inventory/new").await.status, StatusCode::OK);

    let mut admin = manager.new_browser();
    admin.login("admin@example.com").await;
    assert!(admin.get("/").await.body.contains("href=\"/users\""));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let mut client = TestClient::new();

    let signed_out = client.get("/no-such-page").await;
    assert_eq!(signed_out.status, StatusCode::NOT_FOUND);
    assert!(signed_out.body.contains("/auth/login"));

    client.login("user@example.com").await;
    let signed_in = client.get("/no-such-page").await;
    assert_eq!(signed_in.status, StatusCode::NOT_FOUND);
    assert!(signed_in.body.contains("Back to dashboard"));
}

#[tokio::test]
async fn test_unknown_record_is_not_found() {
    let mut client = TestClient::new();
    client.login("admin@example.com").await;
    assert_eq!(
        client.get("/inventory/999/edit").await.status,
        StatusCode::NOT_FOUND
    );
}
