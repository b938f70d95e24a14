mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::TestApp;

fn cafe() -> serde_json::Value {
    json!({
        "name": "Cafe",
        "address": "1 Main St",
        "tableCount": 5,
        "managerId": 7
    })
}

#[tokio::test]
async fn list_is_public_and_starts_empty() {
    let app = TestApp::new();

    let res = app.send(Method::GET, "/api/locations", None, None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn admin_creates_location_and_reads_it_back() {
    let app = TestApp::new();
    let admin = app.token_for_id(1, &["Admin"]);

    let created = app
        .send(Method::POST, "/api/locations", Some(&admin), Some(cafe()))
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "body: {}", created.body);

    let id = created.body["id"].as_i64().expect("id in response");
    assert!(id > 0);
    assert_eq!(
        created.headers.get(header::LOCATION).unwrap(),
        &format!("/api/locations/{id}")
    );

    let fetched = app
        .send(Method::GET, &format!("/api/locations/{id}"), None, None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(
        fetched.body,
        json!({
            "id": id,
            "name": "Cafe",
            "address": "1 Main St",
            "tableCount": 5,
            "managerId": 7
        })
    );

    let listed = app.send(Method::GET, "/api/locations", None, None).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_requires_admin() {
    let app = TestApp::new();

    let anonymous = app.send(Method::POST, "/api/locations", None, Some(cafe())).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let user = app.token_for_id(7, &["User"]);
    let not_admin = app
        .send(Method::POST, "/api/locations", Some(&user), Some(cafe()))
        .await;
    assert_eq!(not_admin.status, StatusCode::FORBIDDEN);

    let listed = app.send(Method::GET, "/api/locations", None, None).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn create_with_non_positive_table_count_is_rejected() {
    let app = TestApp::new();
    let admin = app.token_for_id(1, &["Admin"]);

    for table_count in [0, -4] {
        let mut body = cafe();
        body["tableCount"] = json!(table_count);
        let res = app
            .send(Method::POST, "/api/locations", Some(&admin), Some(body))
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["error"], "Table count must be at least 1.");
    }

    let listed = app.send(Method::GET, "/api/locations", None, None).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn missing_table_count_is_a_validation_error() {
    let app = TestApp::new();
    let admin = app.token_for_id(1, &["Admin"]);

    let res = app
        .send(
            Method::POST,
            "/api/locations",
            Some(&admin),
            Some(json!({ "name": "Cafe", "address": "1 Main St" })),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Table count must be at least 1.");
    assert!(res.body["details"]["tableCount"].is_array());
}

#[tokio::test]
async fn malformed_body_is_a_json_bad_request() {
    let app = TestApp::new();
    let admin = app.token_for_id(1, &["Admin"]);

    let mut body = cafe();
    body["tableCount"] = json!("five");
    let res = app
        .send(Method::POST, "/api/locations", Some(&admin), Some(body))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"].is_string());

    let listed = app.send(Method::GET, "/api/locations", None, None).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = TestApp::new();
    let admin = app.token_for_id(1, &["Admin"]);

    let get = app.send(Method::GET, "/api/locations/404", None, None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let put = app
        .send(Method::PUT, "/api/locations/404", Some(&admin), Some(cafe()))
        .await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    let delete = app
        .send(Method::DELETE, "/api/locations/404", Some(&admin), None)
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stranger_cannot_update_or_delete() {
    let app = TestApp::new();
    let admin = app.token_for_id(1, &["Admin"]);
    let created = app
        .send(Method::POST, "/api/locations", Some(&admin), Some(cafe()))
        .await;
    let id = created.body["id"].as_i64().unwrap();
    let uri = format!("/api/locations/{id}");

    let stranger = app.token_for_id(99, &["User"]);
    let mut changes = cafe();
    changes["name"] = json!("Hijacked");

    let put = app
        .send(Method::PUT, &uri, Some(&stranger), Some(changes))
        .await;
    assert_eq!(put.status, StatusCode::FORBIDDEN);

    let delete = app.send(Method::DELETE, &uri, Some(&stranger), None).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let fetched = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(fetched.body, created.body);
}

#[tokio::test]
async fn mutations_require_authentication() {
    let app = TestApp::new();
    let admin = app.token_for_id(1, &["Admin"]);
    let created = app
        .send(Method::POST, "/api/locations", Some(&admin), Some(cafe()))
        .await;
    let uri = format!("/api/locations/{}", created.body["id"]);

    let put = app.send(Method::PUT, &uri, None, Some(cafe())).await;
    assert_eq!(put.status, StatusCode::UNAUTHORIZED);

    let delete = app.send(Method::DELETE, &uri, Some("not-a-jwt"), None).await;
    assert_eq!(delete.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn manager_updates_and_deletes_own_location() {
    let app = TestApp::new();
    let admin = app.token_for_id(1, &["Admin"]);
    let created = app
        .send(Method::POST, "/api/locations", Some(&admin), Some(cafe()))
        .await;
    let id = created.body["id"].as_i64().unwrap();
    let uri = format!("/api/locations/{id}");

    let manager = app.token_for_id(7, &["User"]);
    let updated = app
        .send(
            Method::PUT,
            &uri,
            Some(&manager),
            Some(json!({
                "id": 12345,
                "name": "Bistro",
                "address": "2 Side St",
                "tableCount": 9,
                "managerId": 7
            })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"], id);
    assert_eq!(updated.body["name"], "Bistro");
    assert_eq!(updated.body["tableCount"], 9);

    let deleted = app.send(Method::DELETE, &uri, Some(&manager), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.body.is_null());

    let gone = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_update_reports_validation_before_ownership() {
    let app = TestApp::new();
    let admin = app.token_for_id(1, &["Admin"]);
    let created = app
        .send(Method::POST, "/api/locations", Some(&admin), Some(cafe()))
        .await;
    let uri = format!("/api/locations/{}", created.body["id"]);

    let stranger = app.token_for_id(99, &[]);
    let mut body = cafe();
    body["tableCount"] = json!(0);

    let res = app.send(Method::PUT, &uri, Some(&stranger), Some(body)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_check_answers_without_authentication() {
    let app = TestApp::new();

    let res = app.send(Method::GET, "/api/health", None, None).await;

    assert_eq!(res.status, StatusCode::OK);
}
