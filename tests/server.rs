//! End-to-end tests: config file on disk, real socket, HTTP client.

use axum::http::StatusCode;
use serde_json::json;

use stub_server::lifecycle::startup;

mod common;

#[tokio::test]
async fn test_serves_config_file_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let user = common::write_file(dir.path(), "user.json", b"{\n  \"id\": 1,\n  \"name\": \"Ada\"\n}\n");
    let binary: Vec<u8> = (0u8..=255).collect();
    let blob = common::write_file(dir.path(), "blob.json", &binary);
    let empty = common::write_file(dir.path(), "empty.json", b"");

    let config = json!({
        "port": 8080,
        "endpoints": [
            { "method": "GET", "status": 200, "path": "/users/:id", "jsonPath": user },
            { "method": "GET", "status": 200, "path": "/blob", "jsonPath": blob },
            { "method": "DELETE", "status": 204, "path": "/users/:id", "jsonPath": empty },
            { "method": "GET", "status": 200, "path": r"/items/(?P<id>\d+)", "jsonPath": user, "regex": true }
        ]
    });
    let config_path = common::write_file(dir.path(), "api.json", config.to_string().as_bytes());

    let config = startup::load(&config_path, None).unwrap();
    assert_eq!(config.port, 8080);
    let table = startup::build_route_table(&config).unwrap();
    assert_eq!(table.len(), 4);

    let (addr, shutdown, handle) = common::start_server(config, table).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let res = client.get(format!("{}/users/1", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.headers()["accept"], "application/json");
    assert_eq!(
        res.bytes().await.unwrap().as_ref(),
        b"{\n  \"id\": 1,\n  \"name\": \"Ada\"\n}\n"
    );

    let res = client.get(format!("{}/blob", base)).send().await.unwrap();
    assert_eq!(res.bytes().await.unwrap().to_vec(), binary);

    let res = client.delete(format!("{}/users/1", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(format!("{}/items/5", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(format!("{}/items/x", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.post(format!("{}/users/1", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    drop(client);
    shutdown.trigger();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_port_override() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = common::write_file(dir.path(), "api.json", br#"{ "port": 1234, "endpoints": [] }"#);

    let config = startup::load(&config_path, Some(4321)).unwrap();
    assert_eq!(config.port, 4321);
    assert!(config.endpoints.is_empty());
}

#[tokio::test]
async fn test_unreadable_body_file_fails_before_serving() {
    let dir = tempfile::tempdir().unwrap();
    let config = json!({
        "port": 8080,
        "endpoints": [
            { "method": "GET", "status": 200, "path": "/x", "jsonPath": dir.path().join("absent.json") }
        ]
    });
    let config_path = common::write_file(dir.path(), "api.json", config.to_string().as_bytes());

    let config = startup::load(&config_path, None).unwrap();
    let err = startup::build_route_table(&config).unwrap_err();
    assert!(matches!(err, startup::StartupError::BodyFile { .. }));
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = common::write_file(dir.path(), "api.json", b"{ not json");

    let err = startup::load(&config_path, None).unwrap_err();
    assert!(matches!(err, startup::StartupError::Config(_)));
}
