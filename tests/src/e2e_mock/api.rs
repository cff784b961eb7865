//! Objects API client tests against the mock server

use objects_client::api::ObjectsApi;
use objects_shared::object::ObjectBody;
use serde_json::json;

use super::fixtures::sample_rows;
use super::helpers::{E2EError, init_tracing};
use super::server::MockServer;

fn client(server: &MockServer) -> Result<ObjectsApi, E2EError> {
    ObjectsApi::new(server.api_url(), false).map_err(|e| E2EError::Setup(e.to_string()))
}

/// Create, read, update, delete one object through the client
#[tokio::test]
async fn test_object_lifecycle() -> Result<(), E2EError> {
    init_tracing();
    let server = MockServer::start().await?;
    let api = client(&server)?;
    let row = &sample_rows()[3];

    let res = api
        .create(&ObjectBody::from_fixture(row))
        .await
        .map_err(|e| E2EError::Request(e.to_string()))?;
    assert_eq!(res.status(), 200);
    let created = res.json().map_err(|e| E2EError::Parse(e.to_string()))?;
    let id = created["id"]
        .as_str()
        .ok_or_else(|| E2EError::Parse(format!("no id in {}", created)))?
        .to_string();
    assert_eq!(created["name"], json!("HP Spectre x360"));
    assert_eq!(created["data"]["Price"], json!(1599));
    assert_eq!(server.object_count(), 1);

    let res = api
        .get(&id)
        .await
        .map_err(|e| E2EError::Request(e.to_string()))?;
    assert_eq!(res.status(), 200);

    let updated = row.with_price("340");
    let res = api
        .update(&id, &ObjectBody::from_fixture(&updated))
        .await
        .map_err(|e| E2EError::Request(e.to_string()))?;
    assert_eq!(res.status(), 200);
    let stored = server
        .object(&id)
        .ok_or_else(|| E2EError::Parse("object vanished after update".into()))?;
    assert_eq!(
        stored.data,
        Some(json!({
            "Price": "340",
            "CPUModel": "Intel Core i7",
            "Capacity": "1 TB",
            "Year": 2022
        }))
    );

    let res = api
        .delete(&id)
        .await
        .map_err(|e| E2EError::Request(e.to_string()))?;
    assert_eq!(res.status(), 200);
    assert_eq!(server.object_count(), 0);

    let res = api
        .get(&id)
        .await
        .map_err(|e| E2EError::Request(e.to_string()))?;
    assert_eq!(res.status(), 404);

    Ok(())
}

/// The malformed route answers 404 with a JSON body
#[tokio::test]
async fn test_wrong_url_returns_json_404() -> Result<(), E2EError> {
    init_tracing();
    let server = MockServer::start().await?;
    let api = client(&server)?;

    let res = api
        .get_url(&format!("{}/abc", server.wrong_url()))
        .await
        .map_err(|e| E2EError::Request(e.to_string()))?;
    assert_eq!(res.status(), 404);

    let body = res.json().map_err(|e| E2EError::Parse(e.to_string()))?;
    tracing::info!("404 body: {}", body);
    assert_eq!(body["path"], json!("/objects/id/abc"));

    Ok(())
}

/// Connection failures surface as request errors, not panics
#[tokio::test]
async fn test_unreachable_server() -> Result<(), E2EError> {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map_err(|e| E2EError::Setup(e.to_string()))?;

    let api = ObjectsApi::new(format!("http://{}/objects", addr), false)
        .map_err(|e| E2EError::Setup(e.to_string()))?;
    let err = api.get("missing").await;
    assert!(err.is_err(), "expected a connection error, got {:?}", err);

    Ok(())
}
