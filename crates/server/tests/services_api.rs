use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use configs::DatabaseConfig;
use serde_json::{json, Value};
use server::startup;
use tower::ServiceExt;
use uuid::Uuid;

async fn build_app() -> Router {
    let store = startup::connect_store(&DatabaseConfig::sqlite_memory()).await;
    startup::app(store.registry())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(builder.body(body)?).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

async fn list(app: &Router) -> anyhow::Result<Vec<Value>> {
    let (status, body) = send(app, "GET", "/services", None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body.as_array().cloned().unwrap_or_default())
}

async fn create(app: &Router, body: Value) -> anyhow::Result<Value> {
    let (status, created) = send(app, "POST", "/services", Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    Ok(created)
}

#[tokio::test]
async fn create_with_empty_name_is_rejected_and_not_persisted() -> anyhow::Result<()> {
    let app = build_app().await;
    let (status, body) = send(&app, "POST", "/services", Some(json!({"name": "", "price": 10}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["param"], "name");
    assert_eq!(errors[0]["msg"], "Service name is required");
    assert!(list(&app).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_with_non_numeric_price_is_rejected_and_not_persisted() -> anyhow::Result<()> {
    let app = build_app().await;
    let (status, body) = send(&app, "POST", "/services", Some(json!({"name": "Consult", "price": "cheap"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "price");
    assert_eq!(body["errors"][0]["msg"], "Price must be a number");
    assert_eq!(body["errors"][0]["value"], "cheap");
    assert!(list(&app).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_returns_201_with_generated_id() -> anyhow::Result<()> {
    let app = build_app().await;
    let created = create(&app, json!({"name": "Consult", "price": 50})).await?;
    assert_eq!(created["name"], "Consult");
    assert_eq!(created["price"], json!(50));
    assert_eq!(created["description"], Value::Null);
    let id = created["id"].as_str().expect("id string");
    assert!(Uuid::parse_str(id).is_ok());
    Ok(())
}

#[tokio::test]
async fn create_accepts_numeric_string_price() -> anyhow::Result<()> {
    let app = build_app().await;
    let created = create(&app, json!({"name": "Dental", "price": "75.5"})).await?;
    assert_eq!(created["price"], json!(75.5));
    Ok(())
}

#[tokio::test]
async fn list_returns_every_created_record() -> anyhow::Result<()> {
    let app = build_app().await;
    let a = create(&app, json!({"name": "A", "price": 1})).await?;
    let b = create(&app, json!({"name": "B", "price": 2})).await?;

    let ids: Vec<Value> = list(&app).await?.into_iter().map(|s| s["id"].clone()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&a["id"]));
    assert!(ids.contains(&b["id"]));
    Ok(())
}

#[tokio::test]
async fn round_trip_preserves_fields() -> anyhow::Result<()> {
    let app = build_app().await;
    let input = json!({"name": "Physio", "description": "45 minute session", "price": 80.25});
    let created = create(&app, input.clone()).await?;

    let all = list(&app).await?;
    let stored = all.iter().find(|s| s["id"] == created["id"]).expect("stored record");
    assert_eq!(stored["name"], input["name"]);
    assert_eq!(stored["description"], input["description"]);
    assert_eq!(stored["price"], input["price"]);
    assert!(!stored["id"].as_str().unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_404_and_creates_nothing() -> anyhow::Result<()> {
    let app = build_app().await;
    let uri = format!("/services/{}", Uuid::new_v4());
    let (status, body) = send(&app, "PUT", &uri, Some(json!({"name": "Ghost", "price": 1}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Service not found");
    assert!(list(&app).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_price_is_persisted() -> anyhow::Result<()> {
    let app = build_app().await;
    let created = create(&app, json!({"name": "Lab work", "description": "blood panel", "price": 40})).await?;
    let uri = format!("/services/{}", created["id"].as_str().unwrap_or_default());

    let (status, updated) = send(&app, "PUT", &uri, Some(json!({"name": "Lab work", "price": 45}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["price"], json!(45));
    // description not in the body stays as stored
    assert_eq!(updated["description"], "blood panel");

    let all = list(&app).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["price"], json!(45));
    Ok(())
}

#[tokio::test]
async fn update_with_invalid_body_returns_field_errors() -> anyhow::Result<()> {
    let app = build_app().await;
    let created = create(&app, json!({"name": "Lab", "price": 40})).await?;
    let uri = format!("/services/{}", created["id"].as_str().unwrap_or_default());

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"name": "", "price": "x"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let params: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|e| e["param"].as_str())
        .collect();
    assert_eq!(params, ["name", "price"]);
    assert_eq!(list(&app).await?[0]["price"], json!(40));
    Ok(())
}

#[tokio::test]
async fn delete_existing_returns_confirmation_and_removes_it() -> anyhow::Result<()> {
    let app = build_app().await;
    let keep = create(&app, json!({"name": "Keep", "price": 1})).await?;
    let gone = create(&app, json!({"name": "Gone", "price": 2})).await?;
    let uri = format!("/services/{}", gone["id"].as_str().unwrap_or_default());

    let (status, body) = send(&app, "DELETE", &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Service deleted successfully");

    let ids: Vec<Value> = list(&app).await?.into_iter().map(|s| s["id"].clone()).collect();
    assert_eq!(ids, vec![keep["id"].clone()]);
    Ok(())
}

#[tokio::test]
async fn delete_unknown_id_is_404() -> anyhow::Result<()> {
    let app = build_app().await;
    let uri = format!("/services/{}", Uuid::new_v4());
    let (status, body) = send(&app, "DELETE", &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Service not found");
    Ok(())
}

#[tokio::test]
async fn malformed_id_maps_to_store_failure_status() -> anyhow::Result<()> {
    let app = build_app().await;

    let (status, body) = send(&app, "PUT", "/services/abc", Some(json!({"name": "x", "price": 1}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().contains("\"abc\""));

    let (status, body) = send(&app, "DELETE", "/services/abc", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn unparsable_body_is_a_client_error() -> anyhow::Result<()> {
    let app = build_app().await;

    let req = Request::builder()
        .method("POST")
        .uri("/services")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
    assert!(body["message"].is_string());

    let req = Request::builder()
        .method("POST")
        .uri("/services")
        .body(Body::from(r#"{"name":"x","price":1}"#))?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
    let params: Vec<_> = body["errors"]
        .as_array()
        .map(|errs| errs.iter().filter_map(|e| e["param"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(params, ["name", "price"]);

    assert!(list(&app).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn non_object_body_is_rejected_on_create_and_update() -> anyhow::Result<()> {
    let app = build_app().await;

    for body in [json!(["Consult", null, 50]), json!("Consult"), json!(50), json!(null)] {
        let (status, res) = send(&app, "POST", "/services", Some(body.clone())).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(res["message"], server::routes::services::BODY_NOT_OBJECT);
    }
    assert!(list(&app).await?.is_empty());

    let created = create(&app, json!({"name": "Lab", "price": 40})).await?;
    let uri = format!("/services/{}", created["id"].as_str().unwrap_or_default());
    let (status, res) = send(&app, "PUT", &uri, Some(json!(["Renamed", "d", 99]))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], server::routes::services::BODY_NOT_OBJECT);

    let all = list(&app).await?;
    assert_eq!(all, vec![created]);
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_served() -> anyhow::Result<()> {
    let app = build_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/services"].is_object());
    assert!(doc["paths"]["/services/{id}"].is_object());
    Ok(())
}
