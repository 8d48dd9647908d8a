use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::service::{Model, ServiceDraft};
use serde_json::Value;
use tracing::info;

use crate::errors::{JsonApiError, MessageBody, Operation};
use crate::routes::ServerState;

pub const DELETED_MESSAGE: &str = "Service deleted successfully";
pub const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";

/// A body without a JSON content type is read as `{}` and left to field validation.
fn read_draft(payload: Result<Json<Value>, JsonRejection>) -> Result<ServiceDraft, JsonApiError> {
    match payload {
        Ok(Json(Value::Object(body))) => Ok(ServiceDraft::from_map(body)),
        Ok(Json(_)) => Err(JsonApiError::new(StatusCode::BAD_REQUEST, BODY_NOT_OBJECT)),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(ServiceDraft::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

#[utoipa::path(
    post, path = "/services", tag = "services",
    request_body = crate::openapi::ServiceInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceRecordDoc),
        (status = 400, description = "Validation error or store failure")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Model>), JsonApiError> {
    let draft = read_draft(payload)?;
    match state.registry.create(&draft).await {
        Ok(m) => {
            info!(id = %m.id, name = %m.name, price = m.price, "created service");
            Ok((StatusCode::CREATED, Json(m)))
        }
        Err(e) => Err(JsonApiError::from_service(Operation::Create, e)),
    }
}

#[utoipa::path(
    get, path = "/services", tag = "services",
    responses(
        (status = 200, description = "All services", body = [crate::openapi::ServiceRecordDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::MessageDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Model>>, JsonApiError> {
    match state.registry.list().await {
        Ok(list) => {
            info!(count = list.len(), "list services");
            Ok(Json(list))
        }
        Err(e) => Err(JsonApiError::from_service(Operation::List, e)),
    }
}

#[utoipa::path(
    put, path = "/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    request_body = crate::openapi::ServiceInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceRecordDoc),
        (status = 400, description = "Validation error or store failure"),
        (status = 404, description = "Service not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Model>, JsonApiError> {
    let draft = read_draft(payload)?;
    match state.registry.update(&id, &draft).await {
        Ok(m) => {
            info!(id = %m.id, "updated service");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(Operation::Update, e)),
    }
}

#[utoipa::path(
    delete, path = "/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Service not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Store failure", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, JsonApiError> {
    match state.registry.delete(&id).await {
        Ok(()) => {
            info!(id = %id, "deleted service");
            Ok(Json(MessageBody::new(DELETED_MESSAGE)))
        }
        Err(e) => Err(JsonApiError::from_service(Operation::Delete, e)),
    }
}
