use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::FieldError;
use serde::Serialize;
use service::errors::ServiceError;
use tracing::{error, warn};

/// `{"message": ...}` body used for confirmations and generic errors.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }
}

#[derive(Debug, Serialize)]
struct ValidationBody<'a> {
    errors: &'a [FieldError],
}

/// Endpoint an error came from; decides the status of store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Update,
    Delete,
}

impl Operation {
    /// Store failures are 500 on list/delete but 400 on create/update.
    pub fn store_failure_status(self) -> StatusCode {
        match self {
            Operation::List | Operation::Delete => StatusCode::INTERNAL_SERVER_ERROR,
            Operation::Create | Operation::Update => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug)]
pub enum JsonApiError {
    /// 400 with `{"errors": [...]}`
    Validation(Vec<FieldError>),
    /// `status` with `{"message": ...}`
    Message { status: StatusCode, message: String },
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Message { status, message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            JsonApiError::Validation(_) => StatusCode::BAD_REQUEST,
            JsonApiError::Message { status, .. } => *status,
        }
    }

    pub fn from_service(op: Operation, e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => {
                warn!(?op, count = errors.len(), "request failed validation");
                JsonApiError::Validation(errors)
            }
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, msg),
            other @ (ServiceError::InvalidId(_) | ServiceError::Db(_) | ServiceError::Unavailable(_)) => {
                let status = op.store_failure_status();
                error!(?op, status = status.as_u16(), error = %other, "store operation failed");
                JsonApiError::new(status, other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        JsonApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            JsonApiError::Validation(errors) => (status, Json(ValidationBody { errors: &errors })).into_response(),
            JsonApiError::Message { message, .. } => (status, Json(MessageBody { message })).into_response(),
        }
    }
}
