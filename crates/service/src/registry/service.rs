use std::sync::Arc;

use models::service::{Model, ServiceDraft};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::registry::repository::ServiceRepository;

/// Application service for service records.
/// Validates drafts before any store call and turns unmatched ids into `NotFound`.
#[derive(Clone)]
pub struct ServiceRegistry {
    repo: Arc<dyn ServiceRepository>,
}

impl ServiceRegistry {
    pub fn new(repo: Arc<dyn ServiceRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip_all)]
    pub async fn create(&self, draft: &ServiceDraft) -> Result<Model, ServiceError> {
        let fields = draft.validate().map_err(ServiceError::Validation)?;
        self.repo.create(fields).await
    }

    /// Body is validated before the id is looked at.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: &str, draft: &ServiceDraft) -> Result<Model, ServiceError> {
        let fields = draft.validate().map_err(ServiceError::Validation)?;
        let id = parse_id(id)?;
        self.repo
            .update(id, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found("Service"))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id)?;
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Service"))
        }
    }
}

pub fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|e| {
        debug!(id = %raw, error = %e, "rejecting malformed service id");
        ServiceError::invalid_id(raw)
    })
}
