use async_trait::async_trait;
use models::service::{Model, ServiceFields};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Persistence seam for service records.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Model>, ServiceError>;
    async fn create(&self, fields: ServiceFields) -> Result<Model, ServiceError>;
    /// `Ok(None)` when no record has this id.
    async fn update(&self, id: Uuid, fields: ServiceFields) -> Result<Option<Model>, ServiceError>;
    /// `Ok(false)` when no record has this id.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmServiceRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        Ok(models::service::list(&self.db).await?)
    }

    async fn create(&self, fields: ServiceFields) -> Result<Model, ServiceError> {
        Ok(models::service::create(&self.db, fields).await?)
    }

    async fn update(&self, id: Uuid, fields: ServiceFields) -> Result<Option<Model>, ServiceError> {
        Ok(models::service::find_and_update(&self.db, id, fields).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::service::find_and_delete(&self.db, id).await?)
    }
}

/// Stand-in used when the store could not be reached at startup.
/// Every operation fails with the original connection error.
#[derive(Clone, Debug)]
pub struct UnavailableServiceRepository {
    reason: String,
}

impl UnavailableServiceRepository {
    pub fn new(reason: impl Into<String>) -> Self { Self { reason: reason.into() } }

    fn err(&self) -> ServiceError { ServiceError::Unavailable(self.reason.clone()) }
}

#[async_trait]
impl ServiceRepository for UnavailableServiceRepository {
    async fn list(&self) -> Result<Vec<Model>, ServiceError> { Err(self.err()) }
    async fn create(&self, _: ServiceFields) -> Result<Model, ServiceError> { Err(self.err()) }
    async fn update(&self, _: Uuid, _: ServiceFields) -> Result<Option<Model>, ServiceError> { Err(self.err()) }
    async fn delete(&self, _: Uuid) -> Result<bool, ServiceError> { Err(self.err()) }
}
