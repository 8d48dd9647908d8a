#![cfg(test)]
use std::sync::Arc;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;

use crate::registry::{SeaOrmServiceRepository, ServiceRegistry};

/// Registry over a private in-memory SQLite database with the schema applied.
pub async fn sqlite_registry() -> Result<ServiceRegistry, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(ServiceRegistry::new(Arc::new(SeaOrmServiceRepository::new(db))))
}
