use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::registry::{
    SeaOrmServiceRepository, ServiceRegistry, ServiceRepository, UnavailableServiceRepository,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Store handle chosen at startup, plus the raw connection to close on shutdown.
pub struct Store {
    pub repo: Arc<dyn ServiceRepository>,
    pub db: Option<DatabaseConnection>,
}

impl Store {
    pub fn registry(&self) -> ServiceRegistry {
        ServiceRegistry::new(Arc::clone(&self.repo))
    }

    pub async fn close(self) {
        if let Some(db) = self.db {
            match db.close().await {
                Ok(()) => info!(event = "db_closed", "database connection closed"),
                Err(e) => warn!(event = "db_close_failed", error = %e, "failed to close database connection"),
            }
        }
    }
}

/// Connect once and apply the schema. Failure is logged and never retried;
/// the returned store then fails every operation with the connection error.
pub async fn connect_store(cfg: &DatabaseConfig) -> Store {
    match models::db::connect_with_config(cfg).await {
        Ok(db) => store_from_connection(db).await,
        Err(e) => {
            error!(event = "db_connect_failed", error = %e, "could not connect to database; serving without a store");
            Store {
                repo: Arc::new(UnavailableServiceRepository::new(e.to_string())),
                db: None,
            }
        }
    }
}

/// Migrate an open connection. If the schema cannot be applied the store is
/// unavailable, but the connection is still kept so shutdown closes it.
pub async fn store_from_connection(db: DatabaseConnection) -> Store {
    let repo: Arc<dyn ServiceRepository> = match migration::Migrator::up(&db, None).await {
        Ok(()) => Arc::new(SeaOrmServiceRepository::new(db.clone())),
        Err(e) => {
            error!(event = "migration_failed", error = %e, "schema migration failed; serving without a store");
            Arc::new(UnavailableServiceRepository::new(format!("schema migration failed: {e}")))
        }
    };
    Store { repo, db: Some(db) }
}

/// Router over the given registry with the default layers.
pub fn app(registry: ServiceRegistry) -> Router {
    routes::build_router(ServerState::new(registry), build_cors())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutdown signal received, draining connections");
}

/// Public entry: connect the store, serve until a shutdown signal, then close the store.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = connect_store(&cfg.database).await;
    let app = app(store.registry());

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, event = "listening", "server is running on port {}", addr.port());

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    store.close().await;
    served?;
    Ok(())
}
