//! Service registry: validation and persistence of service records.

pub mod repository;
pub mod service;

pub use repository::{SeaOrmServiceRepository, ServiceRepository, UnavailableServiceRepository};
pub use service::ServiceRegistry;
