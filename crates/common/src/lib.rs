//! Shared building blocks for the service registry workspace.

pub mod types;
pub mod utils;
