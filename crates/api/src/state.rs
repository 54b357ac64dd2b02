use std::sync::Arc;

use registrar_core::schema::SchemaVariant;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: registrar_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// The student schema variant this deployment runs.
    pub fn schema(&self) -> SchemaVariant {
        self.config.schema
    }
}
