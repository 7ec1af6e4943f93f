//! `GET /health`: uptime and database reachability

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

impl HealthStatus {
    pub fn http_status(self) -> StatusCode {
        match self {
            HealthStatus::Ok => StatusCode::OK,
            HealthStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealth {
    pub status: HealthStatus,
    /// Round trip of `SELECT 1`; absent when the ping failed
    pub latency_ms: Option<u64>,
}

async fn ping(db: &DatabaseConnection) -> DatabaseHealth {
    let started = Instant::now();
    let statement = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());

    match db.execute(statement).await {
        Ok(_) => DatabaseHealth {
            status: HealthStatus::Ok,
            latency_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            DatabaseHealth {
                status: HealthStatus::Degraded,
                latency_ms: None,
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ping(&state.db).await;
    let status = database.status;

    (
        status.http_status(),
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database,
        }),
    )
}
