//! Liveness and dashboard procedures.

use crate::{
    core::dashboard::{self, DashboardStats},
    rpc::{
        AppState,
        response::{RpcResult, respond},
    },
};
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Healthcheck payload.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Reports that the service is up.
pub async fn healthcheck() -> RpcResult<Health> {
    respond(Health {
        status: "ok",
        timestamp: Utc::now(),
    })
}

/// Current tracker-wide figures.
#[tracing::instrument(skip(state))]
pub async fn get_dashboard_stats(State(state): State<AppState>) -> RpcResult<DashboardStats> {
    respond(dashboard::get_dashboard_stats(&state.database, state.recent_alert_window).await?)
}
