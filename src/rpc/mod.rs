//! RPC layer - HTTP interface over the tracker operations
//!
//! Every operation is a named procedure mounted at `POST /rpc/<procedure>`
//! with a JSON body. See [`response`] for the wire envelopes.

/// Procedure handlers (projects, contracts, alerts, engagement, analytics, reports)
pub mod procedures;
/// Success and error envelopes, JSON input extractor
pub mod response;

use crate::{core::analytics::InsightGenerator, errors::Result};
use axum::{
    Router,
    routing::{get, post},
};
use procedures::{alert, analytics, contract, engagement, general, project, report};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Shared data available to all procedures.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Collaborator behind `generateAIInsights`
    pub insights: Arc<dyn InsightGenerator>,
    /// How far back an alert counts as recent on the dashboard
    pub recent_alert_window: chrono::Duration,
}

impl AppState {
    #[must_use]
    pub fn new(
        database: DatabaseConnection,
        insights: Arc<dyn InsightGenerator>,
        recent_alert_window: chrono::Duration,
    ) -> Self {
        Self {
            database,
            insights,
            recent_alert_window,
        }
    }
}

/// Builds the router with every procedure mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/rpc/healthcheck",
            get(general::healthcheck).post(general::healthcheck),
        )
        .route("/rpc/getDashboardStats", post(general::get_dashboard_stats))
        // Projects
        .route("/rpc/createProject", post(project::create_project))
        .route("/rpc/getProjects", post(project::get_projects))
        .route("/rpc/getProjectById", post(project::get_project_by_id))
        .route("/rpc/updateProject", post(project::update_project))
        .route("/rpc/searchProjects", post(project::search_projects))
        // Contracts
        .route("/rpc/createContract", post(contract::create_contract))
        .route(
            "/rpc/getContractsByProject",
            post(contract::get_contracts_by_project),
        )
        // Alerts
        .route("/rpc/createAlert", post(alert::create_alert))
        .route("/rpc/getAlerts", post(alert::get_alerts))
        .route("/rpc/resolveAlert", post(alert::resolve_alert))
        // Citizen engagement
        .route(
            "/rpc/createCitizenEngagement",
            post(engagement::create_citizen_engagement),
        )
        .route(
            "/rpc/getCitizenEngagements",
            post(engagement::get_citizen_engagements),
        )
        .route(
            "/rpc/reviewCitizenEngagement",
            post(engagement::review_citizen_engagement),
        )
        .route(
            "/rpc/respondToCitizenEngagement",
            post(engagement::respond_to_citizen_engagement),
        )
        // AI analytics
        .route("/rpc/getAIAnalytics", post(analytics::get_ai_analytics))
        .route(
            "/rpc/generateAIInsights",
            post(analytics::generate_ai_insights),
        )
        // Reports
        .route("/rpc/createReport", post(report::create_report))
        .route("/rpc/getReports", post(report::get_reports))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Serves the router on `address` until Ctrl-C.
pub async fn serve(address: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}
