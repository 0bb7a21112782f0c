//! AI analytics procedures.

use crate::{
    core::analytics,
    entities::AiAnalyticsModel,
    rpc::{
        AppState,
        procedures::{ProjectFilterParams, ProjectIdParams},
        response::{RpcInput, RpcResult, respond},
    },
};
use axum::extract::State;

#[tracing::instrument(skip(state))]
pub async fn get_ai_analytics(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<ProjectFilterParams>,
) -> RpcResult<Vec<AiAnalyticsModel>> {
    respond(analytics::get_ai_analytics(&state.database, params.project_id).await?)
}

/// Runs the configured insight generator for one project, as of today (UTC).
#[tracing::instrument(skip(state))]
pub async fn generate_ai_insights(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<ProjectIdParams>,
) -> RpcResult<Vec<AiAnalyticsModel>> {
    let today = chrono::Utc::now().date_naive();
    respond(
        analytics::generate_ai_insights(
            &state.database,
            state.insights.as_ref(),
            params.project_id,
            today,
        )
        .await?,
    )
}
