//! Citizen engagement procedures.

use crate::{
    core::engagement::{self, CreateCitizenEngagementInput},
    entities::CitizenEngagementModel,
    rpc::{
        AppState,
        procedures::{IdParams, ProjectFilterParams},
        response::{RpcInput, RpcResult, respond},
    },
};
use axum::extract::State;
use serde::Deserialize;

/// `respondToCitizenEngagement` parameters.
#[derive(Debug, Deserialize)]
pub struct RespondParams {
    pub id: i64,
    pub response: String,
}

#[tracing::instrument(skip_all)]
pub async fn create_citizen_engagement(
    State(state): State<AppState>,
    RpcInput(input): RpcInput<CreateCitizenEngagementInput>,
) -> RpcResult<CitizenEngagementModel> {
    respond(engagement::create_citizen_engagement(&state.database, input).await?)
}

#[tracing::instrument(skip(state))]
pub async fn get_citizen_engagements(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<ProjectFilterParams>,
) -> RpcResult<Vec<CitizenEngagementModel>> {
    respond(engagement::get_citizen_engagements(&state.database, params.project_id).await?)
}

#[tracing::instrument(skip(state))]
pub async fn review_citizen_engagement(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<IdParams>,
) -> RpcResult<CitizenEngagementModel> {
    respond(engagement::review_citizen_engagement(&state.database, params.id).await?)
}

#[tracing::instrument(skip_all, fields(id = params.id))]
pub async fn respond_to_citizen_engagement(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<RespondParams>,
) -> RpcResult<CitizenEngagementModel> {
    respond(
        engagement::respond_to_citizen_engagement(&state.database, params.id, &params.response)
            .await?,
    )
}
