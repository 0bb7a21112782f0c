//! Project procedures.

use crate::{
    core::{
        project::{self, CreateProjectInput, UpdateProjectInput},
        search::{self, SearchFilters, SearchResult},
    },
    entities::ProjectModel,
    rpc::{
        AppState,
        procedures::IdParams,
        response::{RpcInput, RpcResult, respond},
    },
};
use axum::extract::State;
use serde::Deserialize;

/// `updateProject` parameters: the key plus any subset of project fields.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectParams {
    pub id: i64,
    #[serde(flatten)]
    pub changes: UpdateProjectInput,
}

#[tracing::instrument(skip_all)]
pub async fn create_project(
    State(state): State<AppState>,
    RpcInput(input): RpcInput<CreateProjectInput>,
) -> RpcResult<ProjectModel> {
    respond(project::create_project(&state.database, input).await?)
}

#[tracing::instrument(skip_all)]
pub async fn get_projects(State(state): State<AppState>) -> RpcResult<Vec<ProjectModel>> {
    respond(project::get_all_projects(&state.database).await?)
}

#[tracing::instrument(skip(state))]
pub async fn get_project_by_id(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<IdParams>,
) -> RpcResult<ProjectModel> {
    respond(project::get_project(&state.database, params.id).await?)
}

#[tracing::instrument(skip_all, fields(id = params.id))]
pub async fn update_project(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<UpdateProjectParams>,
) -> RpcResult<ProjectModel> {
    respond(project::update_project(&state.database, params.id, params.changes).await?)
}

#[tracing::instrument(skip(state))]
pub async fn search_projects(
    State(state): State<AppState>,
    RpcInput(filters): RpcInput<SearchFilters>,
) -> RpcResult<SearchResult> {
    respond(search::search_projects(&state.database, &filters).await?)
}
