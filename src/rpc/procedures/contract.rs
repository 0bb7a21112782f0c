//! Contract procedures.

use crate::{
    core::contract::{self, CreateContractInput},
    entities::ContractModel,
    rpc::{
        AppState,
        procedures::ProjectIdParams,
        response::{RpcInput, RpcResult, respond},
    },
};
use axum::extract::State;

#[tracing::instrument(skip_all)]
pub async fn create_contract(
    State(state): State<AppState>,
    RpcInput(input): RpcInput<CreateContractInput>,
) -> RpcResult<ContractModel> {
    respond(contract::create_contract(&state.database, input).await?)
}

#[tracing::instrument(skip(state))]
pub async fn get_contracts_by_project(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<ProjectIdParams>,
) -> RpcResult<Vec<ContractModel>> {
    respond(contract::get_contracts_by_project(&state.database, params.project_id).await?)
}
