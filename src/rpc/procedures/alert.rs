//! Alert procedures.

use crate::{
    core::alert::{self, CreateAlertInput},
    entities::AlertModel,
    rpc::{
        AppState,
        response::{RpcInput, RpcResult, respond},
    },
};
use axum::extract::State;
use serde::Deserialize;

/// `getAlerts` parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AlertListParams {
    /// Newest `limit` alerts; all of them when absent
    #[serde(default)]
    pub limit: Option<u64>,
}

/// `resolveAlert` parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveAlertParams {
    pub alert_id: i64,
}

#[tracing::instrument(skip_all)]
pub async fn create_alert(
    State(state): State<AppState>,
    RpcInput(input): RpcInput<CreateAlertInput>,
) -> RpcResult<AlertModel> {
    respond(alert::create_alert(&state.database, input).await?)
}

#[tracing::instrument(skip(state))]
pub async fn get_alerts(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<AlertListParams>,
) -> RpcResult<Vec<AlertModel>> {
    respond(alert::get_alerts(&state.database, params.limit).await?)
}

#[tracing::instrument(skip(state))]
pub async fn resolve_alert(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<ResolveAlertParams>,
) -> RpcResult<AlertModel> {
    respond(alert::resolve_alert(&state.database, params.alert_id).await?)
}
