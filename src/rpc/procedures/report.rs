//! Report procedures.

use crate::{
    core::report::{self, CreateReportInput},
    entities::ReportModel,
    rpc::{
        AppState,
        response::{RpcInput, RpcResult, respond},
    },
};
use axum::extract::State;
use serde::Deserialize;

/// `getReports` parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListParams {
    #[serde(default)]
    pub is_public: Option<bool>,
}

#[tracing::instrument(skip_all)]
pub async fn create_report(
    State(state): State<AppState>,
    RpcInput(input): RpcInput<CreateReportInput>,
) -> RpcResult<ReportModel> {
    respond(report::create_report(&state.database, input).await?)
}

#[tracing::instrument(skip(state))]
pub async fn get_reports(
    State(state): State<AppState>,
    RpcInput(params): RpcInput<ReportListParams>,
) -> RpcResult<Vec<ReportModel>> {
    respond(report::get_reports(&state.database, params.is_public).await?)
}
