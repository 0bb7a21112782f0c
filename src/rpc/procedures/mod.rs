//! Procedure handlers grouped by entity.
//!
//! Handlers stay thin: decode the parameters, call into [`crate::core`], wrap
//! the outcome in the success envelope.

/// Contract procedures
pub mod contract;

/// Alert procedures
pub mod alert;

/// Citizen engagement procedures
pub mod engagement;

/// AI analytics procedures
pub mod analytics;

/// Healthcheck and dashboard
pub mod general;

/// Project CRUD and search
pub mod project;

/// Report procedures
pub mod report;

use serde::Deserialize;

/// `{id}` parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdParams {
    pub id: i64,
}

/// `{projectId}` parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdParams {
    pub project_id: i64,
}

/// `{projectId?}` parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilterParams {
    #[serde(default)]
    pub project_id: Option<i64>,
}
