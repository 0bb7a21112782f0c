//! Categorical column types.
//!
//! Every enum is stored as its snake_case spelling, which is also its wire
//! form, so values outside the declared domain can neither be deserialized nor
//! written.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a project
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Approved but not started
    #[sea_orm(string_value = "planned")]
    Planned,
    /// Work in progress
    #[sea_orm(string_value = "active")]
    Active,
    /// Delivered
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Temporarily halted
    #[sea_orm(string_value = "suspended")]
    Suspended,
    /// Abandoned
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Procurement category of a project
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Physical works
    #[sea_orm(string_value = "construction")]
    Construction,
    /// Procurement of goods
    #[sea_orm(string_value = "goods")]
    Goods,
    /// Service delivery
    #[sea_orm(string_value = "services")]
    Services,
    /// Advisory work
    #[sea_orm(string_value = "consultancy")]
    Consultancy,
}

/// Risk bucket, used both as a derived project attribute and as alert severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "critical")]
    Critical,
}

/// Reason an alert was raised
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    #[sea_orm(string_value = "budget_overflow")]
    BudgetOverflow,
    #[sea_orm(string_value = "delay")]
    Delay,
    #[sea_orm(string_value = "anomaly")]
    Anomaly,
    #[sea_orm(string_value = "completion")]
    Completion,
}

/// Kind of citizen submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum EngagementType {
    #[sea_orm(string_value = "feedback")]
    Feedback,
    #[sea_orm(string_value = "discussion")]
    Discussion,
    #[sea_orm(string_value = "survey")]
    Survey,
    #[sea_orm(string_value = "complaint")]
    Complaint,
}

/// Moderation state of a citizen submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum EngagementStatus {
    /// Newly submitted
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Seen by an administrator
    #[sea_orm(string_value = "reviewed")]
    Reviewed,
    /// Answered by an administrator
    #[sea_orm(string_value = "responded")]
    Responded,
}

/// Kind of analysis produced by the insight collaborator
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    #[sea_orm(string_value = "anomaly_detection")]
    AnomalyDetection,
    #[sea_orm(string_value = "completion_prediction")]
    CompletionPrediction,
    #[sea_orm(string_value = "budget_analysis")]
    BudgetAnalysis,
    #[sea_orm(string_value = "risk_assessment")]
    RiskAssessment,
}

/// Category of a published report
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[sea_orm(string_value = "transparency")]
    Transparency,
    #[sea_orm(string_value = "audit")]
    Audit,
    #[sea_orm(string_value = "financial")]
    Financial,
    #[sea_orm(string_value = "progress")]
    Progress,
}
