//! Project entity - the aggregate root of the tracker.
//!
//! Contracts, alerts, citizen engagement and AI analytics all hold a mandatory
//! `project_id` back-reference. Monetary amounts are stored in cents and
//! exposed as two-decimal amounts on the wire.

use super::enums::{ContractType, ProjectStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Unique identifier for the project
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Public name of the project
    pub name: String,
    /// Free-form description
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Approved budget, in cents
    #[sea_orm(column_name = "budget")]
    #[serde(rename = "budget", with = "crate::core::money::cents")]
    pub budget_cents: i64,
    /// Funds allocated so far, in cents
    #[sea_orm(column_name = "allocated_funds")]
    #[serde(rename = "allocated_funds", with = "crate::core::money::cents")]
    pub allocated_funds_cents: i64,
    /// Money actually spent, in cents
    #[sea_orm(column_name = "actual_expenditures")]
    #[serde(rename = "actual_expenditures", with = "crate::core::money::cents")]
    pub actual_expenditures_cents: i64,
    /// Planned start date
    pub start_date: Date,
    /// Planned end date
    pub end_date: Date,
    /// Lifecycle state
    pub status: ProjectStatus,
    /// Procurement category
    pub contract_type: ContractType,
    /// Where the project takes place
    pub location: String,
    /// Main contractor, if one has been chosen
    pub contractor: Option<String>,
    /// `name` case-folded for search
    #[serde(skip)]
    pub name_folded: String,
    /// `location` case-folded for search
    #[serde(skip)]
    pub location_folded: String,
    /// `contractor` case-folded for search
    #[serde(skip)]
    pub contractor_folded: Option<String>,
    /// Transparency score in [0, 100]
    pub transparency_score: f64,
    /// Risk score in [0, 100]; the risk level bucket is derived from it
    pub risk_score: f64,
    /// Predicted completion percentage from the insight collaborator
    pub ai_completion_prediction: Option<f64>,
    /// Predicted budget overflow risk from the insight collaborator
    pub ai_budget_overflow_risk: Option<f64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Project and its dependents
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contract::Entity")]
    Contracts,
    #[sea_orm(has_many = "super::alert::Entity")]
    Alerts,
    #[sea_orm(has_many = "super::citizen_engagement::Entity")]
    CitizenEngagements,
    #[sea_orm(has_many = "super::ai_analytics::Entity")]
    AiAnalytics,
}

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl Related<super::alert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alerts.def()
    }
}

impl Related<super::citizen_engagement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CitizenEngagements.def()
    }
}

impl Related<super::ai_analytics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiAnalytics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
