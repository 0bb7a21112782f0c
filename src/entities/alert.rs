//! Alert entity - an issue raised against a project (budget overflow, delay,
//! anomaly or completion notice).
//!
//! `resolved_at` stays null until the alert is resolved and is never moved
//! afterwards.

use super::enums::{AlertType, RiskLevel};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Alert database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    /// Reason the alert was raised
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub severity: RiskLevel,
    pub is_resolved: bool,
    pub created_at: DateTimeUtc,
    pub resolved_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
