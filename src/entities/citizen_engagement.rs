//! Citizen engagement entity - feedback, discussion, survey answers and
//! complaints submitted about a project.
//!
//! Author details are only kept for non-anonymous submissions.

use super::enums::{EngagementStatus, EngagementType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Citizen engagement database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "citizen_engagement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    /// Kind of submission
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub engagement_type: EngagementType,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub is_anonymous: bool,
    /// Moderation state, starts at `pending`
    pub status: EngagementStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_response: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
