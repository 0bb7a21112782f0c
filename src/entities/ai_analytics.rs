//! AI analytics entity - a persisted result from the insight collaborator.
//!
//! `results` is an opaque JSON document whose shape depends on
//! `analysis_type`; it is stored as produced.

use super::enums::AnalysisType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// AI analytics database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_analytics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    pub analysis_type: AnalysisType,
    /// Collaborator payload
    pub results: Json,
    /// Confidence in [0, 1]
    pub confidence_score: f64,
    pub generated_at: DateTimeUtc,
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
