//! Contract entity - a signed procurement contract under a project.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning project
    pub project_id: i64,
    /// Official contract number, unique across all contracts
    #[sea_orm(unique)]
    pub contract_number: String,
    pub title: String,
    /// Contract value, in cents
    #[sea_orm(column_name = "value")]
    #[serde(rename = "value", with = "crate::core::money::cents")]
    pub value_cents: i64,
    pub contractor_name: String,
    pub signed_date: Date,
    /// Link to the signed document
    pub document_url: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each contract belongs to one project
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
