//! Project business logic - creation, lookup and partial updates.
//!
//! All inputs are validated before the store is touched. Updates run as a
//! read-modify-write inside a database transaction and only write the columns
//! the caller supplied, so concurrent updates of disjoint fields never clobber
//! each other.

use crate::{
    core::{money, search, validation},
    entities::{
        Project,
        enums::{ContractType, ProjectStatus},
        project,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

/// Transparency score given to a new project when none is supplied.
pub const DEFAULT_TRANSPARENCY_SCORE: f64 = 75.0;
/// Risk score given to a new project when none is supplied.
pub const DEFAULT_RISK_SCORE: f64 = 25.0;

/// Input for [`create_project`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub description: String,
    pub budget: Decimal,
    pub allocated_funds: Decimal,
    pub actual_expenditures: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    pub contract_type: ContractType,
    pub location: String,
    #[serde(default)]
    pub contractor: Option<String>,
    /// Defaults to [`DEFAULT_TRANSPARENCY_SCORE`]
    #[serde(default)]
    pub transparency_score: Option<f64>,
    /// Defaults to [`DEFAULT_RISK_SCORE`]
    #[serde(default)]
    pub risk_score: Option<f64>,
}

/// Partial update for [`update_project`]. Absent fields are left untouched.
///
/// `contractor` is the only nullable field: `Some(None)` (an explicit JSON
/// `null`) clears it, `None` (field absent) keeps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated_funds: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_expenditures: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub contractor: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field
/// (`None`, via `#[serde(default)]`).
fn explicit_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Checks the cross-field business rules on a complete set of values.
fn check_consistency(
    budget_cents: i64,
    allocated_funds_cents: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<()> {
    if allocated_funds_cents > budget_cents {
        return Err(Error::validation(
            "allocated_funds",
            "must not exceed the budget",
        ));
    }
    if end_date < start_date {
        return Err(Error::validation(
            "end_date",
            "must not be earlier than start_date",
        ));
    }
    Ok(())
}

/// Fails with [`Error::ReferentialIntegrity`] unless the project exists.
///
/// Takes any connection so it can run inside the caller's transaction.
pub(crate) async fn ensure_project_exists<C>(conn: &C, field: &'static str, id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    match Project::find_by_id(id).one(conn).await? {
        Some(_) => Ok(()),
        None => Err(Error::ReferentialIntegrity {
            entity: "project",
            field,
            id,
        }),
    }
}

/// Creates a new project after validating every field.
///
/// Scores default to 75 (transparency) and 25 (risk); AI predictions start
/// empty. Nothing is written when validation fails.
pub async fn create_project(
    db: &DatabaseConnection,
    input: CreateProjectInput,
) -> Result<project::Model> {
    let name = validation::required_text("name", &input.name)?;
    let description = validation::required_text("description", &input.description)?;
    let location = validation::required_text("location", &input.location)?;
    let contractor = validation::optional_text("contractor", input.contractor.as_deref())?;
    let budget_cents = money::positive_cents("budget", input.budget)?;
    let allocated_funds_cents = money::non_negative_cents("allocated_funds", input.allocated_funds)?;
    let actual_expenditures_cents =
        money::non_negative_cents("actual_expenditures", input.actual_expenditures)?;
    let transparency_score = validation::percent_score(
        "transparency_score",
        input.transparency_score.unwrap_or(DEFAULT_TRANSPARENCY_SCORE),
    )?;
    let risk_score =
        validation::percent_score("risk_score", input.risk_score.unwrap_or(DEFAULT_RISK_SCORE))?;

    check_consistency(
        budget_cents,
        allocated_funds_cents,
        input.start_date,
        input.end_date,
    )?;

    let now = chrono::Utc::now();
    let project = project::ActiveModel {
        name_folded: Set(search::fold(&name)),
        location_folded: Set(search::fold(&location)),
        contractor_folded: Set(contractor.as_deref().map(search::fold)),
        name: Set(name),
        description: Set(description),
        budget_cents: Set(budget_cents),
        allocated_funds_cents: Set(allocated_funds_cents),
        actual_expenditures_cents: Set(actual_expenditures_cents),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        status: Set(input.status),
        contract_type: Set(input.contract_type),
        location: Set(location),
        contractor: Set(contractor),
        transparency_score: Set(transparency_score),
        risk_score: Set(risk_score),
        ai_completion_prediction: Set(None),
        ai_budget_overflow_risk: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = project.insert(db).await?;
    info!(project_id = created.id, name = %created.name, "Created project");
    Ok(created)
}

/// Fetches a project by key.
pub async fn get_project(db: &DatabaseConnection, project_id: i64) -> Result<project::Model> {
    Project::find_by_id(project_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "project",
            id: project_id,
        })
}

/// Lists every project, ordered by key.
pub async fn get_all_projects(db: &DatabaseConnection) -> Result<Vec<project::Model>> {
    Project::find()
        .order_by_asc(project::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to a project.
///
/// Present fields are validated up front; the cross-field rules are then
/// checked against the merged record inside the transaction. `updated_at` is
/// bumped on every successful update.
pub async fn update_project(
    db: &DatabaseConnection,
    project_id: i64,
    input: UpdateProjectInput,
) -> Result<project::Model> {
    let name = input
        .name
        .as_deref()
        .map(|v| validation::required_text("name", v))
        .transpose()?;
    let description = input
        .description
        .as_deref()
        .map(|v| validation::required_text("description", v))
        .transpose()?;
    let location = input
        .location
        .as_deref()
        .map(|v| validation::required_text("location", v))
        .transpose()?;
    let contractor = input
        .contractor
        .as_ref()
        .map(|v| validation::optional_text("contractor", v.as_deref()))
        .transpose()?;
    let budget_cents = input
        .budget
        .map(|v| money::positive_cents("budget", v))
        .transpose()?;
    let allocated_funds_cents = input
        .allocated_funds
        .map(|v| money::non_negative_cents("allocated_funds", v))
        .transpose()?;
    let actual_expenditures_cents = input
        .actual_expenditures
        .map(|v| money::non_negative_cents("actual_expenditures", v))
        .transpose()?;
    let transparency_score = input
        .transparency_score
        .map(|v| validation::percent_score("transparency_score", v))
        .transpose()?;
    let risk_score = input
        .risk_score
        .map(|v| validation::percent_score("risk_score", v))
        .transpose()?;

    let txn = db.begin().await?;

    let current = Project::find_by_id(project_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "project",
            id: project_id,
        })?;

    check_consistency(
        budget_cents.unwrap_or(current.budget_cents),
        allocated_funds_cents.unwrap_or(current.allocated_funds_cents),
        input.start_date.unwrap_or(current.start_date),
        input.end_date.unwrap_or(current.end_date),
    )?;

    let mut project: project::ActiveModel = current.into();
    if let Some(v) = name {
        project.name_folded = Set(search::fold(&v));
        project.name = Set(v);
    }
    if let Some(v) = description {
        project.description = Set(v);
    }
    if let Some(v) = budget_cents {
        project.budget_cents = Set(v);
    }
    if let Some(v) = allocated_funds_cents {
        project.allocated_funds_cents = Set(v);
    }
    if let Some(v) = actual_expenditures_cents {
        project.actual_expenditures_cents = Set(v);
    }
    if let Some(v) = input.start_date {
        project.start_date = Set(v);
    }
    if let Some(v) = input.end_date {
        project.end_date = Set(v);
    }
    if let Some(v) = input.status {
        project.status = Set(v);
    }
    if let Some(v) = input.contract_type {
        project.contract_type = Set(v);
    }
    if let Some(v) = location {
        project.location_folded = Set(search::fold(&v));
        project.location = Set(v);
    }
    if let Some(v) = contractor {
        project.contractor_folded = Set(v.as_deref().map(search::fold));
        project.contractor = Set(v);
    }
    if let Some(v) = transparency_score {
        project.transparency_score = Set(v);
    }
    if let Some(v) = risk_score {
        project.risk_score = Set(v);
    }
    project.updated_at = Set(chrono::Utc::now());

    let updated = project.update(&txn).await?;
    txn.commit().await?;

    debug!(project_id, "Updated project");
    Ok(updated)
}
