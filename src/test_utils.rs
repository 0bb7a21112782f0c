//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{alert, project},
    entities::{
        self,
        enums::{AlertType, ContractType, ProjectStatus, RiskLevel},
    },
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A valid project input.
///
/// # Defaults
/// * budget: 1,000,000.00, allocated 400,000.00, spent 150,000.50
/// * schedule: 2024-01-01 to 2024-12-31
/// * status: planned, contract type: construction
/// * location: "Jakarta", contractor: "PT Pembangunan Jaya"
pub fn project_input(name: &str) -> project::CreateProjectInput {
    project::CreateProjectInput {
        name: name.to_string(),
        description: format!("{name} description"),
        budget: Decimal::new(100_000_000, 2),
        allocated_funds: Decimal::new(40_000_000, 2),
        actual_expenditures: Decimal::new(15_000_050, 2),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        status: ProjectStatus::Planned,
        contract_type: ContractType::Construction,
        location: "Jakarta".to_string(),
        contractor: Some("PT Pembangunan Jaya".to_string()),
        transparency_score: None,
        risk_score: None,
    }
}

#[allow(clippy::expect_used)]
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Creates a project from [`project_input`].
pub async fn create_test_project(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::project::Model> {
    project::create_project(db, project_input(name)).await
}

/// Raises a delay alert against `project_id`.
pub async fn create_test_alert(
    db: &DatabaseConnection,
    project_id: i64,
    severity: RiskLevel,
) -> Result<entities::alert::Model> {
    alert::create_alert(
        db,
        alert::CreateAlertInput {
            project_id,
            alert_type: AlertType::Delay,
            title: "Pekerjaan terlambat".to_string(),
            message: "Progres fisik tertinggal dari jadwal".to_string(),
            severity,
        },
    )
    .await
}

/// An unsaved project model for pure-function tests.
pub fn sample_project_model() -> entities::project::Model {
    let now = chrono::Utc::now();
    entities::project::Model {
        id: 1,
        name: "Sample".to_string(),
        description: "Sample project".to_string(),
        budget_cents: 100_000_000,
        allocated_funds_cents: 40_000_000,
        actual_expenditures_cents: 15_000_050,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        status: ProjectStatus::Active,
        contract_type: ContractType::Construction,
        location: "Jakarta".to_string(),
        contractor: None,
        name_folded: "sample".to_string(),
        location_folded: "jakarta".to_string(),
        contractor_folded: None,
        transparency_score: project::DEFAULT_TRANSPARENCY_SCORE,
        risk_score: project::DEFAULT_RISK_SCORE,
        ai_completion_prediction: None,
        ai_budget_overflow_risk: None,
        created_at: now,
        updated_at: now,
    }
}

/// Sets up a complete test environment with a project.
/// Returns (db, project) for dependent-entity tests.
pub async fn setup_with_project() -> Result<(DatabaseConnection, entities::project::Model)> {
    let db = setup_test_db().await?;
    let project = create_test_project(&db, "Test Project").await?;
    Ok((db, project))
}
