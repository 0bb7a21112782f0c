//! Dashboard statistics.
//!
//! Every figure is computed fresh from the store on each call, inside a single
//! read transaction so the counts and sums describe the same snapshot.

use crate::{
    core::{money, risk},
    entities::{
        Alert, CitizenEngagement, Project, alert,
        enums::ProjectStatus,
        project,
    },
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{
    ConnectionTrait, PaginatorTrait, QuerySelect, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use serde::Serialize;
use tracing::debug;

/// Default length of the "recent alerts" window.
pub const DEFAULT_RECENT_ALERT_WINDOW_DAYS: i64 = 30;
/// Longest accepted window, a century.
pub const MAX_RECENT_ALERT_WINDOW_DAYS: i64 = 36_500;

/// Snapshot of tracker-wide figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_projects: u64,
    pub active_projects: u64,
    /// Sum of all project budgets
    pub total_budget: Decimal,
    /// Sum of all actual expenditures
    pub total_expenditures: Decimal,
    pub completed_projects: u64,
    /// Projects whose risk level is high or critical
    pub high_risk_projects: u64,
    /// Alerts created within the recent window
    pub recent_alerts: u64,
    pub citizen_engagements: u64,
}

async fn sum_cents<C>(conn: &C, column: project::Column) -> Result<i64>
where
    C: ConnectionTrait,
{
    let total: Option<Option<i64>> = Project::find()
        .select_only()
        .column_as(Expr::col(column).sum(), "total")
        .into_tuple()
        .one(conn)
        .await?;
    Ok(total.flatten().unwrap_or(0))
}

/// Computes the dashboard snapshot.
///
/// `recent_window` bounds which alerts count as recent, measured back from now.
pub async fn get_dashboard_stats(
    db: &DatabaseConnection,
    recent_window: chrono::Duration,
) -> Result<DashboardStats> {
    let since = chrono::Utc::now()
        .checked_sub_signed(recent_window)
        .ok_or_else(|| Error::Config {
            message: format!("recent alert window {recent_window} is out of range"),
        })?;

    let txn = db.begin().await?;

    let total_projects = Project::find().count(&txn).await?;
    let active_projects = Project::find()
        .filter(project::Column::Status.eq(ProjectStatus::Active))
        .count(&txn)
        .await?;
    let completed_projects = Project::find()
        .filter(project::Column::Status.eq(ProjectStatus::Completed))
        .count(&txn)
        .await?;
    let high_risk_projects = Project::find()
        .filter(project::Column::RiskScore.gte(risk::HIGH_THRESHOLD))
        .count(&txn)
        .await?;
    let total_budget = sum_cents(&txn, project::Column::BudgetCents).await?;
    let total_expenditures = sum_cents(&txn, project::Column::ActualExpendituresCents).await?;
    let recent_alerts = Alert::find()
        .filter(alert::Column::CreatedAt.gte(since))
        .count(&txn)
        .await?;
    let citizen_engagements = CitizenEngagement::find().count(&txn).await?;

    txn.commit().await?;

    let stats = DashboardStats {
        total_projects,
        active_projects,
        total_budget: money::from_cents(total_budget),
        total_expenditures: money::from_cents(total_expenditures),
        completed_projects,
        high_risk_projects,
        recent_alerts,
        citizen_engagements,
    };
    debug!(?stats, "Computed dashboard stats");
    Ok(stats)
}
