//! Alert business logic - raising, listing and resolving project alerts.

use crate::{
    core::{project::ensure_project_exists, validation},
    entities::{
        Alert, alert,
        enums::{AlertType, RiskLevel},
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Largest number of alerts one listing may ask for.
pub const MAX_ALERT_LIMIT: u64 = 100;

/// Input for [`create_alert`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlertInput {
    pub project_id: i64,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub title: String,
    pub message: String,
    pub severity: RiskLevel,
}

/// Raises an unresolved alert against a project.
pub async fn create_alert(db: &DatabaseConnection, input: CreateAlertInput) -> Result<alert::Model> {
    let title = validation::required_text("title", &input.title)?;
    let message = validation::required_text("message", &input.message)?;

    let txn = db.begin().await?;
    ensure_project_exists(&txn, "project_id", input.project_id).await?;

    let alert = alert::ActiveModel {
        project_id: Set(input.project_id),
        alert_type: Set(input.alert_type),
        title: Set(title),
        message: Set(message),
        severity: Set(input.severity),
        is_resolved: Set(false),
        created_at: Set(chrono::Utc::now()),
        resolved_at: Set(None),
        ..Default::default()
    };
    let created = alert.insert(&txn).await?;
    txn.commit().await?;

    info!(
        alert_id = created.id,
        project_id = created.project_id,
        severity = ?created.severity,
        "Raised alert"
    );
    Ok(created)
}

/// Lists alerts, newest first, optionally capped at `limit` (1..=100).
pub async fn get_alerts(db: &DatabaseConnection, limit: Option<u64>) -> Result<Vec<alert::Model>> {
    let mut query = Alert::find()
        .order_by_desc(alert::Column::CreatedAt)
        .order_by_desc(alert::Column::Id);

    if let Some(limit) = limit {
        if limit == 0 || limit > MAX_ALERT_LIMIT {
            return Err(Error::validation(
                "limit",
                format!("must be between 1 and {MAX_ALERT_LIMIT}"),
            ));
        }
        query = query.limit(limit);
    }

    query.all(db).await.map_err(Into::into)
}

/// Marks an alert resolved.
///
/// Resolving an already-resolved alert is a no-op: the stored record,
/// including its original `resolved_at`, is returned unchanged.
pub async fn resolve_alert(db: &DatabaseConnection, alert_id: i64) -> Result<alert::Model> {
    let txn = db.begin().await?;

    let current = Alert::find_by_id(alert_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "alert",
            id: alert_id,
        })?;

    if current.is_resolved {
        debug!(alert_id, "Alert already resolved");
        txn.commit().await?;
        return Ok(current);
    }

    let mut alert: alert::ActiveModel = current.into();
    alert.is_resolved = Set(true);
    alert.resolved_at = Set(Some(chrono::Utc::now()));
    let resolved = alert.update(&txn).await?;
    txn.commit().await?;

    info!(alert_id, "Resolved alert");
    Ok(resolved)
}
