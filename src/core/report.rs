//! Report business logic - publishing and listing reports.

use crate::{
    core::validation,
    entities::{Report, enums::ReportType, report},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

const fn default_public() -> bool {
    true
}

/// Input for [`create_report`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReportInput {
    pub title: String,
    pub description: String,
    pub report_type: ReportType,
    #[serde(default)]
    pub file_url: Option<String>,
    /// Public unless stated otherwise
    #[serde(default = "default_public")]
    pub is_public: bool,
}

/// Publishes a report.
pub async fn create_report(
    db: &DatabaseConnection,
    input: CreateReportInput,
) -> Result<report::Model> {
    let title = validation::required_text("title", &input.title)?;
    let description = validation::required_text("description", &input.description)?;
    let file_url = validation::optional_url("file_url", input.file_url.as_deref())?;

    let now = chrono::Utc::now();
    let report = report::ActiveModel {
        title: Set(title),
        description: Set(description),
        report_type: Set(input.report_type),
        file_url: Set(file_url),
        is_public: Set(input.is_public),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = report.insert(db).await?;

    info!(report_id = created.id, public = created.is_public, "Published report");
    Ok(created)
}

/// Lists reports, newest first, optionally only public or only private ones.
pub async fn get_reports(
    db: &DatabaseConnection,
    is_public: Option<bool>,
) -> Result<Vec<report::Model>> {
    let mut query = Report::find();
    if let Some(is_public) = is_public {
        query = query.filter(report::Column::IsPublic.eq(is_public));
    }
    query
        .order_by_desc(report::Column::CreatedAt)
        .order_by_desc(report::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
