//! Citizen engagement business logic.
//!
//! Submissions start `pending`. An administrator may mark them `reviewed` and
//! answer them, which moves them to `responded`. Anonymous submissions never
//! store author details.

use crate::{
    core::{project::ensure_project_exists, validation},
    entities::{
        CitizenEngagement, citizen_engagement,
        enums::{EngagementStatus, EngagementType},
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Input for [`create_citizen_engagement`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCitizenEngagementInput {
    pub project_id: i64,
    #[serde(rename = "type")]
    pub engagement_type: EngagementType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// Records a citizen submission for a project.
///
/// When `is_anonymous` is set any author name or email is dropped rather than
/// validated.
pub async fn create_citizen_engagement(
    db: &DatabaseConnection,
    input: CreateCitizenEngagementInput,
) -> Result<citizen_engagement::Model> {
    let title = validation::required_text("title", &input.title)?;
    let content = validation::required_text("content", &input.content)?;
    let (author_name, author_email) = if input.is_anonymous {
        (None, None)
    } else {
        (
            validation::optional_text("author_name", input.author_name.as_deref())?,
            input
                .author_email
                .as_deref()
                .map(|email| validation::email("author_email", email))
                .transpose()?,
        )
    };

    let txn = db.begin().await?;
    ensure_project_exists(&txn, "project_id", input.project_id).await?;

    let now = chrono::Utc::now();
    let engagement = citizen_engagement::ActiveModel {
        project_id: Set(input.project_id),
        engagement_type: Set(input.engagement_type),
        title: Set(title),
        content: Set(content),
        author_name: Set(author_name),
        author_email: Set(author_email),
        is_anonymous: Set(input.is_anonymous),
        status: Set(EngagementStatus::Pending),
        admin_response: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = engagement.insert(&txn).await?;
    txn.commit().await?;

    info!(
        engagement_id = created.id,
        project_id = created.project_id,
        kind = ?created.engagement_type,
        "Recorded citizen engagement"
    );
    Ok(created)
}

/// Lists submissions, newest first, optionally for one project.
pub async fn get_citizen_engagements(
    db: &DatabaseConnection,
    project_id: Option<i64>,
) -> Result<Vec<citizen_engagement::Model>> {
    let mut query = CitizenEngagement::find();
    if let Some(project_id) = project_id {
        query = query.filter(citizen_engagement::Column::ProjectId.eq(project_id));
    }
    query
        .order_by_desc(citizen_engagement::Column::CreatedAt)
        .order_by_desc(citizen_engagement::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_engagement<C>(conn: &C, engagement_id: i64) -> Result<citizen_engagement::Model>
where
    C: ConnectionTrait,
{
    CitizenEngagement::find_by_id(engagement_id)
        .one(conn)
        .await?
        .ok_or(Error::NotFound {
            entity: "citizen_engagement",
            id: engagement_id,
        })
}

/// Marks a pending submission as reviewed.
///
/// Reviewed and responded submissions are returned untouched.
pub async fn review_citizen_engagement(
    db: &DatabaseConnection,
    engagement_id: i64,
) -> Result<citizen_engagement::Model> {
    let txn = db.begin().await?;
    let current = find_engagement(&txn, engagement_id).await?;

    if current.status != EngagementStatus::Pending {
        txn.commit().await?;
        return Ok(current);
    }

    let mut engagement: citizen_engagement::ActiveModel = current.into();
    engagement.status = Set(EngagementStatus::Reviewed);
    engagement.updated_at = Set(chrono::Utc::now());
    let reviewed = engagement.update(&txn).await?;
    txn.commit().await?;

    info!(engagement_id, "Reviewed citizen engagement");
    Ok(reviewed)
}

/// Stores an administrator's answer and marks the submission responded.
///
/// Answering again replaces the previous response.
pub async fn respond_to_citizen_engagement(
    db: &DatabaseConnection,
    engagement_id: i64,
    response: &str,
) -> Result<citizen_engagement::Model> {
    let response = validation::required_text("response", response)?;

    let txn = db.begin().await?;
    let mut engagement: citizen_engagement::ActiveModel =
        find_engagement(&txn, engagement_id).await?.into();
    engagement.admin_response = Set(Some(response));
    engagement.status = Set(EngagementStatus::Responded);
    engagement.updated_at = Set(chrono::Utc::now());
    let responded = engagement.update(&txn).await?;
    txn.commit().await?;

    info!(engagement_id, "Responded to citizen engagement");
    Ok(responded)
}
