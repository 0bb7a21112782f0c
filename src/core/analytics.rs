//! AI analytics - persistence of insight collaborator output.
//!
//! Scoring itself happens behind the [`InsightGenerator`] seam. This module
//! only validates what the collaborator returns, stores it, and mirrors the
//! two headline predictions onto the project row.

use crate::{
    core::{money, validation},
    entities::{
        AiAnalytics, Project, ai_analytics,
        enums::{AnalysisType, ProjectStatus},
        project,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde_json::json;
use tracing::{info, warn};

/// Result key carrying the predicted completion percentage.
pub const PREDICTED_COMPLETION_KEY: &str = "predicted_completion_percent";
/// Result key carrying the budget overflow risk percentage.
pub const OVERFLOW_RISK_KEY: &str = "overflow_risk_percent";

/// One analysis produced by the collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub analysis_type: AnalysisType,
    /// Opaque payload, stored as-is
    pub results: serde_json::Value,
    /// Confidence in [0, 1]
    pub confidence_score: f64,
}

/// External scoring collaborator.
pub trait InsightGenerator: Send + Sync {
    /// Produces insights for `project` as of `today`.
    fn generate(&self, project: &project::Model, today: NaiveDate) -> Vec<Insight>;
}

/// Deterministic stand-in generator.
///
/// Predicts completion from the elapsed share of the schedule and budget
/// overflow risk from the share of the budget already spent.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineInsightGenerator;

impl BaselineInsightGenerator {
    #[allow(clippy::cast_precision_loss)] // day counts are small
    fn schedule_elapsed_percent(project: &project::Model, today: NaiveDate) -> f64 {
        if project.status == ProjectStatus::Completed {
            return 100.0;
        }
        let total = (project.end_date - project.start_date).num_days();
        if total <= 0 {
            return if today >= project.end_date { 100.0 } else { 0.0 };
        }
        let elapsed = (today - project.start_date).num_days();
        (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    fn budget_spent_percent(project: &project::Model) -> f64 {
        let budget = money::from_cents(project.budget_cents);
        let spent = money::from_cents(project.actual_expenditures_cents);
        if budget.is_zero() {
            return 0.0;
        }
        let ratio = spent / budget * rust_decimal::Decimal::ONE_HUNDRED;
        rust_decimal::prelude::ToPrimitive::to_f64(&ratio)
            .unwrap_or(100.0)
            .clamp(0.0, 100.0)
    }
}

impl InsightGenerator for BaselineInsightGenerator {
    fn generate(&self, project: &project::Model, today: NaiveDate) -> Vec<Insight> {
        let completion = Self::schedule_elapsed_percent(project, today);
        let spent = Self::budget_spent_percent(project);

        vec![
            Insight {
                analysis_type: AnalysisType::CompletionPrediction,
                results: json!({
                    PREDICTED_COMPLETION_KEY: completion,
                    "as_of": today,
                    "method": "schedule_elapsed",
                }),
                confidence_score: 0.5,
            },
            Insight {
                analysis_type: AnalysisType::BudgetAnalysis,
                results: json!({
                    OVERFLOW_RISK_KEY: spent,
                    "budget": money::from_cents(project.budget_cents),
                    "actual_expenditures": money::from_cents(project.actual_expenditures_cents),
                    "method": "budget_spent",
                }),
                confidence_score: 0.6,
            },
        ]
    }
}

/// Lists stored analyses, newest first, optionally for one project.
pub async fn get_ai_analytics(
    db: &DatabaseConnection,
    project_id: Option<i64>,
) -> Result<Vec<ai_analytics::Model>> {
    let mut query = AiAnalytics::find();
    if let Some(project_id) = project_id {
        query = query.filter(ai_analytics::Column::ProjectId.eq(project_id));
    }
    query
        .order_by_desc(ai_analytics::Column::GeneratedAt)
        .order_by_desc(ai_analytics::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Reads a percentage from a result payload, if present and in range.
fn percent_in(results: &serde_json::Value, key: &str) -> Option<f64> {
    let value = results.get(key)?.as_f64()?;
    match validation::percent_score(key, value) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(error = %e, "Ignoring out-of-range prediction");
            None
        }
    }
}

/// Runs the collaborator for a project and stores everything it returns.
///
/// All rows and the project's prediction columns are written in one
/// transaction; an insight with an out-of-range confidence rejects the whole
/// batch.
pub async fn generate_ai_insights(
    db: &DatabaseConnection,
    generator: &dyn InsightGenerator,
    project_id: i64,
    today: NaiveDate,
) -> Result<Vec<ai_analytics::Model>> {
    let txn = db.begin().await?;

    let current = Project::find_by_id(project_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "project",
            id: project_id,
        })?;

    let insights = generator.generate(&current, today);
    for insight in &insights {
        validation::confidence("confidence_score", insight.confidence_score)?;
    }

    let mut completion_prediction = None;
    let mut overflow_risk = None;
    let generated_at = chrono::Utc::now();
    let mut stored = Vec::with_capacity(insights.len());

    for insight in insights {
        match insight.analysis_type {
            AnalysisType::CompletionPrediction => {
                completion_prediction =
                    percent_in(&insight.results, PREDICTED_COMPLETION_KEY).or(completion_prediction);
            }
            AnalysisType::BudgetAnalysis => {
                overflow_risk = percent_in(&insight.results, OVERFLOW_RISK_KEY).or(overflow_risk);
            }
            AnalysisType::AnomalyDetection | AnalysisType::RiskAssessment => {}
        }

        let row = ai_analytics::ActiveModel {
            project_id: Set(project_id),
            analysis_type: Set(insight.analysis_type),
            results: Set(insight.results),
            confidence_score: Set(insight.confidence_score),
            generated_at: Set(generated_at),
            ..Default::default()
        };
        stored.push(row.insert(&txn).await?);
    }

    if completion_prediction.is_some() || overflow_risk.is_some() {
        let mut project: project::ActiveModel = current.into();
        if let Some(v) = completion_prediction {
            project.ai_completion_prediction = Set(Some(v));
        }
        if let Some(v) = overflow_risk {
            project.ai_budget_overflow_risk = Set(Some(v));
        }
        project.updated_at = Set(generated_at);
        project.update(&txn).await?;
    }

    txn.commit().await?;

    info!(project_id, insights = stored.len(), "Generated AI insights");
    Ok(stored)
}
