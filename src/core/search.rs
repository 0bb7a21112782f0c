//! Project search - conjunctive filters plus pagination.
//!
//! Every supplied filter must hold for a project to match. Results are ordered
//! by key so that identical requests against an unchanged store return
//! identical pages, and `total` always counts the whole match set.

use crate::{
    core::{money, risk},
    entities::{
        Project,
        enums::{ContractType, ProjectStatus, RiskLevel},
        project,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    Condition, PaginatorTrait, QueryOrder, TransactionTrait,
    prelude::*,
    sea_query::{Expr, LikeExpr, SimpleExpr},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// First page number.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when none is requested.
pub const DEFAULT_LIMIT: u64 = 20;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u64 = 100;

/// Search request. Every filter is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Case-insensitive substring of the project name
    pub name: Option<String>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    /// Case-insensitive substring of the contractor
    pub contractor: Option<String>,
    pub status: Option<ProjectStatus>,
    pub contract_type: Option<ContractType>,
    /// Inclusive lower budget bound
    pub budget_min: Option<Decimal>,
    /// Inclusive upper budget bound
    pub budget_max: Option<Decimal>,
    /// Inclusive lower start date bound
    pub start_date_from: Option<NaiveDate>,
    /// Inclusive upper start date bound
    pub start_date_to: Option<NaiveDate>,
    /// Derived risk bucket, see [`crate::core::risk`]
    pub risk_level: Option<RiskLevel>,
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Page size, defaults to 20, at most 100
    pub limit: Option<u64>,
}

/// One page of matching projects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub projects: Vec<project::Model>,
    /// Number of matches across all pages
    pub total: u64,
}

/// Case-folds text the way the `*_folded` project columns are stored.
///
/// `SQLite`'s `lower()` only folds ASCII, so folding happens here on both the
/// stored value and the search text.
#[must_use]
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Escapes `LIKE` wildcards so user text matches literally.
fn contains_pattern(text: &str) -> LikeExpr {
    let escaped = fold(text)
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

fn contains_ci(column: project::Column, text: &str) -> SimpleExpr {
    Expr::col(column).like(contains_pattern(text))
}

fn non_blank(text: Option<&String>) -> Option<&str> {
    text.map(|t| t.trim()).filter(|t| !t.is_empty())
}

/// Builds the filter condition, validating ranges along the way.
fn build_condition(filters: &SearchFilters) -> Result<Condition> {
    let mut condition = Condition::all();

    if let Some(name) = non_blank(filters.name.as_ref()) {
        condition = condition.add(contains_ci(project::Column::NameFolded, name));
    }
    if let Some(location) = non_blank(filters.location.as_ref()) {
        condition = condition.add(contains_ci(project::Column::LocationFolded, location));
    }
    if let Some(contractor) = non_blank(filters.contractor.as_ref()) {
        condition = condition.add(contains_ci(project::Column::ContractorFolded, contractor));
    }
    if let Some(status) = filters.status {
        condition = condition.add(project::Column::Status.eq(status));
    }
    if let Some(contract_type) = filters.contract_type {
        condition = condition.add(project::Column::ContractType.eq(contract_type));
    }

    let budget_min = filters
        .budget_min
        .map(|v| money::non_negative_cents("budget_min", v))
        .transpose()?;
    let budget_max = filters
        .budget_max
        .map(|v| money::non_negative_cents("budget_max", v))
        .transpose()?;
    if let (Some(min), Some(max)) = (budget_min, budget_max) {
        if min > max {
            return Err(Error::validation("budget_max", "must not be below budget_min"));
        }
    }
    if let Some(min) = budget_min {
        condition = condition.add(project::Column::BudgetCents.gte(min));
    }
    if let Some(max) = budget_max {
        condition = condition.add(project::Column::BudgetCents.lte(max));
    }

    if let (Some(from), Some(to)) = (filters.start_date_from, filters.start_date_to) {
        if from > to {
            return Err(Error::validation(
                "start_date_to",
                "must not be before start_date_from",
            ));
        }
    }
    if let Some(from) = filters.start_date_from {
        condition = condition.add(project::Column::StartDate.gte(from));
    }
    if let Some(to) = filters.start_date_to {
        condition = condition.add(project::Column::StartDate.lte(to));
    }

    if let Some(level) = filters.risk_level {
        let (low, high) = risk::score_bounds(level);
        if let Some(low) = low {
            condition = condition.add(project::Column::RiskScore.gte(low));
        }
        if let Some(high) = high {
            condition = condition.add(project::Column::RiskScore.lt(high));
        }
    }

    Ok(condition)
}

fn page_window(filters: &SearchFilters) -> Result<(u64, u64)> {
    let page = filters.page.unwrap_or(DEFAULT_PAGE);
    if page == 0 {
        return Err(Error::validation("page", "must be at least 1"));
    }
    let limit = filters.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(Error::validation(
            "limit",
            format!("must be between 1 and {MAX_LIMIT}"),
        ));
    }
    Ok((page, limit))
}

/// Runs a filtered, paginated project search.
///
/// A page past the end yields no projects but still reports the full `total`.
/// The page and the count are read in one transaction so they agree.
pub async fn search_projects(
    db: &DatabaseConnection,
    filters: &SearchFilters,
) -> Result<SearchResult> {
    let (page, limit) = page_window(filters)?;
    let condition = build_condition(filters)?;

    let txn = db.begin().await?;
    let paginator = Project::find()
        .filter(condition)
        .order_by_asc(project::Column::Id)
        .paginate(&txn, limit);

    let total = paginator.num_items().await?;
    let offset = (page - 1).checked_mul(limit);
    let projects = if offset.is_some_and(|offset| offset < total) {
        paginator.fetch_page(page - 1).await?
    } else {
        Vec::new()
    };
    txn.commit().await?;

    debug!(page, limit, total, returned = projects.len(), "Searched projects");
    Ok(SearchResult { projects, total })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::project::{self as project_ops, UpdateProjectInput},
        test_utils::*,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_pagination_over_45_projects() -> Result<()> {
        let db = setup_test_db().await?;
        for i in 0..45 {
            create_test_project(&db, &format!("Project {i}")).await?;
        }

        let mut seen = Vec::new();
        for (page, expected) in [(1, 20), (2, 20), (3, 5)] {
            let result = search_projects(
                &db,
                &SearchFilters {
                    page: Some(page),
                    limit: Some(20),
                    ..Default::default()
                },
            )
            .await?;
            assert_eq!(result.projects.len(), expected, "page {page}");
            assert_eq!(result.total, 45);
            seen.extend(result.projects.into_iter().map(|p| p.id));
        }

        // Pages are disjoint and ascend by key
        let mut sorted = seen.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(seen, sorted);
        assert_eq!(seen.len(), 45);

        Ok(())
    }

    #[tokio::test]
    async fn test_page_beyond_end_is_empty_with_total() -> Result<()> {
        let db = setup_test_db().await?;
        for i in 0..3 {
            create_test_project(&db, &format!("Project {i}")).await?;
        }

        let result = search_projects(
            &db,
            &SearchFilters {
                page: Some(5),
                ..Default::default()
            },
        )
        .await?;
        assert!(result.projects.is_empty());
        assert_eq!(result.total, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_huge_page_number_is_empty_not_wrapped() -> Result<()> {
        let db = setup_test_db().await?;
        for i in 0..3 {
            create_test_project(&db, &format!("Project {i}")).await?;
        }

        for page in [u64::MAX, 1 << 62] {
            let result = search_projects(
                &db,
                &SearchFilters {
                    page: Some(page),
                    limit: Some(MAX_LIMIT),
                    ..Default::default()
                },
            )
            .await?;
            assert!(result.projects.is_empty(), "page {page}");
            assert_eq!(result.total, 3);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_repeated_search_is_stable() -> Result<()> {
        let db = setup_test_db().await?;
        for i in 0..10 {
            create_test_project(&db, &format!("Project {i}")).await?;
        }
        let filters = SearchFilters {
            limit: Some(4),
            page: Some(2),
            ..Default::default()
        };
        let first = search_projects(&db, &filters).await?;
        let second = search_projects(&db, &filters).await?;
        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_budget_range_is_inclusive() -> Result<()> {
        let db = setup_test_db().await?;
        for budget in ["50000", "100000", "250000.50", "500000", "500000.01"] {
            let mut input = project_input(&format!("Budget {budget}"));
            input.budget = dec(budget);
            input.allocated_funds = dec("0");
            project_ops::create_project(&db, input).await?;
        }

        for limit in [1, 2, 100] {
            let mut matched = Vec::new();
            let mut page = 1;
            loop {
                let result = search_projects(
                    &db,
                    &SearchFilters {
                        budget_min: Some(dec("100000")),
                        budget_max: Some(dec("500000")),
                        page: Some(page),
                        limit: Some(limit),
                        ..Default::default()
                    },
                )
                .await?;
                assert_eq!(result.total, 3);
                if result.projects.is_empty() {
                    break;
                }
                matched.extend(result.projects);
                page += 1;
            }
            assert_eq!(matched.len(), 3);
            for project in matched {
                let budget = money::from_cents(project.budget_cents);
                assert!(budget >= dec("100000") && budget <= dec("500000"));
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_text_filters_are_case_insensitive_substrings() -> Result<()> {
        let db = setup_test_db().await?;
        let mut input = project_input("Jalan Raya Bogor");
        input.location = "Bogor, Jawa Barat".to_string();
        input.contractor = Some("PT Waskita Karya".to_string());
        project_ops::create_project(&db, input).await?;

        let mut input = project_input("Jembatan Suramadu");
        input.location = "Surabaya".to_string();
        input.contractor = None;
        project_ops::create_project(&db, input).await?;

        let by_name = search_projects(
            &db,
            &SearchFilters {
                name: Some("raya".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.projects[0].name, "Jalan Raya Bogor");

        let by_contractor = search_projects(
            &db,
            &SearchFilters {
                contractor: Some("WASKITA".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_contractor.total, 1);

        // Conjunctive: location matches the second, name only the first
        let none = search_projects(
            &db,
            &SearchFilters {
                name: Some("raya".to_string()),
                location: Some("surabaya".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(none.total, 0);

        // Folding covers non-ASCII letters too
        let mut input = project_input("Éco Bridge Ñusantara");
        input.location = "Île Kecil".to_string();
        project_ops::create_project(&db, input).await?;
        for name in ["Éco", "éco", "ÉCO BRIDGE", "ñusantara"] {
            let found = search_projects(
                &db,
                &SearchFilters {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
            )
            .await?;
            assert_eq!(found.total, 1, "{name}");
        }
        let by_location = search_projects(
            &db,
            &SearchFilters {
                location: Some("île".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_location.total, 1);

        // Wildcards are literal
        let literal = search_projects(
            &db,
            &SearchFilters {
                name: Some("%".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(literal.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_status_type_and_dates() -> Result<()> {
        let db = setup_test_db().await?;
        let mut input = project_input("Sekolah");
        input.status = ProjectStatus::Active;
        input.contract_type = ContractType::Construction;
        input.start_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        input.end_date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        project_ops::create_project(&db, input).await?;

        let mut input = project_input("Konsultan");
        input.status = ProjectStatus::Planned;
        input.contract_type = ContractType::Consultancy;
        input.start_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        input.end_date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        project_ops::create_project(&db, input).await?;

        let active = search_projects(
            &db,
            &SearchFilters {
                status: Some(ProjectStatus::Active),
                contract_type: Some(ContractType::Construction),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(active.total, 1);
        assert_eq!(active.projects[0].name, "Sekolah");

        // Inclusive on both ends
        let june = search_projects(
            &db,
            &SearchFilters {
                start_date_from: NaiveDate::from_ymd_opt(2024, 6, 1),
                start_date_to: NaiveDate::from_ymd_opt(2024, 6, 1),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(june.total, 1);
        assert_eq!(june.projects[0].name, "Konsultan");

        Ok(())
    }

    #[tokio::test]
    async fn test_risk_level_filter() -> Result<()> {
        let db = setup_test_db().await?;
        for (name, score) in [("a", 10.0), ("b", 25.0), ("c", 60.0), ("d", 75.0), ("e", 99.0)] {
            let project = create_test_project(&db, name).await?;
            project_ops::update_project(
                &db,
                project.id,
                UpdateProjectInput {
                    risk_score: Some(score),
                    ..Default::default()
                },
            )
            .await?;
        }

        let expect = [
            (RiskLevel::Low, 1),
            (RiskLevel::Medium, 1),
            (RiskLevel::High, 1),
            (RiskLevel::Critical, 2),
        ];
        for (level, count) in expect {
            let result = search_projects(
                &db,
                &SearchFilters {
                    risk_level: Some(level),
                    ..Default::default()
                },
            )
            .await?;
            assert_eq!(result.total, count, "{level:?}");
            assert!(result.projects.iter().all(|p| risk::risk_level(p.risk_score) == level));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_requests() -> Result<()> {
        let db = setup_test_db().await?;
        let cases = [
            (
                "page",
                SearchFilters {
                    page: Some(0),
                    ..Default::default()
                },
            ),
            (
                "limit",
                SearchFilters {
                    limit: Some(101),
                    ..Default::default()
                },
            ),
            (
                "limit",
                SearchFilters {
                    limit: Some(0),
                    ..Default::default()
                },
            ),
            (
                "budget_min",
                SearchFilters {
                    budget_min: Some(dec("-5")),
                    ..Default::default()
                },
            ),
            (
                "budget_max",
                SearchFilters {
                    budget_min: Some(dec("10")),
                    budget_max: Some(dec("5")),
                    ..Default::default()
                },
            ),
        ];
        for (field, filters) in cases {
            let err = search_projects(&db, &filters).await.unwrap_err();
            assert!(
                matches!(err, Error::Validation { field: ref f, .. } if f == field),
                "expected {field}, got {err:?}"
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_limit_caps_page_size() -> Result<()> {
        let db = setup_test_db().await?;
        for i in 0..7 {
            create_test_project(&db, &format!("P{i}")).await?;
        }
        let result = search_projects(
            &db,
            &SearchFilters {
                limit: Some(MAX_LIMIT),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(result.projects.len(), 7);

        let result = search_projects(
            &db,
            &SearchFilters {
                limit: Some(3),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(result.projects.len(), 3);
        assert_eq!(result.total, 7);
        Ok(())
    }
}
