//! Contract business logic.
//!
//! A contract always hangs off an existing project and carries a contract
//! number unique across the whole store.

use crate::{
    core::{money, project::ensure_project_exists, validation},
    entities::{Contract, contract},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Input for [`create_contract`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContractInput {
    pub project_id: i64,
    pub contract_number: String,
    pub title: String,
    pub value: Decimal,
    pub contractor_name: String,
    pub signed_date: NaiveDate,
    #[serde(default)]
    pub document_url: Option<String>,
}

fn duplicate_number(contract_number: &str) -> Error {
    Error::Conflict {
        message: format!("contract number `{contract_number}` already exists"),
    }
}

/// A concurrent insert can still lose to the unique index after the lookup.
fn insert_error(err: DbErr, contract_number: &str) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_number(contract_number),
        _ => err.into(),
    }
}

/// Records a contract for a project.
///
/// # Errors
/// - `Validation` for empty text, a non-positive value or a malformed URL
/// - `ReferentialIntegrity` when the project does not exist
/// - `Conflict` when the contract number is already taken
pub async fn create_contract(
    db: &DatabaseConnection,
    input: CreateContractInput,
) -> Result<contract::Model> {
    let contract_number = validation::required_text("contract_number", &input.contract_number)?;
    let title = validation::required_text("title", &input.title)?;
    let contractor_name = validation::required_text("contractor_name", &input.contractor_name)?;
    let value_cents = money::positive_cents("value", input.value)?;
    let document_url = validation::optional_url("document_url", input.document_url.as_deref())?;

    let txn = db.begin().await?;

    ensure_project_exists(&txn, "project_id", input.project_id).await?;

    let duplicate = Contract::find()
        .filter(contract::Column::ContractNumber.eq(contract_number.as_str()))
        .one(&txn)
        .await?;
    if duplicate.is_some() {
        return Err(duplicate_number(&contract_number));
    }

    let contract = contract::ActiveModel {
        project_id: Set(input.project_id),
        contract_number: Set(contract_number.clone()),
        title: Set(title),
        value_cents: Set(value_cents),
        contractor_name: Set(contractor_name),
        signed_date: Set(input.signed_date),
        document_url: Set(document_url),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = contract
        .insert(&txn)
        .await
        .map_err(|e| insert_error(e, &contract_number))?;
    txn.commit().await?;

    info!(
        contract_id = created.id,
        project_id = created.project_id,
        "Recorded contract"
    );
    Ok(created)
}

/// Lists a project's contracts, oldest first. Unknown projects have none.
pub async fn get_contracts_by_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<contract::Model>> {
    Contract::find()
        .filter(contract::Column::ProjectId.eq(project_id))
        .order_by_asc(contract::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::PaginatorTrait;
    use std::str::FromStr;

    fn contract_input(project_id: i64, number: &str) -> CreateContractInput {
        CreateContractInput {
            project_id,
            contract_number: number.to_string(),
            title: "Pekerjaan struktur".to_string(),
            value: Decimal::from_str("125000.75").unwrap(),
            contractor_name: "PT Adhi Karya".to_string(),
            signed_date: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
            document_url: Some("https://lpse.example.go.id/c/001.pdf".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_contracts() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        let other = create_test_project(&db, "Other").await?;

        let first = create_contract(&db, contract_input(project.id, "KTR-001")).await?;
        let second = create_contract(&db, contract_input(project.id, "KTR-002")).await?;
        create_contract(&db, contract_input(other.id, "KTR-003")).await?;

        assert_eq!(first.value_cents, 12_500_075);
        assert_eq!(first.contractor_name, "PT Adhi Karya");

        let listed = get_contracts_by_project(&db, project.id).await?;
        assert_eq!(listed, vec![first, second]);

        assert!(get_contracts_by_project(&db, 999).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_dangling_project_is_referential_error() -> Result<()> {
        let db = setup_test_db().await?;
        let err = create_contract(&db, contract_input(77, "KTR-404"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ReferentialIntegrity {
                entity: "project",
                field: "project_id",
                id: 77
            }
        ));
        assert_eq!(Contract::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_number_conflicts() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        create_contract(&db, contract_input(project.id, "KTR-001")).await?;

        let err = create_contract(&db, contract_input(project.id, "  KTR-001 "))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
        assert_eq!(Contract::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unique_index_violation_maps_to_conflict() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        create_contract(&db, contract_input(project.id, "KTR-001")).await?;

        // Bypass the lookup the way a racing writer would
        let racing = contract::ActiveModel {
            project_id: Set(project.id),
            contract_number: Set("KTR-001".to_string()),
            title: Set("Pekerjaan atap".to_string()),
            value_cents: Set(100),
            contractor_name: Set("PT Hutama".to_string()),
            signed_date: Set(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            document_url: Set(None),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        let db_err = racing.insert(&db).await.unwrap_err();
        let err = insert_error(db_err, "KTR-001");
        assert!(matches!(err, Error::Conflict { ref message } if message.contains("KTR-001")));

        let other = insert_error(DbErr::RecordNotInserted, "KTR-002");
        assert!(matches!(other, Error::Database(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_contract_validation() -> Result<()> {
        let (db, project) = setup_with_project().await?;

        let mut input = contract_input(project.id, "KTR-001");
        input.value = Decimal::ZERO;
        let err = create_contract(&db, input).await.unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "value"));

        let mut input = contract_input(project.id, "KTR-001");
        input.document_url = Some("lpse/c/001.pdf".to_string());
        let err = create_contract(&db, input).await.unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "document_url"));

        let mut input = contract_input(project.id, "");
        input.document_url = None;
        let err = create_contract(&db, input).await.unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "contract_number"));

        assert_eq!(Contract::find().count(&db).await?, 0);
        Ok(())
    }
}
