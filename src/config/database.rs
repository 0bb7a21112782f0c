//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs,
//! including foreign keys, unique columns and nullability.

use crate::entities::{AiAnalytics, Alert, CitizenEngagement, Contract, Project, Report};
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Creates the directory holding a file-backed `SQLite` database, if needed.
///
/// In-memory and non-`SQLite` URLs are left alone.
pub fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    ensure_sqlite_parent_dir(database_url)?;
    debug!(database_url, "Connecting to database");
    Database::connect(database_url).await.map_err(|e| Error::Config {
        message: format!("Failed to connect to {database_url}: {e}"),
    })
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;
    Ok(())
}

/// Creates all tables that do not exist yet.
///
/// Projects are created first since every other table except reports
/// references them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Project).await?;
    create_table(db, &schema, Contract).await?;
    create_table(db, &schema, Alert).await?;
    create_table(db, &schema, CitizenEngagement).await?;
    create_table(db, &schema, AiAnalytics).await?;
    create_table(db, &schema, Report).await?;

    info!("Database schema ready");
    Ok(())
}
