#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

/// Fresh migrated in-memory SQLite database; every call gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
