//! Create `department` table.
//!
//! Department names are unique; the constraint backs the service-level check.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(pk_auto(Department::Id))
                    .col(string_len(Department::Name, 100).unique_key())
                    .col(timestamp_with_time_zone(Department::CreatedAt))
                    .col(timestamp_with_time_zone(Department::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Department::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Department { Table, Id, Name, CreatedAt, UpdatedAt }
