//! Secondary indexes on `employee`, created after both tables exist.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Employee: lookups by department (listing, counts, cascade-unassign)
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_department")
                    .table(Employee::Table)
                    .col(Employee::DepartmentId)
                    .to_owned(),
            )
            .await?;

        // Employee: name search
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_full_name")
                    .table(Employee::Table)
                    .col(Employee::FullName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_employee_department").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_full_name").table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employee { Table, DepartmentId, FullName }
