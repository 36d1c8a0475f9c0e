//! Create `employee` table with a nullable FK to `department`.
//!
//! Deleting a department leaves its employees in place with `department_id = NULL`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_len(Employee::FullName, 100))
                    .col(string_len_null(Employee::Address, 255))
                    .col(string_len_null(Employee::Phone, 20))
                    // NULLs never collide, so blank emails are stored as NULL
                    .col(string_len_null(Employee::Email, 100).unique_key())
                    .col(integer_null(Employee::DepartmentId))
                    .col(timestamp_with_time_zone(Employee::CreatedAt))
                    .col(timestamp_with_time_zone(Employee::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_department")
                            .from(Employee::Table, Employee::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee { Table, Id, FullName, Address, Phone, Email, DepartmentId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Department { Table, Id }
