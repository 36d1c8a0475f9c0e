use std::collections::HashMap;

use chrono::Utc;
use models::{department, employee};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::department::domain::Department;

fn to_domain(m: department::Model, employee_count: u64) -> Department {
    Department { id: m.id, name: m.name, employee_count }
}

/// Member counts per department in a single grouped query.
async fn member_counts<C: ConnectionTrait>(db: &C) -> Result<HashMap<i32, u64>, DbErr> {
    let rows: Vec<(Option<i32>, i64)> = employee::Entity::find()
        .select_only()
        .column(employee::Column::DepartmentId)
        .column_as(Expr::col(employee::Column::Id).count(), "employee_count")
        .filter(employee::Column::DepartmentId.is_not_null())
        .group_by(employee::Column::DepartmentId)
        .into_tuple()
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(id, n)| id.map(|id| (id, n.max(0) as u64)))
        .collect())
}

pub async fn count_members<C: ConnectionTrait>(db: &C, department_id: i32) -> Result<u64, DbErr> {
    employee::Entity::find()
        .filter(employee::Column::DepartmentId.eq(department_id))
        .count(db)
        .await
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    department::Entity::find().count(db).await
}

pub async fn list_with_counts<C: ConnectionTrait>(db: &C) -> Result<Vec<Department>, DbErr> {
    let departments = department::Entity::find()
        .order_by_asc(department::Column::Id)
        .all(db)
        .await?;
    let counts = member_counts(db).await?;
    Ok(departments
        .into_iter()
        .map(|d| {
            let n = counts.get(&d.id).copied().unwrap_or(0);
            to_domain(d, n)
        })
        .collect())
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Department>, DbErr> {
    let Some(m) = department::Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let n = count_members(db, m.id).await?;
    Ok(Some(to_domain(m, n)))
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Department>, DbErr> {
    let found = department::Entity::find()
        .filter(department::Column::Name.eq(name))
        .one(db)
        .await?;
    let Some(m) = found else { return Ok(None) };
    let n = count_members(db, m.id).await?;
    Ok(Some(to_domain(m, n)))
}

pub async fn name_taken<C: ConnectionTrait>(db: &C, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
    let mut q = department::Entity::find().filter(department::Column::Name.eq(name));
    if let Some(id) = exclude_id {
        q = q.filter(department::Column::Id.ne(id));
    }
    Ok(q.count(db).await? > 0)
}

pub async fn insert<C: ConnectionTrait>(db: &C, name: &str) -> Result<Department, DbErr> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = department::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let m = am.insert(db).await?;
    Ok(to_domain(m, 0))
}

pub async fn rename<C: ConnectionTrait>(db: &C, id: i32, name: &str) -> Result<Option<Department>, DbErr> {
    let Some(m) = department::Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: department::ActiveModel = m.into();
    am.name = Set(name.to_string());
    am.updated_at = Set(Utc::now().into());
    let m = am.update(db).await?;
    let n = count_members(db, m.id).await?;
    Ok(Some(to_domain(m, n)))
}

/// Unassigns all members and deletes the department in one transaction.
/// Returns the number of employees unassigned, `None` if the department is
/// unknown (nothing is changed then).
pub async fn delete_unassigning<C: TransactionTrait>(db: &C, id: i32) -> Result<Option<u64>, DbErr> {
    let txn = db.begin().await?;
    if department::Entity::find_by_id(id).one(&txn).await?.is_none() {
        txn.rollback().await?;
        return Ok(None);
    }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let moved = employee::Entity::update_many()
        .col_expr(employee::Column::DepartmentId, Expr::value(Option::<i32>::None))
        .col_expr(employee::Column::UpdatedAt, Expr::value(now))
        .filter(employee::Column::DepartmentId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    department::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    Ok(Some(moved))
}
