use chrono::Utc;
use models::{department, employee};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{BinOper, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::employee::domain::{Employee, EmployeeDraft};
use crate::employee::repository::{DepartmentScope, EmployeeFilter};

fn to_domain(m: employee::Model, dept: Option<department::Model>) -> Employee {
    Employee {
        id: m.id,
        full_name: m.full_name,
        address: m.address,
        phone: m.phone,
        email: m.email,
        department_id: m.department_id,
        department_name: dept.map(|d| d.name),
    }
}

async fn with_department<C: ConnectionTrait>(db: &C, m: employee::Model) -> Result<Employee, DbErr> {
    let dept = match m.department_id {
        Some(_) => m.find_related(department::Entity).one(db).await?,
        None => None,
    };
    Ok(to_domain(m, dept))
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Case-insensitive substring match on full name. Column and needle both go
/// through the backend's `LOWER()` so they fold identically.
fn name_contains(needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    let escaped = SimpleExpr::Binary(
        Box::new(Func::lower(Expr::val(pattern)).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant('\\'.into())),
    );
    Expr::expr(Func::lower(Expr::col((employee::Entity, employee::Column::FullName)))).binary(BinOper::Like, escaped)
}

pub async fn list<C: ConnectionTrait>(db: &C, filter: &EmployeeFilter) -> Result<Vec<Employee>, DbErr> {
    let mut q = employee::Entity::find().find_also_related(department::Entity);
    q = match filter.scope {
        DepartmentScope::Any => q,
        DepartmentScope::Unassigned => q.filter(employee::Column::DepartmentId.is_null()),
        DepartmentScope::Only(id) => q.filter(employee::Column::DepartmentId.eq(id)),
    };
    if let Some(needle) = filter.name_contains.as_deref() {
        q = q.filter(name_contains(needle));
    }
    let rows = q.order_by_asc(employee::Column::Id).all(db).await?;
    Ok(rows.into_iter().map(|(m, d)| to_domain(m, d)).collect())
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Employee>, DbErr> {
    let row = employee::Entity::find_by_id(id)
        .find_also_related(department::Entity)
        .one(db)
        .await?;
    Ok(row.map(|(m, d)| to_domain(m, d)))
}

pub async fn email_taken<C: ConnectionTrait>(db: &C, email: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
    let mut q = employee::Entity::find().filter(employee::Column::Email.eq(email));
    if let Some(id) = exclude_id {
        q = q.filter(employee::Column::Id.ne(id));
    }
    Ok(q.count(db).await? > 0)
}

pub async fn insert<C: ConnectionTrait>(db: &C, draft: EmployeeDraft) -> Result<Employee, DbErr> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = employee::ActiveModel {
        full_name: Set(draft.full_name),
        address: Set(draft.address),
        phone: Set(draft.phone),
        email: Set(draft.email),
        department_id: Set(draft.department_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let m = am.insert(db).await?;
    with_department(db, m).await
}

/// Overwrites every writable column. `None` if the employee is unknown.
pub async fn save<C: ConnectionTrait>(db: &C, id: i32, draft: EmployeeDraft) -> Result<Option<Employee>, DbErr> {
    let Some(m) = employee::Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: employee::ActiveModel = m.into();
    am.full_name = Set(draft.full_name);
    am.address = Set(draft.address);
    am.phone = Set(draft.phone);
    am.email = Set(draft.email);
    am.department_id = Set(draft.department_id);
    am.updated_at = Set(Utc::now().into());
    let m = am.update(db).await?;
    Ok(Some(with_department(db, m).await?))
}

pub async fn set_department<C: ConnectionTrait>(
    db: &C,
    id: i32,
    department_id: Option<i32>,
) -> Result<Option<Employee>, DbErr> {
    let Some(m) = employee::Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: employee::ActiveModel = m.into();
    am.department_id = Set(department_id);
    am.updated_at = Set(Utc::now().into());
    let m = am.update(db).await?;
    Ok(Some(with_department(db, m).await?))
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
    let res = employee::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

pub async fn count_unassigned<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    employee::Entity::find()
        .filter(employee::Column::DepartmentId.is_null())
        .count(db)
        .await
}
