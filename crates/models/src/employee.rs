use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{department, errors::ModelError};

pub const FULL_NAME_MAX: usize = 100;
pub const ADDRESS_MAX: usize = 255;
pub const PHONE_MAX: usize = 20;
pub const EMAIL_MAX: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub department_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Department }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Department => Entity::belongs_to(department::Entity)
                .from(Column::DepartmentId)
                .to(department::Column::Id)
                .into(),
        }
    }
}

impl Related<department::Entity> for Entity {
    fn to() -> RelationDef { Relation::Department.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Trim an optional text field; blank values become `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::TooLong { field, max });
    }
    Ok(())
}

pub fn validate_full_name(name: &str) -> Result<(), ModelError> {
    check_len("Full name", name, FULL_NAME_MAX)
}

pub fn validate_address(address: Option<&str>) -> Result<(), ModelError> {
    address.map_or(Ok(()), |a| check_len("Address", a, ADDRESS_MAX))
}

pub fn validate_phone(phone: Option<&str>) -> Result<(), ModelError> {
    phone.map_or(Ok(()), |p| check_len("Phone number", p, PHONE_MAX))
}

pub fn validate_email(email: Option<&str>) -> Result<(), ModelError> {
    let Some(email) = email else { return Ok(()) };
    check_len("Email", email, EMAIL_MAX)?;
    if !is_valid_email(email) {
        return Err(ModelError::Validation("Email should be valid".into()));
    }
    Ok(())
}

/// `local@domain.tld` without whitespace, loose beyond that. The domain must
/// contain an inner dot, so intranet hosts such as `user@localhost` are
/// rejected.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else { return false };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}
