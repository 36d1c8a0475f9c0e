use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{employee, errors::ModelError};

pub const NAME_MAX: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "department")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Employee }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Employee => Entity::has_many(employee::Entity).into(),
        }
    }
}

impl Related<employee::Entity> for Entity {
    fn to() -> RelationDef { Relation::Employee.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Length rule for an already trimmed, non-blank department name.
pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.chars().count() > NAME_MAX {
        return Err(ModelError::TooLong { field: "Department name", max: NAME_MAX });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_boundary() {
        assert!(validate_name(&"a".repeat(NAME_MAX)).is_ok());
        let err = validate_name(&"a".repeat(NAME_MAX + 1)).unwrap_err();
        assert_eq!(err.to_string(), "Department name must not exceed 100 characters");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(validate_name(&"é".repeat(NAME_MAX)).is_ok());
    }
}
