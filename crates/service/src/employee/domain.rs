use serde::{Deserialize, Deserializer, Serialize};

/// Label used wherever an employee has no department.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub full_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
}

impl Employee {
    pub fn department_label(&self) -> &str {
        self.department_name.as_deref().unwrap_or(UNASSIGNED)
    }
}

/// Create input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department_id: Option<i32>,
}

/// Partial update.
///
/// `department_id` distinguishes three cases: the key is absent (`None`),
/// present as `null` (`Some(None)`, unassign) or carries an id
/// (`Some(Some(id))`, reassign).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub department_id: Option<Option<i32>>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}

/// What an update does to the department reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentChange {
    Keep,
    Clear,
    Assign(i32),
}

impl EmployeePatch {
    pub fn department_change(&self) -> DepartmentChange {
        match self.department_id {
            None => DepartmentChange::Keep,
            Some(None) => DepartmentChange::Clear,
            Some(Some(id)) => DepartmentChange::Assign(id),
        }
    }
}

/// Normalized, validated field values handed to a repository for writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub full_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<i32>,
}

impl From<&Employee> for EmployeeDraft {
    fn from(e: &Employee) -> Self {
        Self {
            full_name: e.full_name.clone(),
            address: e.address.clone(),
            phone: e.phone.clone(),
            email: e.email.clone(),
            department_id: e.department_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_absent_null_and_value() {
        let absent: EmployeePatch = serde_json::from_str(r#"{"phone":"555"}"#).unwrap();
        assert_eq!(absent.department_change(), DepartmentChange::Keep);
        assert_eq!(absent.phone.as_deref(), Some("555"));

        let null: EmployeePatch = serde_json::from_str(r#"{"departmentId":null}"#).unwrap();
        assert_eq!(null.department_change(), DepartmentChange::Clear);

        let value: EmployeePatch = serde_json::from_str(r#"{"departmentId":4}"#).unwrap();
        assert_eq!(value.department_change(), DepartmentChange::Assign(4));
    }

    #[test]
    fn label_falls_back_to_unassigned() {
        let mut e = Employee {
            id: 1,
            full_name: "Eve Anderson".into(),
            address: None,
            phone: None,
            email: None,
            department_id: None,
            department_name: None,
        };
        assert_eq!(e.department_label(), "Unassigned");
        e.department_name = Some("Finance".into());
        assert_eq!(e.department_label(), "Finance");
    }
}
