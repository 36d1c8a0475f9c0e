use serde::{Deserialize, Serialize};

/// Department as seen by callers, with its computed member count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub employee_count: u64,
}

/// Create input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDepartment {
    #[serde(default)]
    pub name: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentPatch {
    #[serde(default)]
    pub name: Option<String>,
}
