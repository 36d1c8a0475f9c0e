//! Sample data loaded at startup into an empty directory.

use std::collections::HashMap;

use sea_orm::TransactionTrait;
use tracing::{info, instrument};

use super::{department_store, employee_store};
use crate::employee::domain::EmployeeDraft;
use crate::errors::ServiceError;

const DEPARTMENTS: [&str; 4] = ["Engineering", "Human Resources", "Marketing", "Finance"];

struct SampleEmployee {
    full_name: &'static str,
    address: &'static str,
    phone: &'static str,
    email: &'static str,
    department: Option<&'static str>,
}

const EMPLOYEES: [SampleEmployee; 8] = [
    SampleEmployee { full_name: "John Doe", address: "123 Main St, Anytown, USA", phone: "+1-555-0101", email: "john.doe@company.com", department: Some("Engineering") },
    SampleEmployee { full_name: "Jane Smith", address: "456 Oak Ave, Somewhere, USA", phone: "+1-555-0102", email: "jane.smith@company.com", department: Some("Engineering") },
    SampleEmployee { full_name: "Bob Johnson", address: "789 Pine St, Anywhere, USA", phone: "+1-555-0103", email: "bob.johnson@company.com", department: Some("Human Resources") },
    SampleEmployee { full_name: "Alice Brown", address: "321 Elm St, Nowhere, USA", phone: "+1-555-0104", email: "alice.brown@company.com", department: Some("Marketing") },
    SampleEmployee { full_name: "Charlie Wilson", address: "654 Cedar Ave, Everywhere, USA", phone: "+1-555-0105", email: "charlie.wilson@company.com", department: Some("Engineering") },
    SampleEmployee { full_name: "Diana Davis", address: "987 Birch St, Somewhere Else, USA", phone: "+1-555-0106", email: "diana.davis@company.com", department: Some("Finance") },
    SampleEmployee { full_name: "Eve Anderson", address: "147 Maple Ave, Another Place, USA", phone: "+1-555-0107", email: "eve.anderson@company.com", department: None },
    SampleEmployee { full_name: "Frank Miller", address: "258 Spruce St, Different Town, USA", phone: "+1-555-0108", email: "frank.miller@company.com", department: None },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Departments already existed; nothing was written.
    Skipped { existing_departments: u64 },
    Inserted { departments: usize, employees: usize },
}

/// Insert the sample departments and employees when no department exists yet.
/// All rows are written in one transaction.
#[instrument(skip(db))]
pub async fn seed_sample_data<C: TransactionTrait>(db: &C) -> Result<SeedOutcome, ServiceError> {
    let txn = db.begin().await?;
    let existing = department_store::count(&txn).await?;
    if existing > 0 {
        txn.rollback().await?;
        info!(existing_departments = existing, "sample data already present, skipping");
        return Ok(SeedOutcome::Skipped { existing_departments: existing });
    }

    let mut ids = HashMap::new();
    for name in DEPARTMENTS {
        let d = department_store::insert(&txn, name).await?;
        ids.insert(name, d.id);
    }
    for e in &EMPLOYEES {
        let draft = EmployeeDraft {
            full_name: e.full_name.into(),
            address: Some(e.address.into()),
            phone: Some(e.phone.into()),
            email: Some(e.email.into()),
            department_id: e.department.and_then(|n| ids.get(n).copied()),
        };
        employee_store::insert(&txn, draft).await?;
    }
    txn.commit().await?;

    info!(departments = DEPARTMENTS.len(), employees = EMPLOYEES.len(), "sample data initialized");
    Ok(SeedOutcome::Inserted { departments: DEPARTMENTS.len(), employees: EMPLOYEES.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::repository::EmployeeFilter;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seeds_once() -> anyhow::Result<()> {
        let db = get_db().await?;
        assert_eq!(
            seed_sample_data(&db).await?,
            SeedOutcome::Inserted { departments: 4, employees: 8 }
        );
        assert_eq!(
            seed_sample_data(&db).await?,
            SeedOutcome::Skipped { existing_departments: 4 }
        );

        let depts = department_store::list_with_counts(&db).await?;
        let counts: Vec<_> = depts.iter().map(|d| (d.name.as_str(), d.employee_count)).collect();
        assert_eq!(counts, [("Engineering", 3), ("Human Resources", 1), ("Marketing", 1), ("Finance", 1)]);
        assert_eq!(employee_store::count_unassigned(&db).await?, 2);
        assert_eq!(employee_store::list(&db, &EmployeeFilter::all()).await?.len(), 8);
        Ok(())
    }

    #[tokio::test]
    async fn skips_when_departments_exist() -> anyhow::Result<()> {
        let db = get_db().await?;
        department_store::insert(&db, "Legal").await?;
        assert_eq!(
            seed_sample_data(&db).await?,
            SeedOutcome::Skipped { existing_departments: 1 }
        );
        assert!(employee_store::list(&db, &EmployeeFilter::all()).await?.is_empty());
        Ok(())
    }
}
