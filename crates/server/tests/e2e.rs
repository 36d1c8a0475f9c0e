use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use configs::AppConfig;

struct TestApp {
    base_url: String,
    db_file: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_file);
    }
}

/// Full startup path (connect, migrate, seed) against a throwaway SQLite file.
async fn start_server(seed: bool) -> anyhow::Result<TestApp> {
    let nanos = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH)?.as_nanos();
    let db_file = std::env::temp_dir().join(format!("staff-directory-e2e-{}-{}.db", std::process::id(), nanos));

    let mut cfg = AppConfig::default();
    cfg.database.url = format!("sqlite://{}?mode=rwc", db_file.display());
    cfg.seed.sample_data = seed;

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, db_file })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_seeded_directory() -> anyhow::Result<()> {
    let app = start_server(true).await?;
    let c = reqwest::Client::new();

    let depts: Value = c.get(format!("{}/api/departments", app.base_url)).send().await?.json().await?;
    let depts = depts.as_array().expect("array");
    assert_eq!(depts.len(), 5);
    assert_eq!(depts[4], json!({"id": null, "name": "Unassigned", "employeeCount": 2}));

    let found: Value = c
        .get(format!("{}/api/employees?search=smith", app.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(found[0]["fullName"], "Jane Smith");
    assert_eq!(found[0]["departmentName"], "Engineering");
    Ok(())
}

#[tokio::test]
async fn e2e_create_and_cascade() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{}/api/departments", app.base_url))
        .json(&json!({"name": "Engineering"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let dept: Value = res.json().await?;

    let res = c
        .post(format!("{}/api/employees", app.base_url))
        .json(&json!({"fullName": "Ann", "departmentId": dept["id"]}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let emp: Value = res.json().await?;
    assert_eq!(emp["departmentName"], "Engineering");

    let res = c.delete(format!("{}/api/departments/{}", app.base_url, dept["id"])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let emp: Value = c
        .get(format!("{}/api/employees/{}", app.base_url, emp["id"]))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(emp["departmentName"], "Unassigned");
    assert_eq!(emp["departmentId"], Value::Null);

    let res = c
        .post(format!("{}/api/departments", app.base_url))
        .header("content-type", "application/json")
        .body("{\"name\":")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert!(err["message"].is_string());
    Ok(())
}
