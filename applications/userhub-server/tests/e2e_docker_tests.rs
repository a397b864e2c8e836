//! End-to-end scenario against a freshly migrated PostgreSQL
//!
//! Run with: cargo test -p userhub-server --features docker-tests

#![cfg(feature = "docker-tests")]

mod common;

use axum::{http::StatusCode, Router};
use common::{body_json, get, post_json, send};
use serde_json::json;
use std::sync::Arc;
use userhub_server::{create_router, AppState};
use userhub_storage::{create_pool, DatabaseSettings, PgUserStore};
use userhub_testdb::{is_docker_available, migrations_dir, TestDatabase, TestDatabaseConfig};

#[tokio::test]
async fn test_app() {
    if !is_docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let db = TestDatabase::start(TestDatabaseConfig::new(
        "user",
        "password",
        "users",
        migrations_dir(),
    ))
    .await
    .expect("Failed to provision test database");

    let store = PgUserStore::new(create_pool(&DatabaseSettings {
        host: db.host.clone(),
        port: db.port,
        user: db.username.clone(),
        password: db.password.clone(),
        database: db.database.clone(),
    }));
    let app = create_router(AppState::new(Arc::new(store.clone())));

    // Run the scenario on its own task so a failed assertion still reaches teardown
    let outcome = tokio::spawn(scenario(app)).await;

    store.close().await;
    let report = db.close().await;

    if let Err(e) = outcome {
        std::panic::resume_unwind(e.into_panic());
    }
    assert!(report.is_clean(), "teardown failures: {:?}", report.failures);
}

async fn scenario(app: Router) {
    // create user
    let response = send(&app, post_json("/users", r#"{"name": "test"}"#)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, json!({"id": 1, "name": "test"}));

    // find user by id
    let response = send(&app, get("/users/1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"id": 1, "name": "test"}));

    // find users
    let response = send(&app, get("/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([{"id": 1, "name": "test"}]));

    // unknown id against the real store
    let response = send(&app, get("/users/2")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
