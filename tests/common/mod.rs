//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` that drives the full router against an
//! in-memory database. Methods are intentionally broad to support the
//! scenarios across different test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use flowqi::config::Config;
use flowqi::db::{create_in_memory_pool, migrations};
use flowqi::handlers;
use flowqi::state::AppState;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Create a new test client with a fresh in-memory database.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn, Path::new("migrations"))
                .expect("Failed to run migrations");
        }

        let config = Config {
            host: "127.0.0.1".into(),
            port: 8080,
            database_path: PathBuf::from(":memory:"),
            migrations_path: PathBuf::from("migrations"),
        };

        let state = AppState {
            db: pool,
            config: Arc::new(config),
        };

        Self { state }
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<&Value>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.request("GET", uri, None).await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).unwrap_or(Value::Null);
        (status, parsed)
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let (status, text) = self.request("POST", uri, Some(body)).await;
        let parsed = serde_json::from_str(&text).unwrap_or(Value::Null);
        (status, parsed)
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let (status, text) = self.request("PUT", uri, Some(body)).await;
        let parsed = serde_json::from_str(&text).unwrap_or(Value::Null);
        (status, parsed)
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        self.request("DELETE", uri, None).await
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create an organization and return its id.
    pub async fn create_organization(&self, name: &str) -> i64 {
        let (status, body) = self
            .post_json("/api/organizations", &json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create organization: {}", body);
        body["id"].as_i64().unwrap()
    }

    /// Create a GL account and return its id.
    pub async fn create_account(&self, org_id: i64, code: &str, name: &str, kind: &str) -> i64 {
        let (status, body) = self
            .post_json(
                "/api/accounts",
                &json!({
                    "organization_id": org_id,
                    "code": code,
                    "name": name,
                    "kind": kind,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create account {}: {}", code, body);
        body["id"].as_i64().unwrap()
    }

    /// Create a budget entry and return its id.
    pub async fn create_entry(
        &self,
        org_id: i64,
        account_id: i64,
        year: i32,
        month: u32,
        entry_type: &str,
        amount_cents: i64,
    ) -> i64 {
        let (status, body) = self
            .post_json(
                "/api/entries",
                &json!({
                    "organization_id": org_id,
                    "gl_account_id": account_id,
                    "year": year,
                    "month": month,
                    "entry_type": entry_type,
                    "amount_cents": amount_cents,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create entry: {}", body);
        body["id"].as_i64().unwrap()
    }

    /// Seed an organization with a small expense/revenue chart and return
    /// (org_id, revenue line id, expense line id).
    pub async fn seed_small_chart(&self) -> (i64, i64, i64) {
        let org = self.create_organization("Acme BV").await;
        self.create_account(org, "8", "Revenue", "revenue").await;
        self.create_account(org, "80", "Sales", "revenue").await;
        let revenue = self
            .create_account(org, "8000", "Product sales", "revenue")
            .await;
        self.create_account(org, "4", "Operating expenses", "expense")
            .await;
        self.create_account(org, "40", "Personnel", "expense").await;
        let expense = self.create_account(org, "4000", "Salaries", "expense").await;
        (org, revenue, expense)
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
