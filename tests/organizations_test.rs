//! Integration tests for organization CRUD and tenant scoping.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde_json::json;

#[tokio::test]
async fn test_organization_crud() {
    let client = TestClient::new();

    let (status, body) = client
        .post_json("/api/organizations", &json!({ "name": "Acme BV" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Acme BV");
    assert_eq!(body["currency"], "EUR");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = client.get_json(&format!("/api/organizations/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme BV");

    let (status, body) = client
        .put_json(
            &format!("/api/organizations/{}", id),
            &json!({ "name": "Acme Holding BV", "currency": "USD" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme Holding BV");
    assert_eq!(body["currency"], "USD");

    let (status, _) = client.delete(&format!("/api/organizations/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = client.get(&format!("/api/organizations/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_name_is_rejected() {
    let client = TestClient::new();
    let (status, _) = client
        .post_json("/api/organizations", &json!({ "name": "  " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_currency_is_rejected() {
    let client = TestClient::new();
    let (status, body) = client
        .post_json(
            "/api/organizations",
            &json!({ "name": "Acme", "currency": "euro" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Currency"));
}

#[tokio::test]
async fn test_seed_chart_creates_default_accounts() {
    let client = TestClient::new();

    let (status, body) = client
        .post_json(
            "/api/organizations",
            &json!({ "name": "Seeded BV", "seed_chart": true }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let org = body["id"].as_i64().unwrap();

    let (status, accounts) = client
        .get_json(&format!("/api/accounts?organization_id={}", org))
        .await;
    assert_eq!(status, StatusCode::OK);
    let accounts = accounts.as_array().unwrap();
    assert!(!accounts.is_empty());
    // The seed includes both kinds and all three levels.
    assert!(accounts.iter().any(|a| a["kind"] == "revenue"));
    assert!(accounts.iter().any(|a| a["kind"] == "expense"));
    assert!(accounts.iter().any(|a| a["code"] == "4"));
    assert!(accounts.iter().any(|a| a["code"] == "40"));
    assert!(accounts.iter().any(|a| a["code"] == "4000"));
}

#[tokio::test]
async fn test_delete_cascades_accounts_and_entries() {
    let client = TestClient::new();
    let (org, revenue, _) = client.seed_small_chart().await;
    let entry = client
        .create_entry(org, revenue, 2025, 1, "planned", 100_00)
        .await;

    let (status, _) = client.delete(&format!("/api/organizations/{}", org)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = client.get(&format!("/api/accounts/{}", revenue)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = client.get(&format!("/api/entries/{}", entry)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_organizations_sorted_by_name() {
    let client = TestClient::new();
    client.create_organization("Zebra BV").await;
    client.create_organization("Alpha BV").await;

    let (status, body) = client.get_json("/api/organizations").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha BV", "Zebra BV"]);
}
