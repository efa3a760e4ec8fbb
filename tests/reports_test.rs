//! Integration tests for the budget and monthly reports.

mod common;

use axum::http::StatusCode;
use common::TestClient;

#[tokio::test]
async fn test_budget_report_rolls_up_to_ancestors() {
    let client = TestClient::new();
    let (org, revenue, expense) = client.seed_small_chart().await;

    client.create_entry(org, revenue, 2025, 1, "planned", 1_000_00).await;
    client.create_entry(org, revenue, 2025, 1, "actual", 900_00).await;
    client.create_entry(org, expense, 2025, 1, "planned", 600_00).await;
    client.create_entry(org, expense, 2025, 2, "actual", 650_00).await;

    let (status, body) = client
        .get_json(&format!(
            "/api/reports/budget?organization_id={}&year=2025",
            org
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period_label"], "2025");

    let nodes = body["nodes"].as_array().unwrap();
    // Roots sorted by code: 4 (expenses) before 8 (revenue).
    let expenses = &nodes[0];
    assert_eq!(expenses["code"], "4");
    assert_eq!(expenses["planned_cents"], 60000);
    assert_eq!(expenses["actual_cents"], 65000);
    assert_eq!(expenses["variance_cents"], 5000);

    // The same sums appear on the subgroup and the line item.
    let personnel = &expenses["children"][0];
    assert_eq!(personnel["code"], "40");
    assert_eq!(personnel["planned_cents"], 60000);
    let salaries = &personnel["children"][0];
    assert_eq!(salaries["code"], "4000");
    assert_eq!(salaries["planned_cents"], 60000);

    let totals = &body["totals"];
    assert_eq!(totals["revenue"]["planned_cents"], 100000);
    assert_eq!(totals["revenue"]["actual_cents"], 90000);
    assert_eq!(totals["expense"]["actual_cents"], 65000);
    assert_eq!(totals["result"]["planned_cents"], 40000);
    assert_eq!(totals["result"]["actual_cents"], 25000);
}

#[tokio::test]
async fn test_budget_report_period_filtering() {
    let client = TestClient::new();
    let (org, _, expense) = client.seed_small_chart().await;

    client.create_entry(org, expense, 2025, 2, "actual", 100_00).await;
    client.create_entry(org, expense, 2025, 5, "actual", 200_00).await;
    client.create_entry(org, expense, 2025, 11, "actual", 400_00).await;

    // Q2 only sees the May entry.
    let (_, body) = client
        .get_json(&format!(
            "/api/reports/budget?organization_id={}&year=2025&preset=q2",
            org
        ))
        .await;
    assert_eq!(body["period_label"], "Q2 2025");
    assert_eq!(body["nodes"][0]["actual_cents"], 20000);

    // Explicit months override the preset.
    let (_, body) = client
        .get_json(&format!(
            "/api/reports/budget?organization_id={}&year=2025&preset=q2&from_month=1&to_month=6",
            org
        ))
        .await;
    assert_eq!(body["nodes"][0]["actual_cents"], 30000);

    // nav=prev shifts to 2024, which has no entries.
    let (_, body) = client
        .get_json(&format!(
            "/api/reports/budget?organization_id={}&year=2025&nav=prev",
            org
        ))
        .await;
    assert_eq!(body["year"], 2024);
    assert_eq!(body["nodes"][0]["actual_cents"], 0);
}

#[tokio::test]
async fn test_budget_report_scoped_to_organization() {
    let client = TestClient::new();
    let (org, _, expense) = client.seed_small_chart().await;
    let (other_org, other_revenue, _) = {
        let other = client.create_organization("Other BV").await;
        client.create_account(other, "8", "Revenue", "revenue").await;
        client.create_account(other, "80", "Sales", "revenue").await;
        let rev = client.create_account(other, "8000", "Sales", "revenue").await;
        (other, rev, 0)
    };

    client.create_entry(org, expense, 2025, 1, "actual", 100_00).await;
    client
        .create_entry(other_org, other_revenue, 2025, 1, "actual", 999_00)
        .await;

    let (_, body) = client
        .get_json(&format!(
            "/api/reports/budget?organization_id={}&year=2025",
            org
        ))
        .await;
    // The other tenant's 999.00 must not leak into this report.
    assert_eq!(body["totals"]["revenue"]["actual_cents"], 0);
    assert_eq!(body["totals"]["expense"]["actual_cents"], 10000);
}

#[tokio::test]
async fn test_budget_report_empty_organization() {
    let client = TestClient::new();
    let org = client.create_organization("Empty BV").await;

    let (status, body) = client
        .get_json(&format!(
            "/api/reports/budget?organization_id={}&year=2025",
            org
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nodes"].as_array().unwrap().len(), 0);
    assert_eq!(body["totals"]["result"]["planned_cents"], 0);
}

#[tokio::test]
async fn test_budget_report_validation() {
    let client = TestClient::new();
    let org = client.create_organization("Acme BV").await;

    let (status, _) = client
        .get(&format!(
            "/api/reports/budget?organization_id={}&year=2025&from_month=9&to_month=3",
            org
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client
        .get(&format!(
            "/api/reports/budget?organization_id={}&year=2025&preset=nonsense",
            org
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client
        .get("/api/reports/budget?organization_id=999&year=2025")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_monthly_report_shape() {
    let client = TestClient::new();
    let (org, revenue, expense) = client.seed_small_chart().await;

    client.create_entry(org, revenue, 2025, 3, "planned", 500_00).await;
    client.create_entry(org, revenue, 2025, 3, "actual", 480_00).await;
    client.create_entry(org, expense, 2025, 7, "actual", 120_00).await;

    let (status, body) = client
        .get_json(&format!(
            "/api/reports/monthly?organization_id={}&year=2025",
            org
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["rows"].as_array().unwrap();
    // Only the two line items, sorted by code.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["code"], "4000");
    assert_eq!(rows[1]["code"], "8000");

    let sales = &rows[1];
    assert_eq!(sales["months"].as_array().unwrap().len(), 12);
    assert_eq!(sales["months"][2]["planned_cents"], 50000);
    assert_eq!(sales["months"][2]["actual_cents"], 48000);
    assert_eq!(sales["months"][0]["planned_cents"], 0);
    assert_eq!(sales["total_planned_cents"], 50000);

    assert_eq!(rows[0]["months"][6]["actual_cents"], 12000);
}

#[tokio::test]
async fn test_multiple_entries_per_month_sum() {
    let client = TestClient::new();
    let (org, _, expense) = client.seed_small_chart().await;

    client.create_entry(org, expense, 2025, 1, "actual", 10_00).await;
    client.create_entry(org, expense, 2025, 1, "actual", 15_00).await;

    let (_, body) = client
        .get_json(&format!(
            "/api/reports/budget?organization_id={}&year=2025&preset=m1",
            org
        ))
        .await;
    assert_eq!(body["totals"]["expense"]["actual_cents"], 2500);
}
