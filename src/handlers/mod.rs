pub mod budget_entries;
pub mod gl_accounts;
pub mod organizations;
pub mod reports;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Organizations
        .route(
            "/api/organizations",
            get(organizations::list).post(organizations::create),
        )
        .route(
            "/api/organizations/:id",
            get(organizations::show)
                .put(organizations::update)
                .delete(organizations::delete),
        )
        // Chart of accounts
        .route(
            "/api/accounts",
            get(gl_accounts::list).post(gl_accounts::create),
        )
        .route("/api/accounts/tree", get(gl_accounts::tree))
        .route(
            "/api/accounts/:id",
            get(gl_accounts::show)
                .put(gl_accounts::update)
                .delete(gl_accounts::delete),
        )
        // Budget entries
        .route(
            "/api/entries",
            get(budget_entries::list).post(budget_entries::create),
        )
        .route(
            "/api/entries/:id",
            get(budget_entries::show)
                .put(budget_entries::update)
                .delete(budget_entries::delete),
        )
        // Reports
        .route("/api/reports/budget", get(reports::budget))
        .route("/api/reports/budget/export", get(reports::budget_export))
        .route("/api/reports/monthly", get(reports::monthly))
        .route("/api/reports/monthly/export", get(reports::monthly_export))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
