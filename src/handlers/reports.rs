use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;

use crate::db::queries::{budget_entries, gl_accounts, organizations};
use crate::error::{AppError, AppResult};
use crate::period::{resolve_range, MonthRange};
use crate::services::export;
use crate::services::report::{
    build_budget_report, build_monthly_report, BudgetReport, MonthlyReport,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BudgetReportParams {
    pub organization_id: i64,
    pub year: i32,
    pub preset: Option<String>,
    pub from_month: Option<u32>,
    pub to_month: Option<u32>,
    pub nav: Option<String>,
}

fn resolve_params(params: &BudgetReportParams) -> AppResult<MonthRange> {
    resolve_range(
        params.year,
        params.preset.as_deref(),
        params.from_month,
        params.to_month,
        params.nav.as_deref(),
    )
    .map_err(AppError::Validation)
}

fn load_budget_report(state: &AppState, params: &BudgetReportParams) -> AppResult<BudgetReport> {
    let range = resolve_params(params)?;
    let conn = state.db.get()?;

    organizations::get_organization(&conn, params.organization_id)?
        .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;

    let accounts = gl_accounts::list_accounts(&conn, params.organization_id, None)?;
    let sums = budget_entries::sum_by_account(
        &conn,
        params.organization_id,
        range.year,
        range.from_month,
        range.to_month,
    )?;

    Ok(build_budget_report(
        params.organization_id,
        range,
        accounts,
        sums,
    ))
}

pub async fn budget(
    State(state): State<AppState>,
    Query(params): Query<BudgetReportParams>,
) -> AppResult<Json<BudgetReport>> {
    let report = load_budget_report(&state, &params)?;
    Ok(Json(report))
}

pub async fn budget_export(
    State(state): State<AppState>,
    Query(params): Query<BudgetReportParams>,
) -> AppResult<impl IntoResponse> {
    let report = load_budget_report(&state, &params)?;
    let csv = export::budget_report_csv(&report)?;

    let filename = format!(
        "budget_{}_{}.csv",
        report.organization_id,
        report.period_label.replace(' ', "_")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}

#[derive(Debug, Deserialize)]
pub struct MonthlyReportParams {
    pub organization_id: i64,
    pub year: i32,
}

fn load_monthly_report(state: &AppState, params: &MonthlyReportParams) -> AppResult<MonthlyReport> {
    if !(1970..=2100).contains(&params.year) {
        return Err(AppError::Validation(format!(
            "Year {} out of range",
            params.year
        )));
    }

    let conn = state.db.get()?;
    organizations::get_organization(&conn, params.organization_id)?
        .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;

    let accounts = gl_accounts::list_accounts(&conn, params.organization_id, None)?;
    let sums = budget_entries::sum_by_account_and_month(&conn, params.organization_id, params.year)?;

    Ok(build_monthly_report(
        params.organization_id,
        params.year,
        accounts,
        sums,
    ))
}

pub async fn monthly(
    State(state): State<AppState>,
    Query(params): Query<MonthlyReportParams>,
) -> AppResult<Json<MonthlyReport>> {
    let report = load_monthly_report(&state, &params)?;
    Ok(Json(report))
}

pub async fn monthly_export(
    State(state): State<AppState>,
    Query(params): Query<MonthlyReportParams>,
) -> AppResult<impl IntoResponse> {
    let report = load_monthly_report(&state, &params)?;
    let csv = export::monthly_report_csv(&report)?;

    let filename = format!("monthly_{}_{}.csv", report.organization_id, report.year);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}
