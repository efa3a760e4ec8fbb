use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::db::queries::budget_entries::{self, BudgetEntryFilter};
use crate::db::queries::gl_accounts;
use crate::error::{AppError, AppResult};
use crate::models::gl_account::AccountLevel;
use crate::models::{BudgetEntry, EntryType, NewBudgetEntry};
use crate::state::AppState;

fn validate(conn: &rusqlite::Connection, entry: &NewBudgetEntry) -> AppResult<()> {
    if !(1..=12).contains(&entry.month) {
        return Err(AppError::Validation(format!(
            "Month must be in 1..=12, got {}",
            entry.month
        )));
    }
    if !(1970..=2100).contains(&entry.year) {
        return Err(AppError::Validation(format!(
            "Year {} out of range",
            entry.year
        )));
    }

    let account = gl_accounts::get_account(conn, entry.gl_account_id)?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))?;
    if account.organization_id != entry.organization_id {
        return Err(AppError::Validation(
            "Account belongs to a different organization".into(),
        ));
    }
    if account.level() != AccountLevel::LineItem {
        return Err(AppError::Validation(format!(
            "Entries attach to line items only; {} is a group account",
            account.code
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct EntryListParams {
    pub organization_id: Option<i64>,
    pub gl_account_id: Option<i64>,
    pub year: Option<i32>,
    pub from_month: Option<u32>,
    pub to_month: Option<u32>,
    pub entry_type: Option<EntryType>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<EntryListParams>,
) -> AppResult<Json<Vec<BudgetEntry>>> {
    let conn = state.db.get()?;

    let filter = BudgetEntryFilter {
        organization_id: params.organization_id,
        gl_account_id: params.gl_account_id,
        year: params.year,
        from_month: params.from_month,
        to_month: params.to_month,
        entry_type: params.entry_type,
    };

    let entries = budget_entries::list_entries(&conn, &filter)?;
    Ok(Json(entries))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BudgetEntry>> {
    let conn = state.db.get()?;
    let entry = budget_entries::get_entry(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Budget entry not found".into()))?;
    Ok(Json(entry))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new_entry): Json<NewBudgetEntry>,
) -> AppResult<(StatusCode, Json<BudgetEntry>)> {
    let conn = state.db.get()?;
    validate(&conn, &new_entry)?;

    let id = budget_entries::create_entry(&conn, &new_entry)?;
    let entry = budget_entries::get_entry(&conn, id)?
        .ok_or_else(|| AppError::Internal("Entry vanished after insert".into()))?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<NewBudgetEntry>,
) -> AppResult<Json<BudgetEntry>> {
    let conn = state.db.get()?;

    let existing = budget_entries::get_entry(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Budget entry not found".into()))?;
    if form.organization_id != existing.organization_id {
        return Err(AppError::Validation(
            "Entries cannot move between organizations".into(),
        ));
    }
    validate(&conn, &form)?;

    budget_entries::update_entry(&conn, id, &form)?;

    let entry = budget_entries::get_entry(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Budget entry not found".into()))?;
    Ok(Json(entry))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let conn = state.db.get()?;
    if !budget_entries::delete_entry(&conn, id)? {
        return Err(AppError::NotFound("Budget entry not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
