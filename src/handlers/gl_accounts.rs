use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::db::queries::{gl_accounts, organizations};
use crate::error::{AppError, AppResult};
use crate::models::gl_account::{parent_code, AccountLevel};
use crate::models::{AccountKind, GlAccount, NewGlAccount};
use crate::services::hierarchy::{build_tree, AccountNode};
use crate::state::AppState;

fn validate_code(code: &str) -> AppResult<()> {
    if code.is_empty() || code.len() > 8 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(format!(
            "Account code must be 1-8 digits, got '{}'",
            code
        )));
    }
    Ok(())
}

/// A child's kind must match its parent's when the parent exists in the
/// chart. `exclude_id` skips the account being edited.
fn validate_kind_matches_parent(
    conn: &rusqlite::Connection,
    organization_id: i64,
    code: &str,
    kind: AccountKind,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    let Some(parent) = parent_code(code) else {
        return Ok(());
    };
    if let Some(parent_account) = gl_accounts::get_account_by_code(conn, organization_id, parent)? {
        if Some(parent_account.id) != exclude_id && parent_account.kind != kind {
            return Err(AppError::Validation(format!(
                "Account {} is {} but its parent {} is {}",
                code, kind, parent_account.code, parent_account.kind
            )));
        }
    }
    Ok(())
}

/// The reverse direction: accounts that would sit under `code` must share
/// its kind, otherwise a kind flip (or a code change that acquires
/// children) leaves a mixed-kind subtree the report totals misclassify.
fn validate_kind_matches_children(
    conn: &rusqlite::Connection,
    organization_id: i64,
    code: &str,
    kind: AccountKind,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    let accounts = gl_accounts::list_accounts(conn, organization_id, None)?;
    if let Some(child) = accounts.iter().find(|a| {
        Some(a.id) != exclude_id && a.kind != kind && parent_code(&a.code) == Some(code)
    }) {
        return Err(AppError::Validation(format!(
            "Account {} is {} but its child {} is {}",
            code, kind, child.code, child.kind
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct AccountListParams {
    pub organization_id: i64,
    pub kind: Option<AccountKind>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AccountListParams>,
) -> AppResult<Json<Vec<GlAccount>>> {
    let conn = state.db.get()?;
    let accounts = gl_accounts::list_accounts(&conn, params.organization_id, params.kind)?;
    Ok(Json(accounts))
}

pub async fn tree(
    State(state): State<AppState>,
    Query(params): Query<AccountListParams>,
) -> AppResult<Json<Vec<AccountNode>>> {
    let conn = state.db.get()?;
    let accounts = gl_accounts::list_accounts(&conn, params.organization_id, params.kind)?;
    Ok(Json(build_tree(accounts)))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<GlAccount>> {
    let conn = state.db.get()?;
    let account = gl_accounts::get_account(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))?;
    Ok(Json(account))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new_account): Json<NewGlAccount>,
) -> AppResult<(StatusCode, Json<GlAccount>)> {
    validate_code(&new_account.code)?;

    let conn = state.db.get()?;

    organizations::get_organization(&conn, new_account.organization_id)?
        .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;

    if gl_accounts::get_account_by_code(&conn, new_account.organization_id, &new_account.code)?
        .is_some()
    {
        return Err(AppError::Validation(format!(
            "Account code {} already exists",
            new_account.code
        )));
    }

    validate_kind_matches_parent(
        &conn,
        new_account.organization_id,
        &new_account.code,
        new_account.kind,
        None,
    )?;
    validate_kind_matches_children(
        &conn,
        new_account.organization_id,
        &new_account.code,
        new_account.kind,
        None,
    )?;

    let id = gl_accounts::create_account(&conn, &new_account)?;
    let account = gl_accounts::get_account(&conn, id)?
        .ok_or_else(|| AppError::Internal("Account vanished after insert".into()))?;
    Ok((StatusCode::CREATED, Json(account)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateGlAccount {
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<UpdateGlAccount>,
) -> AppResult<Json<GlAccount>> {
    validate_code(&form.code)?;

    let conn = state.db.get()?;

    let existing = gl_accounts::get_account(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))?;

    if let Some(other) =
        gl_accounts::get_account_by_code(&conn, existing.organization_id, &form.code)?
    {
        if other.id != id {
            return Err(AppError::Validation(format!(
                "Account code {} already exists",
                form.code
            )));
        }
    }

    validate_kind_matches_parent(
        &conn,
        existing.organization_id,
        &form.code,
        form.kind,
        Some(id),
    )?;
    validate_kind_matches_children(
        &conn,
        existing.organization_id,
        &form.code,
        form.kind,
        Some(id),
    )?;

    // Entries attach to line items only; a recode must not turn an
    // account with entries into a group.
    if AccountLevel::of_code(&form.code) != AccountLevel::LineItem {
        let entry_count = gl_accounts::count_entries_for_account(&conn, id)?;
        if entry_count > 0 {
            return Err(AppError::Validation(format!(
                "Account has {} budget entries and cannot become a group",
                entry_count
            )));
        }
    }

    gl_accounts::update_account(&conn, id, &form.code, &form.name, form.kind)?;

    let account = gl_accounts::get_account(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))?;
    Ok(Json(account))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let conn = state.db.get()?;

    gl_accounts::get_account(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))?;

    let entry_count = gl_accounts::count_entries_for_account(&conn, id)?;
    if entry_count > 0 {
        return Err(AppError::Validation(format!(
            "Account has {} budget entries and cannot be deleted",
            entry_count
        )));
    }

    gl_accounts::delete_account(&conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}
