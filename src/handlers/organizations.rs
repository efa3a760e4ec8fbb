use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::db::queries::{gl_accounts, organizations};
use crate::error::{AppError, AppResult};
use crate::models::{NewOrganization, Organization};
use crate::state::AppState;

fn validate(name: &str, currency: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Organization name is required".into()));
    }
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(AppError::Validation(format!(
            "Currency must be a 3-letter uppercase code, got '{}'",
            currency
        )));
    }
    Ok(())
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Organization>>> {
    let conn = state.db.get()?;
    let orgs = organizations::list_organizations(&conn)?;
    Ok(Json(orgs))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Organization>> {
    let conn = state.db.get()?;
    let org = organizations::get_organization(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;
    Ok(Json(org))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new_org): Json<NewOrganization>,
) -> AppResult<(StatusCode, Json<Organization>)> {
    validate(&new_org.name, &new_org.currency)?;

    let conn = state.db.get()?;
    let id = organizations::create_organization(&conn, &new_org)?;

    if new_org.seed_chart {
        gl_accounts::seed_default_chart(&conn, id)?;
    }

    let org = organizations::get_organization(&conn, id)?
        .ok_or_else(|| AppError::Internal("Organization vanished after insert".into()))?;
    Ok((StatusCode::CREATED, Json(org)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrganization {
    pub name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<UpdateOrganization>,
) -> AppResult<Json<Organization>> {
    validate(&form.name, &form.currency)?;

    let conn = state.db.get()?;
    if !organizations::update_organization(&conn, id, &form.name, &form.currency)? {
        return Err(AppError::NotFound("Organization not found".into()));
    }

    let org = organizations::get_organization(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;
    Ok(Json(org))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let conn = state.db.get()?;
    if !organizations::delete_organization(&conn, id)? {
        return Err(AppError::NotFound("Organization not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
