use crate::models::organization::{NewOrganization, Organization};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

fn row_to_organization(row: &Row) -> rusqlite::Result<Organization> {
    Ok(Organization {
        id: row.get(0)?,
        name: row.get(1)?,
        currency: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

pub fn list_organizations(conn: &Connection) -> rusqlite::Result<Vec<Organization>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, currency, created_at, updated_at
         FROM organizations
         ORDER BY name",
    )?;

    let organizations = stmt
        .query_map([], |row| row_to_organization(row))?
        .filter_map(|o| o.ok())
        .collect();

    Ok(organizations)
}

pub fn get_organization(conn: &Connection, id: i64) -> rusqlite::Result<Option<Organization>> {
    conn.query_row(
        "SELECT id, name, currency, created_at, updated_at
         FROM organizations WHERE id = ?",
        [id],
        |row| row_to_organization(row),
    )
    .optional()
}

pub fn create_organization(conn: &Connection, org: &NewOrganization) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO organizations (name, currency) VALUES (?, ?)",
        params![org.name, org.currency],
    )?;
    let id = conn.last_insert_rowid();
    debug!(organization_id = id, name = %org.name, "Created organization");
    Ok(id)
}

pub fn update_organization(
    conn: &Connection,
    id: i64,
    name: &str,
    currency: &str,
) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE organizations SET name = ?, currency = ?,
         updated_at = datetime('now') WHERE id = ?",
        params![name, currency, id],
    )?;
    if rows > 0 {
        debug!(organization_id = id, name = %name, "Updated organization");
    }
    Ok(rows > 0)
}

/// Cascades to the organization's accounts and entries via foreign keys.
pub fn delete_organization(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM organizations WHERE id = ?", [id])?;
    if rows > 0 {
        warn!(organization_id = id, "Deleted organization");
    }
    Ok(rows > 0)
}
