use crate::models::gl_account::{AccountKind, GlAccount, NewGlAccount, DEFAULT_CHART};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

fn row_to_account(row: &Row) -> rusqlite::Result<GlAccount> {
    let kind: String = row.get(4)?;
    Ok(GlAccount {
        id: row.get(0)?,
        organization_id: row.get(1)?,
        code: row.get(2)?,
        name: row.get(3)?,
        kind: kind.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, e.into())
        })?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn list_accounts(
    conn: &Connection,
    organization_id: i64,
    kind: Option<AccountKind>,
) -> rusqlite::Result<Vec<GlAccount>> {
    let mut sql = String::from(
        "SELECT id, organization_id, code, name, kind, created_at, updated_at
         FROM gl_accounts
         WHERE organization_id = ?",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(organization_id)];

    if let Some(kind) = kind {
        sql.push_str(" AND kind = ?");
        params_vec.push(Box::new(kind.as_str()));
    }

    sql.push_str(" ORDER BY code");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;

    let accounts: Vec<GlAccount> = stmt
        .query_map(params_refs.as_slice(), |row| row_to_account(row))?
        .filter_map(|a| a.ok())
        .collect();

    debug!(
        organization_id,
        count = accounts.len(),
        "Listed GL accounts"
    );
    Ok(accounts)
}

pub fn get_account(conn: &Connection, id: i64) -> rusqlite::Result<Option<GlAccount>> {
    conn.query_row(
        "SELECT id, organization_id, code, name, kind, created_at, updated_at
         FROM gl_accounts WHERE id = ?",
        [id],
        |row| row_to_account(row),
    )
    .optional()
}

pub fn get_account_by_code(
    conn: &Connection,
    organization_id: i64,
    code: &str,
) -> rusqlite::Result<Option<GlAccount>> {
    conn.query_row(
        "SELECT id, organization_id, code, name, kind, created_at, updated_at
         FROM gl_accounts WHERE organization_id = ? AND code = ?",
        params![organization_id, code],
        |row| row_to_account(row),
    )
    .optional()
}

pub fn create_account(conn: &Connection, account: &NewGlAccount) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO gl_accounts (organization_id, code, name, kind) VALUES (?, ?, ?, ?)",
        params![
            account.organization_id,
            account.code,
            account.name,
            account.kind.as_str()
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(account_id = id, code = %account.code, "Created GL account");
    Ok(id)
}

pub fn update_account(
    conn: &Connection,
    id: i64,
    code: &str,
    name: &str,
    kind: AccountKind,
) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE gl_accounts SET code = ?, name = ?, kind = ?,
         updated_at = datetime('now') WHERE id = ?",
        params![code, name, kind.as_str(), id],
    )?;
    if rows > 0 {
        debug!(account_id = id, code = %code, "Updated GL account");
    }
    Ok(rows > 0)
}

pub fn delete_account(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM gl_accounts WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(account_id = id, "Deleted GL account");
    }
    Ok(rows > 0)
}

pub fn count_entries_for_account(conn: &Connection, account_id: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM budget_entries WHERE gl_account_id = ?",
        [account_id],
        |row| row.get(0),
    )
}

/// Seed the starter chart for a new organization. Codes already present
/// are left untouched.
pub fn seed_default_chart(conn: &Connection, organization_id: i64) -> rusqlite::Result<usize> {
    let mut created = 0;
    for (code, name, kind) in DEFAULT_CHART {
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO gl_accounts (organization_id, code, name, kind)
             VALUES (?, ?, ?, ?)",
            params![organization_id, code, name, kind.as_str()],
        )?;
        created += inserted;
    }
    info!(organization_id, count = created, "Seeded default chart");
    Ok(created)
}
