use crate::models::budget_entry::{BudgetEntry, EntryType, NewBudgetEntry};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

#[derive(Default)]
pub struct BudgetEntryFilter {
    pub organization_id: Option<i64>,
    pub gl_account_id: Option<i64>,
    pub year: Option<i32>,
    pub from_month: Option<u32>,
    pub to_month: Option<u32>,
    pub entry_type: Option<EntryType>,
}

fn row_to_entry(row: &Row) -> rusqlite::Result<BudgetEntry> {
    let entry_type: String = row.get(5)?;
    Ok(BudgetEntry {
        id: row.get(0)?,
        organization_id: row.get(1)?,
        gl_account_id: row.get(2)?,
        year: row.get(3)?,
        month: row.get(4)?,
        entry_type: entry_type.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, e.into())
        })?,
        amount_cents: row.get(6)?,
        note: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

pub fn list_entries(
    conn: &Connection,
    filter: &BudgetEntryFilter,
) -> rusqlite::Result<Vec<BudgetEntry>> {
    let mut sql = String::from(
        "SELECT id, organization_id, gl_account_id, year, month, entry_type,
                amount_cents, note, created_at, updated_at
         FROM budget_entries
         WHERE 1=1",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(organization_id) = filter.organization_id {
        sql.push_str(" AND organization_id = ?");
        params_vec.push(Box::new(organization_id));
    }
    if let Some(gl_account_id) = filter.gl_account_id {
        sql.push_str(" AND gl_account_id = ?");
        params_vec.push(Box::new(gl_account_id));
    }
    if let Some(year) = filter.year {
        sql.push_str(" AND year = ?");
        params_vec.push(Box::new(year));
    }
    if let Some(from_month) = filter.from_month {
        sql.push_str(" AND month >= ?");
        params_vec.push(Box::new(from_month));
    }
    if let Some(to_month) = filter.to_month {
        sql.push_str(" AND month <= ?");
        params_vec.push(Box::new(to_month));
    }
    if let Some(entry_type) = filter.entry_type {
        sql.push_str(" AND entry_type = ?");
        params_vec.push(Box::new(entry_type.as_str()));
    }

    sql.push_str(" ORDER BY year, month, id");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;

    let entries: Vec<BudgetEntry> = stmt
        .query_map(params_refs.as_slice(), |row| row_to_entry(row))?
        .filter_map(|e| e.ok())
        .collect();

    debug!(count = entries.len(), "Listed budget entries");
    Ok(entries)
}

pub fn get_entry(conn: &Connection, id: i64) -> rusqlite::Result<Option<BudgetEntry>> {
    conn.query_row(
        "SELECT id, organization_id, gl_account_id, year, month, entry_type,
                amount_cents, note, created_at, updated_at
         FROM budget_entries WHERE id = ?",
        [id],
        |row| row_to_entry(row),
    )
    .optional()
}

pub fn create_entry(conn: &Connection, entry: &NewBudgetEntry) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO budget_entries
         (organization_id, gl_account_id, year, month, entry_type, amount_cents, note)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            entry.organization_id,
            entry.gl_account_id,
            entry.year,
            entry.month,
            entry.entry_type.as_str(),
            entry.amount_cents,
            entry.note
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(
        entry_id = id,
        account_id = entry.gl_account_id,
        year = entry.year,
        month = entry.month,
        entry_type = %entry.entry_type,
        "Created budget entry"
    );
    Ok(id)
}

pub fn update_entry(conn: &Connection, id: i64, entry: &NewBudgetEntry) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE budget_entries SET gl_account_id = ?, year = ?, month = ?,
         entry_type = ?, amount_cents = ?, note = ?,
         updated_at = datetime('now') WHERE id = ?",
        params![
            entry.gl_account_id,
            entry.year,
            entry.month,
            entry.entry_type.as_str(),
            entry.amount_cents,
            entry.note,
            id
        ],
    )?;
    if rows > 0 {
        debug!(entry_id = id, "Updated budget entry");
    }
    Ok(rows > 0)
}

pub fn delete_entry(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM budget_entries WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(entry_id = id, "Deleted budget entry");
    }
    Ok(rows > 0)
}

/// Planned and actual totals per account over a month range, one row per
/// account that has entries in the period.
#[derive(Debug, Clone)]
pub struct AccountPeriodSums {
    pub gl_account_id: i64,
    pub planned_cents: i64,
    pub actual_cents: i64,
}

pub fn sum_by_account(
    conn: &Connection,
    organization_id: i64,
    year: i32,
    from_month: u32,
    to_month: u32,
) -> rusqlite::Result<Vec<AccountPeriodSums>> {
    let mut stmt = conn.prepare(
        "SELECT gl_account_id,
                COALESCE(SUM(CASE WHEN entry_type = 'planned' THEN amount_cents END), 0),
                COALESCE(SUM(CASE WHEN entry_type = 'actual' THEN amount_cents END), 0)
         FROM budget_entries
         WHERE organization_id = ? AND year = ? AND month BETWEEN ? AND ?
         GROUP BY gl_account_id",
    )?;

    let sums = stmt
        .query_map(
            params![organization_id, year, from_month, to_month],
            |row| {
                Ok(AccountPeriodSums {
                    gl_account_id: row.get(0)?,
                    planned_cents: row.get(1)?,
                    actual_cents: row.get(2)?,
                })
            },
        )?
        .filter_map(|s| s.ok())
        .collect();

    Ok(sums)
}

/// Planned and actual totals per account and month for one year.
#[derive(Debug, Clone)]
pub struct AccountMonthSums {
    pub gl_account_id: i64,
    pub month: u32,
    pub planned_cents: i64,
    pub actual_cents: i64,
}

pub fn sum_by_account_and_month(
    conn: &Connection,
    organization_id: i64,
    year: i32,
) -> rusqlite::Result<Vec<AccountMonthSums>> {
    let mut stmt = conn.prepare(
        "SELECT gl_account_id, month,
                COALESCE(SUM(CASE WHEN entry_type = 'planned' THEN amount_cents END), 0),
                COALESCE(SUM(CASE WHEN entry_type = 'actual' THEN amount_cents END), 0)
         FROM budget_entries
         WHERE organization_id = ? AND year = ?
         GROUP BY gl_account_id, month
         ORDER BY gl_account_id, month",
    )?;

    let sums = stmt
        .query_map(params![organization_id, year], |row| {
            Ok(AccountMonthSums {
                gl_account_id: row.get(0)?,
                month: row.get(1)?,
                planned_cents: row.get(2)?,
                actual_cents: row.get(3)?,
            })
        })?
        .filter_map(|s| s.ok())
        .collect();

    Ok(sums)
}
