//! Aggregates budget entries into the account tree and computes
//! planned/actual variance per node and for the report totals.

use crate::db::queries::budget_entries::{AccountMonthSums, AccountPeriodSums};
use crate::models::gl_account::{AccountKind, AccountLevel, GlAccount};
use crate::period::MonthRange;
use crate::services::hierarchy::{build_tree, AccountNode};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct ReportNode {
    pub account_id: i64,
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
    pub level: AccountLevel,
    pub planned_cents: i64,
    pub actual_cents: i64,
    pub variance_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance_pct: Option<f64>,
    pub children: Vec<ReportNode>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ColumnTotals {
    pub planned_cents: i64,
    pub actual_cents: i64,
    pub variance_cents: i64,
}

impl ColumnTotals {
    fn add(&mut self, planned: i64, actual: i64) {
        self.planned_cents += planned;
        self.actual_cents += actual;
        self.variance_cents = self.actual_cents - self.planned_cents;
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ReportTotals {
    pub revenue: ColumnTotals,
    pub expense: ColumnTotals,
    /// Operating result: revenue minus expense, per column.
    pub result: ColumnTotals,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    pub organization_id: i64,
    pub year: i32,
    pub from_month: u32,
    pub to_month: u32,
    pub period_label: String,
    pub nodes: Vec<ReportNode>,
    pub totals: ReportTotals,
}

/// Variance is always actual minus planned; whether that is favourable
/// depends on the account kind and is left to the consumer.
fn variance_pct(planned: i64, variance: i64) -> Option<f64> {
    if planned == 0 {
        None
    } else {
        Some(variance as f64 / planned as f64 * 100.0)
    }
}

pub fn build_budget_report(
    organization_id: i64,
    range: MonthRange,
    accounts: Vec<GlAccount>,
    sums: Vec<AccountPeriodSums>,
) -> BudgetReport {
    let by_account: HashMap<i64, (i64, i64)> = sums
        .into_iter()
        .map(|s| (s.gl_account_id, (s.planned_cents, s.actual_cents)))
        .collect();

    let nodes: Vec<ReportNode> = build_tree(accounts)
        .into_iter()
        .map(|n| fold_node(n, &by_account))
        .collect();

    let mut totals = ReportTotals::default();
    for node in &nodes {
        let column = match node.kind {
            AccountKind::Revenue => &mut totals.revenue,
            AccountKind::Expense => &mut totals.expense,
        };
        column.add(node.planned_cents, node.actual_cents);
    }
    totals.result.add(
        totals.revenue.planned_cents - totals.expense.planned_cents,
        totals.revenue.actual_cents - totals.expense.actual_cents,
    );

    BudgetReport {
        organization_id,
        year: range.year,
        from_month: range.from_month,
        to_month: range.to_month,
        period_label: range.label(),
        nodes,
        totals,
    }
}

/// A node's sums are its own entries plus everything below it.
fn fold_node(node: AccountNode, by_account: &HashMap<i64, (i64, i64)>) -> ReportNode {
    let (own_planned, own_actual) = by_account
        .get(&node.account.id)
        .copied()
        .unwrap_or((0, 0));

    let children: Vec<ReportNode> = node
        .children
        .into_iter()
        .map(|c| fold_node(c, by_account))
        .collect();

    let planned_cents = own_planned + children.iter().map(|c| c.planned_cents).sum::<i64>();
    let actual_cents = own_actual + children.iter().map(|c| c.actual_cents).sum::<i64>();
    let variance_cents = actual_cents - planned_cents;

    ReportNode {
        account_id: node.account.id,
        level: node.account.level(),
        code: node.account.code,
        name: node.account.name,
        kind: node.account.kind,
        planned_cents,
        actual_cents,
        variance_cents,
        variance_pct: variance_pct(planned_cents, variance_cents),
        children,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthCell {
    pub month: u32,
    pub planned_cents: i64,
    pub actual_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRow {
    pub account_id: i64,
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
    pub months: Vec<MonthCell>,
    pub total_planned_cents: i64,
    pub total_actual_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub organization_id: i64,
    pub year: i32,
    pub rows: Vec<MonthlyRow>,
}

/// One row per line-item account with twelve planned/actual pairs, the
/// shape the spreadsheet-style export consumes.
pub fn build_monthly_report(
    organization_id: i64,
    year: i32,
    accounts: Vec<GlAccount>,
    sums: Vec<AccountMonthSums>,
) -> MonthlyReport {
    let mut by_account_month: HashMap<(i64, u32), (i64, i64)> = HashMap::new();
    for s in sums {
        by_account_month.insert(
            (s.gl_account_id, s.month),
            (s.planned_cents, s.actual_cents),
        );
    }

    let mut line_items: Vec<GlAccount> = accounts
        .into_iter()
        .filter(|a| a.level() == AccountLevel::LineItem)
        .collect();
    line_items.sort_by(|a, b| a.code.cmp(&b.code));

    let rows = line_items
        .into_iter()
        .map(|account| {
            let months: Vec<MonthCell> = (1..=12)
                .map(|month| {
                    let (planned_cents, actual_cents) = by_account_month
                        .get(&(account.id, month))
                        .copied()
                        .unwrap_or((0, 0));
                    MonthCell {
                        month,
                        planned_cents,
                        actual_cents,
                    }
                })
                .collect();
            MonthlyRow {
                account_id: account.id,
                total_planned_cents: months.iter().map(|m| m.planned_cents).sum(),
                total_actual_cents: months.iter().map(|m| m.actual_cents).sum(),
                code: account.code,
                name: account.name,
                kind: account.kind,
                months,
            }
        })
        .collect();

    MonthlyReport {
        organization_id,
        year,
        rows,
    }
}
