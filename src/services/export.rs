//! Reshapes reports into flat CSV documents for download.

use crate::error::{AppError, AppResult};
use crate::services::report::{BudgetReport, MonthlyReport, ReportNode};

/// Integer cents as a decimal string with two fraction digits.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn level_label(node: &ReportNode) -> &'static str {
    use crate::models::gl_account::AccountLevel::*;
    match node.level {
        MainGroup => "main_group",
        Subgroup => "subgroup",
        LineItem => "line_item",
    }
}

/// One row per tree node in depth-first code order, then a totals block.
pub fn budget_report_csv(report: &BudgetReport) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["code", "name", "level", "planned", "actual", "variance"])
        .map_err(|e| AppError::Export(e.to_string()))?;

    for node in &report.nodes {
        write_node(&mut writer, node)?;
    }

    writer
        .write_record(["", "", "", "", "", ""])
        .map_err(|e| AppError::Export(e.to_string()))?;
    for (label, totals) in [
        ("Total revenue", &report.totals.revenue),
        ("Total expense", &report.totals.expense),
        ("Result", &report.totals.result),
    ] {
        let planned = format_cents(totals.planned_cents);
        let actual = format_cents(totals.actual_cents);
        let variance = format_cents(totals.variance_cents);
        writer
            .write_record(["", label, "", planned.as_str(), actual.as_str(), variance.as_str()])
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))
}

fn write_node(writer: &mut csv::Writer<Vec<u8>>, node: &ReportNode) -> AppResult<()> {
    let planned = format_cents(node.planned_cents);
    let actual = format_cents(node.actual_cents);
    let variance = format_cents(node.variance_cents);
    writer
        .write_record([
            node.code.as_str(),
            node.name.as_str(),
            level_label(node),
            planned.as_str(),
            actual.as_str(),
            variance.as_str(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;

    for child in &node.children {
        write_node(writer, child)?;
    }
    Ok(())
}

/// One row per line item with a planned and an actual column per month.
pub fn monthly_report_csv(report: &MonthlyReport) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["code".to_string(), "name".to_string()];
    for month in 1..=12 {
        header.push(format!("m{:02}_planned", month));
        header.push(format!("m{:02}_actual", month));
    }
    header.push("total_planned".into());
    header.push("total_actual".into());
    writer
        .write_record(&header)
        .map_err(|e| AppError::Export(e.to_string()))?;

    for row in &report.rows {
        let mut record = vec![row.code.clone(), row.name.clone()];
        for cell in &row.months {
            record.push(format_cents(cell.planned_cents));
            record.push(format_cents(cell.actual_cents));
        }
        record.push(format_cents(row.total_planned_cents));
        record.push(format_cents(row.total_actual_cents));
        writer
            .write_record(&record)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))
}
