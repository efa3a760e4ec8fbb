use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an account classifies revenue or expense entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Revenue,
    Expense,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown account kind: {}", other)),
        }
    }
}

/// Position of an account in the 3-level chart hierarchy, derived from
/// the length of its code: `4` is a main group, `40` a subgroup, and
/// anything longer (`400`, `4010`, ...) a cost/revenue line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountLevel {
    MainGroup,
    Subgroup,
    LineItem,
}

impl AccountLevel {
    pub fn of_code(code: &str) -> Self {
        match code.len() {
            1 => Self::MainGroup,
            2 => Self::Subgroup,
            _ => Self::LineItem,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlAccount {
    pub id: i64,
    pub organization_id: i64,
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
    pub created_at: String,
    pub updated_at: String,
}

impl GlAccount {
    pub fn level(&self) -> AccountLevel {
        AccountLevel::of_code(&self.code)
    }
}

/// Code of the parent level, if the code is not a main group's: a line
/// item's parent is the 2-char subgroup prefix, a subgroup's parent the
/// 1-char main group prefix.
pub fn parent_code(code: &str) -> Option<&str> {
    match AccountLevel::of_code(code) {
        AccountLevel::MainGroup => None,
        AccountLevel::Subgroup => code.get(..1),
        AccountLevel::LineItem => code.get(..2),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGlAccount {
    pub organization_id: i64,
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
}

/// Starter chart seeded for new organizations: (code, name, kind).
pub const DEFAULT_CHART: &[(&str, &str, AccountKind)] = &[
    ("8", "Revenue", AccountKind::Revenue),
    ("80", "Sales", AccountKind::Revenue),
    ("8000", "Product sales", AccountKind::Revenue),
    ("8010", "Service revenue", AccountKind::Revenue),
    ("4", "Operating expenses", AccountKind::Expense),
    ("40", "Personnel", AccountKind::Expense),
    ("4000", "Salaries", AccountKind::Expense),
    ("4010", "Social charges", AccountKind::Expense),
    ("41", "Housing", AccountKind::Expense),
    ("4100", "Rent", AccountKind::Expense),
    ("4110", "Utilities", AccountKind::Expense),
    ("45", "General", AccountKind::Expense),
    ("4500", "Office supplies", AccountKind::Expense),
    ("4510", "Insurance", AccountKind::Expense),
];
