use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Planned amounts come from the budget, actuals from bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Planned,
    Actual,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Actual => "actual",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "actual" => Ok(Self::Actual),
            other => Err(format!("unknown entry type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub id: i64,
    pub organization_id: i64,
    pub gl_account_id: i64,
    pub year: i32,
    pub month: u32,
    pub entry_type: EntryType,
    pub amount_cents: i64,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBudgetEntry {
    pub organization_id: i64,
    pub gl_account_id: i64,
    pub year: i32,
    pub month: u32,
    pub entry_type: EntryType,
    pub amount_cents: i64,
    #[serde(default)]
    pub note: Option<String>,
}
