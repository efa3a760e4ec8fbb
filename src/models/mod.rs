pub mod budget_entry;
pub mod gl_account;
pub mod organization;

pub use budget_entry::{BudgetEntry, EntryType, NewBudgetEntry};
pub use gl_account::{AccountKind, AccountLevel, GlAccount, NewGlAccount, DEFAULT_CHART};
pub use organization::{NewOrganization, Organization};
