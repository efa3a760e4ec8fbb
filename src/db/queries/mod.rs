pub mod budget_entries;
pub mod gl_accounts;
pub mod organizations;
