use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub currency: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Seed a default 3-level chart of accounts for the new organization.
    #[serde(default)]
    pub seed_chart: bool,
}

fn default_currency() -> String {
    "EUR".to_string()
}
