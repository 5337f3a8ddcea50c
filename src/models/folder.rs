use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Folder {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub parent: Option<u64>,
    /// Number of non-trashed files directly inside
    #[serde(default)]
    pub file_count: u64,
    #[serde(default)]
    pub subfolder_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct NewFolder<'a> {
    pub name: &'a str,
    pub parent: Option<u64>,
}
