use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageInfo {
    pub used: u64,
    pub quota: u64,
    pub percentage: f64,
}

impl StorageInfo {
    /// Share of the quota to draw, capped at 100 for over-quota accounts.
    pub fn bar_percentage(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }
}
