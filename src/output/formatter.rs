use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Serialize `data` for the machine-readable formats.
    ///
    /// Returns `None` for `Human`, which each command renders itself.
    pub fn serialize<T: Serialize>(&self, data: &T) -> Result<Option<String>> {
        match self {
            OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(data)?)),
            OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(data)?)),
            OutputFormat::Human => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::storage::StorageInfo;

    fn info() -> StorageInfo {
        StorageInfo {
            used: 1536,
            quota: 5368709120,
            percentage: 0.5,
        }
    }

    #[test]
    fn test_json_and_yaml() {
        let json = OutputFormat::Json.serialize(&info()).unwrap().unwrap();
        assert!(json.contains("\"used\": 1536"));

        let yaml = OutputFormat::Yaml.serialize(&info()).unwrap().unwrap();
        assert!(yaml.contains("quota: 5368709120"));
    }

    #[test]
    fn test_human_is_left_to_caller() {
        assert!(OutputFormat::Human.serialize(&info()).unwrap().is_none());
    }
}
