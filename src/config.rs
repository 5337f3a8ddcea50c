use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const API_URL_ENV: &str = "OPENDRIVE_API_URL";
pub const TOKEN_ENV: &str = "OPENDRIVE_TOKEN";
pub const CONFIG_DIR_ENV: &str = "OPENDRIVE_CONFIG_DIR";

/// Credentials persisted by `auth login` / `auth register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub api_url: String,
    pub username: String,
    pub token: String,
}

/// Get platform-specific config directory, honouring `OPENDRIVE_CONFIG_DIR`
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let config_dir = dirs::config_dir()
        .context("Failed to determine config directory for this platform")?;

    Ok(config_dir.join("opendrive"))
}

/// Get full path to the session file
pub fn get_session_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("session.json"))
}

pub fn load_session() -> Result<Option<Session>> {
    load_session_at(&get_session_path()?)
}

pub fn save_session(session: &Session) -> Result<PathBuf> {
    let path = get_session_path()?;
    save_session_at(&path, session)?;
    Ok(path)
}

pub fn clear_session() -> Result<bool> {
    clear_session_at(&get_session_path()?)
}

/// Read a session file; a missing file is not an error
pub fn load_session_at(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file {}", path.display()))?;
    let session = serde_json::from_str(&contents)
        .with_context(|| format!("Session file {} is corrupt, run `opendrive auth login` again", path.display()))?;

    Ok(Some(session))
}

pub fn save_session_at(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(session)?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write session file {}", path.display()))?;

    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

/// Remove the session file. Returns whether one existed.
pub fn clear_session_at(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    std::fs::remove_file(path)
        .with_context(|| format!("Failed to remove session file {}", path.display()))?;
    Ok(true)
}

/// Pick the bearer token: an explicit one (flag or env) wins over the stored session.
///
/// A session saved against a different API URL is ignored.
pub fn resolve_token(explicit: Option<&str>, session: Option<&Session>, api_url: &str) -> Option<String> {
    if let Some(token) = explicit.filter(|t| !t.trim().is_empty()) {
        return Some(token.to_string());
    }

    session
        .filter(|s| s.api_url.trim_end_matches('/') == api_url.trim_end_matches('/'))
        .map(|s| s.token.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(api_url: &str) -> Session {
        Session {
            api_url: api_url.to_string(),
            username: "alice".to_string(),
            token: "stored-token".to_string(),
        }
    }

    #[test]
    fn test_session_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        assert!(load_session_at(&path).unwrap().is_none());

        save_session_at(&path, &session(DEFAULT_API_URL)).unwrap();
        let loaded = load_session_at(&path).unwrap().unwrap();
        assert_eq!(loaded, session(DEFAULT_API_URL));

        assert!(clear_session_at(&path).unwrap());
        assert!(!clear_session_at(&path).unwrap());
    }

    #[test]
    fn test_corrupt_session_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_session_at(&path).unwrap_err();
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_explicit_token_wins() {
        let stored = session(DEFAULT_API_URL);
        let token = resolve_token(Some("env-token"), Some(&stored), DEFAULT_API_URL);
        assert_eq!(token.as_deref(), Some("env-token"));
    }

    #[test]
    fn test_session_token_used_for_matching_url() {
        let stored = session("http://localhost:8000/api/");
        let token = resolve_token(None, Some(&stored), DEFAULT_API_URL);
        assert_eq!(token.as_deref(), Some("stored-token"));
    }

    #[test]
    fn test_session_for_other_server_ignored() {
        let stored = session("https://drive.example.com/api");
        assert!(resolve_token(None, Some(&stored), DEFAULT_API_URL).is_none());
        assert!(resolve_token(Some("  "), None, DEFAULT_API_URL).is_none());
    }
}
