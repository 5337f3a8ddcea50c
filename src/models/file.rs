use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct File {
    pub id: u64,
    pub name: String,
    /// Storage path on the server, e.g. `uploads/2024/05/01/report.pdf`
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub folder: Option<u64>,
    #[serde(default)]
    pub size: u64,
    /// Lower-cased extension including the dot, empty when the name has none
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub is_trashed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Document,
    Other,
}

impl FileKind {
    pub fn from_extension(file_type: &str) -> Self {
        match file_type.to_lowercase().as_str() {
            ".jpg" | ".jpeg" | ".png" | ".gif" | ".webp" => FileKind::Image,
            ".pdf" | ".doc" | ".docx" | ".txt" => FileKind::Document,
            _ => FileKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Document => "document",
            FileKind::Other => "file",
        }
    }
}

impl File {
    pub fn kind(&self) -> FileKind {
        FileKind::from_extension(&self.file_type)
    }
}

/// Filter parameters accepted by `GET files/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileQuery {
    /// `None` lists the root, `Some(id)` lists inside that folder.
    /// Ignored when `trashed` is set.
    pub folder: Option<u64>,
    pub trashed: bool,
    pub search: Option<String>,
}

impl FileQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if self.trashed {
            params.push(("trashed", "true".to_string()));
        } else {
            // An empty folder value asks the server for root-level files only
            params.push((
                "folder",
                self.folder.map(|id| id.to_string()).unwrap_or_default(),
            ));
        }

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }

        params
    }
}

#[derive(Debug, Serialize)]
pub struct RenameRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body and server-suggested name of a downloaded file.
#[derive(Debug)]
pub struct Download {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}
