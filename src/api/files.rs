use super::client::{ApiError, DriveClient};
use crate::models::file::{Download, File, FileQuery, MessageResponse, RenameRequest};
use reqwest::multipart::{Form, Part};
use std::path::Path;

pub async fn list_files(client: &DriveClient, query: &FileQuery) -> Result<Vec<File>, ApiError> {
    client.get("files/", &query.to_params()).await
}

/// Build the multipart body for `upload/`.
///
/// The `folder` part is only present when a folder is selected.
pub fn upload_form(file_name: &str, bytes: Vec<u8>, folder: Option<u64>) -> Form {
    let part = Part::bytes(bytes).file_name(file_name.to_string());
    let mut form = Form::new().part("file", part);

    if let Some(folder_id) = folder {
        form = form.text("folder", folder_id.to_string());
    }

    form
}

pub async fn upload_bytes(
    client: &DriveClient,
    file_name: &str,
    bytes: Vec<u8>,
    folder: Option<u64>,
) -> Result<File, ApiError> {
    client
        .post_multipart("upload/", upload_form(file_name, bytes, folder))
        .await
}

pub async fn upload_file(
    client: &DriveClient,
    path: &Path,
    folder: Option<u64>,
) -> anyhow::Result<File> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("{} has no usable file name", path.display()))?
        .to_string();

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    tracing::debug!(file = %file_name, size = bytes.len(), ?folder, "uploading");

    Ok(upload_bytes(client, &file_name, bytes, folder).await?)
}

pub async fn download_file(client: &DriveClient, file_id: u64) -> Result<Download, ApiError> {
    client
        .get_bytes(&format!("files/{}/download/", file_id))
        .await
}

pub async fn rename_file(
    client: &DriveClient,
    file_id: u64,
    new_name: &str,
) -> Result<File, ApiError> {
    client
        .put_json(
            &format!("files/{}/rename/", file_id),
            &RenameRequest { name: new_name },
        )
        .await
}

/// Permanently delete a file and its stored content
pub async fn delete_file(client: &DriveClient, file_id: u64) -> Result<(), ApiError> {
    client.delete(&format!("files/{}/", file_id)).await
}

pub async fn trash_file(client: &DriveClient, file_id: u64) -> Result<MessageResponse, ApiError> {
    client.post_empty(&format!("files/{}/trash/", file_id)).await
}

pub async fn restore_file(client: &DriveClient, file_id: u64) -> Result<MessageResponse, ApiError> {
    client.post_empty(&format!("files/{}/restore/", file_id)).await
}
