//! User actions on files and folders.
//!
//! Each action performs one service call and, when it succeeds, reloads the
//! dashboard so the caller can re-render. Actions that are skipped (blank
//! name) or declined (confirmation refused) make no network call and
//! return `None`.

use crate::api::client::DriveClient;
use crate::api::{files, folders};
use crate::dashboard::{Dashboard, Listing, View};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Asks the user before destructive operations.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Accepts everything, used for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Prompts on stderr and reads a y/N answer from a reader (stdin in the CLI).
pub struct PromptConfirm<R> {
    input: R,
}

impl<R: BufRead> PromptConfirm<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Confirm for PromptConfirm<R> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        eprint!("{} [y/N] ", prompt);
        std::io::stderr().flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

pub fn delete_file_prompt(file_id: u64) -> String {
    format!("Are you sure you want to permanently delete file #{}?", file_id)
}

pub fn delete_folder_prompt(folder_id: u64) -> String {
    format!(
        "Are you sure you want to delete folder #{}? This will also delete all files inside.",
        folder_id
    )
}

async fn refresh(client: &DriveClient, dashboard: &Dashboard) -> Result<Option<Listing>> {
    let listing = dashboard
        .load(client)
        .await
        .context("Failed to refresh listing")?;
    Ok(Some(listing))
}

/// Rename a file. A blank name is ignored; otherwise the name is sent as typed.
pub async fn rename_file(
    client: &DriveClient,
    dashboard: &Dashboard,
    file_id: u64,
    new_name: &str,
) -> Result<Option<Listing>> {
    if new_name.trim().is_empty() {
        tracing::debug!(file_id, "rename skipped, empty name");
        return Ok(None);
    }

    files::rename_file(client, file_id, new_name)
        .await
        .context("Failed to rename file")?;

    refresh(client, dashboard).await
}

/// Create a folder inside the dashboard's current folder. A blank name is ignored.
pub async fn create_folder(
    client: &DriveClient,
    dashboard: &Dashboard,
    name: &str,
) -> Result<Option<Listing>> {
    if !dashboard.view.allows_new_folder() {
        anyhow::bail!("Folders can only be created in {}", View::MyDrive.title());
    }

    if name.trim().is_empty() {
        tracing::debug!("create folder skipped, empty name");
        return Ok(None);
    }

    folders::create_folder(client, name, dashboard.current_folder)
        .await
        .context("Failed to create folder")?;

    refresh(client, dashboard).await
}

pub async fn trash_file(client: &DriveClient, dashboard: &Dashboard, file_id: u64) -> Result<Option<Listing>> {
    files::trash_file(client, file_id)
        .await
        .context("Failed to move file to trash")?;

    refresh(client, dashboard).await
}

pub async fn restore_file(client: &DriveClient, dashboard: &Dashboard, file_id: u64) -> Result<Option<Listing>> {
    files::restore_file(client, file_id)
        .await
        .context("Failed to restore file")?;

    refresh(client, dashboard).await
}

pub async fn delete_file(
    client: &DriveClient,
    dashboard: &Dashboard,
    file_id: u64,
    confirm: &mut dyn Confirm,
) -> Result<Option<Listing>> {
    if !confirm.confirm(&delete_file_prompt(file_id))? {
        return Ok(None);
    }

    files::delete_file(client, file_id)
        .await
        .context("Failed to delete file")?;

    refresh(client, dashboard).await
}

pub async fn delete_folder(
    client: &DriveClient,
    dashboard: &Dashboard,
    folder_id: u64,
    confirm: &mut dyn Confirm,
) -> Result<Option<Listing>> {
    if !confirm.confirm(&delete_folder_prompt(folder_id))? {
        return Ok(None);
    }

    folders::delete_folder(client, folder_id)
        .await
        .context("Failed to delete folder")?;

    refresh(client, dashboard).await
}

/// Upload a local file into the dashboard's current folder
pub async fn upload_file(client: &DriveClient, dashboard: &Dashboard, path: &Path) -> Result<Option<Listing>> {
    files::upload_file(client, path, dashboard.current_folder)
        .await
        .context("Failed to upload file")?;

    refresh(client, dashboard).await
}

/// Download a file to `output`, or to the server-provided name inside `dir`.
///
/// An existing file at the server-provided name is only replaced with `overwrite`.
/// Returns the path written.
pub async fn download_file(
    client: &DriveClient,
    file_id: u64,
    output: Option<&Path>,
    dir: &Path,
    overwrite: bool,
) -> Result<PathBuf> {
    let download = files::download_file(client, file_id)
        .await
        .context("Failed to download file")?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            // Only the final component of the server's name is trusted
            let name = download
                .file_name
                .as_deref()
                .and_then(|n| Path::new(n).file_name())
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| format!("file-{}", file_id).into());
            let path = dir.join(name);
            if !overwrite && tokio::fs::try_exists(&path).await.unwrap_or(false) {
                anyhow::bail!(
                    "{} already exists; choose another path with --output or replace it with --yes",
                    path.display()
                );
            }
            path
        }
    };

    tokio::fs::write(&path, &download.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!(file_id, path = %path.display(), bytes = download.bytes.len(), "downloaded");
    Ok(path)
}
