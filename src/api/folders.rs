use super::client::{ApiError, DriveClient};
use crate::models::folder::{Folder, NewFolder};

/// List folders directly under `parent`, or at the root when `None`
pub async fn list_folders(client: &DriveClient, parent: Option<u64>) -> Result<Vec<Folder>, ApiError> {
    let query = vec![("parent", parent.map(|id| id.to_string()).unwrap_or_default())];
    client.get("folders/", &query).await
}

pub async fn create_folder(
    client: &DriveClient,
    name: &str,
    parent: Option<u64>,
) -> Result<Folder, ApiError> {
    client
        .post_json("folders/", &NewFolder { name, parent })
        .await
}

/// Delete a folder; the server removes everything inside it as well
pub async fn delete_folder(client: &DriveClient, folder_id: u64) -> Result<(), ApiError> {
    client.delete(&format!("folders/{}/", folder_id)).await
}
