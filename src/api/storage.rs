use super::client::{ApiError, DriveClient};
use crate::models::storage::StorageInfo;

pub async fn get_storage_info(client: &DriveClient) -> Result<StorageInfo, ApiError> {
    client.get("storage/", &[]).await
}
