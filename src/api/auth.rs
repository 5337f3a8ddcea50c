use super::client::{ApiError, DriveClient};
use crate::models::file::MessageResponse;
use crate::models::user::{AuthResponse, LoginRequest, RegisterRequest, User};

pub async fn login(client: &DriveClient, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
    client
        .post_json("login/", &LoginRequest { username, password })
        .await
}

pub async fn register(client: &DriveClient, request: &RegisterRequest<'_>) -> Result<AuthResponse, ApiError> {
    client.post_json("register/", request).await
}

pub async fn logout(client: &DriveClient) -> Result<MessageResponse, ApiError> {
    client.post_empty("logout/").await
}

pub async fn current_user(client: &DriveClient) -> Result<User, ApiError> {
    client.get("user/", &[]).await
}
