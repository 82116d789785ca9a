use crate::api::{parse_json, ApiClient, MessageResponse};
use crate::error::ClientError;
use crate::models::{User, UserCreate, UserUpdate};
use reqwest::Method;

/// User management endpoints. All of these require an admin session; the
/// server answers 403 for anyone else, which the classifier surfaces as a
/// permission notice.
impl ApiClient {
    /// Lists user accounts.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let path = "/users/";
        let response = self.dispatch(path, self.request(Method::GET, path)).await?;
        parse_json(response).await
    }

    /// Creates a user account directly, bypassing self-registration.
    pub async fn create_user(&self, input: &UserCreate) -> Result<User, ClientError> {
        let path = "/users/";
        let response = self
            .dispatch(path, self.request(Method::POST, path).json(input))
            .await?;
        parse_json(response).await
    }

    /// Fetches one user by id.
    pub async fn get_user(&self, id: &str) -> Result<User, ClientError> {
        let path = format!("/users/{}", id);
        let response = self.dispatch(&path, self.request(Method::GET, &path)).await?;
        parse_json(response).await
    }

    /// Applies a partial update to one user.
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User, ClientError> {
        let path = format!("/users/{}", id);
        let response = self
            .dispatch(&path, self.request(Method::PUT, &path).json(update))
            .await?;
        parse_json(response).await
    }

    /// Deletes one user account.
    pub async fn delete_user(&self, id: &str) -> Result<MessageResponse, ClientError> {
        let path = format!("/users/{}", id);
        let response = self
            .dispatch(&path, self.request(Method::DELETE, &path))
            .await?;
        parse_json(response).await
    }
}
