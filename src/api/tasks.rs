use crate::api::{parse_json, ApiClient, MessageResponse};
use crate::error::ClientError;
use crate::models::{Task, TaskInput, TaskUpdate};
use reqwest::Method;

impl ApiClient {
    /// Retrieves the tasks owned by the authenticated user.
    ///
    /// ## Failures:
    /// - 401 when the session token is missing or stale; the classifier
    ///   treats this as session loss.
    /// - Network errors when the server is unreachable.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let path = "/tasks/";
        let response = self.dispatch(path, self.request(Method::GET, path)).await?;
        parse_json(response).await
    }

    /// Creates a task owned by the authenticated user.
    pub async fn create_task(&self, input: &TaskInput) -> Result<Task, ClientError> {
        let path = "/tasks/";
        let response = self
            .dispatch(path, self.request(Method::POST, path).json(input))
            .await?;
        parse_json(response).await
    }

    /// Applies a partial update to one task.
    pub async fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Task, ClientError> {
        let path = format!("/tasks/{}", id);
        let response = self
            .dispatch(&path, self.request(Method::PUT, &path).json(update))
            .await?;
        parse_json(response).await
    }

    /// Deletes one task.
    pub async fn delete_task(&self, id: &str) -> Result<MessageResponse, ClientError> {
        let path = format!("/tasks/{}", id);
        let response = self
            .dispatch(&path, self.request(Method::DELETE, &path))
            .await?;
        parse_json(response).await
    }

    /// Retrieves every task in the system. Requires an admin session; other
    /// callers get a 403.
    pub async fn list_all_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let path = "/tasks/all";
        let response = self.dispatch(path, self.request(Method::GET, path)).await?;
        parse_json(response).await
    }
}
