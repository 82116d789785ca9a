use crate::api::{parse_json, ApiClient};
use crate::error::ClientError;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Service liveness summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Database reachability as reported by the server. Older deployments
    /// omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl ApiClient {
    /// Health check
    ///
    /// Unauthenticated; useful for probing the API before showing a login
    /// form.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let path = "/health";
        let response = self.dispatch(path, self.request(Method::GET, path)).await?;
        parse_json(response).await
    }
}
