use crate::api::{parse_json, ApiClient};
use crate::error::ClientError;
use crate::models::User;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The bearer token for subsequent requests.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
}

/// Payload for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

impl ApiClient {
    /// Exchange credentials for a bearer token
    ///
    /// The server speaks the OAuth2 password flow, so credentials go out as
    /// form fields with the email in the `username` slot. The token is
    /// returned, not installed: establishing the session is the session
    /// store's job, and the calling page decides when to hand the token over.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let path = "/auth/login";
        let params = [("username", email), ("password", password)];
        let response = self
            .dispatch(path, self.request(Method::POST, path).form(&params))
            .await?;
        parse_json(response).await
    }

    /// Register a new account
    ///
    /// Returns the stored user on success.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        let path = "/auth/register";
        let response = self
            .dispatch(path, self.request(Method::POST, path).json(request))
            .await?;
        parse_json(response).await
    }
}
