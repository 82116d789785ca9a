//!
//! # Request Pipeline
//!
//! All traffic to the task API flows through `ApiClient`. The pipeline has
//! one dispatch path: the bearer token is attached whenever a session exists,
//! failures are normalized into [`ClientError`], and the installed failure
//! classifier observes each failure exactly once before it is handed back to
//! the caller. Endpoint wrappers live in the sibling modules, one per
//! resource, and all of them share this path so no failure can slip past the
//! classifier.

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

pub use auth::{RegisterRequest, TokenResponse};
pub use health::HealthStatus;

use crate::classify::ResponseClassifier;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::SessionStore;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::{Arc, Mutex};

/// Acknowledgement body returned by the delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// HTTP client for the task API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    classifier: Mutex<Option<Arc<ResponseClassifier>>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            classifier: Mutex::new(None),
        }
    }

    /// Installs the failure classifier.
    ///
    /// The slot holds at most one classifier: installing again replaces the
    /// previous one instead of stacking a second set of side effects, so a
    /// careless double installation cannot duplicate notifications.
    pub fn install_classifier(&self, classifier: Arc<ResponseClassifier>) {
        *self.classifier.lock().unwrap() = Some(classifier);
    }

    /// Removes the failure classifier, restoring the uninstrumented pipeline.
    pub fn remove_classifier(&self) {
        *self.classifier.lock().unwrap() = None;
    }

    /// Starts a request against the API, attaching the bearer token when a
    /// session exists.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Sends one request and normalizes the outcome.
    ///
    /// `path` is the logical endpoint path the wrapper asked for; it rides
    /// along in the error so the classifier can apply its path rules. The
    /// classifier runs before the error is returned and never alters it.
    pub(crate) async fn dispatch(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = ClientError::Network {
                    path: path.to_string(),
                    detail: e.to_string(),
                };
                log::warn!("Request produced no response: {}", error);
                self.notify_failure(&error);
                return Err(error);
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error = ClientError::Api {
            status: status.as_u16(),
            path: path.to_string(),
            message: read_server_message(response).await,
        };
        log::debug!("Request rejected: {}", error);
        self.notify_failure(&error);
        Err(error)
    }

    // The hook runs outside the slot lock so a classifier is free to call
    // back into the client.
    fn notify_failure(&self, error: &ClientError) {
        let classifier = self.classifier.lock().unwrap().clone();
        if let Some(classifier) = classifier {
            classifier.on_failure(error);
        }
    }
}

/// Extracts the textual `detail` field from an error body, when one exists.
///
/// The server wraps error text as `{"detail": "..."}`. Validation failures
/// put a structured list there instead of a string; those and blank strings
/// read as "no message", which is what the classification rules expect.
async fn read_server_message(response: Response) -> Option<String> {
    let body: serde_json::Value = response.json().await.ok()?;
    body.get("detail")
        .and_then(|detail| detail.as_str())
        .filter(|detail| !detail.is_empty())
        .map(|detail| detail.to_string())
}

/// Decodes a success body, mapping parse failures to [`ClientError::Decode`].
pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}
