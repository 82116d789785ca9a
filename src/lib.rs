#![doc = "The `taskforge_client` library crate."]
#![doc = ""]
#![doc = "This crate contains the client-side core of the TaskForge web application:"]
#![doc = "the session lifecycle built around the bearer token, the centralized"]
#![doc = "classifier that turns failed requests into notifications and session"]
#![doc = "actions, the notification queue itself, and typed wrappers for the API"]
#![doc = "endpoints. Hosting pages compose these pieces at startup and render the"]
#![doc = "state they expose."]

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod session;

// Re-export the types a hosting page composes at startup.
pub use api::{ApiClient, HealthStatus, MessageResponse, RegisterRequest, TokenResponse};
pub use classify::{classify, Navigator, ResponseClassifier, View, REDIRECT_DELAY};
pub use config::ClientConfig;
pub use error::ClientError;
pub use notify::{Notification, NotificationQueue, Severity, DISPLAY_DURATION};
pub use session::{derive_session, Claims, SessionStore, TokenStorage};
