//!
//! # Failure Classification
//!
//! This module turns failed requests into user-facing outcomes. Every failure
//! that crosses the request pipeline is described by three facts: the HTTP
//! status (absent when the server was never reached), the request path, and
//! the textual message the server attached, if any. A fixed decision table
//! maps those facts onto at most one notification, at most one session
//! invalidation, and possibly a delayed return to the login view.
//!
//! The classifier is an observer, never a filter: after its side effects run,
//! the original error is still returned to the caller, so callers keep their
//! own error handling while the user-facing reaction stays centralized.

use crate::error::ClientError;
use crate::notify::{NotificationQueue, Severity};
use crate::session::SessionStore;
use lazy_static::lazy_static;
use std::sync::Arc;
use std::time::Duration;

/// Delay between losing a session and being sent back to the login view,
/// long enough for the notice to be read.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

lazy_static! {
    // Path heuristics for the table, anchored at segment boundaries
    static ref LOGIN_PATH: regex::Regex = regex::Regex::new(r"/auth/login(/|$)").unwrap();
    static ref USER_PATH: regex::Regex = regex::Regex::new(r"/users(/|$)").unwrap();
    static ref TASK_PATH: regex::Regex = regex::Regex::new(r"/tasks(/|$)").unwrap();
}

/// The views the hosting application can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
    Admin,
}

impl View {
    /// Entry views are where logged-out users already are. Losing a session
    /// on one must not bounce the user through another redirect.
    pub fn is_entry(&self) -> bool {
        matches!(self, View::Login | View::Register)
    }
}

/// Navigation seam implemented by the hosting application.
///
/// The classifier asks it where the user currently is and, on session loss,
/// tells it to go back to the login view. Keeping this behind a trait keeps
/// the decision table free of any global location state.
pub trait Navigator: Send + Sync {
    /// The view currently presented to the user.
    fn current_view(&self) -> View;
    /// Sends the user to the login view.
    fn redirect_to_login(&self);
}

/// What a classified failure asks the session layer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Keep,
    Invalidate,
}

/// Outcome of classifying one failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// User-facing notice. Always shown with error severity.
    pub notice: Option<String>,
    /// Whether the session survives this failure.
    pub session_action: SessionAction,
    /// Whether to schedule the delayed return to the login view.
    pub redirect: bool,
}

impl Classification {
    fn notice(message: impl Into<String>) -> Self {
        Classification {
            notice: Some(message.into()),
            session_action: SessionAction::Keep,
            redirect: false,
        }
    }

    fn silent() -> Self {
        Classification {
            notice: None,
            session_action: SessionAction::Keep,
            redirect: false,
        }
    }
}

/// Maps one failed request onto its user-facing outcome. First matching rule
/// wins.
///
/// * No status: the server was never reached; generic network notice.
/// * 5xx: generic server notice.
/// * 401 on the login endpoint: bad credentials notice, session kept.
/// * 401 anywhere else: the session is dead. Expiry notice, invalidate, and
///   redirect unless the user is already on an entry view.
/// * 403: permission notice.
/// * 404: resource-specific notice chosen from the path.
/// * 409 and 400: the server's own message when it sent one, else a generic
///   notice. A blank message counts as absent.
/// * 422: no notice. Field-level validation is displayed inline by forms,
///   not as a notification.
/// * Anything else: the server's message when textual, else a generic
///   fallback.
pub fn classify(
    status: Option<u16>,
    path: &str,
    server_message: Option<&str>,
    on_entry_view: bool,
) -> Classification {
    // An empty message carries no information; the fallback rows treat it
    // exactly like a missing one.
    let server_message = server_message.filter(|m| !m.is_empty());
    let status_code = match status {
        None => return Classification::notice("Network error. Unable to reach server."),
        Some(code) => code,
    };

    if status_code >= 500 {
        return Classification::notice("Server error. Please try again later.");
    }

    match status_code {
        401 if LOGIN_PATH.is_match(path) => {
            Classification::notice("Invalid credentials. Please check your email and password.")
        }
        401 => Classification {
            notice: Some("Token expired. Please login again.".to_string()),
            session_action: SessionAction::Invalidate,
            redirect: !on_entry_view,
        },
        403 => {
            Classification::notice("Unauthorized. You do not have permission to perform this action.")
        }
        404 if USER_PATH.is_match(path) => Classification::notice("User not found."),
        404 if TASK_PATH.is_match(path) => Classification::notice("Task not found."),
        404 => Classification::notice("Resource not found."),
        409 => Classification::notice(server_message.unwrap_or("Resource already exists.")),
        400 => Classification::notice(server_message.unwrap_or("Invalid request.")),
        422 => Classification::silent(),
        _ => Classification::notice(server_message.unwrap_or("An unexpected error occurred")),
    }
}

/// Centralized observer for failed requests.
///
/// One instance is installed on the request pipeline and sees every failure
/// exactly once. It applies the decision table's side effects and leaves the
/// error itself untouched.
pub struct ResponseClassifier {
    session: Arc<SessionStore>,
    notices: NotificationQueue,
    navigator: Arc<dyn Navigator>,
}

impl ResponseClassifier {
    pub fn new(
        session: Arc<SessionStore>,
        notices: NotificationQueue,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            notices,
            navigator,
        }
    }

    /// Applies the decision table to one failure.
    ///
    /// On session loss the invalidation completes first, then the notice is
    /// pushed, then the redirect is scheduled after [`REDIRECT_DELAY`]. The
    /// caller still receives the original error afterwards.
    pub fn on_failure(&self, error: &ClientError) {
        let (status, path, message) = match error {
            ClientError::Network { path, .. } => (None, path.as_str(), None),
            ClientError::Api {
                status,
                path,
                message,
            } => (Some(*status), path.as_str(), message.as_deref()),
            // Malformed success bodies stay with the caller, like 422s.
            ClientError::Decode(_) => return,
        };

        let on_entry_view = self.navigator.current_view().is_entry();
        let classification = classify(status, path, message, on_entry_view);
        log::debug!(
            "Classified failure on {}: status={:?}, action={:?}, redirect={}",
            path,
            status,
            classification.session_action,
            classification.redirect
        );

        if classification.session_action == SessionAction::Invalidate {
            self.session.logout();
        }

        if let Some(message) = classification.notice {
            self.notices.push(message, Severity::Error);
        }

        if classification.redirect {
            let navigator = Arc::clone(&self.navigator);
            tokio::spawn(async move {
                tokio::time::sleep(REDIRECT_DELAY).await;
                navigator.redirect_to_login();
            });
        }
    }
}
