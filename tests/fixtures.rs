//! Shared harness for the pipeline integration tests.
//!
//! Wires a session store, notification queue, classifier, and client against
//! one wiremock server, and mints bearer tokens the way the real server does.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use taskforge_client::models::UserRole;
use taskforge_client::{
    ApiClient, Claims, ClientConfig, Navigator, NotificationQueue, ResponseClassifier,
    SessionStore, TokenStorage, View,
};
use tempfile::TempDir;
use wiremock::MockServer;

/// Navigator stub that records redirects instead of performing them.
pub struct TestNavigator {
    view: Mutex<View>,
    redirects: AtomicUsize,
}

impl TestNavigator {
    pub fn at(view: View) -> Arc<Self> {
        Arc::new(Self {
            view: Mutex::new(view),
            redirects: AtomicUsize::new(0),
        })
    }

    pub fn set_view(&self, view: View) {
        *self.view.lock().unwrap() = view;
    }

    pub fn redirect_count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for TestNavigator {
    fn current_view(&self) -> View {
        *self.view.lock().unwrap()
    }

    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Everything a pipeline test needs, wired against one mock server.
pub struct Harness {
    pub server: MockServer,
    pub client: ApiClient,
    pub session: Arc<SessionStore>,
    pub notices: NotificationQueue,
    pub navigator: Arc<TestNavigator>,
    pub classifier: Arc<ResponseClassifier>,
    // Holds the token file for the test's duration.
    pub dir: TempDir,
}

impl Harness {
    /// Harness with the classifier installed, viewing the dashboard.
    pub async fn start() -> Self {
        Self::start_at(View::Dashboard).await
    }

    pub async fn start_at(view: View) -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let config = ClientConfig {
            api_base_url: server.uri(),
            token_file: dir.path().join("token").display().to_string(),
        };

        let session = Arc::new(SessionStore::new(TokenStorage::new(&config.token_file)));
        let notices = NotificationQueue::new();
        let navigator = TestNavigator::at(view);
        let client = ApiClient::new(&config, Arc::clone(&session));
        let classifier = Arc::new(ResponseClassifier::new(
            Arc::clone(&session),
            notices.clone(),
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        ));
        client.install_classifier(Arc::clone(&classifier));

        Harness {
            server,
            client,
            session,
            notices,
            navigator,
            classifier,
            dir,
        }
    }

    /// Establishes a session with a freshly minted token and returns it.
    pub fn login_as(&self, sub: &str) -> String {
        let token = mint_token(sub, 30);
        self.session.login(&token);
        assert!(self.session.is_authenticated(), "setup: login must succeed");
        token
    }

    /// The messages currently displayed, in display order.
    pub fn notice_messages(&self) -> Vec<String> {
        self.notices
            .active()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    /// Re-reads the persisted token from disk.
    pub fn stored_token(&self) -> Option<String> {
        TokenStorage::new(self.dir.path().join("token")).load()
    }
}

/// Mints a bearer token the way the server does. Negative `minutes` produce
/// an already-expired token.
pub fn mint_token(sub: &str, minutes: i64) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp: (Utc::now() + Duration::minutes(minutes)).timestamp(),
        role: UserRole::User,
        name: Some("Integration User".to_string()),
        email: Some("integration@example.com".to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("server-side-secret".as_bytes()),
    )
    .unwrap()
}
