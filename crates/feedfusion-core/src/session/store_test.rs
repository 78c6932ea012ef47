use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::FeedApi;
use crate::auth::{AuthPhase, AuthResponse, Credentials, SignupForm, SignupRequest, SignupResponse};
use crate::error::{FeedError, Result};
use crate::post::{FeedPost, FeedQuery};
use crate::session::SessionStore;
use crate::state::{ClientState, StateRepository};
use crate::user::UserProfile;

// Scripted FeedApi for testing: each operation returns a preset result and
// counts its calls.
struct MockFeedApi {
    login_response: Mutex<Result<AuthResponse>>,
    signup_response: Mutex<Result<SignupResponse>>,
    bookmark_ids_response: Mutex<Result<HashSet<String>>>,
    add_response: Mutex<Result<()>>,
    remove_response: Mutex<Result<()>>,
    signup_calls: AtomicUsize,
    fetch_ids_calls: AtomicUsize,
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
    auth_token: Mutex<Option<String>>,
}

impl MockFeedApi {
    fn new() -> Self {
        Self {
            login_response: Mutex::new(Err(FeedError::internal("login not scripted"))),
            signup_response: Mutex::new(Err(FeedError::internal("signup not scripted"))),
            bookmark_ids_response: Mutex::new(Ok(HashSet::new())),
            add_response: Mutex::new(Ok(())),
            remove_response: Mutex::new(Ok(())),
            signup_calls: AtomicUsize::new(0),
            fetch_ids_calls: AtomicUsize::new(0),
            add_calls: AtomicUsize::new(0),
            remove_calls: AtomicUsize::new(0),
            auth_token: Mutex::new(None),
        }
    }

    fn script_login(&self, response: Result<AuthResponse>) {
        *self.login_response.lock().unwrap() = response;
    }

    fn script_signup(&self, response: Result<SignupResponse>) {
        *self.signup_response.lock().unwrap() = response;
    }

    fn script_bookmark_ids(&self, response: Result<HashSet<String>>) {
        *self.bookmark_ids_response.lock().unwrap() = response;
    }

    fn script_add(&self, response: Result<()>) {
        *self.add_response.lock().unwrap() = response;
    }

    fn script_remove(&self, response: Result<()>) {
        *self.remove_response.lock().unwrap() = response;
    }

    fn attached_token(&self) -> Option<String> {
        self.auth_token.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedApi for MockFeedApi {
    async fn login(&self, _credentials: &Credentials) -> Result<AuthResponse> {
        self.login_response.lock().unwrap().clone()
    }

    async fn signup(&self, _request: &SignupRequest) -> Result<SignupResponse> {
        self.signup_calls.fetch_add(1, Ordering::SeqCst);
        self.signup_response.lock().unwrap().clone()
    }

    async fn fetch_feed(&self, _query: &FeedQuery) -> Result<Vec<FeedPost>> {
        Ok(Vec::new())
    }

    async fn fetch_bookmark_ids(&self) -> Result<HashSet<String>> {
        self.fetch_ids_calls.fetch_add(1, Ordering::SeqCst);
        self.bookmark_ids_response.lock().unwrap().clone()
    }

    async fn fetch_bookmarked_posts(&self) -> Result<Vec<FeedPost>> {
        Ok(Vec::new())
    }

    async fn add_bookmark(&self, _post_id: &str) -> Result<()> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.add_response.lock().unwrap().clone()
    }

    async fn remove_bookmark(&self, _post_id: &str) -> Result<()> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        self.remove_response.lock().unwrap().clone()
    }

    async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.lock().unwrap() = token;
    }
}

// In-memory StateRepository for testing.
#[derive(Default)]
struct MockStateRepository {
    state: Mutex<ClientState>,
}

impl MockStateRepository {
    fn with_token(token: &str) -> Self {
        Self {
            state: Mutex::new(ClientState {
                auth_token: Some(token.to_string()),
                interests: Vec::new(),
            }),
        }
    }

    fn persisted_token(&self) -> Option<String> {
        self.state.lock().unwrap().auth_token.clone()
    }
}

#[async_trait]
impl StateRepository for MockStateRepository {
    async fn save_state(&self, state: ClientState) -> Result<()> {
        *self.state.lock().unwrap() = state;
        Ok(())
    }

    async fn get_state(&self) -> Result<ClientState> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn get_auth_token(&self) -> Option<String> {
        self.state.lock().unwrap().auth_token.clone()
    }

    async fn set_auth_token(&self, token: String) -> Result<()> {
        self.state.lock().unwrap().auth_token = Some(token);
        Ok(())
    }

    async fn clear_auth_token(&self) -> Result<()> {
        self.state.lock().unwrap().auth_token = None;
        Ok(())
    }

    async fn get_interests(&self) -> Vec<String> {
        self.state.lock().unwrap().interests.clone()
    }

    async fn set_interests(&self, interests: Vec<String>) -> Result<()> {
        self.state.lock().unwrap().interests = interests;
        Ok(())
    }
}

fn fixture() -> (Arc<MockFeedApi>, Arc<MockStateRepository>, SessionStore) {
    let api = Arc::new(MockFeedApi::new());
    let repository = Arc::new(MockStateRepository::default());
    let store = SessionStore::new(api.clone(), repository.clone());
    (api, repository, store)
}

fn auth_ok(token: &str) -> AuthResponse {
    AuthResponse {
        token: Some(token.to_string()),
        user: Some(UserProfile::new("alice")),
        message: None,
    }
}

fn ids(values: &[&str]) -> HashSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn valid_form() -> SignupForm {
    SignupForm::new("alice", "alice@example.com", "secret1", "secret1")
}

async fn logged_in_with(
    api: &MockFeedApi,
    store: &SessionStore,
    bookmark_ids: HashSet<String>,
) {
    api.script_login(Ok(auth_ok("abc123")));
    api.script_bookmark_ids(Ok(bookmark_ids));
    assert!(store.login(Credentials::new("alice", "correct")).await);
}

#[tokio::test]
async fn test_login_success_commits_token_and_refreshes_bookmarks_once() {
    let (api, repository, store) = fixture();
    api.script_login(Ok(auth_ok("abc123")));
    api.script_bookmark_ids(Ok(ids(&["p1"])));

    assert!(store.login(Credentials::new("alice", "correct")).await);

    let snapshot = store.snapshot().await;
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.token.as_deref(), Some("abc123"));
    assert_eq!(snapshot.user.as_ref().map(|u| u.username.as_str()), Some("alice"));
    assert_eq!(snapshot.phase, AuthPhase::Authenticated);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.bookmarked_post_ids, ids(&["p1"]));
    assert_eq!(api.fetch_ids_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.attached_token().as_deref(), Some("abc123"));
    assert_eq!(repository.persisted_token().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_login_unauthorized_stays_anonymous_with_error() {
    let (api, repository, store) = fixture();
    api.script_login(Err(FeedError::api(401, "Bad credentials")));

    assert!(!store.login(Credentials::new("alice", "wrong")).await);

    let snapshot = store.snapshot().await;
    assert!(!snapshot.is_authenticated());
    assert!(snapshot.token.is_none());
    assert!(snapshot.user.is_none());
    assert!(snapshot.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert!(snapshot.bookmarked_post_ids.is_empty());
    assert_eq!(snapshot.phase, AuthPhase::Anonymous);
    // No bookmark refresh is issued for a failed login.
    assert_eq!(api.fetch_ids_calls.load(Ordering::SeqCst), 0);
    assert_eq!(repository.persisted_token(), None);
    assert_eq!(api.attached_token(), None);
}

#[tokio::test]
async fn test_login_without_token_surfaces_server_message() {
    let (api, _repository, store) = fixture();
    api.script_login(Ok(AuthResponse {
        token: None,
        user: None,
        message: Some("Account locked".to_string()),
    }));

    assert!(!store.login(Credentials::new("alice", "correct")).await);
    assert_eq!(store.last_error().await.as_deref(), Some("Account locked"));
}

#[tokio::test]
async fn test_login_without_token_falls_back_to_generic_message() {
    let (api, _repository, store) = fixture();
    api.script_login(Ok(AuthResponse::default()));

    assert!(!store.login(Credentials::new("alice", "correct")).await);
    assert_eq!(
        store.last_error().await.as_deref(),
        Some("Login failed: no token received.")
    );
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let (api, repository, store) = fixture();
    logged_in_with(&api, &store, ids(&["p1", "p2"])).await;

    store.logout().await;
    let first = store.snapshot().await;
    assert!(!first.is_authenticated());
    assert!(first.token.is_none());
    assert!(first.user.is_none());
    assert!(first.bookmarked_post_ids.is_empty());
    assert_eq!(first.phase, AuthPhase::Anonymous);
    assert_eq!(repository.persisted_token(), None);
    assert_eq!(api.attached_token(), None);

    store.logout().await;
    assert_eq!(store.snapshot().await, first);
}

#[tokio::test]
async fn test_add_bookmark_inserts_only_after_confirmation() {
    let (api, _repository, store) = fixture();
    logged_in_with(&api, &store, HashSet::new()).await;

    api.script_add(Ok(()));
    assert!(store.add_bookmark("p9").await);
    assert!(store.is_bookmarked("p9").await);
}

#[tokio::test]
async fn test_add_bookmark_failure_leaves_cache_unchanged() {
    let (api, _repository, store) = fixture();
    logged_in_with(&api, &store, ids(&["p1"])).await;

    api.script_add(Err(FeedError::api(500, "boom")));
    assert!(!store.add_bookmark("p9").await);
    assert_eq!(store.bookmarked_post_ids().await, ids(&["p1"]));
    assert_eq!(store.last_error().await.as_deref(), Some("Failed to add bookmark."));
    assert_eq!(api.add_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_add_bookmark_requires_authentication() {
    let (api, _repository, store) = fixture();

    assert!(!store.add_bookmark("p1").await);
    assert_eq!(api.add_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_add_bookmark_rejects_empty_post_id() {
    let (api, _repository, store) = fixture();
    logged_in_with(&api, &store, HashSet::new()).await;

    assert!(!store.add_bookmark("").await);
    assert_eq!(api.add_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_remove_bookmark_deletes_confirmed_entry() {
    let (api, _repository, store) = fixture();
    logged_in_with(&api, &store, ids(&["p1", "p2"])).await;

    api.script_remove(Ok(()));
    assert!(store.remove_bookmark("p1").await);
    assert_eq!(store.bookmarked_post_ids().await, ids(&["p2"]));
}

#[tokio::test]
async fn test_remove_bookmark_failure_leaves_cache_unchanged() {
    let (api, _repository, store) = fixture();
    logged_in_with(&api, &store, ids(&["p1"])).await;

    api.script_remove(Err(FeedError::transport("connection reset")));
    assert!(!store.remove_bookmark("p1").await);
    assert_eq!(store.bookmarked_post_ids().await, ids(&["p1"]));
    assert_eq!(
        store.last_error().await.as_deref(),
        Some("Failed to remove bookmark.")
    );
    assert_eq!(api.remove_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bookmark_round_trip_restores_initial_set() {
    let (api, _repository, store) = fixture();
    logged_in_with(&api, &store, ids(&["p1"])).await;
    let initial = store.bookmarked_post_ids().await;

    assert!(store.add_bookmark("p5").await);
    assert!(store.remove_bookmark("p5").await);
    assert_eq!(store.bookmarked_post_ids().await, initial);
}

#[tokio::test]
async fn test_refresh_failure_clears_cache_and_resets_loading_flag() {
    let (api, _repository, store) = fixture();
    logged_in_with(&api, &store, ids(&["p1"])).await;

    api.script_bookmark_ids(Err(FeedError::transport("connection refused")));
    store.refresh_bookmark_ids().await;

    assert!(store.bookmarked_post_ids().await.is_empty());
    assert!(!store.is_loading_bookmarks().await);
}

#[tokio::test]
async fn test_refresh_while_anonymous_skips_network() {
    let (api, _repository, store) = fixture();

    store.refresh_bookmark_ids().await;

    assert!(store.bookmarked_post_ids().await.is_empty());
    assert_eq!(api.fetch_ids_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_signup_acknowledged_enters_pending_login() {
    let (api, _repository, store) = fixture();
    api.script_signup(Ok(SignupResponse {
        success: true,
        ..SignupResponse::default()
    }));

    assert!(store.signup(valid_form()).await);
    assert_eq!(store.phase().await, AuthPhase::PendingLogin);
    assert!(!store.is_authenticated().await);
    assert!(store.token().await.is_none());
}

#[tokio::test]
async fn test_signup_auto_login_behaves_like_login_success() {
    let (api, repository, store) = fixture();
    api.script_signup(Ok(SignupResponse {
        success: false,
        token: Some("t0".to_string()),
        user: Some(UserProfile::new("alice")),
        message: None,
    }));
    api.script_bookmark_ids(Ok(HashSet::new()));

    assert!(store.signup(valid_form()).await);
    assert!(store.is_authenticated().await);
    assert_eq!(store.phase().await, AuthPhase::Authenticated);
    assert_eq!(api.fetch_ids_calls.load(Ordering::SeqCst), 1);
    assert_eq!(repository.persisted_token().as_deref(), Some("t0"));
}

#[tokio::test]
async fn test_signup_password_mismatch_fails_before_any_network_call() {
    let (api, _repository, store) = fixture();
    let form = SignupForm::new("alice", "alice@example.com", "secret1", "different");

    assert!(!store.signup(form).await);
    assert_eq!(api.signup_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.last_error().await.as_deref(), Some("Passwords do not match."));
    assert_eq!(store.phase().await, AuthPhase::Anonymous);
}

#[tokio::test]
async fn test_signup_rejection_records_server_message() {
    let (api, _repository, store) = fixture();
    api.script_signup(Ok(SignupResponse {
        success: false,
        message: Some("Username is already taken".to_string()),
        ..SignupResponse::default()
    }));

    assert!(!store.signup(valid_form()).await);
    assert_eq!(
        store.last_error().await.as_deref(),
        Some("Username is already taken")
    );
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn test_restore_rehydrates_persisted_token_and_refreshes_once() {
    let api = Arc::new(MockFeedApi::new());
    let repository = Arc::new(MockStateRepository::with_token("persisted"));
    api.script_bookmark_ids(Ok(ids(&["p1"])));

    let store = SessionStore::restore(api.clone(), repository.clone()).await;

    assert!(store.is_authenticated().await);
    assert_eq!(store.token().await.as_deref(), Some("persisted"));
    assert_eq!(api.attached_token().as_deref(), Some("persisted"));
    assert_eq!(api.fetch_ids_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.bookmarked_post_ids().await, ids(&["p1"]));
}

#[tokio::test]
async fn test_restore_with_empty_storage_stays_anonymous() {
    let api = Arc::new(MockFeedApi::new());
    let repository = Arc::new(MockStateRepository::default());

    let store = SessionStore::restore(api.clone(), repository).await;

    assert!(!store.is_authenticated().await);
    assert_eq!(api.fetch_ids_calls.load(Ordering::SeqCst), 0);
    assert!(store.bookmarked_post_ids().await.is_empty());
}
