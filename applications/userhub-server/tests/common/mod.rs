/// Common test utilities and fixtures
use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use tower::util::ServiceExt;
use userhub_core::{CoreError, CreateUser, Result, User, UserId, UserStore};
use userhub_server::{create_router, AppState};

/// In-memory `UserStore` with store-assigned, increasing ids
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    /// When set, every call fails with a storage error
    failing: AtomicBool,
}

impl MemoryUserStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::storage("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let created = User::new(users.len() as i64 + 1, user.name);
        users.push(created.clone());
        Ok(created)
    }

    async fn get_user(&self, id: UserId) -> Result<User> {
        self.check()?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("user", id.to_string()))
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        self.check()?;
        Ok(self.users.lock().unwrap().clone())
    }
}

/// Router wired to a fresh in-memory store
pub fn create_test_app() -> (Router, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::default());
    let app = create_router(AppState::new(store.clone()));
    (app, store)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST without a content type, the way a bare `curl -d` client sends it
pub fn post_raw(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
