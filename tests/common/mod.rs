//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use user_api::routes;
use user_api::state::AppState;
use user_api::user::{RepositoryError, User, UserRepository, UserRequest, UserService};

/// In-memory repository with a unique email constraint and serial ids
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Table>,
}

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, User>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &UserRequest) -> Result<User, RepositoryError> {
        let mut table = self.inner.lock().unwrap();
        if table.email_taken(&user.email, None) {
            return Err(RepositoryError::DuplicateEmail);
        }
        table.next_id += 1;
        let created = user.clone().into_user(table.next_id);
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.inner.lock().unwrap().rows.get(&id).cloned())
    }

    async fn update(&self, id: i32, user: &UserRequest) -> Result<u64, RepositoryError> {
        let mut table = self.inner.lock().unwrap();
        if !table.rows.contains_key(&id) {
            return Ok(0);
        }
        if table.email_taken(&user.email, Some(id)) {
            return Err(RepositoryError::DuplicateEmail);
        }
        table.rows.insert(id, user.clone().into_user(id));
        Ok(1)
    }

    async fn delete(&self, id: i32) -> Result<u64, RepositoryError> {
        Ok(self.inner.lock().unwrap().rows.remove(&id).map_or(0, |_| 1))
    }
}

/// Repository whose every call fails like a dropped connection
pub struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn insert(&self, _user: &UserRequest) -> Result<User, RepositoryError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<User>, RepositoryError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update(&self, _id: i32, _user: &UserRequest) -> Result<u64, RepositoryError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _id: i32) -> Result<u64, RepositoryError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

pub fn app_with(repository: Arc<dyn UserRepository>) -> Router {
    let service = Arc::new(UserService::new(repository));
    routes::router(AppState::new(service), None)
}

pub fn app() -> Router {
    app_with(Arc::new(InMemoryUserRepository::default()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn user(&self) -> User {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn error_message(&self) -> String {
        self.json()["error"]["message"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

pub async fn send(app: &Router, method: &str, path: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
