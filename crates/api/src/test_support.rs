//! Router harness over the in-memory store.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::AUTHORIZATION},
};
use fake::{Fake, faker::internet::en::SafeEmail, faker::name::en::Name};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use feedesk_core::auth::{Account, AccountProfile, NewAccount, Role, normalize_email};
use feedesk_core::store::{AccountStore, InMemoryStore};
use feedesk_shared::{JwtConfig, JwtService};

use crate::{AppState, create_router};

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub jwt: Arc<JwtService>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let jwt = Arc::new(JwtService::new(&JwtConfig::default()));
        let state = AppState {
            accounts: store.clone(),
            fees: store.clone(),
            jwt_service: jwt.clone(),
        };

        Self {
            router: create_router(state),
            store,
            jwt,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.dispatch(request).await
    }

    pub async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, None).await
    }

    /// Inserts an account directly; the password hash is a placeholder.
    pub async fn seed_account(&self, profile: AccountProfile) -> Account {
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        let tag = Uuid::new_v4().simple().to_string();

        AccountStore::create(
            self.store.as_ref(),
            NewAccount {
                name,
                email: normalize_email(&format!("{}.{email}", &tag[..8])),
                password_hash: "not-a-hash".to_string(),
                profile,
            },
        )
        .await
        .unwrap()
    }

    pub async fn admin(&self) -> (Account, String) {
        let account = self.seed_account(AccountProfile::Admin).await;
        let token = self.token_for(&account);
        (account, token)
    }

    pub async fn student(&self) -> (Account, String) {
        let account = self
            .seed_account(AccountProfile::Student {
                course: "Computer Science".to_string(),
                year: "2026".to_string(),
            })
            .await;
        let token = self.token_for(&account);
        (account, token)
    }

    pub fn token_for(&self, account: &Account) -> String {
        self.token(account.id, account.role())
    }

    pub fn token(&self, account_id: Uuid, role: Role) -> String {
        self.jwt.issue_token(account_id, role).unwrap()
    }
}
