//! Bindings for `/users/accounts/`: the admin-facing account registry.

use crate::client::ApiClient;
use crate::domain::models::{Role, User};
use crate::error::Error;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct AccountPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department: Option<i64>,
    pub is_active: bool,
    /// Only sent when setting or changing the password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

pub async fn list(api: &ApiClient) -> Result<Vec<User>, Error> {
    api.get("/users/accounts/").await
}

pub async fn retrieve(api: &ApiClient, id: i64) -> Result<User, Error> {
    api.get(&format!("/users/accounts/{id}/")).await
}

/// The account behind the current session.
pub async fn me(api: &ApiClient) -> Result<User, Error> {
    api.get("/users/accounts/me/").await
}

pub async fn create(api: &ApiClient, payload: &AccountPayload) -> Result<User, Error> {
    api.post("/users/accounts/", payload).await
}

pub async fn update(api: &ApiClient, id: i64, payload: &AccountPayload) -> Result<User, Error> {
    api.put(&format!("/users/accounts/{id}/"), payload).await
}

pub async fn delete(api: &ApiClient, id: i64) -> Result<(), Error> {
    api.delete(&format!("/users/accounts/{id}/")).await
}

pub async fn reset_password(api: &ApiClient, id: i64, password: &str) -> Result<Value, Error> {
    api.post(
        &format!("/users/accounts/{id}/reset_password/"),
        &serde_json::json!({ "password": password, "confirm_password": password }),
    )
    .await
}

/// Accounts not yet linked to an employee profile.
pub async fn available(api: &ApiClient) -> Result<Vec<User>, Error> {
    api.get("/users/accounts/available_users/").await
}
