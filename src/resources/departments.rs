//! Bindings for `/departments/`.

use crate::client::ApiClient;
use crate::domain::models::Department;
use crate::error::Error;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentPayload {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

pub async fn list(api: &ApiClient) -> Result<Vec<Department>, Error> {
    api.get("/departments/").await
}

pub async fn retrieve(api: &ApiClient, id: i64) -> Result<Department, Error> {
    api.get(&format!("/departments/{id}/")).await
}

pub async fn create(api: &ApiClient, payload: &DepartmentPayload) -> Result<Department, Error> {
    api.post("/departments/", payload).await
}

pub async fn update(
    api: &ApiClient,
    id: i64,
    payload: &DepartmentPayload,
) -> Result<Department, Error> {
    api.put(&format!("/departments/{id}/"), payload).await
}

pub async fn delete(api: &ApiClient, id: i64) -> Result<(), Error> {
    api.delete(&format!("/departments/{id}/")).await
}
