//! Bindings for `/users/employees/`: the HR-facing employee registry.

use crate::client::ApiClient;
use crate::domain::models::{Employee, TurnoverRisk};
use crate::error::Error;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EmployeePayload {
    pub user: i64,
    pub position: String,
    pub hire_date: NaiveDate,
    pub is_active: bool,
    pub turnover_risk: TurnoverRisk,
}

pub async fn list(api: &ApiClient) -> Result<Vec<Employee>, Error> {
    api.get("/users/employees/").await
}

pub async fn retrieve(api: &ApiClient, id: i64) -> Result<Employee, Error> {
    api.get(&format!("/users/employees/{id}/")).await
}

pub async fn create(api: &ApiClient, payload: &EmployeePayload) -> Result<Employee, Error> {
    api.post("/users/employees/", payload).await
}

pub async fn update(
    api: &ApiClient,
    id: i64,
    payload: &EmployeePayload,
) -> Result<Employee, Error> {
    api.put(&format!("/users/employees/{id}/"), payload).await
}

pub async fn delete(api: &ApiClient, id: i64) -> Result<(), Error> {
    api.delete(&format!("/users/employees/{id}/")).await
}
