//! Bindings for `/trainings/programs/` and `/trainings/assignments/`.

use crate::client::ApiClient;
use crate::domain::models::{Training, TrainingAssignment, TrainingStatus};
use crate::error::Error;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TrainingPayload {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub department: Option<i64>,
    pub is_active: bool,
    pub is_mandatory: bool,
    pub max_participants: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingAssignmentPayload {
    pub training: i64,
    pub employee: i64,
    pub status: TrainingStatus,
    pub completion_date: Option<NaiveDate>,
    pub notes: String,
}

pub async fn list_programs(api: &ApiClient) -> Result<Vec<Training>, Error> {
    api.get("/trainings/programs/").await
}

pub async fn retrieve_program(api: &ApiClient, id: i64) -> Result<Training, Error> {
    api.get(&format!("/trainings/programs/{id}/")).await
}

pub async fn create_program(api: &ApiClient, payload: &TrainingPayload) -> Result<Training, Error> {
    api.post("/trainings/programs/", payload).await
}

pub async fn update_program(
    api: &ApiClient,
    id: i64,
    payload: &TrainingPayload,
) -> Result<Training, Error> {
    api.put(&format!("/trainings/programs/{id}/"), payload).await
}

pub async fn delete_program(api: &ApiClient, id: i64) -> Result<(), Error> {
    api.delete(&format!("/trainings/programs/{id}/")).await
}

pub async fn list_assignments(api: &ApiClient) -> Result<Vec<TrainingAssignment>, Error> {
    api.get("/trainings/assignments/").await
}

/// Trainings assigned to the signed-in employee.
pub async fn my_trainings(api: &ApiClient) -> Result<Vec<TrainingAssignment>, Error> {
    api.get("/trainings/assignments/my_trainings/").await
}

pub async fn create_assignment(
    api: &ApiClient,
    payload: &TrainingAssignmentPayload,
) -> Result<TrainingAssignment, Error> {
    api.post("/trainings/assignments/", payload).await
}

pub async fn update_assignment(
    api: &ApiClient,
    id: i64,
    payload: &TrainingAssignmentPayload,
) -> Result<TrainingAssignment, Error> {
    api.put(&format!("/trainings/assignments/{id}/"), payload)
        .await
}

pub async fn delete_assignment(api: &ApiClient, id: i64) -> Result<(), Error> {
    api.delete(&format!("/trainings/assignments/{id}/")).await
}
