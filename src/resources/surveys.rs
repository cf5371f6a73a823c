//! Bindings for the `/surveys/` API area: forms, questions, factors,
//! assignments, responses, and submission.

use crate::client::ApiClient;
use crate::domain::survey::{
    Factor, FactorType, Question, QuestionType, ResponseRecord, Survey, SurveyAssignment,
    SurveyCategory, SurveyDetail,
};
use crate::error::Error;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct SurveyPayload {
    pub title: String,
    pub description: String,
    pub category: SurveyCategory,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionPayload {
    pub survey: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub qtype: QuestionType,
    pub options: Option<Vec<String>>,
    pub is_required: bool,
    pub order: u32,
    pub factor: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorPayload {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub factor_type: FactorType,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentPayload {
    pub survey: i64,
    pub employee: i64,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionAnswer {
    pub question_id: i64,
    pub answer: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    pub assignment_id: i64,
    pub responses: Vec<SubmissionAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionReceipt {
    pub status: String,
    #[serde(default)]
    pub total_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FactorScore {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub factor_type: FactorType,
    pub avg_score: Option<f64>,
    pub response_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyStatistics {
    pub survey_id: i64,
    pub title: String,
    pub total_assignments: u32,
    pub completed_assignments: u32,
    pub completion_rate: f64,
    pub avg_score: Option<f64>,
    pub factor_analysis: Vec<FactorScore>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RespondentDetails {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewedResponse {
    pub id: i64,
    pub question_id: i64,
    pub question_text: String,
    pub answer: Value,
    pub score: Option<f64>,
    #[serde(default)]
    pub has_scoring: bool,
    #[serde(default)]
    pub max_points: Option<f64>,
}

/// One completed assignment with its answers, as reviewed by HR.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentReview {
    pub id: i64,
    pub employee_details: RespondentDetails,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_score: Option<f64>,
    pub responses: Vec<ReviewedResponse>,
}

// Forms

pub async fn list_forms(api: &ApiClient) -> Result<Vec<Survey>, Error> {
    api.get("/surveys/forms/").await
}

pub async fn retrieve_form(api: &ApiClient, id: i64) -> Result<SurveyDetail, Error> {
    api.get(&format!("/surveys/forms/{id}/")).await
}

pub async fn create_form(api: &ApiClient, payload: &SurveyPayload) -> Result<Survey, Error> {
    api.post("/surveys/forms/", payload).await
}

pub async fn update_form(
    api: &ApiClient,
    id: i64,
    payload: &SurveyPayload,
) -> Result<Survey, Error> {
    api.put(&format!("/surveys/forms/{id}/"), payload).await
}

pub async fn delete_form(api: &ApiClient, id: i64) -> Result<(), Error> {
    api.delete(&format!("/surveys/forms/{id}/")).await
}

pub async fn form_statistics(api: &ApiClient, id: i64) -> Result<SurveyStatistics, Error> {
    api.get(&format!("/surveys/forms/{id}/statistics/")).await
}

pub async fn submit_form(
    api: &ApiClient,
    survey_id: i64,
    payload: &SubmissionPayload,
) -> Result<SubmissionReceipt, Error> {
    api.post(&format!("/surveys/forms/{survey_id}/submit/"), payload)
        .await
}

// Questions

pub async fn list_questions(api: &ApiClient, survey_id: i64) -> Result<Vec<Question>, Error> {
    api.get(&format!("/surveys/questions/?survey_id={survey_id}"))
        .await
}

pub async fn create_question(
    api: &ApiClient,
    payload: &QuestionPayload,
) -> Result<Question, Error> {
    api.post("/surveys/questions/", payload).await
}

pub async fn update_question(
    api: &ApiClient,
    id: i64,
    payload: &QuestionPayload,
) -> Result<Question, Error> {
    api.put(&format!("/surveys/questions/{id}/"), payload).await
}

pub async fn delete_question(api: &ApiClient, id: i64) -> Result<(), Error> {
    api.delete(&format!("/surveys/questions/{id}/")).await
}

// Factors

pub async fn list_factors(api: &ApiClient) -> Result<Vec<Factor>, Error> {
    api.get("/surveys/factors/").await
}

pub async fn create_factor(api: &ApiClient, payload: &FactorPayload) -> Result<Factor, Error> {
    api.post("/surveys/factors/", payload).await
}

pub async fn update_factor(
    api: &ApiClient,
    id: i64,
    payload: &FactorPayload,
) -> Result<Factor, Error> {
    api.put(&format!("/surveys/factors/{id}/"), payload).await
}

pub async fn delete_factor(api: &ApiClient, id: i64) -> Result<(), Error> {
    api.delete(&format!("/surveys/factors/{id}/")).await
}

// Assignments

pub async fn list_assignments(api: &ApiClient) -> Result<Vec<SurveyAssignment>, Error> {
    api.get("/surveys/assignments/").await
}

/// Pending assignments of the signed-in employee.
pub async fn my_assignments(api: &ApiClient) -> Result<Vec<SurveyAssignment>, Error> {
    api.get("/surveys/assignments/my_assignments/").await
}

pub async fn retrieve_assignment(api: &ApiClient, id: i64) -> Result<SurveyAssignment, Error> {
    api.get(&format!("/surveys/assignments/{id}/")).await
}

pub async fn create_assignment(
    api: &ApiClient,
    payload: &AssignmentPayload,
) -> Result<SurveyAssignment, Error> {
    api.post("/surveys/assignments/", payload).await
}

pub async fn delete_assignment(api: &ApiClient, id: i64) -> Result<(), Error> {
    api.delete(&format!("/surveys/assignments/{id}/")).await
}

pub async fn assignment_responses(
    api: &ApiClient,
    id: i64,
) -> Result<Vec<ResponseRecord>, Error> {
    api.get(&format!("/surveys/assignments/{id}/responses/"))
        .await
}

// Responses

/// Completed assignments for one survey, each with its answers.
pub async fn reviews_by_survey(
    api: &ApiClient,
    survey_id: i64,
) -> Result<Vec<AssignmentReview>, Error> {
    api.get(&format!("/surveys/responses/by_survey?survey_id={survey_id}"))
        .await
}

/// Manually score one response; the server recomputes the assignment total.
pub async fn score_response(
    api: &ApiClient,
    response_id: i64,
    score: f64,
) -> Result<Value, Error> {
    api.patch(
        &format!("/surveys/responses/{response_id}/score/"),
        &serde_json::json!({ "score": score }),
    )
    .await
}
