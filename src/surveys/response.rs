//! Response collection: one answer per question for an assignment, validated
//! locally and submitted in a single atomic call.

use crate::client::ApiClient;
use crate::domain::survey::{AnswerValue, Question, Survey, SurveyAssignment};
use crate::error::{Error, ValidationFailure};
use crate::resources::surveys::{self, SubmissionAnswer, SubmissionPayload, SubmissionReceipt};
use chrono::Utc;
use std::collections::BTreeMap;

/// One employee's pass over one assigned survey. Completed assignments load
/// in read-only mode for review; answer mutation is disabled there.
pub struct ResponseSession {
    assignment: SurveyAssignment,
    survey: Survey,
    questions: Vec<Question>,
    answers: BTreeMap<i64, AnswerValue>,
    read_only: bool,
}

impl ResponseSession {
    /// Fetch the assignment, its survey with questions, and (when already
    /// completed) the prior responses, rebuilt into a typed answer map.
    pub async fn load(api: &ApiClient, assignment_id: i64) -> Result<Self, Error> {
        let assignment = surveys::retrieve_assignment(api, assignment_id).await?;
        let detail = surveys::retrieve_form(api, assignment.survey).await?;
        let mut questions = detail.questions;
        questions.sort_by_key(|q| q.order);

        let read_only = assignment.is_completed;
        let mut answers = BTreeMap::new();
        if read_only {
            let records = surveys::assignment_responses(api, assignment_id).await?;
            for record in records {
                let Some(question) = questions.iter().find(|q| q.id == record.question_id) else {
                    continue;
                };
                match AnswerValue::from_wire(&record.answer, question.qtype) {
                    Some(value) => {
                        answers.insert(record.question_id, value);
                    }
                    None => tracing::warn!(
                        "Stored answer for question {} does not fit its type, skipping",
                        record.question_id
                    ),
                }
            }
        }

        Ok(Self {
            assignment,
            survey: detail.survey,
            questions,
            answers,
            read_only,
        })
    }

    pub fn assignment(&self) -> &SurveyAssignment {
        &self.assignment
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn answer(&self, question_id: i64) -> Option<&AnswerValue> {
        self.answers.get(&question_id)
    }

    pub fn answers(&self) -> &BTreeMap<i64, AnswerValue> {
        &self.answers
    }

    /// Record an answer. A no-op in read-only mode; otherwise the value must
    /// belong to a question of this survey and fit its type.
    pub fn set_answer(&mut self, question_id: i64, value: AnswerValue) -> Result<(), Error> {
        if self.read_only {
            return Ok(());
        }
        let Some(question) = self.questions.iter().find(|q| q.id == question_id) else {
            return Err(Error::Validation(vec![ValidationFailure::UnknownQuestion {
                question_id,
            }]));
        };
        if let AnswerValue::Rating(rating) = &value {
            if !(1..=5).contains(rating) {
                return Err(Error::Validation(vec![
                    ValidationFailure::RatingOutOfRange { question_id },
                ]));
            }
        }
        if !value.matches(question.qtype) {
            return Err(Error::Validation(vec![
                ValidationFailure::AnswerTypeMismatch { question_id },
            ]));
        }
        self.answers.insert(question_id, value);
        Ok(())
    }

    /// Ids of required questions that are still unanswered: a checkbox needs
    /// a non-empty set, everything else a present, non-empty value.
    pub fn validate(&self) -> Vec<i64> {
        self.questions
            .iter()
            .filter(|question| question.is_required)
            .filter(|question| {
                self.answers
                    .get(&question.id)
                    .map_or(true, AnswerValue::is_empty)
            })
            .map(|question| question.id)
            .collect()
    }

    /// Submit every recorded answer in one call. Validation failures and
    /// network errors both leave the answer map untouched so the user can
    /// retry without re-entering anything.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<SubmissionReceipt, Error> {
        if self.read_only {
            return Err(Error::Validation(vec![ValidationFailure::AlreadyCompleted]));
        }
        let missing = self.validate();
        if !missing.is_empty() {
            return Err(Error::IncompleteSubmission(missing));
        }

        let payload = SubmissionPayload {
            assignment_id: self.assignment.id,
            responses: self
                .answers
                .iter()
                .map(|(question_id, value)| SubmissionAnswer {
                    question_id: *question_id,
                    answer: value.to_wire(),
                })
                .collect(),
        };

        let receipt = surveys::submit_form(api, self.assignment.survey, &payload).await?;

        self.assignment.is_completed = true;
        self.assignment.completed_at = Some(Utc::now());
        self.assignment.total_score = receipt.total_score;
        self.read_only = true;
        tracing::info!(
            "Submitted assignment {} with {} answers",
            self.assignment.id,
            payload.responses.len()
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SessionManager;
    use crate::auth::store::{MemoryTokenStore, TokenStore, ACCESS_TOKEN_KEY};
    use crate::client::transport::testing::FakeTransport;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn api() -> (Arc<FakeTransport>, ApiClient) {
        let transport = Arc::new(FakeTransport::new());
        let store = Arc::new(MemoryTokenStore::new());
        store.put(ACCESS_TOKEN_KEY, "access");
        let session = Arc::new(SessionManager::new(transport.clone(), store));
        (transport.clone(), ApiClient::new(transport, session))
    }

    fn assignment_json(completed: bool) -> Value {
        json!({
            "id": 55,
            "survey": 10,
            "survey_details": {
                "id": 10,
                "title": "Exit interview",
                "description": "",
                "category": "END_CONTRACT",
            },
            "employee": 3,
            "due_date": "2026-08-20",
            "is_completed": completed,
            "completed_at": null,
            "total_score": null,
        })
    }

    fn form_json() -> Value {
        json!({
            "id": 10,
            "title": "Exit interview",
            "description": "",
            "category": "END_CONTRACT",
            "is_active": true,
            "questions": [
                {
                    "id": 2,
                    "survey": 10,
                    "text": "Pick the reasons that apply",
                    "type": "CHECKBOX",
                    "options": ["Pay", "Workload", "Team"],
                    "is_required": true,
                    "order": 1,
                    "factor": 7,
                },
                {
                    "id": 1,
                    "survey": 10,
                    "text": "Why are you leaving?",
                    "type": "TEXT",
                    "options": null,
                    "is_required": true,
                    "order": 0,
                    "factor": null,
                },
                {
                    "id": 3,
                    "survey": 10,
                    "text": "Rate your overall experience",
                    "type": "RATING",
                    "options": null,
                    "is_required": false,
                    "order": 2,
                    "factor": null,
                },
            ],
        })
    }

    async fn pending_session() -> (Arc<FakeTransport>, ApiClient, ResponseSession) {
        let (transport, client) = api();
        transport.push_json(200, assignment_json(false));
        transport.push_json(200, form_json());
        let session = ResponseSession::load(&client, 55).await.unwrap();
        (transport, client, session)
    }

    #[tokio::test]
    async fn load_sorts_questions_by_order() {
        let (_transport, _client, session) = pending_session().await;
        let ids: Vec<i64> = session.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(!session.is_read_only());
        assert!(session.answers().is_empty());
    }

    #[tokio::test]
    async fn load_of_completed_assignment_rebuilds_typed_answers() {
        let (transport, client) = api();
        transport.push_json(200, assignment_json(true));
        transport.push_json(200, form_json());
        transport.push_json(
            200,
            json!([
                { "id": 900, "question": 1, "answer": { "value": "Relocating" }, "score": null },
                { "id": 901, "question": 2, "answer": { "values": ["Pay", "Team"] }, "score": 2.0 },
                { "id": 902, "question": 3, "answer": { "value": 4 }, "score": 4.0 },
            ]),
        );

        let session = ResponseSession::load(&client, 55).await.unwrap();
        assert!(session.is_read_only());
        assert_eq!(
            session.answer(1),
            Some(&AnswerValue::Text("Relocating".into()))
        );
        assert_eq!(
            session.answer(2),
            Some(&AnswerValue::Selections(vec!["Pay".into(), "Team".into()]))
        );
        assert_eq!(session.answer(3), Some(&AnswerValue::Rating(4)));
    }

    #[tokio::test]
    async fn set_answer_is_a_noop_in_read_only_mode() {
        let (transport, client) = api();
        transport.push_json(200, assignment_json(true));
        transport.push_json(200, form_json());
        transport.push_json(200, json!([]));
        let mut session = ResponseSession::load(&client, 55).await.unwrap();

        session
            .set_answer(1, AnswerValue::Text("too late".into()))
            .unwrap();
        assert_eq!(session.answer(1), None);
    }

    #[tokio::test]
    async fn set_answer_rejects_a_mismatched_variant() {
        let (_transport, _client, mut session) = pending_session().await;
        let err = session
            .set_answer(1, AnswerValue::Rating(3))
            .unwrap_err();
        match err {
            Error::Validation(failures) => assert_eq!(
                failures,
                vec![ValidationFailure::AnswerTypeMismatch { question_id: 1 }]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn set_answer_rejects_unknown_questions_and_bad_ratings() {
        let (_transport, _client, mut session) = pending_session().await;
        assert!(session
            .set_answer(99, AnswerValue::Text("?".into()))
            .is_err());
        assert!(session.set_answer(3, AnswerValue::Rating(0)).is_err());
        assert!(session.set_answer(3, AnswerValue::Rating(6)).is_err());
        assert!(session.set_answer(3, AnswerValue::Rating(5)).is_ok());
    }

    #[tokio::test]
    async fn required_checkbox_is_flagged_exactly_when_its_set_is_empty() {
        let (_transport, _client, mut session) = pending_session().await;
        session
            .set_answer(1, AnswerValue::Text("Moving on".into()))
            .unwrap();

        session.set_answer(2, AnswerValue::Selections(vec![])).unwrap();
        assert_eq!(session.validate(), vec![2]);

        session
            .set_answer(2, AnswerValue::Selections(vec!["Pay".into()]))
            .unwrap();
        assert!(session.validate().is_empty());
    }

    #[tokio::test]
    async fn submit_with_a_missing_required_answer_makes_no_call() {
        let (transport, client, mut session) = pending_session().await;
        let loaded_calls = transport.request_count();

        let err = session.submit(&client).await.unwrap_err();
        match err {
            Error::IncompleteSubmission(missing) => assert_eq!(missing, vec![1, 2]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.request_count(), loaded_calls);
    }

    #[tokio::test]
    async fn submit_posts_once_and_flips_to_read_only() {
        let (transport, client, mut session) = pending_session().await;
        session
            .set_answer(1, AnswerValue::Text("New opportunity".into()))
            .unwrap();
        session
            .set_answer(2, AnswerValue::Selections(vec!["Workload".into()]))
            .unwrap();
        transport.push_json(200, json!({ "status": "survey submitted", "total_score": 2.5 }));

        let receipt = session.submit(&client).await.unwrap();
        assert_eq!(receipt.total_score, Some(2.5));
        assert!(session.is_read_only());
        assert!(session.assignment().is_completed);

        let sent = transport.requests();
        let submit = sent.last().unwrap();
        assert_eq!(submit.path, "/surveys/forms/10/submit/");
        let body = submit.body.as_ref().unwrap();
        assert_eq!(body["assignment_id"], 55);
        assert_eq!(body["responses"].as_array().unwrap().len(), 2);

        // A second submit is refused locally.
        assert!(matches!(
            session.submit(&client).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn failed_submit_preserves_the_answer_map() {
        let (transport, client, mut session) = pending_session().await;
        session
            .set_answer(1, AnswerValue::Text("New opportunity".into()))
            .unwrap();
        session
            .set_answer(2, AnswerValue::Selections(vec!["Pay".into()]))
            .unwrap();
        transport.push_error("connection reset");

        assert!(session.submit(&client).await.is_err());
        assert!(!session.is_read_only());
        assert_eq!(
            session.answer(1),
            Some(&AnswerValue::Text("New opportunity".into()))
        );
        assert_eq!(session.answers().len(), 2);
    }
}
