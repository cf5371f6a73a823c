//! Survey authoring: build a form and its ordered question list in memory,
//! validate locally, then persist the whole thing as one logical unit.

use crate::client::ApiClient;
use crate::domain::survey::{QuestionType, SurveyCategory, SurveyDetail};
use crate::error::{Error, ValidationFailure};
use crate::resources::surveys::{self, QuestionPayload, SurveyPayload};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct QuestionDraft {
    /// Server id once persisted; drafts start without one.
    pub id: Option<i64>,
    /// Local handle for questions the server has never seen.
    temp_id: Uuid,
    pub text: String,
    pub qtype: QuestionType,
    pub options: Option<Vec<String>>,
    pub is_required: bool,
    order: u32,
    pub factor: Option<i64>,
}

impl QuestionDraft {
    fn new(order: u32) -> Self {
        Self {
            id: None,
            temp_id: Uuid::new_v4(),
            text: String::new(),
            qtype: QuestionType::Text,
            options: None,
            is_required: true,
            order,
            factor: None,
        }
    }

    pub fn temp_id(&self) -> Uuid {
        self.temp_id
    }

    pub fn order(&self) -> u32 {
        self.order
    }
}

#[derive(Debug, Clone)]
pub struct SurveyDraft {
    id: Option<i64>,
    pub title: String,
    pub description: String,
    pub category: Option<SurveyCategory>,
    pub is_active: bool,
    questions: Vec<QuestionDraft>,
}

impl SurveyDraft {
    pub fn new() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            category: None,
            is_active: true,
            questions: Vec::new(),
        }
    }

    /// Start an editing session from a fetched survey.
    pub fn from_detail(detail: SurveyDetail) -> Self {
        let mut questions: Vec<QuestionDraft> = detail
            .questions
            .into_iter()
            .map(|q| QuestionDraft {
                id: Some(q.id),
                temp_id: Uuid::new_v4(),
                text: q.text,
                qtype: q.qtype,
                options: q.options,
                is_required: q.is_required,
                order: q.order,
                factor: q.factor,
            })
            .collect();
        questions.sort_by_key(|q| q.order);

        let mut draft = Self {
            id: Some(detail.survey.id),
            title: detail.survey.title,
            description: detail.survey.description,
            category: Some(detail.survey.category),
            is_active: detail.survey.is_active,
            questions,
        };
        // Stored orders may have gaps; the draft invariant does not.
        draft.renumber();
        draft
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn questions(&self) -> &[QuestionDraft] {
        &self.questions
    }

    /// Append a blank question (text input, required) and return its index.
    pub fn add_question(&mut self) -> usize {
        let order = self.questions.len() as u32;
        self.questions.push(QuestionDraft::new(order));
        self.questions.len() - 1
    }

    pub fn set_question_text(&mut self, index: usize, text: impl Into<String>) {
        self.questions[index].text = text.into();
    }

    /// Change a question's type. Leaving an options-bearing type drops the
    /// option list; entering one seeds a single empty placeholder. Old
    /// options are not restored on the way back.
    pub fn set_question_type(&mut self, index: usize, qtype: QuestionType) {
        let question = &mut self.questions[index];
        question.qtype = qtype;
        if !qtype.has_options() {
            question.options = None;
        } else if question.options.is_none() {
            question.options = Some(vec![String::new()]);
        }
    }

    pub fn set_question_required(&mut self, index: usize, required: bool) {
        self.questions[index].is_required = required;
    }

    pub fn set_question_factor(&mut self, index: usize, factor: Option<i64>) {
        self.questions[index].factor = factor;
    }

    pub fn add_option(&mut self, index: usize) {
        self.questions[index]
            .options
            .get_or_insert_with(Vec::new)
            .push(String::new());
    }

    pub fn set_option(&mut self, index: usize, option_index: usize, value: impl Into<String>) {
        if let Some(options) = self.questions[index].options.as_mut() {
            options[option_index] = value.into();
        }
    }

    pub fn remove_option(&mut self, index: usize, option_index: usize) {
        if let Some(options) = self.questions[index].options.as_mut() {
            options.remove(option_index);
        }
    }

    /// Move a question to a new position. Panics if either index is out of
    /// bounds.
    pub fn reorder(&mut self, from: usize, to: usize) {
        let question = self.questions.remove(from);
        self.questions.insert(to, question);
        self.renumber();
    }

    pub fn remove_question(&mut self, index: usize) {
        self.questions.remove(index);
        self.renumber();
    }

    fn renumber(&mut self) {
        for (position, question) in self.questions.iter_mut().enumerate() {
            question.order = position as u32;
        }
    }

    /// Every check that must pass before the draft touches the network.
    pub fn validate(&self) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();

        if self.title.trim().is_empty() {
            failures.push(ValidationFailure::MissingTitle);
        }
        if self.category.is_none() {
            failures.push(ValidationFailure::MissingCategory);
        }
        if self.questions.is_empty() {
            failures.push(ValidationFailure::NoQuestions);
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                failures.push(ValidationFailure::EmptyQuestionText { index });
            }
            if question.qtype.has_options() {
                match question.options.as_deref() {
                    None | Some([]) => failures.push(ValidationFailure::MissingOptions { index }),
                    Some(options) => {
                        if options.iter().any(|option| option.trim().is_empty()) {
                            failures.push(ValidationFailure::EmptyOption { index });
                        }
                    }
                }
            }
        }

        failures
    }

    /// Persist the draft: create or update the form, then reconcile its
    /// questions. Persisted questions dropped from the draft are deleted;
    /// the rest are updated or created with their current order.
    pub async fn save(&mut self, api: &ApiClient) -> Result<i64, Error> {
        let failures = self.validate();
        if !failures.is_empty() {
            return Err(Error::Validation(failures));
        }
        let category = self
            .category
            .ok_or_else(|| Error::Validation(vec![ValidationFailure::MissingCategory]))?;

        let editing = self.id.is_some();
        let payload = SurveyPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            category,
            is_active: self.is_active,
        };

        let survey = match self.id {
            Some(id) => surveys::update_form(api, id, &payload).await?,
            None => surveys::create_form(api, &payload).await?,
        };
        self.id = Some(survey.id);

        if editing {
            let existing = surveys::list_questions(api, survey.id).await?;
            let kept: Vec<i64> = self.questions.iter().filter_map(|q| q.id).collect();
            for stale in existing.iter().filter(|q| !kept.contains(&q.id)) {
                surveys::delete_question(api, stale.id).await?;
            }
        }

        for question in &mut self.questions {
            let payload = QuestionPayload {
                survey: survey.id,
                text: question.text.clone(),
                qtype: question.qtype,
                options: question.options.clone(),
                is_required: question.is_required,
                order: question.order,
                factor: question.factor,
            };
            let saved = match question.id {
                Some(id) => surveys::update_question(api, id, &payload).await?,
                None => surveys::create_question(api, &payload).await?,
            };
            question.id = Some(saved.id);
        }

        tracing::info!(
            "Saved survey {} with {} questions",
            survey.id,
            self.questions.len()
        );
        Ok(survey.id)
    }
}

impl Default for SurveyDraft {
    fn default() -> Self {
        Self::new()
    }
}
