use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurveyCategory {
    EndContract,
    Renewal,
    MidContract,
    Onboarding,
}

impl SurveyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SurveyCategory::EndContract => "End-of-Contract Evaluation",
            SurveyCategory::Renewal => "Renewal Consideration Questionnaire",
            SurveyCategory::MidContract => "Mid-Contract Job Satisfaction",
            SurveyCategory::Onboarding => "First-Day Onboarding Satisfaction",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Text,
    Textarea,
    Radio,
    Checkbox,
    Dropdown,
    Rating,
}

impl QuestionType {
    /// True for the types whose answers are picked from an option list.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            QuestionType::Radio | QuestionType::Checkbox | QuestionType::Dropdown
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Text => "Text Input",
            QuestionType::Textarea => "Text Area",
            QuestionType::Radio => "Radio Buttons",
            QuestionType::Checkbox => "Checkboxes",
            QuestionType::Dropdown => "Dropdown Selection",
            QuestionType::Rating => "Rating Scale",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorType {
    Turnover,
    NonTurnover,
}

/// A named analytical category attachable to questions and trainings.
/// Managed independently; questions reference it, never own it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Factor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub factor_type: FactorType,
    /// Score multiplier, 0.1 to 10.0, applied server-side.
    pub weight: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Survey {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: SurveyCategory,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Survey retrieve payload: the form plus its questions, ordered.
#[derive(Clone, Debug, Deserialize)]
pub struct SurveyDetail {
    #[serde(flatten)]
    pub survey: Survey,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub survey: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub qtype: QuestionType,
    /// Present and non-empty exactly when `qtype.has_options()`.
    pub options: Option<Vec<String>>,
    pub is_required: bool,
    pub order: u32,
    pub factor: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SurveySummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: SurveyCategory,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SurveyAssignment {
    pub id: i64,
    pub survey: i64,
    #[serde(default)]
    pub survey_details: Option<SurveySummary>,
    pub employee: i64,
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_score: Option<f64>,
}

/// One recorded answer, typed by the question it belongs to. The variants
/// are exhaustive over `QuestionType`; `matches` is the only place the
/// pairing rules live.
#[derive(Clone, Debug, PartialEq)]
pub enum AnswerValue {
    /// Free text, for TEXT and TEXTAREA.
    Text(String),
    /// A single option string, for RADIO and DROPDOWN.
    Choice(String),
    /// A set of option strings, for CHECKBOX.
    Selections(Vec<String>),
    /// An integer 1 to 5, for RATING.
    Rating(u8),
}

impl AnswerValue {
    pub fn matches(&self, qtype: QuestionType) -> bool {
        match self {
            AnswerValue::Text(_) => {
                matches!(qtype, QuestionType::Text | QuestionType::Textarea)
            }
            AnswerValue::Choice(_) => {
                matches!(qtype, QuestionType::Radio | QuestionType::Dropdown)
            }
            AnswerValue::Selections(_) => qtype == QuestionType::Checkbox,
            AnswerValue::Rating(_) => qtype == QuestionType::Rating,
        }
    }

    /// Whether the answer counts as "unanswered" for a required question.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(text) | AnswerValue::Choice(text) => text.trim().is_empty(),
            AnswerValue::Selections(values) => values.is_empty(),
            AnswerValue::Rating(_) => false,
        }
    }

    /// Wire form: `{"value": …}` for single answers, `{"values": […]}` for
    /// checkbox sets.
    pub fn to_wire(&self) -> Value {
        match self {
            AnswerValue::Text(text) | AnswerValue::Choice(text) => json!({ "value": text }),
            AnswerValue::Selections(values) => json!({ "values": values }),
            AnswerValue::Rating(rating) => json!({ "value": rating }),
        }
    }

    /// Rebuild a typed answer from the wire form, using the question type to
    /// resolve which variant a scalar belongs to. Returns `None` when the
    /// stored answer does not fit the question.
    pub fn from_wire(raw: &Value, qtype: QuestionType) -> Option<AnswerValue> {
        match qtype {
            QuestionType::Text | QuestionType::Textarea => raw
                .get("value")
                .and_then(Value::as_str)
                .map(|s| AnswerValue::Text(s.to_string())),
            QuestionType::Radio | QuestionType::Dropdown => raw
                .get("value")
                .and_then(Value::as_str)
                .map(|s| AnswerValue::Choice(s.to_string())),
            QuestionType::Checkbox => raw.get("values").and_then(Value::as_array).map(|items| {
                AnswerValue::Selections(
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                )
            }),
            QuestionType::Rating => raw
                .get("value")
                .and_then(Value::as_u64)
                .filter(|n| (1..=5).contains(n))
                .map(|n| AnswerValue::Rating(n as u8)),
        }
    }
}

/// Read-back form of a stored response.
#[derive(Clone, Debug, Deserialize)]
pub struct ResponseRecord {
    pub id: i64,
    #[serde(alias = "question")]
    pub question_id: i64,
    pub answer: Value,
    #[serde(default)]
    pub score: Option<f64>,
}
