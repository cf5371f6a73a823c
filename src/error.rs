use crate::auth::claims::TokenError;
use crate::client::transport::TransportError;

/// A single client-side check that failed before any network call was made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("survey title is required")]
    MissingTitle,
    #[error("survey category is required")]
    MissingCategory,
    #[error("survey must have at least one question")]
    NoQuestions,
    #[error("question {index} has no text")]
    EmptyQuestionText { index: usize },
    #[error("question {index} has an empty option")]
    EmptyOption { index: usize },
    #[error("question {index} needs at least one option")]
    MissingOptions { index: usize },
    #[error("answer value does not match the type of question {question_id}")]
    AnswerTypeMismatch { question_id: i64 },
    #[error("question {question_id} is not part of this survey")]
    UnknownQuestion { question_id: i64 },
    #[error("rating for question {question_id} must be between 1 and 5")]
    RatingOutOfRange { question_id: i64 },
    #[error("assignment is already completed")]
    AlreadyCompleted,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The authentication endpoint rejected the credentials. Nothing was
    /// persisted; the session is unchanged.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The refresh token was rejected or unusable. The session has already
    /// been logged out; the user must re-authenticate.
    #[error("session expired")]
    SessionExpired,

    /// Client-side checks failed; no network call was made.
    #[error("validation failed")]
    Validation(Vec<ValidationFailure>),

    /// Required questions left unanswered at submit time, by question id.
    #[error("required questions unanswered")]
    IncompleteSubmission(Vec<i64>),

    /// The server answered with a non-success status.
    #[error("api error {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl Error {
    /// Failures a caller may surface as a transient notification and retry
    /// by hand, as opposed to ones that invalidate the session or the form.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Api { .. } | Error::Transport(_))
    }
}
