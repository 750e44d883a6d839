//! Validation and grading error types.
//!
//! The web layer matches on these to decide between re-prompting the user
//! (recoverable submission errors) and answering with a generic failure
//! (a broken question bank or an incomplete result).

use thiserror::Error;

/// Why a submitted answer map was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The submission was not a key → string mapping.
    #[error("malformed submission: {0}")]
    MalformedInput(String),

    /// The submitted ids do not match the bank's ids exactly.
    #[error("{}", incomplete_message(.missing, .extra))]
    IncompleteOrExtraneous {
        /// Bank ids with no answer, sorted.
        missing: Vec<String>,
        /// Submitted ids not in the bank, sorted.
        extra: Vec<String>,
    },

    /// An answer is not one of the question's option labels.
    #[error("Invalid answer for {question_id}. Must be one of: {}", .valid.join(", "))]
    InvalidOption {
        question_id: String,
        /// Valid labels in the bank's option order.
        valid: Vec<String>,
    },
}

fn incomplete_message(missing: &[String], extra: &[String]) -> String {
    format!(
        "Missing answers for: {}; Unexpected answer keys: {}",
        missing.join(", "),
        extra.join(", ")
    )
}

impl ValidationError {
    /// Returns `true` if the user can fix this by resubmitting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ValidationError::IncompleteOrExtraneous { .. } | ValidationError::InvalidOption { .. }
        )
    }
}

/// Errors returned by [`crate::grader::grade`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// The question bank failed its shape check. Never a user error.
    #[error("invalid question bank: {}", .0.join("; "))]
    InvalidQuestionBank(Vec<String>),

    /// The answers failed strict validation.
    #[error("invalid user answers: {0}")]
    InvalidSubmission(#[from] ValidationError),
}

impl GradingError {
    /// Returns `true` for errors caused by a defect in the deployment rather
    /// than by the submitted answers.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GradingError::InvalidQuestionBank(_))
    }
}

/// Errors from the summary formatter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("result is not an object")]
    NotAnObject,

    #[error("result is missing required field: {0}")]
    MissingField(&'static str),

    #[error("result field has the wrong type: {field} (expected {expected})")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}
