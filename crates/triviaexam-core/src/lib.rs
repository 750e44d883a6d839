//! triviaexam-core — Question bank, answer validation, and grading.
//!
//! Everything in this crate is synchronous and free of shared mutable state.
//! The bank is read-only after construction and [`grader::grade`] is a pure
//! function, so both can be used from any number of request handlers.

pub mod bank;
pub mod error;
pub mod grader;
pub mod model;
pub mod sanitizer;
pub mod summary;
pub mod validator;

pub use bank::QuestionBank;
pub use error::{GradingError, SummaryError, ValidationError};
pub use grader::grade;
pub use model::{AnswerMap, FeedbackTier, GradingResult, OptionLabel, Question, QuestionDetail};
pub use sanitizer::sanitize;
pub use validator::{validate, Leniency};
