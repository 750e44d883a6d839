//! Answer validation against a question bank.
//!
//! One validator serves both call sites: the web layer runs it leniently on
//! raw form input, and the grader runs it strictly on sanitized answers.

use std::collections::BTreeSet;

use crate::bank::QuestionBank;
use crate::error::ValidationError;
use crate::model::AnswerMap;

/// How forgiving [`validate`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Leniency {
    /// Unknown keys and non-canonical values are rejected.
    #[default]
    Strict,
    /// Keys not in the bank are ignored; values are trimmed and uppercased
    /// before comparison.
    Lenient,
}

/// Validate submitted answers against the bank.
///
/// Checks key-set coverage first, then each value. Within the key check both
/// missing and unexpected ids are reported, sorted.
pub fn validate(
    submission: &AnswerMap,
    bank: &QuestionBank,
    leniency: Leniency,
) -> Result<(), ValidationError> {
    let expected: BTreeSet<&str> = bank.ids().collect();
    let provided: BTreeSet<&str> = submission.ids().collect();

    let missing: Vec<String> = expected
        .difference(&provided)
        .map(|id| id.to_string())
        .collect();
    let extra: Vec<String> = match leniency {
        Leniency::Strict => provided
            .difference(&expected)
            .map(|id| id.to_string())
            .collect(),
        Leniency::Lenient => Vec::new(),
    };

    if !missing.is_empty() || !extra.is_empty() {
        return Err(ValidationError::IncompleteOrExtraneous { missing, extra });
    }

    for question in bank.iter() {
        let Some(raw) = submission.get(&question.id) else {
            continue;
        };
        let answer = match leniency {
            Leniency::Strict => raw.to_string(),
            Leniency::Lenient => raw.trim().to_uppercase(),
        };
        if !question.options.contains_key(&answer) {
            return Err(ValidationError::InvalidOption {
                question_id: question.id.clone(),
                valid: question.options.keys().cloned().collect(),
            });
        }
    }

    Ok(())
}
