//! Exam grading.
//!
//! [`grade`] is a pure function of the bank and the answers: it re-validates
//! both, scores each question in bank order, and derives the summary figures.

use indexmap::IndexMap;

use crate::bank::QuestionBank;
use crate::error::GradingError;
use crate::model::{AnswerMap, FeedbackTier, GradingResult, QuestionDetail};
use crate::validator::{validate, Leniency};

/// Grade `answers` against `bank`.
///
/// The bank must pass its shape check and the answers must pass strict
/// validation. `score` is the truncated percentage; `percentage` is rounded
/// to two decimals, so the two may differ at the margin (66.666… gives a
/// score of 66 and a percentage of 66.67). The feedback tier is chosen from
/// the unrounded percentage.
pub fn grade(bank: &QuestionBank, answers: &AnswerMap) -> Result<GradingResult, GradingError> {
    let (shape_ok, shape_errors) = bank.validate_shape();
    if !shape_ok {
        return Err(GradingError::InvalidQuestionBank(shape_errors));
    }

    validate(answers, bank, Leniency::Strict)?;

    let total_questions = bank.question_count();
    let mut correct_count = 0usize;
    let mut details = IndexMap::with_capacity(total_questions);

    for question in bank.iter() {
        // strict validation guarantees every bank id is answered
        let user_answer = answers.get(&question.id).unwrap_or_default();
        let is_correct = user_answer == question.correct;
        if is_correct {
            correct_count += 1;
        }

        details.insert(
            question.id.clone(),
            QuestionDetail {
                user_answer: user_answer.to_string(),
                correct_answer: question.correct.clone(),
                is_correct,
                question_text: question.prompt.clone(),
            },
        );
    }

    let percentage = if total_questions > 0 {
        100.0 * correct_count as f64 / total_questions as f64
    } else {
        0.0
    };

    Ok(GradingResult {
        score: percentage.trunc() as u32,
        correct_count,
        total_questions,
        percentage: round2(percentage),
        feedback_message: FeedbackTier::for_percentage(percentage).message().to_string(),
        details,
    })
}

/// Two-decimal rounding with ties going to the even digit.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
