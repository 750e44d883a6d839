//! Plain-text result summaries for out-of-band reporting.

use serde_json::Value;

use crate::error::SummaryError;
use crate::model::GradingResult;

const RULE_WIDTH: usize = 50;

const REQUIRED_FIELDS: [&str; 5] = [
    "score",
    "correct_count",
    "total_questions",
    "percentage",
    "feedback_message",
];

/// Format an untyped result (e.g. one read back from JSON).
pub fn format_summary(result: &Value) -> Result<String, SummaryError> {
    let object = result.as_object().ok_or(SummaryError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(SummaryError::MissingField(field));
        }
    }

    let count = |field: &'static str| {
        object[field].as_u64().ok_or(SummaryError::WrongType {
            field,
            expected: "non-negative integer",
        })
    };
    let score = count("score")?;
    let correct = count("correct_count")?;
    let total = count("total_questions")?;
    let percentage = object["percentage"]
        .as_f64()
        .ok_or(SummaryError::WrongType {
            field: "percentage",
            expected: "number",
        })?;
    let feedback = object["feedback_message"]
        .as_str()
        .ok_or(SummaryError::WrongType {
            field: "feedback_message",
            expected: "string",
        })?;

    Ok(render(
        &score.to_string(),
        &correct.to_string(),
        &total.to_string(),
        percentage,
        feedback,
    ))
}

impl GradingResult {
    /// Fixed-layout multi-line summary of this result.
    pub fn summary(&self) -> String {
        render(
            &self.score.to_string(),
            &self.correct_count.to_string(),
            &self.total_questions.to_string(),
            self.percentage,
            &self.feedback_message,
        )
    }
}

fn render(score: &str, correct: &str, total: &str, percentage: f64, feedback: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    [
        rule.clone(),
        "NFL TRIVIA EXAM RESULTS".to_string(),
        rule.clone(),
        format!("Score: {score}/100"),
        format!("Correct Answers: {correct}/{total}"),
        format!("Percentage: {percentage:.2}%"),
        String::new(),
        feedback.to_string(),
        rule,
    ]
    .join("\n")
}
