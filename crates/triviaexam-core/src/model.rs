//! Core data model types for triviaexam.
//!
//! Questions, submitted answers, and the graded result that the web layer
//! stores and renders.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the four option labels every question carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// All labels in display order.
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionLabel {
    type Err = String;

    /// Exact match only: no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            other => Err(format!("unknown option label: {other}")),
        }
    }
}

/// A single multiple-choice question as authored.
///
/// Labels are kept as strings so a malformed bank can still be loaded and
/// reported by [`crate::bank::QuestionBank::validate_shape`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique key in the bank.
    pub id: String,
    /// Prompt text shown to the user.
    pub prompt: String,
    /// Option label → display text, in display order.
    pub options: IndexMap<String, String>,
    /// Label of the correct option.
    pub correct: String,
}

/// Submitted answers, question id → label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(IndexMap<String, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.0.insert(id.into(), label.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build an answer map from untrusted JSON.
    ///
    /// The value must be an object whose values are all strings.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or_else(|| {
            ValidationError::MalformedInput("user answers must be an object".into())
        })?;

        let mut answers = AnswerMap::new();
        for (id, answer) in object {
            let label = answer.as_str().ok_or_else(|| {
                ValidationError::MalformedInput(format!("answer for {id} must be a string"))
            })?;
            answers.insert(id.clone(), label);
        }
        Ok(answers)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Feedback shown with a graded exam, chosen by percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Outstanding,
    Excellent,
    Good,
    NotBad,
    KeepStudying,
}

impl FeedbackTier {
    /// Pick the tier for an unrounded percentage. Thresholds are inclusive.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            FeedbackTier::Outstanding
        } else if percentage >= 80.0 {
            FeedbackTier::Excellent
        } else if percentage >= 70.0 {
            FeedbackTier::Good
        } else if percentage >= 60.0 {
            FeedbackTier::NotBad
        } else {
            FeedbackTier::KeepStudying
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Outstanding => "Outstanding! You're an NFL expert!",
            FeedbackTier::Excellent => "Excellent work! Strong NFL knowledge!",
            FeedbackTier::Good => "Good job! Solid understanding of the NFL!",
            FeedbackTier::NotBad => "Not bad! Keep learning about the NFL!",
            FeedbackTier::KeepStudying => "Keep studying! Review the answers below!",
        }
    }
}

impl fmt::Display for FeedbackTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Per-question outcome inside a [`GradingResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub question_text: String,
}

/// A graded exam attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResult {
    /// Truncated percentage, 0–100.
    pub score: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    /// Percentage rounded to two decimals.
    pub percentage: f64,
    pub feedback_message: String,
    /// Keyed by question id, in bank order.
    pub details: IndexMap<String, QuestionDetail>,
}
