//! The question bank: built-in questions, TOML loading, and shape checks.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::model::{OptionLabel, Question};

/// An ordered, read-only set of questions. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: IndexMap<String, Question>,
}

impl QuestionBank {
    /// Build a bank, rejecting duplicate question ids.
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Result<Self> {
        let mut map = IndexMap::new();
        for q in questions {
            if map.contains_key(&q.id) {
                anyhow::bail!("duplicate question ID: {}", q.id);
            }
            map.insert(q.id.clone(), q);
        }
        Ok(Self { questions: map })
    }

    /// The built-in NFL trivia bank, constructed once per process.
    pub fn builtin() -> &'static QuestionBank {
        static BANK: OnceLock<QuestionBank> = OnceLock::new();
        BANK.get_or_init(|| QuestionBank {
            questions: BUILTIN_QUESTIONS
                .iter()
                .map(|&(id, prompt, options, correct)| {
                    let question = Question {
                        id: id.to_string(),
                        prompt: prompt.to_string(),
                        options: OptionLabel::ALL
                            .iter()
                            .zip(options)
                            .map(|(label, text)| (label.to_string(), text.to_string()))
                            .collect(),
                        correct: correct.to_string(),
                    };
                    (question.id.clone(), question)
                })
                .collect(),
        })
    }

    pub fn all_questions(&self) -> &IndexMap<String, Question> {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.questions.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.questions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.values()
    }

    /// Check every question's shape and collect all violations.
    ///
    /// Each message is prefixed with the offending question id.
    pub fn validate_shape(&self) -> (bool, Vec<String>) {
        let mut errors = Vec::new();

        for (id, q) in &self.questions {
            if q.prompt.trim().is_empty() {
                errors.push(format!("{id}: Missing 'question' key"));
            }
            if q.options.is_empty() {
                errors.push(format!("{id}: Missing 'options' key"));
            }
            if q.correct.is_empty() {
                errors.push(format!("{id}: Missing 'correct' key"));
            }

            if !q.options.is_empty() {
                let exact = q.options.len() == OptionLabel::ALL.len()
                    && OptionLabel::ALL
                        .iter()
                        .all(|label| q.options.contains_key(label.as_str()));
                if !exact {
                    errors.push(format!("{id}: Options must be exactly A, B, C, D"));
                }
            }

            if !q.correct.is_empty() && q.correct.parse::<OptionLabel>().is_err() {
                errors.push(format!("{id}: Correct answer must be A, B, C, or D"));
            }
        }

        (errors.is_empty(), errors)
    }
}

/// (id, prompt, options A–D, correct)
type BuiltinQuestion = (&'static str, &'static str, [&'static str; 4], &'static str);

const BUILTIN_QUESTIONS: &[BuiltinQuestion] = &[
    (
        "q1",
        "Which team has won the most Super Bowl championships in NFL history?",
        ["Dallas Cowboys", "New England Patriots", "Pittsburgh Steelers", "San Francisco 49ers"],
        "B",
    ),
    (
        "q2",
        "What is the only team to complete a perfect season including winning the Super Bowl?",
        ["1972 Miami Dolphins", "1985 Chicago Bears", "2007 New England Patriots", "1984 San Francisco 49ers"],
        "A",
    ),
    (
        "q3",
        "Which NFL team is known as 'America's Team'?",
        ["New York Giants", "Green Bay Packers", "Dallas Cowboys", "New England Patriots"],
        "C",
    ),
    (
        "q4",
        "How many teams currently compete in the NFL?",
        ["30", "32", "34", "28"],
        "B",
    ),
    (
        "q5",
        "Who holds the NFL record for most career touchdown passes?",
        ["Peyton Manning", "Brett Favre", "Tom Brady", "Drew Brees"],
        "C",
    ),
    (
        "q6",
        "Which running back holds the single-season rushing record with 2,105 yards?",
        ["Barry Sanders", "Eric Dickerson", "Adrian Peterson", "Derrick Henry"],
        "B",
    ),
    (
        "q7",
        "How many points is a safety worth in NFL football?",
        ["1 point", "2 points", "3 points", "6 points"],
        "B",
    ),
    (
        "q8",
        "In what year was the NFL founded?",
        ["1920", "1925", "1933", "1946"],
        "A",
    ),
    (
        "q9",
        "Which team won Super Bowl LVIII (58) in 2024?",
        ["Philadelphia Eagles", "San Francisco 49ers", "Kansas City Chiefs", "Cincinnati Bengals"],
        "C",
    ),
    (
        "q10",
        "What is the nickname of the NFL championship trophy?",
        ["The Lombardi Trophy", "The Halas Trophy", "The Commissioner's Trophy", "The Victory Cup"],
        "A",
    ),
];

/// Intermediate TOML structure for question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: IndexMap<String, String>,
    #[serde(default)]
    correct: String,
}

/// Load a question bank from a TOML file.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a [`QuestionBank`].
///
/// Missing `question`, `options` or `correct` keys load as empty values so
/// that [`QuestionBank::validate_shape`] can report them.
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed.questions.into_iter().map(|q| Question {
        id: q.id,
        prompt: q.question,
        options: q.options,
        correct: q.correct,
    });

    QuestionBank::from_questions(questions)
        .with_context(|| format!("invalid question bank: {}", source_path.display()))
}

/// Load the bank at `path`, or the built-in bank when no path is given.
pub fn load_bank(path: Option<&Path>) -> Result<QuestionBank> {
    match path {
        Some(p) => {
            let bank = parse_bank(p)?;
            tracing::debug!("loaded {} questions from {}", bank.question_count(), p.display());
            Ok(bank)
        }
        None => Ok(QuestionBank::builtin().clone()),
    }
}
