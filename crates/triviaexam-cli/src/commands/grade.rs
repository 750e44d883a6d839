//! The `triviaexam grade` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use triviaexam_core::bank::load_bank;
use triviaexam_core::{grade, AnswerMap, GradingResult, QuestionBank};
use triviaexam_report::{write_results_html, ResultRecord};

pub fn execute(
    answers_path: PathBuf,
    bank_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let bank = load_bank(bank_path.as_deref())?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", answers_path.display()))?;

    let answers = AnswerMap::from_json(&value)?;
    let result = grade(&bank, &answers)?;
    tracing::debug!(
        "graded {}: {}/{} correct",
        answers_path.display(),
        result.correct_count,
        result.total_questions
    );

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => print_text(&result),
    }

    if let Some(path) = output {
        write_output(&result, &bank, &path)?;
        eprintln!("Result written to {}", path.display());
    }

    Ok(())
}

fn print_text(result: &GradingResult) {
    println!("{}", result.summary());
    println!("\nDetailed Results:");
    for (id, detail) in &result.details {
        let status = if detail.is_correct { "✓" } else { "✗" };
        println!("\n{status} {id}: {}", detail.question_text);
        println!("  Your answer: {}", detail.user_answer);
        println!("  Correct answer: {}", detail.correct_answer);
    }
}

fn write_output(result: &GradingResult, bank: &QuestionBank, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => write_results_html(result, bank, path),
        _ => ResultRecord::new(result.clone()).save_json(path),
    }
}
