//! The `triviaexam validate` command.

use std::path::PathBuf;

use anyhow::Result;

use triviaexam_core::bank::load_bank;

pub fn execute(bank_path: Option<PathBuf>) -> Result<()> {
    let bank = load_bank(bank_path.as_deref())?;
    let source = bank_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());

    println!("Question bank: {source} ({} questions)", bank.question_count());

    let (ok, errors) = bank.validate_shape();
    if ok {
        println!("All {} questions are valid.", bank.question_count());
        return Ok(());
    }

    for e in &errors {
        println!("  ERROR: {e}");
    }
    anyhow::bail!("{} validation error(s) found", errors.len())
}
