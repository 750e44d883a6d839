//! The `triviaexam questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use triviaexam_core::bank::load_bank;

pub fn execute(bank_path: Option<PathBuf>) -> Result<()> {
    let bank = load_bank(bank_path.as_deref())?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Question", "Options", "Answer"]);

    for q in bank.iter() {
        let options = q
            .options
            .iter()
            .map(|(label, text)| format!("{label}. {text}"))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![q.id.clone(), q.prompt.clone(), options, q.correct.clone()]);
    }

    println!("{table}");
    println!("{} questions", bank.question_count());
    Ok(())
}
