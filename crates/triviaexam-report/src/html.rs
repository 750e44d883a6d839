//! HTML page rendering.
//!
//! Every page is self-contained with its CSS inlined. All text that came
//! from a question bank or a result is escaped before insertion.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use triviaexam_core::{GradingResult, QuestionBank};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Severity of a one-shot message shown at the top of the exam page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Error,
    Info,
}

impl FlashLevel {
    fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Error => "flash error",
            FlashLevel::Info => "flash info",
        }
    }
}

/// A one-shot message shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }
}

fn page_open(title: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html
}

fn page_close(html: &mut String) {
    html.push_str("</body>\n</html>");
}

fn push_flashes(html: &mut String, flashes: &[Flash]) {
    for flash in flashes {
        html.push_str(&format!(
            "<div class=\"{}\" role=\"alert\">{}</div>\n",
            flash.level.css_class(),
            html_escape(&flash.message)
        ));
    }
}

/// Render the exam form.
pub fn render_exam(bank: &QuestionBank, flashes: &[Flash]) -> String {
    let mut html = page_open("NFL Trivia Exam");

    html.push_str("<header>\n<h1>NFL Trivia Exam</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} questions. Choose one answer for each.</p>\n",
        bank.question_count()
    ));
    html.push_str("</header>\n");

    push_flashes(&mut html, flashes);

    html.push_str("<form method=\"post\" action=\"/submit\">\n");
    for (n, question) in bank.iter().enumerate() {
        let id = html_escape(&question.id);
        html.push_str("<fieldset class=\"question\">\n");
        html.push_str(&format!(
            "<legend>{}. {}</legend>\n",
            n + 1,
            html_escape(&question.prompt)
        ));
        for (label, text) in &question.options {
            let label = html_escape(label);
            html.push_str(&format!(
                "<label><input type=\"radio\" name=\"{id}\" value=\"{label}\" required> {label}. {}</label>\n",
                html_escape(text)
            ));
        }
        html.push_str("</fieldset>\n");
    }
    html.push_str("<button type=\"submit\">Submit answers</button>\n");
    html.push_str("</form>\n");

    page_close(&mut html);
    html
}

/// Render a graded result alongside the bank's questions and options.
pub fn render_results(result: &GradingResult, bank: &QuestionBank) -> String {
    let mut html = page_open("NFL Trivia Exam Results");

    html.push_str("<header>\n<h1>Your Results</h1>\n</header>\n");

    let tier_class = if result.percentage >= 70.0 {
        "pass"
    } else {
        "fail"
    };
    html.push_str(&format!("<section class=\"dashboard {tier_class}\">\n"));
    html.push_str(&format!("<p class=\"score\">{}/100</p>\n", result.score));
    html.push_str(&format!(
        "<p class=\"meta\">{} of {} correct ({:.2}%)</p>\n",
        result.correct_count, result.total_questions, result.percentage
    ));
    html.push_str(&format!(
        "<p class=\"feedback\">{}</p>\n",
        html_escape(&result.feedback_message)
    ));
    html.push_str("</section>\n");

    html.push_str("<section class=\"results\">\n<h2>Answers</h2>\n");
    html.push_str("<table class=\"results-table\">\n");
    html.push_str("<thead><tr><th>#</th><th>Question</th><th>Your answer</th><th>Correct answer</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (n, (id, detail)) in result.details.iter().enumerate() {
        let option_text = |label: &str| {
            bank.get(id)
                .and_then(|q| q.options.get(label))
                .map(|text| format!("{}. {}", html_escape(label), html_escape(text)))
                .unwrap_or_else(|| html_escape(label))
        };
        let row_class = if detail.is_correct { "pass" } else { "fail" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row_class,
            n + 1,
            html_escape(&detail.question_text),
            option_text(&detail.user_answer),
            option_text(&detail.correct_answer),
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");

    html.push_str("<p><a class=\"button\" href=\"/retake\">Retake the exam</a></p>\n");

    page_close(&mut html);
    html
}

/// Render a generic error page. The message is shown verbatim (escaped).
pub fn render_error(message: &str) -> String {
    let mut html = page_open("NFL Trivia Exam");
    html.push_str("<header>\n<h1>Something went wrong</h1>\n</header>\n");
    push_flashes(&mut html, &[Flash::error(message)]);
    html.push_str("<p><a class=\"button\" href=\"/\">Return to the exam</a></p>\n");
    page_close(&mut html);
    html
}

/// Write a standalone results page to a file.
pub fn write_results_html(result: &GradingResult, bank: &QuestionBank, path: &Path) -> Result<()> {
    let html = render_results(result, bank);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --info: #dbeafe; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --info: #1e3a8a; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 48rem; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.flash { padding: 0.75rem 1rem; border-radius: 8px; margin: 1rem 0; }
.flash.error { background: var(--fail); }
.flash.info { background: var(--info); }
fieldset.question { border: 1px solid var(--border); border-radius: 8px; margin: 1rem 0; padding: 1rem; }
fieldset.question label { display: block; padding: 0.25rem 0; }
legend { font-weight: bold; padding: 0 0.5rem; }
.dashboard { border-radius: 8px; padding: 1rem 1.5rem; }
.score { font-size: 2.5rem; font-weight: bold; margin: 0; }
.feedback { font-size: 1.25rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
button, .button { display: inline-block; padding: 0.6rem 1.2rem; border: 0; border-radius: 8px; background: #2563eb; color: #fff; text-decoration: none; font-size: 1rem; cursor: pointer; }
"#;
