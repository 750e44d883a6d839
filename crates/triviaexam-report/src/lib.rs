//! triviaexam-report — HTML pages and JSON export for graded exams.

pub mod html;
pub mod json;

pub use html::{render_error, render_exam, render_results, write_results_html, Flash, FlashLevel};
pub use json::ResultRecord;
