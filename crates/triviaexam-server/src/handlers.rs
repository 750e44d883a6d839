//! Route handlers.
//!
//! Recoverable submission problems are reported back to the visitor as a
//! flash message that never includes the submitted values. Fatal problems
//! are logged in full and shown as a generic failure.

use axum::{
    extract::{Form, Json, State},
    http::{header::SET_COOKIE, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use triviaexam_core::{
    grade, sanitize, validate, AnswerMap, GradingError, GradingResult, Leniency, ValidationError,
};
use triviaexam_report::{render_error, render_exam, render_results, Flash};

use crate::session::Session;
use crate::state::AppState;

const MSG_NO_ANSWERS: &str = "No answers submitted";
const MSG_INCOMPLETE: &str = "Please answer all questions with valid options (A, B, C, or D)";
const MSG_INVALID_SUBMISSION: &str =
    "Invalid exam submission. Please check your answers and try again.";
const MSG_COMPLETE_FIRST: &str = "Please complete the exam first.";
const MSG_NOT_FOUND: &str = "Page not found. Return to the exam homepage.";
const MSG_INTERNAL: &str = "An internal error occurred. Please try again later.";

/// Attach the session cookie to a response.
fn with_session(state: &AppState, session: Session, response: impl IntoResponse) -> Response {
    let cookie = session.cookie(state.sessions.lifetime_secs(), state.config.cookie_secure);
    ([(SET_COOKIE, cookie)], response).into_response()
}

/// `GET /` — fresh exam form.
pub async fn index(State(state): State<AppState>, session: Session) -> Response {
    state.sessions.clear_result(session.id).await;
    let flashes = state.sessions.take_flashes(session.id).await;

    info!("exam interface loaded");
    with_session(&state, session, Html(render_exam(&state.bank, &flashes)))
}

/// `POST /submit` — validate, sanitize, grade, then redirect.
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<Vec<(String, String)>>,
) -> Response {
    match process_submission(&state, &form) {
        Ok(result) => {
            info!(
                "exam graded - score: {}/100, correct: {}/{}",
                result.score, result.correct_count, result.total_questions
            );
            state.sessions.store_result(session.id, result).await;
            with_session(&state, session, Redirect::to("/results"))
        }
        Err(Rejection::Flash(flash)) => {
            state.sessions.push_flash(session.id, flash).await;
            with_session(&state, session, Redirect::to("/"))
        }
        Err(Rejection::Fatal) => with_session(
            &state,
            session,
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render_error(MSG_INTERNAL))),
        ),
    }
}

/// Why a submission did not produce a result.
#[derive(Debug)]
enum Rejection {
    /// The visitor can fix it; tell them and send them back to the form.
    Flash(Flash),
    /// The server cannot grade anything.
    Fatal,
}

fn process_submission(
    state: &AppState,
    form: &[(String, String)],
) -> Result<GradingResult, Rejection> {
    if form.is_empty() {
        warn!("invalid submission: empty form");
        return Err(Rejection::Flash(Flash::error(MSG_NO_ANSWERS)));
    }

    let raw: AnswerMap = form
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    if let Err(e) = validate(&raw, &state.bank, Leniency::Lenient) {
        warn!("invalid submission: {e}");
        return Err(Rejection::Flash(Flash::error(lenient_failure_message(&e))));
    }

    let answers = sanitize(form.iter().map(|(k, v)| (k.as_str(), v.as_str())), &state.bank);
    if answers.len() != state.bank.question_count() {
        warn!(
            "incomplete answers after sanitization: {}/{}",
            answers.len(),
            state.bank.question_count()
        );
        return Err(Rejection::Flash(Flash::error(MSG_INCOMPLETE)));
    }

    grade(&state.bank, &answers).map_err(|e| {
        if e.is_fatal() {
            error!("grading failed: {e}");
            Rejection::Fatal
        } else {
            warn!("grading validation error: {e}");
            Rejection::Flash(Flash::error(MSG_INVALID_SUBMISSION))
        }
    })
}

/// Visitor-facing text for a lenient validation failure. Only bank ids are
/// included, never submitted values.
fn lenient_failure_message(err: &ValidationError) -> String {
    match err {
        ValidationError::IncompleteOrExtraneous { missing, .. } if !missing.is_empty() => {
            format!("Please answer all questions. Missing: {}", missing.join(", "))
        }
        ValidationError::InvalidOption { question_id, .. } => {
            format!("Invalid answer for {question_id}")
        }
        _ => "Invalid form data".to_string(),
    }
}

/// `GET /results` — the visitor's stored result.
pub async fn results(State(state): State<AppState>, session: Session) -> Response {
    match state.sessions.result(session.id).await {
        Some(result) => {
            info!("results page displayed");
            with_session(&state, session, Html(render_results(&result, &state.bank)))
        }
        None => {
            warn!("results page accessed without exam completion");
            state
                .sessions
                .push_flash(session.id, Flash::info(MSG_COMPLETE_FIRST))
                .await;
            with_session(&state, session, Redirect::to("/"))
        }
    }
}

/// `GET /retake` — forget the visitor's session and start over.
pub async fn retake(State(state): State<AppState>, session: Session) -> Response {
    state.sessions.remove(session.id).await;
    info!("session cleared for exam retake");
    with_session(&state, session, Redirect::to("/"))
}

pub async fn healthz() -> &'static str {
    "ok"
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> Response {
    warn!("404 error: {uri}");
    (StatusCode::NOT_FOUND, Html(render_error(MSG_NOT_FOUND))).into_response()
}

/// Error body for the JSON API.
#[derive(Debug, Serialize)]
struct ApiError {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unexpected: Option<usize>,
}

impl ApiError {
    fn response(status: StatusCode, error: &'static str, message: impl Into<String>) -> Response {
        let body = ApiError {
            error,
            message: message.into(),
            missing: Vec::new(),
            unexpected: None,
        };
        (status, Json(body)).into_response()
    }
}

fn validation_error_response(err: &ValidationError) -> Response {
    match err {
        ValidationError::MalformedInput(_) => ApiError::response(
            StatusCode::BAD_REQUEST,
            "malformed_input",
            "Submit a JSON object mapping question ids to answer labels.",
        ),
        ValidationError::IncompleteOrExtraneous { missing, extra } => {
            let body = ApiError {
                error: "incomplete_or_extraneous",
                message: incomplete_message(missing, extra.len()),
                missing: missing.clone(),
                unexpected: (!extra.is_empty()).then_some(extra.len()),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
        ValidationError::InvalidOption { question_id, valid } => ApiError::response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_option",
            format!("Invalid answer for {question_id}. Must be one of: {}", valid.join(", ")),
        ),
    }
}

/// Validation message for the API. Unknown keys come from the client, so
/// only their count is reported.
fn incomplete_message(missing: &[String], unexpected: usize) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("Missing answers for: {}", missing.join(", ")));
    }
    if unexpected > 0 {
        parts.push(format!("{unexpected} unexpected answer key(s)"));
    }
    parts.join("; ")
}

/// `POST /api/grade` — grade a JSON answer map without touching the session.
pub async fn api_grade(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let request_id = Uuid::new_v4();

    let answers = match AnswerMap::from_json(&body) {
        Ok(answers) => answers,
        Err(e) => {
            warn!(%request_id, "rejected API submission: {e}");
            return validation_error_response(&e);
        }
    };

    match grade(&state.bank, &answers) {
        Ok(result) => {
            info!(
                %request_id,
                "API exam graded - score: {}/100, correct: {}/{}",
                result.score, result.correct_count, result.total_questions
            );
            Json(result).into_response()
        }
        Err(GradingError::InvalidSubmission(e)) => {
            warn!(%request_id, "rejected API submission: {e}");
            validation_error_response(&e)
        }
        Err(e @ GradingError::InvalidQuestionBank(_)) => {
            error!(%request_id, "grading failed: {e}");
            ApiError::response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", MSG_INTERNAL)
        }
    }
}
