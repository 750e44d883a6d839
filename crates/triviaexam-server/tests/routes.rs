//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use triviaexam_core::{Question, QuestionBank};
use triviaexam_server::{build_app, AppState, ServerConfig};

const KEY: [&str; 10] = ["B", "A", "C", "B", "C", "B", "B", "A", "C", "A"];

fn app() -> Router {
    build_app(AppState::new(
        QuestionBank::builtin().clone(),
        ServerConfig::default(),
    ))
}

fn form_body(labels: &[&str]) -> String {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("q{}={}", i + 1, label))
        .collect::<Vec<_>>()
        .join("&")
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: String, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::from(body)).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// The `name=value` part of the session cookie set on a response.
fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect location")
        .to_str()
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn index_renders_exam_and_sets_cookie() {
    let response = app().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("triviaexam_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let html = body_text(response).await;
    assert!(html.contains("NFL Trivia Exam"));
    assert_eq!(html.matches("<fieldset").count(), 10);
}

#[tokio::test]
async fn perfect_submission_flows_to_results() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_form("/submit", form_body(&KEY), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/results");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(get("/results", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("100/100"));
    assert!(html.contains("10 of 10 correct (100.00%)"));
    assert!(html.contains("Outstanding! You&#x27;re an NFL expert!"));
}

#[tokio::test]
async fn lowercase_and_padded_answers_are_accepted() {
    let app = app();
    let body = form_body(&["+a+"; 10]) + "&csrftoken=xyz";

    let response = app
        .clone()
        .oneshot(post_form("/submit", body, None))
        .await
        .unwrap();
    assert_eq!(location(&response), "/results");
    let cookie = session_cookie(&response);

    let html = body_text(app.oneshot(get("/results", Some(&cookie))).await.unwrap()).await;
    assert!(html.contains("20/100"));
    assert!(html.contains("Keep studying! Review the answers below!"));
}

#[tokio::test]
async fn incomplete_submission_flashes_missing_ids() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_form("/submit", "q1=+b+&q2=Z&csrftoken=xyz".into(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response);

    let html = body_text(app.clone().oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert!(html.contains("Please answer all questions. Missing: q10, q3, q4, q5, q6, q7, q8, q9"));

    // flashes are shown once
    let html = body_text(app.oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert!(!html.contains("Please answer all questions."));
}

#[tokio::test]
async fn invalid_option_is_not_echoed() {
    let app = app();
    let mut labels = KEY.to_vec();
    labels[1] = "%3Cscript%3Ealert(1)%3C%2Fscript%3E";

    let response = app
        .clone()
        .oneshot(post_form("/submit", form_body(&labels), None))
        .await
        .unwrap();
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response);

    let html = body_text(app.oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert!(html.contains("Invalid answer for q2"));
    assert!(!html.contains("alert(1)"));
}

#[tokio::test]
async fn empty_submission_is_rejected() {
    let app = app();
    let response = app
        .clone()
        .oneshot(post_form("/submit", String::new(), None))
        .await
        .unwrap();
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response);

    let html = body_text(app.oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert!(html.contains("No answers submitted"));
}

#[tokio::test]
async fn results_without_attempt_redirects() {
    let app = app();
    let response = app.clone().oneshot(get("/results", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response);

    let html = body_text(app.oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert!(html.contains("Please complete the exam first."));
}

#[tokio::test]
async fn retake_discards_result() {
    let app = app();
    let response = app
        .clone()
        .oneshot(post_form("/submit", form_body(&KEY), None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(get("/retake", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(location(&response), "/");

    let response = app.oneshot(get("/results", Some(&cookie))).await.unwrap();
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn visiting_index_clears_previous_result() {
    let app = app();
    let response = app
        .clone()
        .oneshot(post_form("/submit", form_body(&KEY), None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    let response = app.oneshot(get("/results", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn api_grades_json_answers() {
    let answers: serde_json::Map<String, serde_json::Value> = (1..=10)
        .map(|i| (format!("q{i}"), serde_json::Value::from("A")))
        .collect();

    let response = app()
        .oneshot(post_json("/api/grade", serde_json::Value::Object(answers)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["correct_count"], 2);
    assert_eq!(body["score"], 20);
    assert_eq!(body["details"]["q2"]["is_correct"], true);
}

#[tokio::test]
async fn api_rejects_malformed_and_incomplete_answers() {
    let response = app()
        .oneshot(post_json("/api/grade", serde_json::json!(["A", "B"])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "malformed_input");

    let response = app()
        .oneshot(post_json(
            "/api/grade",
            serde_json::json!({"q1": "B", "bogus": "A"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let text = body_text(response).await;
    assert!(!text.contains("bogus"));
    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["error"], "incomplete_or_extraneous");
    assert_eq!(body["missing"].as_array().unwrap().len(), 9);
    assert_eq!(body["unexpected"], 1);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Missing answers for: q10, q2, q3"));
    assert!(message.ends_with("; 1 unexpected answer key(s)"));
}

#[tokio::test]
async fn api_rejects_lowercase_labels() {
    let answers: serde_json::Map<String, serde_json::Value> = (1..=10)
        .map(|i| (format!("q{i}"), serde_json::Value::from("b")))
        .collect();
    let response = app()
        .oneshot(post_json("/api/grade", serde_json::Value::Object(answers)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "invalid_option");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = app().oneshot(get("/admin", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("Page not found."));
}

#[tokio::test]
async fn healthz_is_ok() {
    let response = app().oneshot(get("/healthz", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn invalid_bank_fails_submission_with_500() {
    let questions = QuestionBank::builtin().iter().cloned().map(|mut q| {
        if q.id == "q1" {
            q.correct = "Z".into();
        }
        q
    });
    let bank = QuestionBank::from_questions(questions).unwrap();
    let app = build_app(AppState::new(bank, ServerConfig::default()));

    let response = app
        .oneshot(post_form("/submit", form_body(&KEY), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::LOCATION).is_none());
    let html = body_text(response).await;
    assert!(html.contains("An internal error occurred."));
}

#[tokio::test]
async fn page_views_do_not_grow_session_store() {
    let state = AppState::new(QuestionBank::builtin().clone(), ServerConfig::default());
    let app = build_app(state.clone());

    for _ in 0..5 {
        let response = app.clone().oneshot(get("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert!(state.sessions.is_empty().await);

    let response = app
        .clone()
        .oneshot(post_form("/submit", form_body(&KEY), None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);
    assert_eq!(state.sessions.len().await, 1);

    app.oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(state.sessions.len().await, 1);
}
