use super::*;
use crate::net::outcome::ApiError;
use crate::net::test_support::{CURRENT_PATH, client_for, unreachable_client};
use crate::net::types::{Answer, Question, QuizStatus};
use axum::extract::{Path, Query, RawQuery};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// =============================================================
// Helpers
// =============================================================

fn quiz_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": "published",
        "questions": [],
        "updated_by": null,
        "created_at": "2024-01-05T10:00:00Z",
        "updated_at": "2024-01-06T10:00:00Z"
    })
}

fn draft(name: &str) -> QuizDraft {
    QuizDraft {
        name: name.to_owned(),
        status: QuizStatus::Draft,
        questions: vec![Question {
            id: None,
            name: "Capital of France?".to_owned(),
            order: 0,
            answers: vec![Answer { id: None, name: "Paris".to_owned(), order: 0, is_correct: Some(true) }],
        }],
    }
}

fn unauthorized_router() -> Router {
    let deny = || async { StatusCode::UNAUTHORIZED };
    Router::new()
        .route("/api/quizzes", get(deny).post(deny))
        .route("/api/quizzes/{id}", get(deny).put(deny).delete(deny))
}

// =============================================================
// get_quizzes
// =============================================================

#[tokio::test]
async fn get_quizzes_sends_query_and_normalizes_page() {
    let seen: Arc<Mutex<Option<HashMap<String, String>>>> = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/api/quizzes",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = Some(params);
                Json(json!({ "quizzes": [quiz_json(1, "Capital cities")], "count": 31 }))
            }
        }),
    );
    let (client, navigator) = client_for(router).await;

    let query = QuizQuery::search("capital cities & towns").page(5, 10).status(Some(QuizStatus::Draft));
    let page = client.get_quizzes(&query).await.success().unwrap();

    assert_eq!(page.count, 31);
    assert_eq!(page.quizzes.len(), 1);
    assert_eq!(page.quizzes[0].name, "Capital cities");
    let params = seen.lock().unwrap().clone().unwrap();
    assert_eq!(params["query"], "capital cities & towns");
    assert_eq!(params["limit"], "5");
    assert_eq!(params["offset"], "10");
    assert_eq!(params["status"], "draft");
    assert_eq!(navigator.count(), 0);
}

#[tokio::test]
async fn get_quizzes_form_encodes_spaces_in_query() {
    let seen: Arc<Mutex<Option<String>>> = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/api/quizzes",
        get(move |RawQuery(raw): RawQuery| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = raw;
                Json(json!({ "quizzes": [], "count": 0 }))
            }
        }),
    );
    let (client, _) = client_for(router).await;

    let page = client.get_quizzes(&QuizQuery::search("capital cities")).await.success().unwrap();
    assert_eq!(page.count, 0);
    let raw = seen.lock().unwrap().clone().unwrap();
    assert_eq!(raw, "query=capital+cities&limit=10&offset=0&status=");
}

#[tokio::test]
async fn get_quizzes_without_status_sends_empty_status() {
    let seen: Arc<Mutex<Option<HashMap<String, String>>>> = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/api/quizzes",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = Some(params);
                Json(json!({ "quizzes": [], "count": 0 }))
            }
        }),
    );
    let (client, _) = client_for(router).await;

    let page = client.get_quizzes(&QuizQuery::default()).await.success().unwrap();
    assert!(page.quizzes.is_empty());
    assert_eq!(seen.lock().unwrap().as_ref().unwrap()["status"], "");
}

#[tokio::test]
async fn get_quizzes_bad_request_surfaces_status_text() {
    let router = Router::new().route("/api/quizzes", get(|| async { StatusCode::BAD_REQUEST }));
    let (client, navigator) = client_for(router).await;

    match client.get_quizzes(&QuizQuery::default()).await {
        ApiOutcome::Failure(ApiError::Status { status, status_text }) => {
            assert_eq!(status, 400);
            assert_eq!(status_text, "Bad Request");
        }
        other => panic!("expected status failure, got {other:?}"),
    }
    assert_eq!(navigator.count(), 0);
}

// =============================================================
// get_quiz_by_id
// =============================================================

#[tokio::test]
async fn get_quiz_by_id_requests_quiz_path() {
    let router = Router::new().route(
        "/api/quizzes/{id}",
        get(|Path(id): Path<i64>| async move { Json(quiz_json(id, "Rivers")) }),
    );
    let (client, _) = client_for(router).await;

    let quiz = client.get_quiz_by_id(17).await.success().unwrap();
    assert_eq!(quiz.id, 17);
    assert_eq!(quiz.name, "Rivers");
}

#[tokio::test]
async fn get_quiz_by_id_not_found_is_status_failure() {
    let router = Router::new().route("/api/quizzes/{id}", get(|| async { StatusCode::NOT_FOUND }));
    let (client, navigator) = client_for(router).await;

    let err = client.get_quiz_by_id(99).await.into_result().unwrap_err();
    assert_eq!(err.to_string(), "Not Found");
    assert_eq!(err.status(), Some(404));
    assert_eq!(navigator.count(), 0);
}

#[tokio::test]
async fn get_quiz_by_id_malformed_body_is_decode_failure() {
    let router = Router::new().route("/api/quizzes/{id}", get(|| async { "<html>oops</html>" }));
    let (client, _) = client_for(router).await;

    assert!(matches!(client.get_quiz_by_id(1).await, ApiOutcome::Failure(ApiError::Decode(_))));
}

// =============================================================
// create / update / delete
// =============================================================

#[tokio::test]
async fn create_quiz_posts_draft_and_returns_created_quiz() {
    let router = Router::new().route(
        "/api/quizzes",
        axum::routing::post(|Json(body): Json<Value>| async move {
            assert_eq!(body["status"], "draft");
            assert_eq!(body["questions"][0]["answers"][0]["name"], "Paris");
            let name = body["name"].as_str().unwrap_or_default().to_owned();
            Json(quiz_json(42, &name))
        }),
    );
    let (client, _) = client_for(router).await;

    let quiz = client.create_quiz(&draft("Geography")).await.success().unwrap();
    assert_eq!(quiz.id, 42);
    assert_eq!(quiz.name, "Geography");
}

#[tokio::test]
async fn update_quiz_puts_to_quiz_path() {
    let router = Router::new().route(
        "/api/quizzes/{id}",
        axum::routing::put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
            let name = body["name"].as_str().unwrap_or_default().to_owned();
            Json(quiz_json(id, &name))
        }),
    );
    let (client, _) = client_for(router).await;

    let quiz = client.update_quiz(8, &draft("Renamed")).await.success().unwrap();
    assert_eq!(quiz.id, 8);
    assert_eq!(quiz.name, "Renamed");
}

#[tokio::test]
async fn update_quiz_forbidden_for_non_editor() {
    let router = Router::new().route("/api/quizzes/{id}", axum::routing::put(|| async { StatusCode::FORBIDDEN }));
    let (client, navigator) = client_for(router).await;

    let err = client.update_quiz(8, &draft("Renamed")).await.into_result().unwrap_err();
    assert_eq!(err.to_string(), "Forbidden");
    assert_eq!(navigator.count(), 0);
}

#[tokio::test]
async fn delete_quiz_succeeds_without_body() {
    let router = Router::new().route("/api/quizzes/{id}", axum::routing::delete(|| async { "" }));
    let (client, _) = client_for(router).await;

    assert!(client.delete_quiz(3).await.is_success());
}

// =============================================================
// Session expiry and transport failure
// =============================================================

#[tokio::test]
async fn every_quiz_operation_redirects_on_unauthorized() {
    let (client, navigator) = client_for(unauthorized_router()).await;

    assert!(client.get_quizzes(&QuizQuery::default()).await.is_redirect());
    assert!(client.get_quiz_by_id(1).await.is_redirect());
    assert!(client.create_quiz(&draft("New")).await.is_redirect());
    assert!(client.update_quiz(1, &draft("New")).await.is_redirect());
    assert!(client.delete_quiz(1).await.is_redirect());

    let visits = navigator.visits();
    assert_eq!(visits.len(), 5);
    assert!(visits.iter().all(|r| r.return_path().as_deref() == Some(CURRENT_PATH)));
}

#[tokio::test]
async fn unreachable_server_is_transport_failure() {
    let (client, navigator) = unreachable_client().await;

    assert!(matches!(client.get_quiz_by_id(1).await, ApiOutcome::Failure(ApiError::Transport(_))));
    assert!(matches!(client.delete_quiz(1).await, ApiOutcome::Failure(ApiError::Transport(_))));
    assert_eq!(navigator.count(), 0);
}
