use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_parses_known_tiers() {
    assert_eq!(Role::from("editor"), Role::Editor);
    assert_eq!(Role::from("viewer"), Role::Viewer);
    assert_eq!(Role::from("restricted"), Role::Restricted);
}

#[test]
fn role_keeps_unknown_strings() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 9,
        "name": "Auditor",
        "username": "audit",
        "role": "auditor"
    }))
    .unwrap();
    assert_eq!(user.role, Role::Unknown("auditor".to_owned()));
    assert_eq!(user.role.to_string(), "auditor");
    assert!(!user.role.can_edit_quizzes());
}

#[test]
fn only_editors_can_edit_quizzes() {
    assert!(Role::Editor.can_edit_quizzes());
    assert!(!Role::Viewer.can_edit_quizzes());
    assert!(!Role::Restricted.can_edit_quizzes());
}

// =============================================================
// Quiz payloads
// =============================================================

#[test]
fn quiz_listing_entry_without_questions_deserializes() {
    let page: QuizPage = serde_json::from_value(serde_json::json!({
        "quizzes": [{
            "id": 1,
            "name": "Capitals",
            "status": "published",
            "questions": null,
            "updated_by": null,
            "created_at": "2024-01-05T10:00:00Z",
            "updated_at": "2024-01-06T10:00:00Z",
            "question_count": 4
        }],
        "count": 12
    }))
    .unwrap();
    assert_eq!(page.count, 12);
    assert_eq!(page.quizzes[0].status, QuizStatus::Published);
    assert_eq!(page.quizzes[0].question_count, Some(4));
    assert!(page.quizzes[0].questions.is_none());
}

#[test]
fn restricted_answers_have_no_correctness() {
    let question: Question = serde_json::from_value(serde_json::json!({
        "id": 3,
        "quiz_id": 1,
        "name": "Capital of France?",
        "order": 0,
        "answers": [{ "id": 7, "question_id": 3, "name": "Paris", "order": 0 }]
    }))
    .unwrap();
    assert_eq!(question.answers[0].is_correct, None);
}

#[test]
fn draft_serializes_without_absent_ids() {
    let draft = QuizDraft {
        name: "Rivers".to_owned(),
        status: QuizStatus::Draft,
        questions: vec![Question {
            id: None,
            name: "Longest river?".to_owned(),
            order: 0,
            answers: vec![Answer { id: None, name: "Nile".to_owned(), order: 0, is_correct: Some(true) }],
        }],
    };
    let value = serde_json::to_value(&draft).unwrap();
    assert_eq!(value["status"], "draft");
    assert!(value["questions"][0].get("id").is_none());
    assert_eq!(value["questions"][0]["answers"][0]["is_correct"], true);
}

#[test]
fn quiz_status_from_str_rejects_unknown() {
    assert_eq!("archived".parse::<QuizStatus>(), Ok(QuizStatus::Archived));
    assert!("deleted".parse::<QuizStatus>().is_err());
}

// =============================================================
// QuizQuery
// =============================================================

#[test]
fn quiz_query_defaults_match_server_defaults() {
    let pairs = QuizQuery::default().pairs();
    assert_eq!(pairs[0], ("query", String::new()));
    assert_eq!(pairs[1], ("limit", "10".to_owned()));
    assert_eq!(pairs[2], ("offset", "0".to_owned()));
    assert_eq!(pairs[3], ("status", String::new()));
}

#[test]
fn quiz_query_builder_sets_page_and_status() {
    let query = QuizQuery::search("rivers").page(25, 50).status(Some(QuizStatus::Draft));
    let pairs = query.pairs();
    assert_eq!(pairs[0].1, "rivers");
    assert_eq!(pairs[1].1, "25");
    assert_eq!(pairs[2].1, "50");
    assert_eq!(pairs[3].1, "draft");
}
