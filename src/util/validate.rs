//! Pre-submit checks for quiz drafts.
//!
//! Mirrors the server's rules so the editor can flag problems inline and show
//! the validation toast without a round trip. The server remains the
//! authority; a draft that passes here can still be rejected with 400.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::net::types::QuizDraft;

/// One problem with a draft, keyed by a dotted path into the quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: &'static str,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn missing(value: &str) -> bool {
    value.trim().is_empty()
}

/// Every problem in `draft`, in document order. Empty means valid.
#[must_use]
pub fn validate_quiz(draft: &QuizDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let mut push = |field: String, message| errors.push(FieldError { field, message });

    if missing(&draft.name) {
        push("quiz.name".to_owned(), "Missing quiz name");
    }
    if draft.questions.is_empty() {
        push("quiz.questions".to_owned(), "Missing questions");
    }

    for (qi, question) in draft.questions.iter().enumerate() {
        if missing(&question.name) {
            push(format!("quiz.questions.{qi}.name"), "Missing question name");
        }
        if question.answers.is_empty() {
            push(format!("quiz.questions.{qi}.answers"), "Missing answers");
            continue;
        }
        for (ai, answer) in question.answers.iter().enumerate() {
            if missing(&answer.name) {
                push(format!("quiz.questions.{qi}.answers.{ai}.name"), "Missing answer name");
            }
        }
        if !question.answers.iter().any(|a| a.is_correct == Some(true)) {
            push(format!("quiz.questions.{qi}.answers"), "No correct answer set");
        }
    }

    errors
}
