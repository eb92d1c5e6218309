//! Quiz endpoints: list, read, create, update, delete.
//!
//! All of them require a session, so a 401 is treated as an expired session
//! and turned into a login redirect.

#[cfg(test)]
#[path = "quiz_test.rs"]
mod quiz_test;

use reqwest::Method;

use super::outcome::{ApiOutcome, UnauthorizedPolicy};
use super::request::{ApiClient, to_body};
use super::types::{Quiz, QuizDraft, QuizId, QuizPage, QuizQuery};

const POLICY: UnauthorizedPolicy = UnauthorizedPolicy::Redirect;

impl ApiClient {
    /// `GET /api/quizzes?query=&limit=&offset=&status=`
    ///
    /// Values are form-encoded, so a space goes out as `+`.
    pub async fn get_quizzes(&self, query: &QuizQuery) -> ApiOutcome<QuizPage> {
        let mut url = self.endpoint(&["api", "quizzes"]);
        url.query_pairs_mut().extend_pairs(query.pairs());
        self.fetch_json(Method::GET, url, None, POLICY).await
    }

    /// `GET /api/quizzes/{id}`
    pub async fn get_quiz_by_id(&self, id: QuizId) -> ApiOutcome<Quiz> {
        let url = self.quiz_url(id);
        self.fetch_json(Method::GET, url, None, POLICY).await
    }

    /// `POST /api/quizzes`
    pub async fn create_quiz(&self, draft: &QuizDraft) -> ApiOutcome<Quiz> {
        let body = match to_body(draft) {
            Ok(body) => body,
            Err(err) => return ApiOutcome::Failure(err),
        };
        let url = self.endpoint(&["api", "quizzes"]);
        self.fetch_json(Method::POST, url, Some(&body), POLICY).await
    }

    /// `PUT /api/quizzes/{id}`
    pub async fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> ApiOutcome<Quiz> {
        let body = match to_body(draft) {
            Ok(body) => body,
            Err(err) => return ApiOutcome::Failure(err),
        };
        let url = self.quiz_url(id);
        self.fetch_json(Method::PUT, url, Some(&body), POLICY).await
    }

    /// `DELETE /api/quizzes/{id}`. The server archives the quiz; there is no
    /// response body.
    pub async fn delete_quiz(&self, id: QuizId) -> ApiOutcome<()> {
        let url = self.quiz_url(id);
        self.fetch_empty(Method::DELETE, url, POLICY).await
    }

    fn quiz_url(&self, id: QuizId) -> reqwest::Url {
        self.endpoint(&["api", "quizzes", &id.to_string()])
    }
}
