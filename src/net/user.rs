//! Identity endpoints: current user, login, logout.
//!
//! Login is the one endpoint where 401 means "wrong credentials" rather than
//! "session expired", so it reports [`super::outcome::ApiError::InvalidCredentials`] and never
//! navigates.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use reqwest::Method;

use super::outcome::{ApiOutcome, UnauthorizedPolicy};
use super::request::{ApiClient, to_body};
use super::types::{LoginForm, User};

impl ApiClient {
    /// `GET /api/users/@me`
    pub async fn get_user(&self) -> ApiOutcome<User> {
        let url = self.endpoint(&["api", "users", "@me"]);
        self.fetch_json(Method::GET, url, None, UnauthorizedPolicy::Redirect).await
    }

    /// `POST /api/auth/login` with `{ username, password, remember }`.
    ///
    /// On success the server's session cookie lands in this client's cookie
    /// store, so later calls are authenticated.
    pub async fn login_user(&self, username: &str, password: &str, remember: bool) -> ApiOutcome<User> {
        let form = LoginForm { username: username.to_owned(), password: password.to_owned(), remember };
        let body = match to_body(&form) {
            Ok(body) => body,
            Err(err) => return ApiOutcome::Failure(err),
        };
        let url = self.endpoint(&["api", "auth", "login"]);
        let outcome: ApiOutcome<User> = self
            .fetch_json(Method::POST, url, Some(&body), UnauthorizedPolicy::InvalidCredentials)
            .await;
        match &outcome {
            ApiOutcome::Success(user) => tracing::info!(username = %user.username, role = %user.role, "logged in"),
            ApiOutcome::Failure(err) => tracing::info!(%username, error = %err, "login rejected"),
            ApiOutcome::Redirect(_) => {}
        }
        outcome
    }

    /// `GET /api/auth/logout`. No response body.
    pub async fn logout_user(&self) -> ApiOutcome<()> {
        let url = self.endpoint(&["api", "auth", "logout"]);
        self.fetch_empty(Method::GET, url, UnauthorizedPolicy::Redirect).await
    }
}
