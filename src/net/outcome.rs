//! Typed results for API operations.
//!
//! ERROR HANDLING
//! ==============
//! Every API call resolves to exactly one [`ApiOutcome`]:
//! - `Success` with the decoded value,
//! - `Redirect` when the session expired and the login navigation was issued,
//! - `Failure` with a classified [`ApiError`] meant for a toast or inline message.
//!
//! Nothing is retried. A redirect is an effect, not an error, so it is kept out
//! of `ApiError` unless a caller explicitly collapses the outcome with
//! [`ApiOutcome::into_result`].

#[cfg(test)]
#[path = "outcome_test.rs"]
mod outcome_test;

use reqwest::StatusCode;

use super::redirect::LoginRedirect;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Classified API failure. The `Display` text is what the user sees.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a 4xx/5xx status that is not a session expiry.
    #[error("{status_text}")]
    Status { status: u16, status_text: String },

    /// The login endpoint rejected the supplied credentials.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// A successful response carried a body that is not the expected JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// The request body could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The session expired and the client navigated to the login page.
    #[error("login required: redirected to {0}")]
    LoginRequired(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::InvalidCredentials => Some(StatusCode::UNAUTHORIZED.as_u16()),
            _ => None,
        }
    }

    /// Text for a toast or inline error. Session expiry is never shown here;
    /// the login page is.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// How an endpoint interprets `401 Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedPolicy {
    /// The existing session expired: navigate to the login page.
    Redirect,
    /// The credentials in this request were wrong: report it, stay put.
    InvalidCredentials,
}

/// Map an error status to the error surfaced to the caller.
///
/// Returns `None` when the status means "session expired" under `policy`;
/// the caller then issues the login redirect instead of reporting anything.
#[must_use]
pub fn status_error(status: StatusCode, policy: UnauthorizedPolicy) -> Option<ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        return match policy {
            UnauthorizedPolicy::Redirect => None,
            UnauthorizedPolicy::InvalidCredentials => Some(ApiError::InvalidCredentials),
        };
    }
    let status_text = status
        .canonical_reason()
        .map_or_else(|| status.as_u16().to_string(), str::to_owned);
    Some(ApiError::Status { status: status.as_u16(), status_text })
}

/// Result of one API operation.
#[derive(Debug)]
#[must_use]
pub enum ApiOutcome<T> {
    Success(T),
    Redirect(LoginRedirect),
    Failure(ApiError),
}

impl<T> ApiOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Success(value) => ApiOutcome::Success(f(value)),
            Self::Redirect(redirect) => ApiOutcome::Redirect(redirect),
            Self::Failure(err) => ApiOutcome::Failure(err),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Collapse into a plain `Result`, folding a redirect into
    /// [`ApiError::LoginRequired`].
    ///
    /// # Errors
    ///
    /// Returns the failure, or `LoginRequired` if the outcome was a redirect.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Redirect(redirect) => Err(ApiError::LoginRequired(redirect.url().to_string())),
            Self::Failure(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiOutcome<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Failure(err),
        }
    }
}
