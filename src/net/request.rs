//! Request layer shared by every API client.
//!
//! DESIGN
//! ======
//! One call, one network request. [`ApiClient::do_request`] only encodes the
//! body and splits the response by status: `< 400` is handed back as-is,
//! `>= 400` comes back unparsed inside [`RequestFailure::Status`] so each
//! endpoint can apply its own classification (see [`super::outcome`]).
//!
//! Bodies are JSON unless files are attached, in which case the first file is
//! sent as the `file` form field and the JSON payload as the `json` field.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::outcome::{ApiError, ApiOutcome, UnauthorizedPolicy, status_error};
use super::redirect::{LoginRedirect, Navigator, login_redirect_url};
use super::types::FileUpload;
use crate::config::{ClientConfig, ConfigError};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Body of an outgoing request, before it is attached to a builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodedBody {
    /// JSON payload (or no payload) sent with `Content-Type: application/json`.
    Json(Option<String>),
    /// Multipart form with the first file under `file` and the payload under `json`.
    Multipart { file: FileUpload, json: String },
}

/// Encode `data` and `files` the way the API expects.
///
/// With files, `json` is the serialized payload or the literal `null` when
/// there is none.
#[must_use]
pub fn encode_body(data: Option<&Value>, files: &[FileUpload]) -> EncodedBody {
    let json = data.map(Value::to_string);
    match files.first() {
        Some(file) => EncodedBody::Multipart {
            file: file.clone(),
            json: json.unwrap_or_else(|| Value::Null.to_string()),
        },
        None => EncodedBody::Json(json),
    }
}

impl EncodedBody {
    fn apply(self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match self {
            Self::Json(body) => {
                let builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE);
                Ok(match body {
                    Some(body) => builder.body(body),
                    None => builder,
                })
            }
            Self::Multipart { file, json } => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime)
                    .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
                let form = Form::new().part("file", part).text("json", json);
                Ok(builder.multipart(form))
            }
        }
    }
}

/// Why a request did not produce a usable response.
#[derive(Debug)]
pub enum RequestFailure {
    /// No response at all.
    Transport(reqwest::Error),
    /// The request could not be built; nothing was sent.
    Invalid(ApiError),
    /// A response with status `>= 400`, not yet read.
    Status(Response),
}

/// HTTP client for the QuizManager API.
///
/// Cheap to clone; clones share the connection pool, cookie store and
/// navigator.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    current_path: String,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("current_path", &self.current_path)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from config. A configured session cookie seeds the
    /// client's cookie store; the cookie set by a successful login replaces it
    /// for later requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured session cookie is not a valid header
    /// value or the HTTP client fails to build.
    pub fn new(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self, ApiError> {
        let jar = Jar::default();
        if let Some(cookie) = &config.session_cookie {
            HeaderValue::from_str(cookie).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
            seed_cookies(&jar, cookie, &config.base_url);
        }
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::new(jar))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            current_path: config.current_path.clone(),
            navigator,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Record that the user moved to `path`; later redirects return there.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCurrentPath`] unless `path` starts with `/`.
    pub fn set_current_path(&mut self, path: impl Into<String>) -> Result<(), ConfigError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidCurrentPath(path));
        }
        self.current_path = path;
        Ok(())
    }

    /// Absolute URL for `segments` below the base URL. Each segment is
    /// percent-encoded on its own.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Issue exactly one request.
    ///
    /// # Errors
    ///
    /// Returns [`RequestFailure::Transport`] if no response arrived,
    /// [`RequestFailure::Invalid`] if the body could not be built, and
    /// [`RequestFailure::Status`] with the unread response for status `>= 400`.
    pub async fn do_request(
        &self,
        method: Method,
        url: Url,
        data: Option<&Value>,
        files: &[FileUpload],
    ) -> Result<Response, RequestFailure> {
        tracing::debug!(%method, %url, files = files.len(), "sending request");
        let builder = encode_body(data, files)
            .apply(self.http.request(method.clone(), url.clone()))
            .map_err(RequestFailure::Invalid)?;

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(%method, %url, error = %e, "request failed");
            RequestFailure::Transport(e)
        })?;

        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "response received");
        if status.as_u16() >= 400 {
            return Err(RequestFailure::Status(response));
        }
        Ok(response)
    }

    /// `GET` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::do_request`].
    pub async fn get_request(&self, url: Url) -> Result<Response, RequestFailure> {
        self.do_request(Method::GET, url, None, &[]).await
    }

    /// Send the user to the login page, remembering the current path.
    pub fn do_login(&self) -> LoginRedirect {
        let mut location = self.base_url.clone();
        location.set_path(&self.current_path);
        let redirect = LoginRedirect::new(login_redirect_url(&location, &self.current_path));
        tracing::warn!(url = %redirect.url(), path = %self.current_path, "redirecting to login");
        self.navigator.navigate(&redirect);
        redirect
    }

    /// Turn a failed request into an outcome according to `policy`.
    pub(crate) fn classify<T>(&self, failure: RequestFailure, policy: UnauthorizedPolicy) -> ApiOutcome<T> {
        match failure {
            RequestFailure::Transport(e) => ApiOutcome::Failure(ApiError::Transport(e)),
            RequestFailure::Invalid(err) => ApiOutcome::Failure(err),
            RequestFailure::Status(response) => match status_error(response.status(), policy) {
                Some(err) => ApiOutcome::Failure(err),
                None => ApiOutcome::Redirect(self.do_login()),
            },
        }
    }

    /// Send a request and decode a JSON response body.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        data: Option<&Value>,
        policy: UnauthorizedPolicy,
    ) -> ApiOutcome<T> {
        match self.do_request(method, url, data, &[]).await {
            Ok(response) => read_json(response).await.into(),
            Err(failure) => self.classify(failure, policy),
        }
    }

    /// Send a request whose response has no body worth reading.
    pub(crate) async fn fetch_empty(
        &self,
        method: Method,
        url: Url,
        policy: UnauthorizedPolicy,
    ) -> ApiOutcome<()> {
        match self.do_request(method, url, None, &[]).await {
            Ok(_) => ApiOutcome::Success(()),
            Err(failure) => self.classify(failure, policy),
        }
    }
}

/// Read and decode a successful response. A body that is not the expected
/// JSON is reported as [`ApiError::Decode`].
///
/// # Errors
///
/// Returns [`ApiError::Transport`] if the body cannot be read and
/// [`ApiError::Decode`] if it does not parse.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(ApiError::Transport)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Serialize a typed request body.
pub(crate) fn to_body(value: &impl serde::Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

/// Store each `name=value` pair of a `Cookie` header value in `jar` for
/// `base_url`, so a `Set-Cookie` from the server later replaces it.
fn seed_cookies(jar: &Jar, header: &str, base_url: &Url) {
    for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        jar.add_cookie_str(pair, base_url);
    }
}
