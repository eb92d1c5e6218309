//! Wire types for the QuizManager REST API.
//!
//! DESIGN
//! ======
//! The server owns these shapes; the client keeps them permissive. Fields the
//! API omits for some roles (answer correctness for restricted users, the
//! editor who last touched a quiz) are optional, and unknown roles survive
//! deserialization instead of failing the whole response.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub type QuizId = i64;

/// Server-assigned permission tier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Editor,
    Viewer,
    Restricted,
    /// A role string this client does not know. Treated as least privileged.
    Unknown(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Editor => "editor",
            Self::Viewer => "viewer",
            Self::Restricted => "restricted",
            Self::Unknown(raw) => raw,
        }
    }

    /// Only editors may create, update or archive quizzes.
    #[must_use]
    pub fn can_edit_quizzes(&self) -> bool {
        matches!(self, Self::Editor)
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            "editor" => Self::Editor,
            "viewer" => Self::Viewer,
            "restricted" => Self::Restricted,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// The authenticated user as returned by `/api/users/@me` and `/api/auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    /// Server timestamp, kept verbatim; see [`crate::util::time`] for display.
    #[serde(default)]
    pub created_at: Option<String>,
    pub role: Role,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Draft,
    Published,
    Archived,
}

impl QuizStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl std::str::FromStr for QuizStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown quiz status '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub order: i32,
    /// Absent when the caller's role may not see answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub order: i32,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub name: String,
    pub status: QuizStatus,
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
    #[serde(default)]
    pub updated_by: Option<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Present on listing results only.
    #[serde(default)]
    pub question_count: Option<u32>,
}

/// Request body for creating or updating a quiz.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub name: String,
    pub status: QuizStatus,
    pub questions: Vec<Question>,
}

/// One page of a quiz listing plus the total number of matches.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct QuizPage {
    pub quizzes: Vec<Quiz>,
    pub count: u64,
}

/// Listing parameters for `GET /api/quizzes`.
///
/// A `None` status is sent as an empty string, which the server reads as
/// "every status this role may see".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizQuery {
    pub query: String,
    pub limit: u32,
    pub offset: u32,
    pub status: Option<QuizStatus>,
}

impl Default for QuizQuery {
    fn default() -> Self {
        Self { query: String::new(), limit: 10, offset: 0, status: None }
    }
}

impl QuizQuery {
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Self::default() }
    }

    #[must_use]
    pub fn page(self, limit: u32, offset: u32) -> Self {
        Self { limit, offset, ..self }
    }

    #[must_use]
    pub fn status(self, status: Option<QuizStatus>) -> Self {
        Self { status, ..self }
    }

    /// Query pairs in the order the server documents them.
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, String); 4] {
        [
            ("query", self.query.clone()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("status", self.status.map(QuizStatus::as_str).unwrap_or_default().to_owned()),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub remember: bool,
}

/// A single file attached to a multipart request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}
