//! Networking modules for the QuizManager REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `request` owns the HTTP client and request encoding, `outcome` classifies
//! responses, `redirect` implements the login-redirect recovery, `quiz` and
//! `user` expose one method per endpoint, and `types` defines the wire schema.

pub mod outcome;
pub mod quiz;
pub mod redirect;
pub mod request;
pub mod types;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use outcome::{ApiError, ApiOutcome};
pub use redirect::{LoginRedirect, Navigator, RecordingNavigator, TracingNavigator};
pub use request::ApiClient;
