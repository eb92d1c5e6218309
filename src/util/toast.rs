//! Toast payload builders.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use serde::{Deserialize, Serialize};

const SUCCESS_CLASS: &str = "text-green-500 bg-green-100";
const ERROR_CLASS: &str = "text-red-500 bg-red-100";

/// A transient notification shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub success: bool,
    /// CSS classes the view applies to the toast body.
    pub class: String,
}

#[must_use]
pub fn success_toast() -> Toast {
    Toast { title: "Changes saved.".to_owned(), success: true, class: SUCCESS_CLASS.to_owned() }
}

#[must_use]
pub fn validation_toast() -> Toast {
    Toast {
        title: "Please fix any errors before submitting".to_owned(),
        success: false,
        class: ERROR_CLASS.to_owned(),
    }
}

#[must_use]
pub fn error_toast(message: impl Into<String>) -> Toast {
    Toast { title: message.into(), success: false, class: ERROR_CLASS.to_owned() }
}

impl From<&crate::net::ApiError> for Toast {
    fn from(err: &crate::net::ApiError) -> Self {
        error_toast(err.message())
    }
}
