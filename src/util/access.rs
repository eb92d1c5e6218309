//! Role-based visibility of quiz answers.
//!
//! The server already strips answer correctness for roles that may not see
//! it; these helpers decide which controls a view offers so the UI never
//! shows a button the server would refuse.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use crate::net::types::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerAccess {
    pub can_see: bool,
    pub can_edit: bool,
}

impl AnswerAccess {
    #[must_use]
    pub fn for_role(role: &Role) -> Self {
        match role {
            Role::Editor => Self { can_see: true, can_edit: true },
            Role::Viewer => Self { can_see: true, can_edit: false },
            Role::Restricted | Role::Unknown(_) => Self { can_see: false, can_edit: false },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerAction {
    ShowAnswers,
    EditAnswers,
}

impl AnswerAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ShowAnswers => "Show Answers",
            Self::EditAnswers => "Edit Answers",
        }
    }
}

/// Buttons offered on the quiz page. Editing implies seeing, so editors get
/// only the edit control.
#[must_use]
pub fn answer_actions(role: &Role) -> Vec<AnswerAction> {
    let access = AnswerAccess::for_role(role);
    if access.can_edit {
        vec![AnswerAction::EditAnswers]
    } else if access.can_see {
        vec![AnswerAction::ShowAnswers]
    } else {
        Vec::new()
    }
}

/// Label of the per-row link in the quiz listing.
#[must_use]
pub fn quiz_link_label(role: &Role) -> &'static str {
    if role.can_edit_quizzes() { "Edit" } else { "View" }
}
