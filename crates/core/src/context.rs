//! Form contexts

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three independent forms that produce live previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormContext {
    /// New profile form
    Create,
    /// Edit modal for an existing profile
    Edit,
    /// Recover modal (re-issue a card for an existing profile)
    Recover,
}

impl FormContext {
    /// All contexts, in display order
    pub const ALL: [FormContext; 3] = [
        FormContext::Create,
        FormContext::Edit,
        FormContext::Recover,
    ];

    /// Field id prefix used by this context's form
    pub fn field_prefix(self) -> &'static str {
        match self {
            FormContext::Create => "",
            FormContext::Edit => "edit-",
            FormContext::Recover => "recover-",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormContext::Create => "create",
            FormContext::Edit => "edit",
            FormContext::Recover => "recover",
        }
    }
}

impl fmt::Display for FormContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
