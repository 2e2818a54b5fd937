use serde::{Deserialize, Serialize};

use crate::Role;

/// Caller identity handed over by the authentication collaborator.
///
/// The core never authenticates; it trusts that `subject` and `role` were
/// validated upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: Option<String>,
    role: Role,
}

impl UserIdentity {
    /// Creates an identity from an authenticated subject and its role.
    #[must_use]
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            display_name: None,
            role,
        }
    }

    /// Attaches a display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Returns the stable subject identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name, falling back to the subject.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.subject.as_str())
    }

    /// Returns the operator role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}
