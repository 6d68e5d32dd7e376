//! The single user profile record.

use serde::{Deserialize, Serialize};

/// User identity fields. At most one exists per installation.
///
/// An empty `username` means no profile has been created yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn is_created(&self) -> bool {
        !self.username.is_empty()
    }

    /// Header text shown above the profile form.
    pub fn greeting(&self) -> String {
        if self.is_created() {
            format!("Welcome, {}", self.username)
        } else {
            "Create Profile".to_string()
        }
    }

    /// Treats blank optional fields as unset.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            username: self.username,
            email: self.email.filter(|s| !s.trim().is_empty()),
            company: self.company.filter(|s| !s.trim().is_empty()),
        }
    }
}
