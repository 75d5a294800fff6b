//! Authentication domain entities

use serde::{Deserialize, Serialize};

/// An authenticated user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Derive a display name from the email's local part when the backend
    /// does not supply one.
    pub fn from_email(email: impl Into<String>) -> Self {
        let email = email.into();
        let name = email.split('@').next().unwrap_or(&email).to_string();
        Self { name, email }
    }
}

/// Bearer token issued by the backend (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_email_uses_local_part_as_name() {
        let user = User::from_email("grower@example.com");
        assert_eq!(user.name, "grower");
        assert_eq!(user.email, "grower@example.com");
    }

    #[test]
    fn from_email_without_at_sign_keeps_whole_string() {
        let user = User::from_email("grower");
        assert_eq!(user.name, "grower");
    }
}
