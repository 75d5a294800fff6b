//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("A message must carry text, an image, or a diagnosis")]
    EmptyMessage,

    #[error("Unknown message role: {0}")]
    UnknownRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_display() {
        let error = DomainError::EmptyMessage;
        assert_eq!(
            error.to_string(),
            "A message must carry text, an image, or a diagnosis"
        );
    }

    #[test]
    fn test_unknown_role_display() {
        let error = DomainError::UnknownRole("bot".to_string());
        assert_eq!(error.to_string(), "Unknown message role: bot");
    }
}
