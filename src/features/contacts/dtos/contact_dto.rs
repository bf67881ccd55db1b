use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::validation::PHONE_REGEX;

/// Request DTO for the contact form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactFormDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(
        length(max = 12, message = "Phone must be at most 12 characters"),
        regex(path = *PHONE_REGEX, message = "Enter a valid phone number")
    )]
    pub phone: String,

    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission() {
        let dto = ContactFormDto {
            name: "Alice".to_string(),
            phone: "123456789012".to_string(),
            message: "Hi".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_overlong_phone_rejected() {
        let dto = ContactFormDto {
            name: "Alice".to_string(),
            phone: "1234567890123".to_string(),
            message: "Hi".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_non_numeric_phone_rejected() {
        let dto = ContactFormDto {
            name: "Alice".to_string(),
            phone: "call me".to_string(),
            message: "Hi".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_empty_message_rejected() {
        let dto = ContactFormDto {
            name: "Alice".to_string(),
            phone: "123456".to_string(),
            message: String::new(),
        };
        assert!(dto.validate().is_err());
    }
}
