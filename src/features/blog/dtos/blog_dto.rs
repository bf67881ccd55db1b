use serde::{Deserialize, Serialize};
use validator::Validate;

/// Submitted blog post fields. The slug never comes from the form; it is
/// derived from the title at write time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BlogFormDto {
    #[validate(length(min = 1, max = 150, message = "Title must be 1-150 characters"))]
    pub title: String,

    pub description: Option<String>,
}

impl BlogFormDto {
    pub fn from_fields(fields: &[(String, String)]) -> Self {
        let mut dto = BlogFormDto::default();

        for (name, value) in fields {
            match name.as_str() {
                "title" => dto.title = value.trim().to_string(),
                "description" => {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        dto.description = Some(trimmed.to_string());
                    }
                }
                _ => {}
            }
        }

        dto
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields() {
        let fields = vec![
            ("title".to_string(), "  Привет Мир  ".to_string()),
            ("description".to_string(), "first post".to_string()),
        ];
        let dto = BlogFormDto::from_fields(&fields);
        assert_eq!(dto.title, "Привет Мир");
        assert_eq!(dto.description.as_deref(), Some("first post"));
    }

    #[test]
    fn test_blank_description_becomes_none() {
        let fields = vec![
            ("title".to_string(), "Post".to_string()),
            ("description".to_string(), "   ".to_string()),
        ];
        let dto = BlogFormDto::from_fields(&fields);
        assert_eq!(dto.description, None);
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let dto = BlogFormDto::from_fields(&[]);
        assert!(dto.validate().is_err());
    }
}
