use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::ValidationErrors;

/// Field-level error map collected across a form submission (parent fields
/// and formset rows alike). Ordered so re-rendered pages are deterministic.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fold `validator` derive output into this map.
    pub fn extend_from_validation(&mut self, errors: &ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                self.add(field.to_string(), message);
            }
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().flat_map(|(field, messages)| {
            messages
                .iter()
                .map(move |message| (field.as_str(), message.as_str()))
        })
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.messages() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn test_add_and_display() {
        let mut errors = FormErrors::new();
        errors.add("name", "Name is required");
        errors.add("price", "Enter a whole number");
        assert!(!errors.is_empty());
        // BTreeMap keeps field order stable
        assert_eq!(
            errors.to_string(),
            "name: Name is required; price: Enter a whole number"
        );
    }

    #[test]
    fn test_extend_from_validation() {
        let probe = Probe {
            name: String::new(),
        };
        let mut errors = FormErrors::new();
        errors.extend_from_validation(&probe.validate().unwrap_err());
        let collected: Vec<_> = errors.messages().collect();
        assert_eq!(collected, vec![("name", "Name is required")]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = FormErrors::new();
        errors.add("name", "Name is required");
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value, serde_json::json!({"name": ["Name is required"]}));
    }

    #[test]
    fn test_repeated_fields_append() {
        let mut errors = FormErrors::new();
        errors.add("name", "first");
        errors.add("name", "second");
        errors.add("phone", "third");
        assert_eq!(errors.messages().count(), 3);
    }
}
