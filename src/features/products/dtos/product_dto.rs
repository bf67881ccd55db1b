use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::products::formset::{self, VersionRowForm};
use crate::modules::storage::UploadedPhoto;
use crate::shared::forms::FormErrors;

/// Submitted product fields, already coerced from form text values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductFormDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub description: Option<String>,

    pub category_id: Option<i64>,

    pub price: Option<i32>,

    pub manufactured_at: Option<NaiveDate>,
}

/// Everything one product form POST carries: parent fields, version rows and
/// an optional photo, plus the type-coercion errors found while assembling.
#[derive(Debug, Clone, Default)]
pub struct ProductSubmission {
    pub product: ProductFormDto,
    pub versions: Vec<VersionRowForm>,
    pub photo: Option<UploadedPhoto>,
    pub parse_errors: FormErrors,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ProductSubmission {
    /// Assemble a submission from the decoded multipart fields. Coercion
    /// failures (bad numbers, bad dates) land in `parse_errors` keyed by
    /// field so the form can re-display them; they never abort assembly.
    pub fn from_fields(fields: &[(String, String)], photo: Option<UploadedPhoto>) -> Self {
        let mut parse_errors = FormErrors::new();
        let mut product = ProductFormDto::default();

        for (name, value) in fields {
            match name.as_str() {
                "name" => product.name = value.trim().to_string(),
                "description" => product.description = non_empty(value),
                "category" => {
                    if let Some(raw) = non_empty(value) {
                        match raw.parse::<i64>() {
                            Ok(id) => product.category_id = Some(id),
                            Err(_) => parse_errors.add("category", "Select a valid category"),
                        }
                    }
                }
                "price" => {
                    if let Some(raw) = non_empty(value) {
                        match raw.parse::<i32>() {
                            Ok(price) => product.price = Some(price),
                            Err(_) => parse_errors.add("price", "Enter a whole number"),
                        }
                    }
                }
                "manufactured_at" => {
                    if let Some(raw) = non_empty(value) {
                        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                            Ok(date) => product.manufactured_at = Some(date),
                            Err(_) => {
                                parse_errors.add("manufactured_at", "Enter a date as YYYY-MM-DD")
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        let versions = formset::collect_version_rows(fields, &mut parse_errors);

        Self {
            product,
            versions,
            photo,
            parse_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_assembles_typed_fields() {
        let submission = ProductSubmission::from_fields(
            &fields(&[
                ("name", " Hammer "),
                ("description", "Steel head"),
                ("category", "3"),
                ("price", "10"),
                ("manufactured_at", "2024-06-01"),
                ("versions-0-version_number", "1.0"),
            ]),
            None,
        );

        assert!(submission.parse_errors.is_empty());
        assert_eq!(submission.product.name, "Hammer");
        assert_eq!(submission.product.category_id, Some(3));
        assert_eq!(submission.product.price, Some(10));
        assert_eq!(
            submission.product.manufactured_at,
            Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        );
        assert_eq!(submission.versions.len(), 1);
    }

    #[test]
    fn test_empty_optionals_become_none() {
        let submission = ProductSubmission::from_fields(
            &fields(&[
                ("name", "Hammer"),
                ("description", "  "),
                ("category", ""),
                ("price", ""),
                ("manufactured_at", ""),
            ]),
            None,
        );

        assert!(submission.parse_errors.is_empty());
        assert_eq!(submission.product.description, None);
        assert_eq!(submission.product.category_id, None);
        assert_eq!(submission.product.price, None);
        assert_eq!(submission.product.manufactured_at, None);
    }

    #[test]
    fn test_bad_coercions_reported_per_field() {
        let submission = ProductSubmission::from_fields(
            &fields(&[
                ("name", "Hammer"),
                ("category", "tools"),
                ("price", "ten"),
                ("manufactured_at", "01.06.2024"),
            ]),
            None,
        );

        let keys: Vec<_> = submission
            .parse_errors
            .messages()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(keys, vec!["category", "manufactured_at", "price"]);
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let submission = ProductSubmission::from_fields(&fields(&[("name", "  ")]), None);
        assert!(submission.product.validate().is_err());
    }
}
