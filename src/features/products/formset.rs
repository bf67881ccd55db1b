//! Version row formset handling.
//!
//! Version records are submitted together with their parent product as an
//! indexed batch of fields named `versions-{index}-{field}`. Rows are grouped
//! by index, entirely blank extra rows are skipped, and the remaining rows are
//! validated independently of the parent. Per-row errors are keyed by the full
//! field name so the form can re-display them next to the offending row.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::shared::forms::FormErrors;

const MAX_VERSION_NUMBER_LEN: usize = 10;
const MAX_VERSION_NAME_LEN: usize = 100;

lazy_static! {
    static ref VERSION_FIELD_REGEX: Regex =
        Regex::new(r"^versions-(\d+)-(id|version_number|version_name|is_version_active|delete)$")
            .unwrap();
}

/// One submitted version row. `index` is the formset position the row was
/// submitted under, kept so errors and re-displays line up with the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VersionRowForm {
    pub index: usize,
    pub id: Option<i64>,
    pub version_number: Option<String>,
    pub version_name: Option<String>,
    pub is_version_active: bool,
    pub delete: bool,
}

impl VersionRowForm {
    /// An untouched extra row: no saved record behind it and nothing entered.
    fn is_blank(&self) -> bool {
        self.id.is_none()
            && self.version_number.is_none()
            && self.version_name.is_none()
            && !self.is_version_active
            && !self.delete
    }
}

fn checkbox_value(value: &str) -> bool {
    matches!(value, "on" | "true" | "1")
}

/// Group `versions-{i}-{field}` entries into rows. Blank extra rows are
/// dropped; malformed ids are reported into `errors`.
pub fn collect_version_rows(
    fields: &[(String, String)],
    errors: &mut FormErrors,
) -> Vec<VersionRowForm> {
    let mut rows: BTreeMap<usize, VersionRowForm> = BTreeMap::new();

    for (name, value) in fields {
        let Some(caps) = VERSION_FIELD_REGEX.captures(name) else {
            continue;
        };
        let Ok(index) = caps[1].parse::<usize>() else {
            continue;
        };

        let row = rows.entry(index).or_insert_with(|| VersionRowForm {
            index,
            ..VersionRowForm::default()
        });

        match &caps[2] {
            "id" => {
                if !value.is_empty() {
                    match value.parse::<i64>() {
                        Ok(id) => row.id = Some(id),
                        Err(_) => errors.add(name.clone(), "Invalid version id"),
                    }
                }
            }
            "version_number" => {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    row.version_number = Some(trimmed.to_string());
                }
            }
            "version_name" => {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    row.version_name = Some(trimmed.to_string());
                }
            }
            "is_version_active" => row.is_version_active = checkbox_value(value),
            "delete" => row.delete = checkbox_value(value),
            _ => unreachable!("regex only admits known fields"),
        }
    }

    rows.into_values().filter(|row| !row.is_blank()).collect()
}

/// Validate every row against the version constraints. Rows marked for
/// deletion are not validated; the deletion wins.
pub fn validate_rows(rows: &[VersionRowForm], errors: &mut FormErrors) {
    for row in rows {
        if row.delete {
            continue;
        }

        if let Some(number) = &row.version_number {
            if number.chars().count() > MAX_VERSION_NUMBER_LEN {
                errors.add(
                    format!("versions-{}-version_number", row.index),
                    format!(
                        "Version number must be at most {} characters",
                        MAX_VERSION_NUMBER_LEN
                    ),
                );
            }
        }

        if let Some(name) = &row.version_name {
            if name.chars().count() > MAX_VERSION_NAME_LEN {
                errors.add(
                    format!("versions-{}-version_name", row.index),
                    format!(
                        "Version name must be at most {} characters",
                        MAX_VERSION_NAME_LEN
                    ),
                );
            }
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
    fn test_rows_grouped_by_index() {
        let mut errors = FormErrors::new();
        let rows = collect_version_rows(
            &fields(&[
                ("versions-0-id", "5"),
                ("versions-0-version_number", "1.2"),
                ("versions-0-version_name", "Stable"),
                ("versions-0-is_version_active", "on"),
                ("versions-1-version_number", "2.0"),
            ]),
            &mut errors,
        );

        assert!(errors.is_empty());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, Some(5));
        assert_eq!(rows[0].version_number.as_deref(), Some("1.2"));
        assert!(rows[0].is_version_active);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].id, None);
        assert!(!rows[1].is_version_active);
    }

    #[test]
    fn test_blank_extra_row_is_skipped() {
        let mut errors = FormErrors::new();
        let rows = collect_version_rows(
            &fields(&[
                ("versions-0-version_number", "1.0"),
                ("versions-1-id", ""),
                ("versions-1-version_number", ""),
                ("versions-1-version_name", "  "),
            ]),
            &mut errors,
        );

        assert!(errors.is_empty());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 0);
    }

    #[test]
    fn test_unrelated_fields_ignored() {
        let mut errors = FormErrors::new();
        let rows = collect_version_rows(
            &fields(&[("name", "Hammer"), ("versions-0-version_name", "First")]),
            &mut errors,
        );
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_malformed_id_reported() {
        let mut errors = FormErrors::new();
        let rows = collect_version_rows(
            &fields(&[
                ("versions-0-id", "not-a-number"),
                ("versions-0-version_name", "First"),
            ]),
            &mut errors,
        );
        assert_eq!(rows.len(), 1);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_delete_row_kept_without_validation() {
        let mut errors = FormErrors::new();
        let rows = collect_version_rows(
            &fields(&[
                ("versions-0-id", "9"),
                ("versions-0-version_number", "a-number-way-too-long"),
                ("versions-0-delete", "on"),
            ]),
            &mut errors,
        );
        validate_rows(&rows, &mut errors);

        assert_eq!(rows.len(), 1);
        assert!(rows[0].delete);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_overlong_fields_rejected_per_row() {
        let mut errors = FormErrors::new();
        let rows = collect_version_rows(
            &fields(&[
                ("versions-0-version_number", "12345678901"),
                ("versions-2-version_name", "ok"),
            ]),
            &mut errors,
        );
        validate_rows(&rows, &mut errors);

        let keys: Vec<_> = errors.messages().map(|(field, _)| field).collect();
        assert_eq!(keys, vec!["versions-0-version_number"]);
    }
}
