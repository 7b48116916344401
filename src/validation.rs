use lazy_static::lazy_static;
use regex::Regex;

use crate::schema::{FieldOptions, FieldType};

lazy_static! {
    /// Strict 4-2-2 digit grouping; no other date shapes are accepted.
    static ref DATE_FORMAT: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    /// "+", a 1-3 digit country code, then exactly 10 digits.
    static ref PHONE_FORMAT: Regex = Regex::new(r"^\+\d{1,3}\d{10}$").unwrap();
}

/// Represents a validation error for a specific field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Service for validating field values against their type's rules.
/// Stateless and deterministic; the first failing rule wins.
pub struct Validator;

impl Validator {
    /// Validates a single field value. Returns `None` when the value passes.
    pub fn validate(
        &self,
        label: &str,
        value: &str,
        field_type: FieldType,
        options: &FieldOptions,
    ) -> Option<ValidationError> {
        let message = match field_type {
            FieldType::Unset => Some(format!("Please select a field type for {}!", label)),
            FieldType::Text => Self::check_text(label, value),
            FieldType::Dropdown => {
                if value.is_empty() || value == "Select an option" {
                    Some(format!("Please select a {}!", label))
                } else {
                    None
                }
            }
            FieldType::Radio => {
                if value.is_empty() {
                    Some(format!("Please select an option for {}!", label))
                } else {
                    None
                }
            }
            FieldType::File => Self::check_file(label, value, options),
            // Absence of a tick is a valid "no".
            FieldType::Checkbox => None,
            FieldType::Country => {
                if value.is_empty() || value == "Select Country" {
                    Some(format!("Please select a {}!", label))
                } else {
                    None
                }
            }
            FieldType::Date => Self::check_date(label, value),
            FieldType::Phone => Self::check_phone(label, value),
        };
        message.map(|message| ValidationError {
            field: label.to_string(),
            message,
        })
    }

    fn check_text(label: &str, value: &str) -> Option<String> {
        if value.trim().is_empty() {
            Some(format!("{} cannot be empty!", label))
        } else if value != value.trim() {
            Some(format!("{} cannot have leading or trailing whitespace!", label))
        } else if value.trim().chars().count() < 2 {
            Some(format!("{} must be at least 2 characters long!", label))
        } else if value.trim().chars().count() > 50 {
            Some(format!("{} cannot be longer than 50 characters!", label))
        } else {
            None
        }
    }

    fn check_file(label: &str, value: &str, options: &FieldOptions) -> Option<String> {
        if value.is_empty() || value == "No file chosen" {
            return Some(format!("Please upload a file for {}!", label));
        }
        let accepted = options.accepted_types.trim();
        if accepted.is_empty() || accepted == "*" {
            return None;
        }
        // Filename with no dot yields the whole name here, which then fails
        // the membership check below.
        let extension = value.rsplit('.').next().unwrap_or_default().to_lowercase();
        let allowed = accepted
            .split(',')
            .any(|t| t.trim().to_lowercase() == format!(".{}", extension));
        if allowed {
            None
        } else {
            Some(format!(
                "{} must be one of the following types: {}!",
                label, options.accepted_types
            ))
        }
    }

    fn check_date(label: &str, value: &str) -> Option<String> {
        if value.is_empty() {
            Some(format!("Please select a {}!", label))
        } else if !DATE_FORMAT.is_match(value) {
            Some(format!("{} must be in YYYY-MM-DD format!", label))
        } else {
            None
        }
    }

    fn check_phone(label: &str, value: &str) -> Option<String> {
        if value.trim().is_empty() {
            return Some(format!("{} cannot be empty!", label));
        }
        if value != value.trim() {
            return Some(format!("{} cannot have leading or trailing whitespace!", label));
        }
        let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if PHONE_FORMAT.is_match(&compact) {
            None
        } else {
            Some(format!(
                "{} must be a valid phone number (e.g., +123456789012)!",
                label
            ))
        }
    }
}
