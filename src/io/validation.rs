//! Import validation and normalization.
//!
//! Validates imported subscription rows and applies defaults before storage.

use crate::models::{NewSubscription, SubscriptionStatus, blank_to_none};

use super::traits::ImportedSubscription;

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Warning: issue noted but import can proceed.
    Warning,
    /// Error: the row is counted as failed.
    Error,
}

/// A validation issue found during import.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The field that has an issue.
    pub field: String,
    /// Description of the issue.
    pub message: String,
    /// Severity of the issue.
    pub severity: ValidationSeverity,
}

impl ValidationIssue {
    /// Creates a warning issue.
    #[must_use]
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }

    /// Creates an error issue.
    #[must_use]
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }
}

/// Result of validating an imported row.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the row can be stored.
    pub is_valid: bool,
    /// Issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Iterates the issues of one severity.
    pub fn issues_of(
        &self,
        severity: ValidationSeverity,
    ) -> impl Iterator<Item = &ValidationIssue> + '_ {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

/// Validates and normalizes imported subscription rows.
///
/// # Defaults
///
/// - `status`: `active` when absent or blank
/// - `source`, `notes`: `None` when blank
#[derive(Debug, Default)]
pub struct ImportValidator {
    /// Status applied when a row has none.
    default_status: SubscriptionStatus,
}

impl ImportValidator {
    /// Creates a new validator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status used for rows without one.
    #[must_use]
    pub const fn with_default_status(mut self, status: SubscriptionStatus) -> Self {
        self.default_status = status;
        self
    }

    /// Validates an imported row.
    #[must_use]
    pub fn validate(&self, imported: &ImportedSubscription) -> ValidationResult {
        let mut issues = Vec::new();

        let email = imported.email.trim();
        if email.is_empty() {
            issues.push(ValidationIssue::error("email", "Email is empty or missing"));
        } else if !email.contains('@') {
            issues.push(ValidationIssue::warning(
                "email",
                format!("'{email}' does not look like an email address"),
            ));
        }

        let unknown_status = imported
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && SubscriptionStatus::parse(s).is_none());
        if let Some(status) = unknown_status {
            issues.push(ValidationIssue::error(
                "status",
                format!("Unknown status '{status}'"),
            ));
        }

        let is_valid = !issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Error);
        ValidationResult { is_valid, issues }
    }

    /// Converts a validated row into a creation request.
    ///
    /// Applies defaults for missing fields. An unparsable status falls back
    /// to the default; call [`Self::validate`] first to reject it instead.
    #[must_use]
    pub fn to_new_subscription(&self, imported: ImportedSubscription) -> NewSubscription {
        let status = imported
            .status
            .as_deref()
            .and_then(SubscriptionStatus::parse)
            .unwrap_or(self.default_status);

        NewSubscription {
            email: imported.email.trim().to_string(),
            status,
            source: blank_to_none(imported.source.as_deref()),
            notes: blank_to_none(imported.notes.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a@x.com", Some("Bounced"), true, 0, 0; "valid row")]
    #[test_case("a@x.com", Some("  "), true, 0, 0; "blank status uses default")]
    #[test_case("   ", None, false, 1, 0; "blank email")]
    #[test_case("a@x.com", Some("pending"), false, 1, 0; "unknown status")]
    #[test_case("not-an-address", None, true, 0, 1; "suspicious email")]
    #[test_case("", Some("nope"), false, 2, 0; "both fields bad")]
    fn test_validate(
        email: &str,
        status: Option<&str>,
        valid: bool,
        errors: usize,
        warnings: usize,
    ) {
        let mut row = ImportedSubscription::new(email);
        row.status = status.map(String::from);

        let result = ImportValidator::new().validate(&row);
        assert_eq!(result.is_valid, valid);
        assert_eq!(result.issues_of(ValidationSeverity::Error).count(), errors);
        assert_eq!(result.issues_of(ValidationSeverity::Warning).count(), warnings);
    }

    #[test]
    fn test_to_new_subscription_normalizes() {
        let request = ImportValidator::new().to_new_subscription(
            ImportedSubscription::new(" a@x.com ")
                .with_source("  ")
                .with_notes("note"),
        );
        assert_eq!(
            request,
            NewSubscription::new("a@x.com").with_notes("note")
        );
    }

    #[test]
    fn test_custom_default_status() {
        let request = ImportValidator::new()
            .with_default_status(SubscriptionStatus::Unsubscribed)
            .to_new_subscription(ImportedSubscription::new("a@x.com"));
        assert_eq!(request.status, SubscriptionStatus::Unsubscribed);
    }
}
