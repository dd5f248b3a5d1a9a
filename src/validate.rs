//! Record validation - check an extracted job for required fields

use serde::Serialize;

use crate::job::JobRecord;

/// Result of validating a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty
    pub valid: bool,
    /// One message per missing required field
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Check that company name, job role and description are present
pub fn validate(record: &JobRecord) -> ValidationResult {
    let required = [
        (&record.company_name, "Company name is required"),
        (&record.job_role, "Job role is required"),
        (&record.job_description, "Job description is required"),
    ];

    let errors = required
        .iter()
        .filter(|(field, _)| field.is_none())
        .map(|(_, message)| message.to_string())
        .collect();

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_company_and_role() {
        let record = JobRecord {
            job_description: Some("x".into()),
            ..Default::default()
        };
        let result = validate(&record);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec!["Company name is required", "Job role is required"]
        );
    }

    #[test]
    fn test_all_missing() {
        let result = validate(&JobRecord::default());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
        assert_eq!(result.errors[2], "Job description is required");
    }

    #[test]
    fn test_complete_record_is_valid() {
        let record = JobRecord {
            company_name: Some("Acme".into()),
            job_role: Some("Engineer".into()),
            job_description: Some("Design things".into()),
            ..Default::default()
        };
        let result = validate(&record);
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }
}
