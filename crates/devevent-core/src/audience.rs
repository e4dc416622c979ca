// Audience schema rules

use crate::rules::{self, Check, FieldError, RuleKind, ValidationError};

const CATEGORY_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Audience category is required",
    },
    Check {
        kind: RuleKind::MaxLen(100),
        message: "Category cannot exceed 100 characters",
    },
];

const DESCRIPTION_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Audience description is required",
    },
    Check {
        kind: RuleKind::MaxLen(500),
        message: "Description cannot exceed 500 characters",
    },
];

/// Candidate audience payload.
#[derive(Debug, Clone)]
pub struct AudienceDraft {
    pub category: String,
    pub description: String,
}

/// Normalized audience ready for insertion.
#[derive(Debug, Clone)]
pub struct NewAudience {
    pub category: String,
    pub description: String,
}

impl AudienceDraft {
    pub fn validate(self) -> Result<NewAudience, ValidationError> {
        let mut errors: Vec<FieldError> = Vec::new();

        let category = self.category.trim().to_string();
        rules::apply(&mut errors, "category", &category, CATEGORY_CHECKS);

        let description = self.description.trim().to_string();
        rules::apply(&mut errors, "description", &description, DESCRIPTION_CHECKS);

        rules::finish(errors)?;

        Ok(NewAudience {
            category,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts() {
        let audience = AudienceDraft {
            category: "  Backend developers ".to_string(),
            description: "People who ship services".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(audience.category, "Backend developers");
    }

    #[test]
    fn both_fields_reported_when_both_missing() {
        let err = AudienceDraft {
            category: "".to_string(),
            description: "  ".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0].message, "Audience category is required");
        assert_eq!(err.errors[1].message, "Audience description is required");
    }

    #[test]
    fn overlong_category_is_rejected() {
        let err = AudienceDraft {
            category: "x".repeat(101),
            description: "fine".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.errors[0].message, "Category cannot exceed 100 characters");
    }
}
