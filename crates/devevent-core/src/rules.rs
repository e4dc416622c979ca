// Data-driven field validation
//
// Each entity declares its fields as a list of rule descriptors (kind,
// bound, message) evaluated by one generic routine. Evaluation is
// fail-fast per field (the first failing rule wins) and accumulating
// across fields, so a caller sees every broken field at once.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// One rule applied to a field, with the fixed message reported when it
/// fails. Message text is part of the API contract.
pub struct Check {
    pub kind: RuleKind,
    pub message: &'static str,
}

pub enum RuleKind {
    /// Non-empty after coercion.
    Required,
    /// At least this many characters.
    MinLen(usize),
    /// At most this many characters.
    MaxLen(usize),
    /// Full match against a shared pattern.
    Matches(&'static LazyLock<Regex>),
    /// Membership in a fixed enum of values.
    OneOf(&'static [&'static str]),
}

/// A single field-scoped rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// The accumulated set of field errors for one rejected entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// True if some rule for `field` failed.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Evaluate `checks` against a coerced value, pushing at most one error.
pub fn apply(errors: &mut Vec<FieldError>, field: &'static str, value: &str, checks: &[Check]) {
    for check in checks {
        let ok = match &check.kind {
            RuleKind::Required => !value.is_empty(),
            RuleKind::MinLen(n) => value.chars().count() >= *n,
            RuleKind::MaxLen(n) => value.chars().count() <= *n,
            RuleKind::Matches(pattern) => pattern.is_match(value),
            RuleKind::OneOf(values) => values.contains(&value),
        };
        if !ok {
            errors.push(FieldError {
                field,
                message: check.message.to_string(),
            });
            return;
        }
    }
}

/// Like [`apply`], but an absent or empty optional field passes untouched.
pub fn apply_optional(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&str>,
    checks: &[Check],
) {
    match value {
        Some(v) if !v.is_empty() => apply(errors, field, v, checks),
        _ => {}
    }
}

/// Finish an accumulation pass.
pub fn finish(errors: Vec<FieldError>) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}
