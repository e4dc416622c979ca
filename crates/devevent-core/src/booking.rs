// Booking schema rules
//
// Uniqueness of the (event, email) pair is the unique index's job; this
// module only normalizes and rejects malformed input.

use uuid::Uuid;

use crate::patterns;
use crate::rules::{self, Check, FieldError, RuleKind, ValidationError};

pub const STATUSES: &[&str] = &["confirmed", "pending", "cancelled"];

const EMAIL_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "User email is required",
    },
    Check {
        kind: RuleKind::Matches(&patterns::EMAIL),
        message: "Please provide a valid email address",
    },
    Check {
        kind: RuleKind::MaxLen(255),
        message: "Email cannot exceed 255 characters",
    },
];

/// Candidate booking payload.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub event: Uuid,
    pub email: String,
}

/// Normalized booking ready for insertion.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub event: Uuid,
    pub email: String,
    pub status: String,
}

impl BookingDraft {
    pub fn validate(self) -> Result<NewBooking, ValidationError> {
        let mut errors: Vec<FieldError> = Vec::new();

        let email = self.email.trim().to_lowercase();
        rules::apply(&mut errors, "email", &email, EMAIL_CHECKS);

        rules::finish(errors)?;

        Ok(NewBooking {
            event: self.event,
            email,
            status: "pending".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let booking = BookingDraft {
            event: Uuid::nil(),
            email: "  Dev@Example.COM ".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(booking.email, "dev@example.com");
        assert_eq!(booking.status, "pending");
    }

    #[test]
    fn invalid_email_uses_fixed_message() {
        let err = BookingDraft {
            event: Uuid::nil(),
            email: "not-an-email".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.errors[0].field, "email");
        assert_eq!(err.errors[0].message, "Please provide a valid email address");
    }

    #[test]
    fn empty_email_is_required_error() {
        let err = BookingDraft {
            event: Uuid::nil(),
            email: "   ".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.errors[0].message, "User email is required");
    }

    #[test]
    fn overlong_email_is_rejected() {
        let local = "a".repeat(250);
        let err = BookingDraft {
            event: Uuid::nil(),
            email: format!("{local}@example.com"),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.errors[0].message, "Email cannot exceed 255 characters");
    }
}
