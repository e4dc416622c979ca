// Event schema rules
//
// Rule bounds and message texts are fixed contract; handlers and tests
// rely on them verbatim.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::patterns;
use crate::rules::{self, Check, FieldError, RuleKind, ValidationError};
use crate::slug::slugify;

pub const MODES: &[&str] = &["online", "in-person", "hybrid"];
pub const STATUSES: &[&str] = &["draft", "published", "archived", "cancelled"];

const SLUG_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::MinLen(3),
        message: "Slug must be at least 3 characters long",
    },
    Check {
        kind: RuleKind::MaxLen(100),
        message: "Slug cannot exceed 100 characters",
    },
    Check {
        kind: RuleKind::Matches(&patterns::SLUG),
        message: "Slug can only contain lowercase letters, numbers, and hyphens",
    },
];

const TITLE_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Event title is required",
    },
    Check {
        kind: RuleKind::MinLen(3),
        message: "Title must be at least 3 characters long",
    },
    Check {
        kind: RuleKind::MaxLen(200),
        message: "Title cannot exceed 200 characters",
    },
];

const HOOK_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Event hook is required",
    },
    Check {
        kind: RuleKind::MinLen(5),
        message: "Hook must be at least 5 characters long",
    },
    Check {
        kind: RuleKind::MaxLen(300),
        message: "Hook cannot exceed 300 characters",
    },
];

const IMAGE_CHECKS: &[Check] = &[Check {
    kind: RuleKind::Required,
    message: "Event image is required",
}];

const OVERVIEW_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Event overview is required",
    },
    Check {
        kind: RuleKind::MaxLen(500),
        message: "Overview cannot exceed 500 characters",
    },
];

const TIME_FROM_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Event start time is required",
    },
    Check {
        kind: RuleKind::Matches(&patterns::TIME),
        message: "Invalid time format. Use HH:MM",
    },
];

const TIME_TO_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Event end time is required",
    },
    Check {
        kind: RuleKind::Matches(&patterns::TIME),
        message: "Invalid time format. Use HH:MM",
    },
];

const VENUE_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Event venue is required",
    },
    Check {
        kind: RuleKind::MaxLen(300),
        message: "Venue cannot exceed 300 characters",
    },
];

const MODE_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Event mode is required",
    },
    Check {
        kind: RuleKind::OneOf(MODES),
        message: "Event mode must be online, in-person, or hybrid",
    },
];

const ABOUT_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Event description is required",
    },
    Check {
        kind: RuleKind::MinLen(10),
        message: "Description must be at least 10 characters long",
    },
];

const STATUS_CHECKS: &[Check] = &[Check {
    kind: RuleKind::OneOf(STATUSES),
    message: "Event status must be draft, published, archived, or cancelled",
}];

/// Candidate event payload as it arrives from the wire.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    /// Explicit slug; derived from the title when absent.
    pub slug: Option<String>,
    pub title: String,
    pub hook: String,
    pub image: String,
    pub overview: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub date: String,
    pub time_from: String,
    pub time_to: String,
    pub venue: String,
    pub mode: String,
    pub about: String,
    pub audience: Vec<Uuid>,
    pub agenda: Vec<Uuid>,
}

/// Normalized event ready for insertion.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub slug: String,
    pub title: String,
    pub hook: String,
    pub image: String,
    pub overview: String,
    pub date: DateTime<Utc>,
    pub time_from: String,
    pub time_to: String,
    pub venue: String,
    pub mode: String,
    pub about: String,
    pub audience: Vec<Uuid>,
    pub agenda: Vec<Uuid>,
    pub status: String,
}

impl EventDraft {
    /// Validate and normalize. `now` anchors the future-date predicate so
    /// callers control the clock.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewEvent, ValidationError> {
        let mut errors: Vec<FieldError> = Vec::new();

        let title = self.title.trim().to_string();
        let slug = match &self.slug {
            Some(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
            _ => slugify(&title),
        };
        rules::apply(&mut errors, "slug", &slug, SLUG_CHECKS);
        rules::apply(&mut errors, "title", &title, TITLE_CHECKS);

        let hook = self.hook.trim().to_string();
        rules::apply(&mut errors, "hook", &hook, HOOK_CHECKS);

        let image = self.image.trim().to_string();
        rules::apply(&mut errors, "image", &image, IMAGE_CHECKS);

        let overview = self.overview.trim().to_string();
        rules::apply(&mut errors, "overview", &overview, OVERVIEW_CHECKS);

        let date = check_date(&mut errors, self.date.trim(), now);

        rules::apply(&mut errors, "time.from", self.time_from.trim(), TIME_FROM_CHECKS);
        rules::apply(&mut errors, "time.to", self.time_to.trim(), TIME_TO_CHECKS);

        let venue = self.venue.trim().to_string();
        rules::apply(&mut errors, "venue", &venue, VENUE_CHECKS);

        let mode = self.mode.trim().to_string();
        rules::apply(&mut errors, "mode", &mode, MODE_CHECKS);

        let about = self.about.trim().to_string();
        rules::apply(&mut errors, "about", &about, ABOUT_CHECKS);

        rules::finish(errors)?;

        Ok(NewEvent {
            slug,
            title,
            hook,
            image,
            overview,
            // finish() returned Ok, so every checked field held a value.
            date: date.unwrap_or(now),
            time_from: self.time_from.trim().to_string(),
            time_to: self.time_to.trim().to_string(),
            venue,
            mode,
            about,
            audience: self.audience,
            agenda: self.agenda,
            status: "draft".to_string(),
        })
    }
}

/// Partial event update as it arrives from the wire. Absent fields are
/// left untouched by the update path.
#[derive(Debug, Clone, Default)]
pub struct EventUpdateDraft {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub hook: Option<String>,
    pub image: Option<String>,
    pub overview: Option<String>,
    pub date: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub venue: Option<String>,
    pub mode: Option<String>,
    pub about: Option<String>,
    pub status: Option<String>,
}

/// Normalized partial update.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub hook: Option<String>,
    pub image: Option<String>,
    pub overview: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub venue: Option<String>,
    pub mode: Option<String>,
    pub about: Option<String>,
    pub status: Option<String>,
}

impl EventUpdateDraft {
    /// Validate only the provided fields, against the same rules as
    /// creation.
    pub fn validate(self, now: DateTime<Utc>) -> Result<EventUpdate, ValidationError> {
        let mut errors: Vec<FieldError> = Vec::new();

        let norm = |v: &Option<String>| v.as_ref().map(|s| s.trim().to_string());

        let slug = self.slug.as_ref().map(|s| s.trim().to_lowercase());
        if let Some(s) = &slug {
            rules::apply(&mut errors, "slug", s, SLUG_CHECKS);
        }
        let title = norm(&self.title);
        if let Some(t) = &title {
            rules::apply(&mut errors, "title", t, TITLE_CHECKS);
        }
        let hook = norm(&self.hook);
        if let Some(h) = &hook {
            rules::apply(&mut errors, "hook", h, HOOK_CHECKS);
        }
        let image = norm(&self.image);
        if let Some(i) = &image {
            rules::apply(&mut errors, "image", i, IMAGE_CHECKS);
        }
        let overview = norm(&self.overview);
        if let Some(o) = &overview {
            rules::apply(&mut errors, "overview", o, OVERVIEW_CHECKS);
        }
        let date = match &self.date {
            Some(d) => check_date(&mut errors, d.trim(), now),
            None => None,
        };
        let time_from = norm(&self.time_from);
        if let Some(t) = &time_from {
            rules::apply(&mut errors, "time.from", t, TIME_FROM_CHECKS);
        }
        let time_to = norm(&self.time_to);
        if let Some(t) = &time_to {
            rules::apply(&mut errors, "time.to", t, TIME_TO_CHECKS);
        }
        let venue = norm(&self.venue);
        if let Some(v) = &venue {
            rules::apply(&mut errors, "venue", v, VENUE_CHECKS);
        }
        let mode = norm(&self.mode);
        if let Some(m) = &mode {
            rules::apply(&mut errors, "mode", m, MODE_CHECKS);
        }
        let about = norm(&self.about);
        if let Some(a) = &about {
            rules::apply(&mut errors, "about", a, ABOUT_CHECKS);
        }
        let status = norm(&self.status);
        if let Some(s) = &status {
            rules::apply(&mut errors, "status", s, STATUS_CHECKS);
        }

        rules::finish(errors)?;

        Ok(EventUpdate {
            slug,
            title,
            hook,
            image,
            overview,
            date,
            time_from,
            time_to,
            venue,
            mode,
            about,
            status,
        })
    }
}

/// Cross-field predicate for the date: present, parseable, strictly in
/// the future relative to `now`.
fn check_date(
    errors: &mut Vec<FieldError>,
    raw: &str,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        errors.push(FieldError {
            field: "date",
            message: "Event date is required".to_string(),
        });
        return None;
    }
    let Some(date) = parse_date(raw) else {
        errors.push(FieldError {
            field: "date",
            message: "Event date must be a valid date".to_string(),
        });
        return None;
    };
    if date <= now {
        errors.push(FieldError {
            field: "date",
            message: "Event date must be in the future".to_string(),
        });
        return None;
    }
    Some(date)
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Bare calendar dates are taken as midnight UTC.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn valid_draft() -> EventDraft {
        EventDraft {
            slug: None,
            title: "Frontend Developers Meetup".to_string(),
            hook: "An evening of talks and pizza".to_string(),
            image: "https://img.example.com/meetup.png".to_string(),
            overview: "Short overview".to_string(),
            date: "2026-06-18T18:00:00Z".to_string(),
            time_from: "18:00".to_string(),
            time_to: "21:00".to_string(),
            venue: "Community Hall, Alexandria".to_string(),
            mode: "in-person".to_string(),
            about: "Longer description of the event".to_string(),
            audience: vec![],
            agenda: vec![],
        }
    }

    #[test]
    fn valid_draft_normalizes_and_derives_slug() {
        let event = valid_draft().validate(now()).unwrap();
        assert_eq!(event.slug, "frontend-developers-meetup");
        assert_eq!(event.status, "draft");
        assert_eq!(event.mode, "in-person");
    }

    #[test]
    fn explicit_slug_is_lowercased_not_derived() {
        let mut draft = valid_draft();
        draft.slug = Some("  My-Slug-01 ".to_string());
        let event = draft.validate(now()).unwrap();
        assert_eq!(event.slug, "my-slug-01");
    }

    #[test]
    fn unusable_title_without_slug_fails_on_slug_min_length() {
        let mut draft = valid_draft();
        draft.title = "!!!".to_string();
        let err = draft.validate(now()).unwrap_err();
        assert!(err
            .errors
            .iter()
            .any(|e| e.field == "slug" && e.message == "Slug must be at least 3 characters long"));
    }

    #[test]
    fn past_date_is_rejected_on_the_date_field() {
        let mut draft = valid_draft();
        draft.date = "2025-01-18".to_string();
        let err = draft.validate(now()).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "date");
        assert_eq!(err.errors[0].message, "Event date must be in the future");
    }

    #[test]
    fn date_equal_to_now_is_not_in_the_future() {
        let mut draft = valid_draft();
        draft.date = "2026-01-01T12:00:00Z".to_string();
        let err = draft.validate(now()).unwrap_err();
        assert!(err.has_field("date"));
    }

    #[test]
    fn garbage_date_is_a_validation_error_not_a_panic() {
        let mut draft = valid_draft();
        draft.date = "next tuesday".to_string();
        let err = draft.validate(now()).unwrap_err();
        assert_eq!(err.errors[0].message, "Event date must be a valid date");
    }

    #[test]
    fn errors_accumulate_across_fields() {
        let mut draft = valid_draft();
        draft.hook = "hi".to_string();
        draft.time_from = "25:00".to_string();
        draft.mode = "virtual".to_string();
        let err = draft.validate(now()).unwrap_err();
        assert!(err.has_field("hook"));
        assert!(err.has_field("time.from"));
        assert!(err.has_field("mode"));
        assert!(!err.has_field("title"));
    }

    #[test]
    fn message_texts_are_contract() {
        let mut draft = valid_draft();
        draft.title = "x".repeat(201);
        draft.slug = Some("keep-slug-valid".to_string());
        let err = draft.validate(now()).unwrap_err();
        assert_eq!(err.errors[0].message, "Title cannot exceed 200 characters");

        let mut draft = valid_draft();
        draft.mode = "virtual".to_string();
        let err = draft.validate(now()).unwrap_err();
        assert_eq!(
            err.errors[0].message,
            "Event mode must be online, in-person, or hybrid"
        );

        let mut draft = valid_draft();
        draft.time_to = "18:60".to_string();
        let err = draft.validate(now()).unwrap_err();
        assert_eq!(err.errors[0].message, "Invalid time format. Use HH:MM");
    }

    #[test]
    fn update_validates_only_provided_fields() {
        let update = EventUpdateDraft {
            title: Some("Renamed meetup".to_string()),
            status: Some("published".to_string()),
            ..Default::default()
        };
        let normalized = update.validate(now()).unwrap();
        assert_eq!(normalized.title.as_deref(), Some("Renamed meetup"));
        assert_eq!(normalized.status.as_deref(), Some("published"));
        assert!(normalized.date.is_none());
    }

    #[test]
    fn update_rejects_bad_status() {
        let update = EventUpdateDraft {
            status: Some("deleted".to_string()),
            ..Default::default()
        };
        let err = update.validate(now()).unwrap_err();
        assert_eq!(
            err.errors[0].message,
            "Event status must be draft, published, archived, or cancelled"
        );
    }
}
