// Agenda item schema rules

use uuid::Uuid;

use crate::patterns;
use crate::rules::{self, Check, FieldError, RuleKind, ValidationError};

const TITLE_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Agenda item title is required",
    },
    Check {
        kind: RuleKind::MaxLen(200),
        message: "Title cannot exceed 200 characters",
    },
];

const DESCRIPTION_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Agenda item description is required",
    },
    Check {
        kind: RuleKind::MaxLen(500),
        message: "Description cannot exceed 500 characters",
    },
];

const TIME_FROM_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "Start time is required",
    },
    Check {
        kind: RuleKind::Matches(&patterns::TIME),
        message: "Invalid time format. Use HH:MM",
    },
];

const TIME_TO_CHECKS: &[Check] = &[
    Check {
        kind: RuleKind::Required,
        message: "End time is required",
    },
    Check {
        kind: RuleKind::Matches(&patterns::TIME),
        message: "Invalid time format. Use HH:MM",
    },
];

const SPEAKER_CHECKS: &[Check] = &[Check {
    kind: RuleKind::MaxLen(100),
    message: "Speaker name cannot exceed 100 characters",
}];

const LOCATION_CHECKS: &[Check] = &[Check {
    kind: RuleKind::MaxLen(200),
    message: "Location cannot exceed 200 characters",
}];

/// Candidate agenda item payload.
#[derive(Debug, Clone)]
pub struct AgendaDraft {
    pub event: Uuid,
    pub title: String,
    pub description: String,
    pub time_from: String,
    pub time_to: String,
    pub speaker: Option<String>,
    pub location: Option<String>,
}

/// Normalized agenda item ready for insertion.
#[derive(Debug, Clone)]
pub struct NewAgenda {
    pub event: Uuid,
    pub title: String,
    pub description: String,
    pub time_from: String,
    pub time_to: String,
    pub speaker: Option<String>,
    pub location: Option<String>,
}

impl AgendaDraft {
    pub fn validate(self) -> Result<NewAgenda, ValidationError> {
        let mut errors: Vec<FieldError> = Vec::new();

        let title = self.title.trim().to_string();
        rules::apply(&mut errors, "title", &title, TITLE_CHECKS);

        let description = self.description.trim().to_string();
        rules::apply(&mut errors, "description", &description, DESCRIPTION_CHECKS);

        rules::apply(&mut errors, "time.from", self.time_from.trim(), TIME_FROM_CHECKS);
        rules::apply(&mut errors, "time.to", self.time_to.trim(), TIME_TO_CHECKS);

        let speaker = self
            .speaker
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        rules::apply_optional(&mut errors, "speaker", speaker.as_deref(), SPEAKER_CHECKS);

        let location = self
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        rules::apply_optional(&mut errors, "location", location.as_deref(), LOCATION_CHECKS);

        rules::finish(errors)?;

        Ok(NewAgenda {
            event: self.event,
            title,
            description,
            time_from: self.time_from.trim().to_string(),
            time_to: self.time_to.trim().to_string(),
            speaker,
            location,
        })
    }
}
