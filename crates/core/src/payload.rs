//! Client payload types and the validation rule set.

use crate::ticket::{Priority, Status};
use serde::{Deserialize, Serialize};

/// Rule violation for a missing or too-short title.
const TITLE_RULE: &str = "title must be at least 3 chars";
/// Rule violation for a missing or too-short description.
const DESCRIPTION_RULE: &str = "description must be at least 3 chars";

fn status_rule() -> String {
    let allowed: Vec<&str> = Status::ALL.iter().map(Status::as_str).collect();
    format!("status must be one of {}", allowed.join(", "))
}

fn priority_rule() -> String {
    let allowed: Vec<&str> = Priority::ALL.iter().map(Priority::as_str).collect();
    format!("priority must be one of {}", allowed.join(", "))
}

/// Trim a text field and accept it only when it keeps at least 3 characters.
fn normalized(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| v.chars().count() >= 3)
}

/// Client-supplied ticket fields.
///
/// This is the only shape a write request can take: exactly the five
/// user-settable fields, each optional so that full-mode validation can
/// report absence and partial-mode validation can skip absent fields.
/// Unknown JSON keys are dropped at deserialization and can never reach a
/// stored record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
}

/// A validated, normalized payload ready to become (or overwrite) a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assignee: String,
}

impl TicketPayload {
    /// Check this payload against the field rules.
    ///
    /// In full mode every field is required; absence surfaces through the
    /// same rule string as an invalid value. In partial mode a field is
    /// checked only when present, so an empty-string title is still a
    /// violation while an absent one is not. Returns the violations in rule
    /// order; an empty list means the payload is acceptable.
    pub fn validate(&self, partial: bool) -> Vec<String> {
        let mut errors = Vec::new();

        if (!partial || self.title.is_some()) && normalized(self.title.as_deref()).is_none() {
            errors.push(TITLE_RULE.to_string());
        }
        if (!partial || self.description.is_some())
            && normalized(self.description.as_deref()).is_none()
        {
            errors.push(DESCRIPTION_RULE.to_string());
        }
        if (!partial || self.status.is_some())
            && !self
                .status
                .as_deref()
                .is_some_and(|s| Status::parse(s).is_ok())
        {
            errors.push(status_rule());
        }
        if (!partial || self.priority.is_some())
            && !self
                .priority
                .as_deref()
                .is_some_and(|p| Priority::parse(p).is_ok())
        {
            errors.push(priority_rule());
        }

        errors
    }

    /// Validate in full mode and produce a normalized draft.
    ///
    /// Title and description are trimmed, enums are parsed, and a missing
    /// assignee defaults to the empty string. On any rule violation the
    /// full ordered violation list is returned instead.
    pub fn into_draft(self) -> Result<TicketDraft, Vec<String>> {
        let (Some(title), Some(description), Some(status), Some(priority)) = (
            normalized(self.title.as_deref()).map(str::to_owned),
            normalized(self.description.as_deref()).map(str::to_owned),
            self.status.as_deref().and_then(|s| Status::parse(s).ok()),
            self.priority.as_deref().and_then(|p| Priority::parse(p).ok()),
        ) else {
            return Err(self.validate(false));
        };

        Ok(TicketDraft {
            title,
            description,
            status,
            priority,
            assignee: self.assignee.unwrap_or_default(),
        })
    }
}
