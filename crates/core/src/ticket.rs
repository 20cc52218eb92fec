//! The ticket record and its enumerations.

use crate::error::{Error, Result};
use crate::payload::{TicketDraft, TicketPayload};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Workflow state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Review,
    Closed,
}

impl Status {
    /// Every accepted status, in canonical order.
    pub const ALL: [Status; 4] = [
        Status::Open,
        Status::InProgress,
        Status::Review,
        Status::Closed,
    ];

    /// Get the wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Review => "review",
            Status::Closed => "closed",
        }
    }

    /// Parse a status from its wire representation. Exact match, no coercion.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(Status::Open),
            "in_progress" => Ok(Status::InProgress),
            "review" => Ok(Status::Review),
            "closed" => Ok(Status::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Every accepted priority, in canonical order.
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    /// Get the wire representation of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Parse a priority from its wire representation. Exact match, no coercion.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticket record.
///
/// `id` and `created_at` are assigned once at creation and never change.
/// `updated_at` is refreshed on every successful mutation, so
/// `created_at <= updated_at` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Ticket {
    /// Create a ticket from a validated draft with a fresh id.
    pub fn new(draft: TicketDraft, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            assignee: draft.assignee,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every user-settable field from a validated draft.
    ///
    /// `id` and `created_at` are preserved; `updated_at` is set to `now`.
    pub fn replace_with(&mut self, draft: TicketDraft, now: OffsetDateTime) {
        self.title = draft.title;
        self.description = draft.description;
        self.status = draft.status;
        self.priority = draft.priority;
        self.assignee = draft.assignee;
        self.updated_at = now;
    }

    /// Merge a partial payload onto this ticket.
    ///
    /// Only title, description, status, priority and assignee are patchable;
    /// absent fields are left unchanged. The patch must have passed partial
    /// validation, so a present enum field always parses and a present text
    /// field always survives trimming.
    pub fn apply(&mut self, patch: &TicketPayload, now: OffsetDateTime) {
        if let Some(title) = patch.title.as_deref() {
            self.title = title.trim().to_string();
        }
        if let Some(description) = patch.description.as_deref() {
            self.description = description.trim().to_string();
        }
        if let Some(status) = patch.status.as_deref()
            && let Ok(status) = Status::parse(status)
        {
            self.status = status;
        }
        if let Some(priority) = patch.priority.as_deref()
            && let Ok(priority) = Priority::parse(priority)
        {
            self.priority = priority;
        }
        if let Some(assignee) = patch.assignee.as_deref() {
            self.assignee = assignee.to_string();
        }
        self.updated_at = now;
    }
}
