//! agenda-core/src/meeting.rs
//! Calendar events as the adapter sees them, and the payload handed back to the agent.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker used when an event carries neither a start time nor a start date.
pub const MISSING_START: &str = "(no start time)";
/// Title used when an event has no summary.
pub const UNTITLED: &str = "(untitled)";

/// When an event begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventStart {
    At(DateTime<FixedOffset>),
    AllDay(NaiveDate),
    Missing,
}

impl EventStart {
    pub fn is_missing(&self) -> bool {
        matches!(self, EventStart::Missing)
    }
}

impl fmt::Display for EventStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | EventStart::At(instant) => f.write_str(&instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            | EventStart::AllDay(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            | EventStart::Missing => f.write_str(MISSING_START),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    pub start: EventStart,
}

impl CalendarEvent {
    pub fn new(summary: impl Into<String>, start: EventStart) -> Self {
        Self {
            summary: Some(summary.into()),
            start,
        }
    }
}

/// One line of the answer: `"<summary> at <start>"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingSummary(String);

impl MeetingSummary {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&CalendarEvent> for MeetingSummary {
    fn from(event: &CalendarEvent) -> Self {
        let title = event.summary.as_deref().unwrap_or(UNTITLED);
        Self(format!("{title} at {}", event.start))
    }
}

impl fmt::Display for MeetingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one lookup. Serializes to `{"meetings": [...]}` or `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResult {
    Success { meetings: Vec<MeetingSummary> },
    Failure {
        #[serde(rename = "error")]
        message: String,
    },
}

impl QueryResult {
    pub fn failure(message: impl Into<String>) -> Self {
        QueryResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryResult::Success { .. })
    }
}

impl FromIterator<MeetingSummary> for QueryResult {
    fn from_iter<I: IntoIterator<Item = MeetingSummary>>(iter: I) -> Self {
        QueryResult::Success {
            meetings: iter.into_iter().collect(),
        }
    }
}
