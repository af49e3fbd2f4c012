//! In-memory [`EventSource`] for tests.

use std::sync::{Arc, Mutex};

use agenda_core::{CalendarEvent, EventStart};
use async_trait::async_trait;
use chrono::DateTime;

use crate::calendar::{EventQuery, EventSource};

enum Reply {
    Events(Vec<CalendarEvent>),
    Fail(String),
}

/// Answers every query the same way and remembers what it was asked.
pub struct RecordingSource {
    reply: Reply,
    queries: Mutex<Vec<EventQuery>>,
}

impl RecordingSource {
    pub fn returning(events: Vec<CalendarEvent>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Events(events),
            queries: Mutex::default(),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(message.to_string()),
            queries: Mutex::default(),
        })
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn last_query(&self) -> Option<EventQuery> {
        self.queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl EventSource for RecordingSource {
    async fn list_events(&self, query: &EventQuery) -> anyhow::Result<Vec<CalendarEvent>> {
        self.queries.lock().unwrap().push(query.clone());
        match &self.reply {
            | Reply::Events(events) => Ok(events.clone()),
            | Reply::Fail(message) => Err(anyhow::anyhow!(message.clone())),
        }
    }
}

pub fn event_at(summary: &str, start: &str) -> CalendarEvent {
    CalendarEvent::new(summary, EventStart::At(DateTime::parse_from_rfc3339(start).unwrap()))
}
