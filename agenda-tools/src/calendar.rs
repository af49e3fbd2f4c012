//! agenda-tools/src/calendar.rs
//! Query one day of a remote calendar and reduce it to meeting summaries.
//!
//! The remote side sits behind [`EventSource`]; [`GoogleCalendarSource`] is the
//! production implementation on top of `google-calendar3`.

use std::{fmt, sync::Arc};

use agenda::{config, AgendaError, Config};
use agenda_core::{CalendarEvent, DayWindow, EventStart, MeetingSummary, QueryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use google_calendar3::{
    api::{Event, EventDateTime},
    common::NoToken,
    CalendarHub,
};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tracing::{debug, warn};

/// Upper bound on events returned for one day. Anything past it is dropped silently.
pub const MAX_RESULTS: usize = 10;
pub const ORDER_BY_START_TIME: &str = "startTime";

/// Settings the adapter needs on every call, resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct CalendarSettings {
    pub calendar_id: Option<String>,
    pub api_key: Option<String>,
    pub time_zone: Tz,
}

impl From<&Config> for CalendarSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            calendar_id: cfg.calendar_id.clone(),
            api_key: cfg.api_key.clone(),
            time_zone: cfg.time_zone,
        }
    }
}

impl fmt::Debug for CalendarSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarSettings")
            .field("calendar_id", &self.calendar_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("time_zone", &self.time_zone)
            .finish()
    }
}

/// One bounded list request against the remote calendar.
#[derive(Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub calendar_id: String,
    pub api_key: String,
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    pub max_results: usize,
    /// Expand recurring events into individual occurrences.
    pub single_events: bool,
    pub order_by: &'static str,
    pub time_zone: Tz,
}

impl fmt::Debug for EventQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQuery")
            .field("calendar_id", &self.calendar_id)
            .field("time_min", &self.time_min)
            .field("time_max", &self.time_max)
            .field("max_results", &self.max_results)
            .field("single_events", &self.single_events)
            .field("order_by", &self.order_by)
            .field("time_zone", &self.time_zone)
            .finish_non_exhaustive()
    }
}

/// Anything that can list calendar events for a query.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn list_events(&self, query: &EventQuery) -> anyhow::Result<Vec<CalendarEvent>>;
}

pub struct CalendarQueryAdapter {
    settings: CalendarSettings,
    source: Arc<dyn EventSource>,
}

impl CalendarQueryAdapter {
    pub fn new(settings: CalendarSettings, source: Arc<dyn EventSource>) -> Self {
        Self { settings, source }
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    /// Build the remote request for `window`, or name the first setting that is missing.
    pub fn build_query(&self, window: &DayWindow) -> Result<EventQuery, AgendaError> {
        let calendar_id = self.settings.calendar_id.clone().ok_or(AgendaError::MissingEnv {
            key: config::CALENDAR_ID_VAR,
        })?;
        let api_key = self.settings.api_key.clone().ok_or(AgendaError::MissingEnv {
            key: config::API_KEY_VAR,
        })?;

        Ok(EventQuery {
            calendar_id,
            api_key,
            time_min: window.start(),
            time_max: window.end(),
            max_results: MAX_RESULTS,
            single_events: true,
            order_by: ORDER_BY_START_TIME,
            time_zone: self.settings.time_zone,
        })
    }

    /// List the events in `window`. Every failure comes back as [`QueryResult::Failure`].
    pub async fn events_on(&self, window: &DayWindow) -> QueryResult {
        let query = match self.build_query(window) {
            | Ok(query) => query,
            | Err(err) => {
                warn!(error = %err, "calendar lookup is not configured");
                return QueryResult::failure(err.to_string());
            }
        };

        match self.source.list_events(&query).await {
            | Ok(events) => summarize(events),
            | Err(err) => {
                warn!(error = %err, calendar_id = %query.calendar_id, "calendar query failed");
                QueryResult::failure(err.to_string())
            }
        }
    }
}

fn summarize(events: Vec<CalendarEvent>) -> QueryResult {
    if events.len() > MAX_RESULTS {
        debug!(returned = events.len(), kept = MAX_RESULTS, "dropping events past the daily cap");
    }
    events
        .iter()
        .take(MAX_RESULTS)
        .inspect(|event| {
            if event.start.is_missing() {
                warn!(summary = ?event.summary, "event has no start time; using a placeholder");
            }
            if event.summary.is_none() {
                warn!(start = %event.start, "event has no summary; using a placeholder");
            }
        })
        .map(MeetingSummary::from)
        .collect()
}

// ---------- Google Calendar ----------

type HttpsClient = HttpsConnector<HttpConnector>;

/// Reads public events from Google Calendar v3 with an API key (no OAuth).
pub struct GoogleCalendarSource {
    hub: CalendarHub<HttpsClient>,
}

impl GoogleCalendarSource {
    pub fn new() -> agenda::Result<Self> {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|source| AgendaError::TlsRoots { source })?
            .https_only()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            hub: CalendarHub::new(client, NoToken),
        })
    }
}

#[async_trait]
impl EventSource for GoogleCalendarSource {
    async fn list_events(&self, query: &EventQuery) -> anyhow::Result<Vec<CalendarEvent>> {
        let max_results = i32::try_from(query.max_results).unwrap_or(i32::MAX);

        let (_, events) = self
            .hub
            .events()
            .list(&query.calendar_id)
            .param("key", query.api_key.as_str())
            .time_min(query.time_min)
            .time_max(query.time_max)
            .max_results(max_results)
            .single_events(query.single_events)
            .order_by(query.order_by)
            .time_zone(query.time_zone.name())
            .doit()
            .await
            .map_err(|err| anyhow::anyhow!(err.to_string()))?;

        let events = events.items.unwrap_or_default();
        debug!(count = events.len(), "google calendar returned events");

        Ok(events
            .into_iter()
            .map(|event| to_calendar_event(event, query.time_zone))
            .collect())
    }
}

fn to_calendar_event(event: Event, tz: Tz) -> CalendarEvent {
    CalendarEvent {
        summary: event.summary,
        start: event_start(event.start, tz),
    }
}

fn event_start(start: Option<EventDateTime>, tz: Tz) -> EventStart {
    match start {
        | Some(EventDateTime {
            date_time: Some(instant),
            ..
        }) => EventStart::At(instant.with_timezone(&tz).fixed_offset()),
        | Some(EventDateTime { date: Some(day), .. }) => EventStart::AllDay(day),
        | _ => EventStart::Missing,
    }
}
