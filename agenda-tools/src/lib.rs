pub mod calendar;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

pub use calendar::{CalendarQueryAdapter, CalendarSettings, EventQuery, EventSource, GoogleCalendarSource};
pub use server::{CalendarDateArgs, CalendarServer};
