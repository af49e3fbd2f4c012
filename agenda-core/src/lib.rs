//! Pure date and result handling for the calendar lookup tool. No I/O lives here.
#![forbid(unsafe_code)]

pub mod date;
pub mod meeting;

pub use date::{DateError, DateResolver, DayWindow};
pub use meeting::{CalendarEvent, EventStart, MeetingSummary, QueryResult};
