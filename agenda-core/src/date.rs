//! agenda-core/src/date.rs
//! Resolve a caller's date expression into a one-day query window.
//!
//! Accepted inputs, checked in order:
//! - nothing, an empty string or `today` (any case): the current day
//! - `tomorrow` (any case): the day after
//! - `YYYY-MM-DD`
//! - an RFC 3339 timestamp, which selects the day it falls on in the configured zone
//! - `YYYY/MM/DD`

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid date {input:?}. Use YYYY-MM-DD, 'today' or 'tomorrow'.")]
    InvalidDate { input: String },
}

/// Half-open interval `[start, end)` covering one calendar day of a time zone.
///
/// Both ends sit on local midnight. In UTC the window is always 24 hours long;
/// zones with a DST change on that day give 23 or 25 hours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DayWindow {
    /// `None` when the day or the one after it cannot be placed on the timeline,
    /// which only happens at the edges of the representable date range.
    pub fn for_day(day: NaiveDate, tz: Tz) -> Option<Self> {
        let start = local_midnight(day, tz)?;
        let end = local_midnight(day.succ_opt()?, tz)?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Both bounds as `2025-06-01T00:00:00.000Z` style timestamps.
    pub fn to_rfc3339(&self) -> (String, String) {
        (
            self.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.end.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    /// Inverse of [`DayWindow::to_rfc3339`]. `None` if either bound fails to parse
    /// or the bounds are not ordered.
    pub fn from_rfc3339(start: &str, end: &str) -> Option<Self> {
        let start = DateTime::parse_from_rfc3339(start).ok()?.with_timezone(&Utc);
        let end = DateTime::parse_from_rfc3339(end).ok()?.with_timezone(&Utc);
        (end > start).then_some(Self { start, end })
    }
}

fn local_midnight(day: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    first_valid_local(day.and_time(NaiveTime::MIN), tz)
}

// Some zones skip midnight when DST starts; the day then begins at the end of the gap.
fn first_valid_local(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    (0..=4)
        .filter_map(|step| naive.checked_add_signed(Duration::minutes(30 * step)))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|local| local.with_timezone(&Utc))
}

/// Maps date expressions to [`DayWindow`]s in one fixed zone.
#[derive(Clone, Copy, Debug)]
pub struct DateResolver {
    tz: Tz,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl DateResolver {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn resolve(&self, input: Option<&str>, now: DateTime<Utc>) -> Result<DayWindow, DateError> {
        let day = self.resolve_day(input, now)?;
        DayWindow::for_day(day, self.tz).ok_or_else(|| DateError::InvalidDate {
            input: input.map(str::trim).unwrap_or_default().to_owned(),
        })
    }

    pub fn resolve_day(&self, input: Option<&str>, now: DateTime<Utc>) -> Result<NaiveDate, DateError> {
        let token = input.map(str::trim).unwrap_or_default();
        let today = now.with_timezone(&self.tz).date_naive();

        if token.is_empty() || token.eq_ignore_ascii_case("today") {
            return Ok(today);
        }
        let day = if token.eq_ignore_ascii_case("tomorrow") {
            today.succ_opt()
        } else {
            self.parse_day(token)
        };
        day.ok_or_else(|| DateError::InvalidDate {
            input: token.to_owned(),
        })
    }

    fn parse_day(&self, token: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(token, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(token)
                    .ok()
                    .map(|instant| instant.with_timezone(&self.tz).date_naive())
            })
            .or_else(|| NaiveDate::parse_from_str(token, "%Y/%m/%d").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc)
    }

    fn utc_resolver() -> DateResolver {
        DateResolver::default()
    }

    #[test]
    fn today_and_absent_resolve_to_current_utc_day() {
        let now = at("2025-03-14T17:45:12Z");
        let expected_start = at("2025-03-14T00:00:00Z");

        for input in [None, Some("today"), Some("TODAY"), Some("ToDay"), Some(""), Some("  today ")] {
            let window = utc_resolver().resolve(input, now).unwrap();
            assert_eq!(window.start(), expected_start, "input {input:?}");
            assert_eq!(window.duration(), Duration::hours(24), "input {input:?}");
        }
    }

    #[test]
    fn tomorrow_is_one_day_after_today() {
        let now = at("2025-12-31T23:59:59Z");
        let today = utc_resolver().resolve(Some("today"), now).unwrap();

        for input in ["tomorrow", "Tomorrow", "TOMORROW"] {
            let tomorrow = utc_resolver().resolve(Some(input), now).unwrap();
            assert_eq!(tomorrow.start(), today.end());
            assert_eq!(tomorrow.start(), at("2026-01-01T00:00:00Z"));
            assert_eq!(tomorrow.duration(), Duration::hours(24));
        }
    }

    #[test]
    fn explicit_date_starts_at_its_midnight() {
        let now = at("2020-01-01T12:00:00Z");
        let window = utc_resolver().resolve(Some("2025-06-01"), now).unwrap();

        let (start, end) = window.to_rfc3339();
        assert_eq!(start, "2025-06-01T00:00:00.000Z");
        assert_eq!(end, "2025-06-02T00:00:00.000Z");
    }

    #[test]
    fn timestamps_and_slashed_dates_are_accepted() {
        let now = at("2020-01-01T12:00:00Z");
        let r = utc_resolver();

        let from_ts = r.resolve_day(Some("2025-06-01T22:30:00-03:00"), now).unwrap();
        assert_eq!(from_ts, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());

        let slashed = r.resolve_day(Some("2025/06/01"), now).unwrap();
        assert_eq!(slashed, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn garbage_is_rejected_with_a_usage_hint() {
        let now = at("2025-01-01T00:00:00Z");

        for input in ["next friday", "2025-13-01", "2025-02-30", "yesterday-ish", "06/01/2025"] {
            let err = utc_resolver().resolve(Some(input), now).unwrap_err();
            assert_eq!(
                err,
                DateError::InvalidDate {
                    input: input.to_owned()
                }
            );
            assert!(err.to_string().contains("YYYY-MM-DD"));
        }
    }

    #[test]
    fn named_zone_shifts_the_window() {
        let r = DateResolver::new(chrono_tz::America::New_York);
        // 03:00 UTC on the 10th is still the 9th in New York.
        let now = at("2025-01-10T03:00:00Z");

        let window = r.resolve(None, now).unwrap();
        assert_eq!(window.start(), at("2025-01-09T05:00:00Z"));
        assert_eq!(window.end(), at("2025-01-10T05:00:00Z"));
    }

    #[test]
    fn dst_days_cover_exactly_one_local_day() {
        let r = DateResolver::new(chrono_tz::Europe::Berlin);
        let now = at("2025-01-01T00:00:00Z");

        let spring = r.resolve(Some("2025-03-30"), now).unwrap();
        assert_eq!(spring.start(), at("2025-03-29T23:00:00Z"));
        assert_eq!(spring.duration(), Duration::hours(23));

        let autumn = r.resolve(Some("2025-10-26"), now).unwrap();
        assert_eq!(autumn.duration(), Duration::hours(25));
    }

    #[test]
    fn skipped_midnight_starts_after_the_gap() {
        // Chile moved clocks from 00:00 to 01:00 on 2024-09-08.
        let r = DateResolver::new(chrono_tz::America::Santiago);
        let window = r.resolve(Some("2024-09-08"), at("2024-01-01T00:00:00Z")).unwrap();

        assert_eq!(window.start(), at("2024-09-08T04:00:00Z"));
        assert!(window.end() > window.start());
    }

    #[test]
    fn dates_at_the_edge_of_the_range_are_rejected() {
        let now = at("2025-01-01T00:00:00Z");
        let cases = [
            (DateResolver::default(), "+262142-12-31"),
            (DateResolver::new(chrono_tz::America::New_York), "+262142-12-31"),
            (DateResolver::new(chrono_tz::Asia::Tokyo), "-262143-01-01"),
        ];

        for (r, input) in cases {
            let err = r.resolve(Some(input), now).unwrap_err();
            assert_eq!(
                err,
                DateError::InvalidDate {
                    input: input.to_owned()
                },
                "zone {}",
                r.tz
            );
        }

        let last_full_day = DateResolver::default().resolve(Some("+262142-12-30"), now).unwrap();
        assert_eq!(last_full_day.duration(), Duration::hours(24));
    }

    #[test]
    fn window_bounds_survive_a_text_round_trip() {
        let r = DateResolver::new(chrono_tz::Asia::Kolkata);
        let window = r.resolve(Some("2025-06-01"), Utc::now()).unwrap();

        let (start, end) = window.to_rfc3339();
        assert_eq!(DayWindow::from_rfc3339(&start, &end), Some(window));
        assert_eq!(DayWindow::from_rfc3339(&end, &start), None);
        assert_eq!(DayWindow::from_rfc3339("soon", &end), None);
    }
}
