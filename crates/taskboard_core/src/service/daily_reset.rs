//! Calendar clock and polling cadence for the completed-today reset.
//!
//! # Invariants
//! - The reset compares calendar dates only. Dates are written as
//!   `YYYY-MM-DD`; the browser's `Mon Oct 19 2026` form is also read.
//! - Checks are polled, so a reset may land up to one interval after
//!   midnight.

use chrono::{DateTime, Local, NaiveDate, Utc};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// How often the reset check re-runs after startup.
pub const RESET_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Source of wall-clock readings.
pub trait Clock {
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;
    /// Current timestamp for record creation.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock whose date is set by hand. Clones share the same date.
#[derive(Debug, Clone)]
pub struct ManualClock {
    today: Rc<Cell<NaiveDate>>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Rc::new(Cell::new(today)),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

const RESET_DATE_FORMAT: &str = "%Y-%m-%d";
const BROWSER_DATE_FORMAT: &str = "%a %b %d %Y";

/// Storage form of a reset date.
pub fn reset_date_text(date: NaiveDate) -> String {
    date.format(RESET_DATE_FORMAT).to_string()
}

/// Parses a stored reset date in either accepted form.
pub fn parse_reset_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, RESET_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, BROWSER_DATE_FORMAT))
        .ok()
}

/// Tracks when the next reset check is due.
#[derive(Debug, Clone)]
pub struct ResetPoller {
    interval: Duration,
    next_due: Instant,
}

impl ResetPoller {
    /// Poller whose first check is due one `interval` after `checked_at`.
    pub fn new(checked_at: Instant, interval: Duration) -> Self {
        Self {
            interval,
            next_due: checked_at + interval,
        }
    }

    /// Returns `true` when a check is due at `now`, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_reset_date, reset_date_text, ResetPoller};
    use chrono::NaiveDate;
    use std::time::{Duration, Instant};

    #[test]
    fn poller_fires_once_per_interval() {
        let start = Instant::now();
        let mut poller = ResetPoller::new(start, Duration::from_secs(60));

        assert!(!poller.poll(start + Duration::from_secs(59)));
        assert!(poller.poll(start + Duration::from_secs(60)));
        assert!(!poller.poll(start + Duration::from_secs(90)));
        assert!(poller.poll(start + Duration::from_secs(121)));
    }

    #[test]
    fn reset_date_text_is_iso_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(reset_date_text(date), "2026-03-07");
    }

    #[test]
    fn parse_reset_date_reads_both_forms() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        assert_eq!(parse_reset_date("2026-10-05"), Some(date));
        assert_eq!(parse_reset_date("Mon Oct 05 2026"), Some(date));
        assert_eq!(parse_reset_date("yesterday"), None);
    }
}
