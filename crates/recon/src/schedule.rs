//! Time and link helpers for laying sessions out on a dashboard.
//!
//! Timestamps are shown in their own UTC offset; an operator's local zone is
//! the caller's concern.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::model::{Session, SessionStatus};

/// Placeholder for an unreadable time.
pub const NO_TIME: &str = "--:--";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Wall-clock time of an ISO-8601 timestamp. Accepts RFC 3339, offset-less
/// date-times, bare `HH:MM[:SS]`, and all-day dates (midnight).
pub fn parse_clock(ts: &str) -> Option<NaiveTime> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.time());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(ts, fmt) {
            return Some(dt.time());
        }
    }
    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(ts, fmt) {
            return Some(t);
        }
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .ok()
        .and_then(|_| NaiveTime::from_hms_opt(0, 0, 0))
}

/// `HH:MM`, 24-hour, or `--:--` when unreadable.
pub fn format_clock(ts: &str) -> String {
    match parse_clock(ts) {
        Some(t) => t.format("%H:%M").to_string(),
        None => NO_TIME.to_string(),
    }
}

/// `HH:MM - HH:MM` for a session's window.
pub fn timeframe(session: &Session) -> String {
    format!(
        "{} - {}",
        format_clock(&session.start_time),
        format_clock(&session.end_time)
    )
}

/// Half-hour slot a start time falls in: `HH:00` or `HH:30`.
pub fn slot_label(ts: &str) -> Option<String> {
    parse_clock(ts).map(|t| {
        let minutes = if t.minute() < 30 { "00" } else { "30" };
        format!("{:02}:{minutes}", t.hour())
    })
}

/// Hour window a start time falls in: `HH:00`.
pub fn hour_label(ts: &str) -> Option<String> {
    parse_clock(ts).map(|t| format!("{:02}:00", t.hour()))
}

/// Sessions grouped by half-hour slot, slots ascending, input order kept
/// within a slot. Unreadable start times group under `--:--`, which sorts
/// first.
pub fn group_by_slot(sessions: &[Session]) -> Vec<(String, Vec<&Session>)> {
    let mut slots: BTreeMap<String, Vec<&Session>> = BTreeMap::new();
    for s in sessions {
        let label = slot_label(&s.start_time).unwrap_or_else(|| NO_TIME.to_string());
        slots.entry(label).or_default().push(s);
    }
    slots.into_iter().collect()
}

/// Sessions whose start hour is one of `hours` (`HH:00` labels).
pub fn in_hours<'a>(sessions: &'a [Session], hours: &[String]) -> Vec<&'a Session> {
    sessions
        .iter()
        .filter(|s| hour_label(&s.start_time).is_some_and(|h| hours.contains(&h)))
        .collect()
}

/// Meeting code from a join link: last path segment, query string dropped.
pub fn meeting_code(link: &str) -> Option<String> {
    let path = link.trim().split(['?', '#']).next().unwrap_or("");
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|code| !code.is_empty() && !code.contains(':'))
        .map(str::to_string)
}

/// ACTIVE when anyone is connected, otherwise UPCOMING if the feed said so,
/// otherwise IDLE.
pub fn derive_status(session: &Session) -> SessionStatus {
    if session.participants.iter().any(|p| p.is_active) {
        SessionStatus::Active
    } else if session.status == SessionStatus::Upcoming {
        SessionStatus::Upcoming
    } else {
        SessionStatus::Idle
    }
}
