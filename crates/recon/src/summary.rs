//! Plain-text attendance summary, the clipboard export of a session.
//!
//! Field order and literals are fixed; downstream operators paste this into
//! tickets and chat.

use crate::model::{AttendanceReport, GuestEntry, Role, Session};
use crate::schedule::timeframe;

/// Render the summary for `session` from its reconciled `report`.
///
/// ```text
/// SESSION: <title>
/// TIMEFRAME: HH:MM - HH:MM
/// SCHOOL: Name [JOINED], Name [MISSING]
/// TUTOR: N/A
/// STUDENT: ...
/// OTHER: ...
/// PEOPLE PRESENT:
/// Display One, Display Two
/// RECORDING: YES
/// LINK: https://...
/// ```
pub fn render_summary(session: &Session, report: &AttendanceReport) -> String {
    let mut lines = vec![
        format!("SESSION: {}", session.summary),
        format!("TIMEFRAME: {}", timeframe(session)),
    ];
    lines.extend(
        Role::ALL
            .iter()
            .map(|role| format!("{}: {}", role.label(), bucket_line(report.bucket(*role)))),
    );
    lines.push("PEOPLE PRESENT:".to_string());
    lines.push(people_present(session));
    lines.push(format!("RECORDING: {}", if session.is_recording { "YES" } else { "NO" }));
    lines.push(format!("LINK: {}", session.meeting_link));
    lines.join("\n")
}

fn bucket_line(entries: &[GuestEntry]) -> String {
    if entries.is_empty() {
        return "N/A".to_string();
    }
    entries
        .iter()
        .map(|e| {
            let state = if e.is_joined { "JOINED" } else { "MISSING" };
            format!("{} [{state}]", e.name)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn people_present(session: &Session) -> String {
    if session.participants.is_empty() {
        return "NONE".to_string();
    }
    session
        .participants
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryOrigin, Participant};

    fn entry(name: &str, joined: bool) -> GuestEntry {
        GuestEntry {
            name: name.into(),
            email: String::new(),
            is_joined: joined,
            joined_display_name: None,
            joined_active: None,
            origin: EntryOrigin::Invited,
        }
    }

    #[test]
    fn full_layout() {
        let session = Session {
            id: "evt1".into(),
            summary: "Algebra 1 - Period 3".into(),
            meeting_link: "https://meet.google.com/abc-defg-hij".into(),
            start_time: "2026-01-15T13:00:00-06:00".into(),
            end_time: "2026-01-15T13:45:00-06:00".into(),
            participants: vec![Participant::named("Ms. Ruiz"), Participant::named("kid 7")],
            is_recording: true,
            ..Session::default()
        };
        let report = AttendanceReport {
            schools: vec![],
            tutors: vec![entry("Ana Ruiz", true)],
            students: vec![entry("Kid Seven", true), entry("Kid Eight", false)],
            others: vec![],
        };

        let expected = "\
SESSION: Algebra 1 - Period 3
TIMEFRAME: 13:00 - 13:45
SCHOOL: N/A
TUTOR: Ana Ruiz [JOINED]
STUDENT: Kid Seven [JOINED], Kid Eight [MISSING]
OTHER: N/A
PEOPLE PRESENT:
Ms. Ruiz, kid 7
RECORDING: YES
LINK: https://meet.google.com/abc-defg-hij";
        assert_eq!(render_summary(&session, &report), expected);
    }

    #[test]
    fn empty_session_literals() {
        let session = Session {
            id: "x".into(),
            ..Session::default()
        };
        let text = render_summary(&session, &AttendanceReport::default());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "TIMEFRAME: --:-- - --:--");
        assert_eq!(lines[2], "SCHOOL: N/A");
        assert_eq!(lines[5], "OTHER: N/A");
        assert_eq!(lines[7], "NONE");
        assert_eq!(lines[8], "RECORDING: NO");
        assert_eq!(lines[9], "LINK: ");
    }
}
