use crate::classify::Classifier;
use crate::matcher::match_attendees;
use crate::model::{
    AttendanceCounts, AttendanceReport, Attendee, EntryOrigin, GuestEntry, MatchOutput, Participant,
};

/// Reconcile one session's people into the four role buckets.
///
/// Attendees come first in invite order, classified by their own email and
/// marked joined when the matcher paired them. Participants the matcher left
/// over follow in feed order as joined walk-ins, classified by whatever
/// email the feed carried.
pub fn build_report(
    attendees: &[Attendee],
    participants: &[Participant],
    classifier: &Classifier,
) -> AttendanceReport {
    let matched = match_attendees(attendees, participants);
    assemble(attendees, participants, &matched, classifier)
}

pub(crate) fn assemble(
    attendees: &[Attendee],
    participants: &[Participant],
    matched: &MatchOutput,
    classifier: &Classifier,
) -> AttendanceReport {
    let mut report = AttendanceReport::default();

    for m in &matched.attendees {
        let attendee = &attendees[m.attendee];
        let joined = m.participant.map(|pi| &participants[pi]);
        let role = classifier.classify(&attendee.email);
        report.bucket_mut(role).push(GuestEntry {
            name: attendee.name.clone(),
            email: attendee.email.trim().to_string(),
            is_joined: joined.is_some(),
            joined_display_name: joined.map(|p| p.name.clone()),
            joined_active: joined.map(|p| p.is_active),
            origin: EntryOrigin::Invited,
        });
    }

    for &pi in &matched.unmatched_participants {
        let p = &participants[pi];
        let email = p.email().unwrap_or("").to_ascii_lowercase();
        let role = classifier.classify(&email);
        report.bucket_mut(role).push(GuestEntry {
            name: p.name.clone(),
            email,
            is_joined: true,
            joined_display_name: Some(p.name.clone()),
            joined_active: Some(p.is_active),
            origin: EntryOrigin::WalkIn,
        });
    }

    report
}

/// Headline numbers for a report.
pub fn count(report: &AttendanceReport) -> AttendanceCounts {
    let mut counts = AttendanceCounts::default();

    for (role, entry) in report.entries() {
        *counts.by_role.entry(role.to_string()).or_insert(0) += 1;
        match entry.origin {
            EntryOrigin::Invited => {
                counts.expected += 1;
                if entry.is_joined {
                    counts.joined += 1;
                } else {
                    counts.missing += 1;
                }
            }
            EntryOrigin::WalkIn => counts.walk_ins += 1,
        }
    }

    counts
}
