use crate::model::{Attendee, AttendeeMatch, MatchOutput, MatchRule, Participant};
use crate::normalize::{emails_equal, normalize};

/// Pair attendees with participants, greedy first-fit in attendee order.
///
/// For each attendee the unconsumed participants are searched in list
/// order, first for an exact (case-insensitive) email, then for a name whose
/// normalized form equals, contains, or is contained in the attendee's.
/// A consumed participant is never offered again. The result depends on
/// input order: two attendees fuzzy-matching one participant leave the later
/// attendee unmatched.
pub fn match_attendees(attendees: &[Attendee], participants: &[Participant]) -> MatchOutput {
    let mut used = vec![false; participants.len()];
    let participant_keys: Vec<String> = participants.iter().map(|p| normalize(&p.name)).collect();
    let mut matches = Vec::with_capacity(attendees.len());

    for (ai, attendee) in attendees.iter().enumerate() {
        let found = find_by_email(attendee, participants, &used)
            .map(|pi| (pi, MatchRule::Email))
            .or_else(|| {
                find_by_name(&normalize(&attendee.name), &participant_keys, &used)
                    .map(|pi| (pi, MatchRule::Name))
            });

        match found {
            Some((pi, rule)) => {
                used[pi] = true;
                log::debug!(
                    "attendee '{}' matched participant '{}' by {:?}",
                    attendee.name,
                    participants[pi].name,
                    rule
                );
                matches.push(AttendeeMatch {
                    attendee: ai,
                    participant: Some(pi),
                    rule: Some(rule),
                });
            }
            None => {
                log::debug!("attendee '{}' not present", attendee.name);
                matches.push(AttendeeMatch {
                    attendee: ai,
                    participant: None,
                    rule: None,
                });
            }
        }
    }

    let unmatched_participants = used
        .iter()
        .enumerate()
        .filter(|(_, u)| !**u)
        .map(|(i, _)| i)
        .collect();

    MatchOutput {
        attendees: matches,
        unmatched_participants,
    }
}

fn find_by_email(attendee: &Attendee, participants: &[Participant], used: &[bool]) -> Option<usize> {
    if attendee.email.trim().is_empty() {
        return None;
    }
    participants.iter().enumerate().position(|(i, p)| {
        !used[i] && p.email().is_some_and(|e| emails_equal(e, &attendee.email))
    })
}

fn find_by_name(key: &str, participant_keys: &[String], used: &[bool]) -> Option<usize> {
    if key.is_empty() {
        return None;
    }
    participant_keys.iter().enumerate().position(|(i, pk)| {
        !used[i] && !pk.is_empty() && (pk == key || pk.contains(key) || key.contains(pk.as_str()))
    })
}
