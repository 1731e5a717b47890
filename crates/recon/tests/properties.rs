// Property-based tests for matching and bucketing.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use proptest::prelude::*;
use rollcall_recon::classify::Classifier;
use rollcall_recon::config::RoleConfig;
use rollcall_recon::matcher::match_attendees;
use rollcall_recon::model::{Attendee, EntryOrigin, MatchRule, Participant, Role};
use rollcall_recon::normalize::normalize;
use rollcall_recon::report::{build_report, count};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn roles() -> RoleConfig {
    RoleConfig {
        school_emails: vec!["front@tutor.org".into()],
        tutor_domains: vec!["tutor.org".into()],
        student_domains: vec!["kids.edu".into()],
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Display names drawn from a small alphabet so collisions are common.
fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => r"[A-Ca-c]{1,3}( [A-Ca-c]{1,3})?",
        1 => r"[ .'-]{0,3}",
        1 => Just("Núñez".to_string()),
    ]
}

fn arb_email() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => Just(String::new()),
        1 => Just("front@tutor.org".to_string()),
        2 => r"[a-c]{1,2}@(tutor\.org|kids\.edu|other\.net)",
        1 => r" [A-C]{1,2}@TUTOR\.org ",
    ]
}

fn arb_attendee() -> impl Strategy<Value = Attendee> {
    (arb_name(), arb_email()).prop_map(|(name, email)| Attendee {
        name,
        email,
        ..Attendee::default()
    })
}

fn arb_participant() -> impl Strategy<Value = Participant> {
    (arb_name(), proptest::option::of(arb_email()), any::<bool>()).prop_map(
        |(name, email, is_active)| Participant {
            name,
            email,
            is_active,
        },
    )
}

fn arb_people() -> impl Strategy<Value = (Vec<Attendee>, Vec<Participant>)> {
    (
        prop::collection::vec(arb_attendee(), 0..8),
        prop::collection::vec(arb_participant(), 0..8),
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn normalize_is_idempotent(name in ".{0,24}") {
        let once = normalize(&name);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn participant_consumed_at_most_once((attendees, participants) in arb_people()) {
        let out = match_attendees(&attendees, &participants);
        prop_assert_eq!(out.attendees.len(), attendees.len());

        let mut used = HashSet::new();
        for m in &out.attendees {
            if let Some(pi) = m.participant {
                prop_assert!(used.insert(pi), "participant {} matched twice", pi);
                prop_assert!(m.rule.is_some());
            }
        }
        for pi in &out.unmatched_participants {
            prop_assert!(!used.contains(pi), "participant {} both matched and left over", pi);
        }
        prop_assert_eq!(used.len() + out.unmatched_participants.len(), participants.len());
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn every_person_in_exactly_one_bucket((attendees, participants) in arb_people()) {
        let classifier = Classifier::new(&roles());
        let report = build_report(&attendees, &participants, &classifier);
        let counts = count(&report);

        let total: usize = Role::ALL.iter().map(|r| report.bucket(*r).len()).sum();
        let walk_ins = report
            .entries()
            .filter(|(_, e)| e.origin == EntryOrigin::WalkIn)
            .count();
        let matched = report
            .entries()
            .filter(|(_, e)| e.origin == EntryOrigin::Invited && e.is_joined)
            .count();

        prop_assert_eq!(total - walk_ins, attendees.len());
        prop_assert_eq!(walk_ins + matched, participants.len());
        prop_assert_eq!(counts.expected, attendees.len());
        prop_assert_eq!(counts.joined + counts.missing, counts.expected);
        prop_assert!(report.entries().filter(|(_, e)| e.origin == EntryOrigin::WalkIn).all(|(_, e)| e.is_joined));
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn unique_exact_email_always_wins(
        (mut attendees, mut participants) in arb_people(),
        target_name in arb_name(),
    ) {
        // A single attendee and participant share an email nobody else has.
        let email = "solo@unique.test".to_string();
        attendees.insert(0, Attendee { name: target_name, email: email.clone(), ..Attendee::default() });
        participants.push(Participant { email: Some(email.to_uppercase()), ..Participant::named("zz") });

        let out = match_attendees(&attendees, &participants);
        prop_assert_eq!(out.attendees[0].participant, Some(participants.len() - 1));
        prop_assert_eq!(out.attendees[0].rule, Some(MatchRule::Email));
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn matching_is_deterministic((attendees, participants) in arb_people()) {
        let classifier = Classifier::new(&roles());
        let a = build_report(&attendees, &participants, &classifier);
        let b = build_report(&attendees, &participants, &classifier);
        prop_assert_eq!(a, b);
    }
}
