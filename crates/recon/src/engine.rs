use crate::classify::Classifier;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::model::{ReconMeta, ReconResult, Session, SessionReport};
use crate::report::{build_report, count};
use crate::roster::Roster;
use crate::schedule::{derive_status, meeting_code, timeframe};
use crate::summary::render_summary;

/// Decode sessions as served by the dashboard backend: a JSON array of
/// sessions, or a single session object. Errors carry serde's line and
/// column.
pub fn parse_sessions(input: &str) -> Result<Vec<Session>, ReconError> {
    let is_array = input.trim_start().starts_with('[');
    let parsed = if is_array {
        serde_json::from_str::<Vec<Session>>(input)
    } else {
        serde_json::from_str::<Session>(input).map(|session| vec![session])
    };
    parsed.map_err(|e| ReconError::SessionParse(e.to_string()))
}

/// Reconcile one session: roster enrichment, matching, bucketing, summary.
///
/// Pure with respect to its inputs; the session is cloned before any
/// participant email is filled in.
pub fn reconcile(session: &Session, classifier: &Classifier, roster: Option<&Roster>) -> SessionReport {
    let enriched;
    let session = match roster {
        Some(roster) if !roster.is_empty() => {
            let mut copy = session.clone();
            roster.enrich(&mut copy.participants);
            enriched = copy;
            &enriched
        }
        _ => session,
    };

    let report = build_report(&session.attendees, &session.participants, classifier);
    let counts = count(&report);
    log::debug!(
        "session {}: {} expected, {} joined, {} walk-ins",
        session.id,
        counts.expected,
        counts.joined,
        counts.walk_ins
    );

    SessionReport {
        id: session.id.clone(),
        title: session.summary.clone(),
        status: derive_status(session),
        meeting_code: meeting_code(&session.meeting_link),
        timeframe: timeframe(session),
        summary_text: render_summary(session, &report),
        report,
        counts,
    }
}

/// Reconcile every session per config. Sessions are independent; output
/// order follows input order.
pub fn run(config: &ReconConfig, sessions: &[Session], roster: Option<&Roster>) -> ReconResult {
    let classifier = Classifier::new(&config.roles);
    let reports = sessions
        .iter()
        .map(|s| reconcile(s, &classifier, roster))
        .collect();

    ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            roster_entries: roster.map_or(0, Roster::len),
        },
        sessions: reports,
    }
}
