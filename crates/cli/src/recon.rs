//! `rollcall report|summary|slots|validate`: config-driven attendance recon.

use std::io::Read;
use std::path::{Path, PathBuf};

use rollcall_recon::model::{EntryOrigin, SessionReport};
use rollcall_recon::schedule::{group_by_slot, in_hours, timeframe};
use rollcall_recon::{parse_sessions, run, ReconConfig, Roster, Session};

use crate::exit_codes::EXIT_RECON_UNKNOWN_SESSION;
use crate::CliError;

/// Read sessions JSON from a file, or stdin for `-`.
fn read_sessions(path: &Path) -> Result<Vec<Session>, CliError> {
    let input = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::io(format!("cannot read stdin: {e}")))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?
    };
    let sessions = parse_sessions(&input)?;
    tracing::debug!("read {} sessions from {}", sessions.len(), path.display());
    Ok(sessions)
}

/// Parse and validate the config, then load its roster (if any) with paths
/// resolved against the config file's directory.
fn load_config(config_path: &Path) -> Result<(ReconConfig, Option<Roster>), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| CliError::io(format!("cannot read config: {e}")))?;
    let config = ReconConfig::from_toml(&config_str)?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let roster = match config.roster {
        Some(ref roster_config) => Some(Roster::load(roster_config, base_dir)?),
        None => None,
    };
    Ok((config, roster))
}

/// Narrow to one session id, or fail with the ids that do exist.
fn select_session(sessions: Vec<Session>, id: &str) -> Result<Vec<Session>, CliError> {
    let known: Vec<String> = sessions.iter().map(|s| s.id.clone()).collect();
    let selected: Vec<Session> = sessions.into_iter().filter(|s| s.id == id).collect();
    if selected.is_empty() {
        let hint = if known.is_empty() {
            "input contains no sessions".to_string()
        } else {
            format!("known sessions: {}", known.join(", "))
        };
        return Err(CliError {
            code: EXIT_RECON_UNKNOWN_SESSION,
            message: format!("unknown session: \"{id}\""),
            hint: Some(hint),
        });
    }
    Ok(selected)
}

pub fn cmd_report(
    sessions_path: PathBuf,
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    session_id: Option<String>,
) -> Result<(), CliError> {
    let (config, roster) = load_config(&config_path)?;
    let mut sessions = read_sessions(&sessions_path)?;
    if let Some(ref id) = session_id {
        sessions = select_session(sessions, id)?;
    }

    let result = run(&config, &sessions, roster.as_ref());

    if json_output || output_file.is_some() {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::internal(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = output_file {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        if json_output {
            println!("{json_str}");
        }
    }

    if !json_output {
        for report in &result.sessions {
            print_report(report);
        }
    }

    let totals = result.sessions.iter().fold((0, 0, 0), |acc, s| {
        (acc.0 + s.counts.joined, acc.1 + s.counts.missing, acc.2 + s.counts.walk_ins)
    });
    eprintln!(
        "{} sessions: {} joined, {} missing, {} walk-ins",
        result.sessions.len(),
        totals.0,
        totals.1,
        totals.2,
    );
    Ok(())
}

fn print_report(report: &SessionReport) {
    println!("{}  {}  [{}]  {}", report.id, report.timeframe, report.status, report.title);
    if let Some(ref code) = report.meeting_code {
        println!("  meet: {code}");
    }
    let c = &report.counts;
    println!(
        "  expected {}  joined {}  missing {}  walk-ins {}",
        c.expected, c.joined, c.missing, c.walk_ins
    );
    for (role, entry) in report.report.entries() {
        let state = match (entry.origin, entry.is_joined) {
            (EntryOrigin::WalkIn, _) => "WALK-IN",
            (EntryOrigin::Invited, true) => "JOINED",
            (EntryOrigin::Invited, false) => "MISSING",
        };
        let email = if entry.email.is_empty() { "-" } else { entry.email.as_str() };
        println!("  {:<8} {:<8} {:<28} {}", role.label(), state, entry.name, email);
    }
    println!();
}

pub fn cmd_summary(sessions_path: PathBuf, config_path: PathBuf, session_id: String) -> Result<(), CliError> {
    let (config, roster) = load_config(&config_path)?;
    let sessions = select_session(read_sessions(&sessions_path)?, &session_id)?;
    let result = run(&config, &sessions, roster.as_ref());
    for report in &result.sessions {
        println!("{}", report.summary_text);
    }
    Ok(())
}

pub fn cmd_slots(sessions_path: PathBuf, hours: Vec<String>, json_output: bool) -> Result<(), CliError> {
    if let Some(bad) = hours.iter().find(|h| !is_hour_label(h)) {
        return Err(CliError::args(format!("invalid --hour \"{bad}\"")).with_hint("use HH:00, e.g. --hour 09:00"));
    }

    let sessions = read_sessions(&sessions_path)?;
    let sessions: Vec<Session> = if hours.is_empty() {
        sessions
    } else {
        in_hours(&sessions, &hours).into_iter().cloned().collect()
    };
    let slots = group_by_slot(&sessions);

    if json_output {
        let value: Vec<serde_json::Value> = slots
            .iter()
            .map(|(label, group)| {
                serde_json::json!({
                    "slot": label,
                    "sessions": group.iter().map(|s| serde_json::json!({
                        "id": s.id,
                        "title": s.summary,
                        "timeframe": timeframe(s),
                    })).collect::<Vec<_>>(),
                })
            })
            .collect();
        let json_str = serde_json::to_string_pretty(&value)
            .map_err(|e| CliError::internal(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    for (label, group) in &slots {
        println!("{label}");
        for s in group {
            println!("  {}  {}  {}", timeframe(s), s.id, s.summary);
        }
    }
    Ok(())
}

fn is_hour_label(s: &str) -> bool {
    s.len() == 5
        && s.ends_with(":00")
        && s.get(..2).and_then(|h| h.parse::<u8>().ok()).is_some_and(|h| h < 24)
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let (config, roster) = load_config(&config_path)?;
    let roles = &config.roles;
    eprintln!(
        "config \"{}\": {} school emails, {} tutor domains, {} student domains",
        config.name,
        roles.school_emails.len(),
        roles.tutor_domains.len(),
        roles.student_domains.len(),
    );
    if let Some(roster) = roster {
        eprintln!("roster: {} entries", roster.len());
    }
    eprintln!("ok");
    Ok(())
}
