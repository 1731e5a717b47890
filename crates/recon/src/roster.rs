//! Directory of known people, used to attach an email to a participant the
//! presence feed only knows by display name.

use std::collections::HashSet;
use std::path::Path;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::RosterConfig;
use crate::error::ReconError;
use crate::model::Participant;

/// Containment matches need both keys longer than this.
const MIN_CONTAINMENT_LEN: usize = 3;
/// Word-overlap matches need at least this many shared words.
const MIN_SHARED_WORDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKind {
    Student,
    Tutor,
}

impl RosterKind {
    fn name_column(&self) -> &'static str {
        match self {
            Self::Student => "student_name",
            Self::Tutor => "no_id_name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub key: String,
    pub email: String,
    pub kind: RosterKind,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    seen_emails: HashSet<String>,
}

/// Name key for roster lookups: accents folded, lower-cased, punctuation
/// other than commas dropped, `Last, First` flipped to `First Last`,
/// whitespace collapsed.
pub fn person_key(name: &str) -> String {
    let kept: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == ',')
        .collect();

    let flipped = if kept.contains(',') {
        let mut parts = kept.split(',');
        let last = parts.next().unwrap_or("").trim();
        let first = parts.next().unwrap_or("").trim();
        format!("{first} {last}")
    } else {
        kept
    };

    flipped.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the configured CSV files, students before tutors. Paths resolve
    /// against `base_dir`.
    pub fn load(config: &RosterConfig, base_dir: &Path) -> Result<Self, ReconError> {
        let mut roster = Roster::new();
        for (file, kind) in [
            (&config.students, RosterKind::Student),
            (&config.tutors, RosterKind::Tutor),
        ] {
            let Some(file) = file else {
                continue;
            };
            let path = base_dir.join(file);
            let data = std::fs::read_to_string(&path).map_err(|e| ReconError::Roster {
                file: path.display().to_string(),
                message: format!("cannot read: {e}"),
            })?;
            let added = roster.add_csv(file, &data, kind)?;
            log::info!("roster: loaded {added} {kind:?} entries from {}", path.display());
        }
        Ok(roster)
    }

    /// Add rows from one CSV document. Returns how many entries were added.
    ///
    /// Rows without a name or email are skipped, as are tutor placeholders
    /// (`n/a`, `#...`) and any email already present.
    pub fn add_csv(&mut self, file: &str, data: &str, kind: RosterKind) -> Result<usize, ReconError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ReconError::Roster {
                file: file.into(),
                message: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let idx = |name: &str| -> Result<usize, ReconError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ReconError::MissingColumn {
                    file: file.into(),
                    column: name.into(),
                })
        };
        let name_idx = idx(kind.name_column())?;
        let email_idx = idx("email")?;

        let mut added = 0;
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| ReconError::Roster {
                file: file.into(),
                message: e.to_string(),
            })?;
            let name = record.get(name_idx).unwrap_or("").trim();
            let email = record.get(email_idx).unwrap_or("").trim().to_ascii_lowercase();

            if name.is_empty() || email.is_empty() {
                log::warn!("roster '{file}': row {} has no name or email, skipped", line + 2);
                continue;
            }
            if kind == RosterKind::Tutor && (email == "n/a" || email.starts_with('#')) {
                continue;
            }
            if !self.seen_emails.insert(email.clone()) {
                continue;
            }
            self.entries.push(RosterEntry {
                key: person_key(name),
                email,
                kind,
            });
            added += 1;
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Resolve a display name. Passes, each returning its first hit in
    /// roster order: exact key; containment either way when both keys are
    /// longer than three characters; two or more shared words.
    pub fn lookup(&self, display_name: &str) -> Option<&RosterEntry> {
        let key = person_key(display_name);
        if key.is_empty() {
            return None;
        }

        if let Some(e) = self.entries.iter().find(|e| e.key == key) {
            return Some(e);
        }

        let contained = self.entries.iter().find(|e| {
            (e.key.contains(key.as_str()) || key.contains(e.key.as_str()))
                && key.len() > MIN_CONTAINMENT_LEN
                && e.key.len() > MIN_CONTAINMENT_LEN
        });
        if contained.is_some() {
            return contained;
        }

        let words: HashSet<&str> = key.split_whitespace().collect();
        self.entries.iter().find(|e| {
            e.key
                .split_whitespace()
                .collect::<HashSet<_>>()
                .intersection(&words)
                .count()
                >= MIN_SHARED_WORDS
        })
    }

    /// Fill in emails for participants that lack one. Never overwrites an
    /// email the feed supplied. Returns how many were filled.
    pub fn enrich(&self, participants: &mut [Participant]) -> usize {
        let mut filled = 0;
        for p in participants.iter_mut().filter(|p| p.email().is_none()) {
            match self.lookup(&p.name) {
                Some(entry) => {
                    log::debug!("roster: '{}' resolved to {} ({:?})", p.name, entry.email, entry.kind);
                    p.email = Some(entry.email.clone());
                    filled += 1;
                }
                None => log::debug!("roster: no entry for '{}'", p.name),
            }
        }
        filled
    }
}
