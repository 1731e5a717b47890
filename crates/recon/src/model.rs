use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Feeds send `null` for fields they have no value for; treat it like an
/// absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|v| v.unwrap_or_else(default_active))
}

/// Calendar RSVP state. Informational only, never consulted by matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseStatus {
    Accepted,
    Declined,
    Tentative,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A person expected per the calendar invite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attendee {
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "response", deserialize_with = "null_as_default")]
    pub response_status: ResponseStatus,
}

/// A person observed by the meeting platform's presence feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_active", deserialize_with = "null_as_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Participant {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            is_active: true,
        }
    }

    /// Email with surrounding whitespace removed; `None` when absent or blank.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    Active,
    Upcoming,
    #[default]
    #[serde(other)]
    Idle,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Upcoming => write!(f, "UPCOMING"),
        }
    }
}

/// One scheduled meeting with its expected and observed people.
///
/// Everything except `id` is best-effort data; missing or `null` fields
/// deserialize to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meeting_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendees: Vec<Attendee>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants: Vec<Participant>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_recording: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SessionStatus,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Which rule paired an attendee with a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Email,
    Name,
}

/// Outcome for one attendee. `participant` indexes the session's
/// participant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendeeMatch {
    pub attendee: usize,
    pub participant: Option<usize>,
    pub rule: Option<MatchRule>,
}

impl AttendeeMatch {
    pub fn is_matched(&self) -> bool {
        self.participant.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutput {
    /// One entry per attendee, in attendee order.
    pub attendees: Vec<AttendeeMatch>,
    /// Participant indices never consumed, in participant order.
    pub unmatched_participants: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    School,
    Tutor,
    Student,
    Other,
}

impl Role {
    /// Display order of the buckets.
    pub const ALL: [Role; 4] = [Role::School, Role::Tutor, Role::Student, Role::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Self::School => "SCHOOL",
            Self::Tutor => "TUTOR",
            Self::Student => "STUDENT",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrigin {
    /// Listed on the calendar invite.
    Invited,
    /// Present in the meeting without a matching invite.
    WalkIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestEntry {
    pub name: String,
    pub email: String,
    pub is_joined: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_active: Option<bool>,
    pub origin: EntryOrigin,
}

/// The four display buckets for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceReport {
    pub schools: Vec<GuestEntry>,
    pub tutors: Vec<GuestEntry>,
    pub students: Vec<GuestEntry>,
    pub others: Vec<GuestEntry>,
}

impl AttendanceReport {
    pub fn bucket(&self, role: Role) -> &[GuestEntry] {
        match role {
            Role::School => &self.schools,
            Role::Tutor => &self.tutors,
            Role::Student => &self.students,
            Role::Other => &self.others,
        }
    }

    pub(crate) fn bucket_mut(&mut self, role: Role) -> &mut Vec<GuestEntry> {
        match role {
            Role::School => &mut self.schools,
            Role::Tutor => &mut self.tutors,
            Role::Student => &mut self.students,
            Role::Other => &mut self.others,
        }
    }

    /// All entries in bucket display order.
    pub fn entries(&self) -> impl Iterator<Item = (Role, &GuestEntry)> {
        Role::ALL
            .into_iter()
            .flat_map(move |role| self.bucket(role).iter().map(move |e| (role, e)))
    }

    pub fn is_empty(&self) -> bool {
        Role::ALL.iter().all(|r| self.bucket(*r).is_empty())
    }
}

// ---------------------------------------------------------------------------
// Counts + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceCounts {
    pub expected: usize,
    pub joined: usize,
    pub missing: usize,
    pub walk_ins: usize,
    pub by_role: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub id: String,
    pub title: String,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_code: Option<String>,
    pub timeframe: String,
    pub report: AttendanceReport,
    pub counts: AttendanceCounts,
    pub summary_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub sessions: Vec<SessionReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub roster_entries: usize,
}
