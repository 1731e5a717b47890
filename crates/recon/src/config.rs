use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Tenant configuration: role allow-lists plus an optional roster.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    pub name: String,
    pub roles: RoleConfig,
    #[serde(default)]
    pub roster: Option<RosterConfig>,
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Email rules per role. Domains are bare (`example.com`); a leading `@` is
/// accepted and stripped during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleConfig {
    /// Exact addresses that are always SCHOOL, checked before any domain.
    #[serde(default)]
    pub school_emails: Vec<String>,
    #[serde(default)]
    pub tutor_domains: Vec<String>,
    #[serde(default)]
    pub student_domains: Vec<String>,
}

impl RoleConfig {
    /// Trim and lower-case every entry, strip leading `@` from domains.
    pub fn normalized(&self) -> Self {
        let email = |s: &String| s.trim().to_ascii_lowercase();
        let domain = |s: &String| s.trim().trim_start_matches('@').to_ascii_lowercase();
        Self {
            school_emails: self.school_emails.iter().map(email).collect(),
            tutor_domains: self.tutor_domains.iter().map(domain).collect(),
            student_domains: self.student_domains.iter().map(domain).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let roles = self.normalized();

        if roles.school_emails.is_empty()
            && roles.tutor_domains.is_empty()
            && roles.student_domains.is_empty()
        {
            return Err(ReconError::ConfigValidation(
                "at least one of school_emails, tutor_domains, student_domains is required".into(),
            ));
        }

        for e in &roles.school_emails {
            if !e.contains('@') {
                return Err(ReconError::ConfigValidation(format!(
                    "school_emails: '{e}' is not an email address"
                )));
            }
        }

        for (list, domains) in [
            ("tutor_domains", &roles.tutor_domains),
            ("student_domains", &roles.student_domains),
        ] {
            for d in domains {
                if d.is_empty() {
                    return Err(ReconError::ConfigValidation(format!("{list}: empty domain")));
                }
                if d.contains('@') {
                    return Err(ReconError::ConfigValidation(format!(
                        "{list}: '{d}' must be a domain, not an address"
                    )));
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// CSV files mapping known people to emails. Paths are relative to the
/// config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterConfig {
    #[serde(default)]
    pub students: Option<String>,
    #[serde(default)]
    pub tutors: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let mut config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        config.roles = config.roles.normalized();
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        self.roles.validate()?;

        if let Some(ref roster) = self.roster {
            if roster.students.is_none() && roster.tutors.is_none() {
                return Err(ReconError::ConfigValidation(
                    "[roster] needs at least one of students, tutors".into(),
                ));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
