use crate::config::RoleConfig;
use crate::model::Role;

/// Assigns a role bucket from an email address using injected tenant rules.
#[derive(Debug, Clone)]
pub struct Classifier {
    roles: RoleConfig,
}

impl Classifier {
    pub fn new(roles: &RoleConfig) -> Self {
        Self {
            roles: roles.normalized(),
        }
    }

    /// Priority: school allow-list, tutor domain, student domain, else OTHER.
    /// Blank email is always OTHER.
    pub fn classify(&self, email: &str) -> Role {
        let email = email.trim().to_ascii_lowercase();
        if email.is_empty() {
            return Role::Other;
        }

        if self.roles.school_emails.iter().any(|s| *s == email) {
            Role::School
        } else if has_domain(&email, &self.roles.tutor_domains) {
            Role::Tutor
        } else if has_domain(&email, &self.roles.student_domains) {
            Role::Student
        } else {
            Role::Other
        }
    }
}

fn has_domain(email: &str, domains: &[String]) -> bool {
    domains.iter().any(|d| {
        email
            .strip_suffix(d.as_str())
            .is_some_and(|local| local.ends_with('@'))
    })
}
