use std::fmt;

/// Failures at the edges of the engine. Reconciliation itself never fails.
#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty role lists, malformed domain, etc.).
    ConfigValidation(String),
    /// Session JSON could not be decoded.
    SessionParse(String),
    /// Roster CSV is missing a required column.
    MissingColumn { file: String, column: String },
    /// Roster CSV could not be read or decoded.
    Roster { file: String, message: String },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::SessionParse(msg) => write!(f, "session parse error: {msg}"),
            Self::MissingColumn { file, column } => {
                write!(f, "roster '{file}': missing column '{column}'")
            }
            Self::Roster { file, message } => write!(f, "roster '{file}': {message}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
