//! `rollcall-recon`: attendance reconciliation engine.
//!
//! Pure engine crate: receives already-fetched sessions, returns bucketed
//! attendance and the plain-text summary. No network or UI dependencies.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod report;
pub mod roster;
pub mod schedule;
pub mod summary;

pub use classify::Classifier;
pub use config::ReconConfig;
pub use engine::{parse_sessions, reconcile, run};
pub use error::ReconError;
pub use model::{AttendanceReport, ReconResult, Role, Session, SessionReport};
pub use roster::Roster;
