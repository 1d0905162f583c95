//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Application, Interview, Status};
use chrono::{DateTime, Utc};

/// Trait for storing and retrieving applications
///
/// Implemented by the infrastructure layer (hirelog-store). All methods take
/// `&self`; implementations are expected to guard their own state so that a
/// single instance can be shared between request handlers.
pub trait ApplicationRepository {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// List applications matching `filter`, or all of them for `None`
    ///
    /// The result is a copy; mutating it never affects the store.
    fn list(&self, filter: Option<&ApplicationFilter>) -> Result<Vec<Application>, Self::Error>;

    /// Insert applications, all or nothing
    fn insert(&self, applications: Vec<Application>) -> Result<(), Self::Error>;

    /// Replace the interviews of the application identified by (date, company)
    fn set_interviews(
        &self,
        date: DateTime<Utc>,
        company: &str,
        interviews: Vec<Interview>,
    ) -> Result<Application, Self::Error>;

    /// Number of stored applications
    fn count(&self) -> Result<usize, Self::Error>;

    /// Classify an error for callers that translate it (e.g. into RPC codes)
    fn error_kind(error: &Self::Error) -> RepositoryErrorKind;
}

/// Broad category of a repository failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryErrorKind {
    /// The caller sent something the store refuses
    InvalidInput,

    /// The addressed record does not exist
    NotFound,

    /// Anything else
    Internal,
}

/// Query criteria for listing applications
///
/// All criteria are optional and conjunctive. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    /// Exact company name
    pub company: Option<String>,

    /// Exact status
    pub status: Option<Status>,

    /// Earliest application date (inclusive)
    pub start_date: Option<DateTime<Utc>>,

    /// Latest application date (inclusive)
    pub end_date: Option<DateTime<Utc>>,
}

impl ApplicationFilter {
    /// Whether `application` satisfies every criterion that is set
    pub fn matches(&self, application: &Application) -> bool {
        if let Some(company) = &self.company {
            if &application.company != company {
                return false;
            }
        }
        if let Some(status) = self.status {
            if application.status != status {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if application.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if application.date > end {
                return false;
            }
        }
        true
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}
