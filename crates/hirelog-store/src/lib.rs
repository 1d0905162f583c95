//! Hirelog Storage Layer
//!
//! In-memory application store plus the file formats used to seed and export it.
//!
//! # Architecture
//!
//! - `ApplicationStore`: the authoritative collection, one `RwLock` around a `Vec`
//! - `snapshot`: JSON snapshot of classified emails (the startup seed)
//! - `export`: CSV export and import
//! - `script`: decoding of the mail-retrieval script's execution response
//!
//! The store is not durable. A restart loses everything not written back to a
//! snapshot.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use hirelog_domain::{Application, ApplicationRepository, Status};
//! use hirelog_store::ApplicationStore;
//!
//! let store = ApplicationStore::new();
//! let date = Utc.with_ymd_and_hms(2025, 10, 3, 19, 2, 6).unwrap();
//! store.insert(vec![Application::new(date, "Samsara", "Backend Engineer", Status::Pending)]).unwrap();
//! assert_eq!(store.count().unwrap(), 1);
//! ```

#![warn(missing_docs)]

pub mod export;
pub mod script;
pub mod snapshot;

use chrono::{DateTime, Utc};
use hirelog_domain::{
    Application, ApplicationFilter, ApplicationRepository, Email, Interview, RawEmailRecord,
    RepositoryErrorKind, ValidationError,
};
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info};

pub use export::{read_csv, write_csv, write_csv_to, CSV_HEADER};
pub use script::{decode_script_response, load_raw_records};
pub use snapshot::{load_snapshot, save_snapshot};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// An application in an insert batch is invalid; nothing was inserted
    #[error("Invalid application at position {index}: {source}")]
    ValidationFailed {
        /// Position of the offending application in the batch
        index: usize,
        /// Which check failed
        #[source]
        source: ValidationError,
    },

    /// No application has the requested identity
    #[error("Application not found for date {date} and company {company}")]
    NotFound {
        /// Requested date
        date: DateTime<Utc>,
        /// Requested company
        company: String,
    },

    /// File error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required CSV column is absent
    #[error("Missing CSV column: {0}")]
    MissingColumn(String),

    /// A timestamp could not be parsed
    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// Text that failed to parse
        value: String,
        /// Parser message
        reason: String,
    },

    /// The script response has an unexpected shape
    #[error("Invalid script response: {0}")]
    ScriptResponse(String),
}

/// In-memory implementation of ApplicationRepository
///
/// Readers share the lock; writers are exclusive. Identity lookups are a
/// linear scan over (date, company).
///
/// # Thread Safety
///
/// All methods take `&self`; wrap the store in an `Arc` to share it.
#[derive(Debug, Default)]
pub struct ApplicationStore {
    applications: RwLock<Vec<Application>>,
}

impl ApplicationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `applications` without validating them
    ///
    /// Used for seeding from files, which are trusted as written.
    pub fn seeded(applications: Vec<Application>) -> Self {
        Self {
            applications: RwLock::new(applications),
        }
    }

    /// Seed a store from a JSON snapshot; `None` gives an empty store
    pub fn from_snapshot(path: Option<&Path>) -> Result<Self, StoreError> {
        let Some(path) = path else {
            return Ok(Self::new());
        };

        let applications: Vec<Application> = load_snapshot(path)?.iter().map(Email::to_application).collect();
        info!(path = %path.display(), count = applications.len(), "Seeded application store");
        Ok(Self::seeded(applications))
    }

    /// Convert stored applications back to snapshot entries
    ///
    /// Email fields other than the sent time are empty and interviews are
    /// dropped; the snapshot format has no place for them.
    pub fn to_snapshot(&self) -> Vec<Email> {
        self.read()
            .iter()
            .map(|app| Email {
                company: app.company.clone(),
                status: app.status,
                position: app.position.clone(),
                record: RawEmailRecord::new(app.date, "", "", ""),
            })
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Application>> {
        self.applications.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Application>> {
        self.applications.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ApplicationRepository for ApplicationStore {
    type Error = StoreError;

    fn list(&self, filter: Option<&ApplicationFilter>) -> Result<Vec<Application>, Self::Error> {
        let applications = self.read();
        Ok(match filter {
            None => applications.clone(),
            Some(filter) => applications.iter().filter(|app| filter.matches(app)).cloned().collect(),
        })
    }

    fn insert(&self, applications: Vec<Application>) -> Result<(), Self::Error> {
        for (index, application) in applications.iter().enumerate() {
            application
                .validate()
                .map_err(|source| StoreError::ValidationFailed { index, source })?;
        }

        let count = applications.len();
        let mut stored = self.write();
        stored.extend(applications);
        debug!(inserted = count, total = stored.len(), "Inserted applications");
        Ok(())
    }

    fn set_interviews(
        &self,
        date: DateTime<Utc>,
        company: &str,
        interviews: Vec<Interview>,
    ) -> Result<Application, Self::Error> {
        let mut stored = self.write();
        let application = stored
            .iter_mut()
            .find(|app| app.is_identified_by(&date, company))
            .ok_or_else(|| StoreError::NotFound {
                date,
                company: company.to_string(),
            })?;

        application.interviews = interviews;
        Ok(application.clone())
    }

    fn count(&self) -> Result<usize, Self::Error> {
        Ok(self.read().len())
    }

    fn error_kind(error: &Self::Error) -> RepositoryErrorKind {
        match error {
            StoreError::ValidationFailed { .. } => RepositoryErrorKind::InvalidInput,
            StoreError::NotFound { .. } => RepositoryErrorKind::NotFound,
            _ => RepositoryErrorKind::Internal,
        }
    }
}
