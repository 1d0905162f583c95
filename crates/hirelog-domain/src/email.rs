//! Email module - raw mail records and the working record the classifier fills in

use crate::application::Application;
use crate::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An email as delivered by the mail retrieval collaborator
///
/// Immutable input to the classification pipeline. Field names follow the
/// snapshot format (`SentTime`, `Subject`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEmailRecord {
    /// When the email was sent
    #[serde(rename = "SentTime")]
    pub sent_time: DateTime<Utc>,

    /// Subject line
    #[serde(rename = "Subject")]
    pub subject: String,

    /// Sender as displayed, e.g. `Zapier Hiring Team <no-reply@ashbyhq.com>`
    #[serde(rename = "FullSender")]
    pub full_sender: String,

    /// Sender domain as reported by the mail collaborator
    #[serde(rename = "Domain")]
    pub domain: String,

    /// Plain-text body; may be empty
    #[serde(rename = "Msg", default)]
    pub message: String,
}

impl RawEmailRecord {
    /// Create a record without a body
    pub fn new(
        sent_time: DateTime<Utc>,
        subject: impl Into<String>,
        full_sender: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            sent_time,
            subject: subject.into(),
            full_sender: full_sender.into(),
            domain: domain.into(),
            message: String::new(),
        }
    }

    /// Attach a body to the record
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Whether the body carries any text worth sending to the model
    pub fn has_message(&self) -> bool {
        !self.message.trim().is_empty()
    }
}

/// Working record: a raw email plus the fields the classifier extracts
///
/// One `Email` is created per [`RawEmailRecord`]. The dispatcher mutates the
/// result fields in place; once a batch run completes the record is final.
/// This is also the element type of the JSON snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Resolved company name (empty until classified)
    #[serde(rename = "Company", default)]
    pub company: String,

    /// Application status
    #[serde(rename = "Status", default)]
    pub status: Status,

    /// Job title (empty until classified)
    #[serde(rename = "Position", default)]
    pub position: String,

    /// The underlying raw record
    #[serde(rename = "Email")]
    pub record: RawEmailRecord,
}

impl Email {
    /// Wrap a raw record with empty classification fields
    pub fn new(record: RawEmailRecord) -> Self {
        Self {
            company: String::new(),
            status: Status::Pending,
            position: String::new(),
            record,
        }
    }

    /// Wrap a batch of raw records
    pub fn from_records(records: Vec<RawEmailRecord>) -> Vec<Self> {
        records.into_iter().map(Self::new).collect()
    }

    /// Derive the long-term application record
    ///
    /// The application date is the email's sent time; interviews start empty.
    pub fn to_application(&self) -> Application {
        Application {
            date: self.record.sent_time,
            company: self.company.clone(),
            position: self.position.clone(),
            status: self.status,
            interviews: Vec::new(),
        }
    }
}

impl From<RawEmailRecord> for Email {
    fn from(record: RawEmailRecord) -> Self {
        Self::new(record)
    }
}
