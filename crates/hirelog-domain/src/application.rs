//! Application module - the long-term record and its interviews

use crate::status::Status;
use chrono::{DateTime, Utc};
use std::fmt;

/// Interview length used when the source does not specify one
pub const DEFAULT_INTERVIEW_MINUTES: u32 = 15;

/// Kind of interview round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterviewType {
    /// Not specified by the caller
    #[default]
    Unspecified = 0,

    /// First call with a recruiter
    RecruiterScreen = 1,

    /// Call with the hiring manager
    ManagerScreen = 2,

    /// Coding round
    TechCoding = 3,

    /// System design round
    TechSystemDesign = 4,

    /// Team matching conversation
    TeamMatch = 5,
}

impl InterviewType {
    /// Get the interview type name
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Unspecified => "Unspecified",
            InterviewType::RecruiterScreen => "RecruiterScreen",
            InterviewType::ManagerScreen => "ManagerScreen",
            InterviewType::TechCoding => "TechCoding",
            InterviewType::TechSystemDesign => "TechSystemDesign",
            InterviewType::TeamMatch => "TeamMatch",
        }
    }

    /// Parse an interview type from its name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Unspecified" => Some(InterviewType::Unspecified),
            "RecruiterScreen" => Some(InterviewType::RecruiterScreen),
            "ManagerScreen" => Some(InterviewType::ManagerScreen),
            "TechCoding" => Some(InterviewType::TechCoding),
            "TechSystemDesign" => Some(InterviewType::TechSystemDesign),
            "TeamMatch" => Some(InterviewType::TeamMatch),
            _ => None,
        }
    }

    /// Integer value used on the wire
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Build an interview type from its wire value
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(InterviewType::Unspecified),
            1 => Some(InterviewType::RecruiterScreen),
            2 => Some(InterviewType::ManagerScreen),
            3 => Some(InterviewType::TechCoding),
            4 => Some(InterviewType::TechSystemDesign),
            5 => Some(InterviewType::TeamMatch),
            _ => None,
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InterviewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid interview type: {}", s))
    }
}

/// A scheduled interview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interview {
    /// Start of the interview
    pub date_time: DateTime<Utc>,

    /// Kind of round
    pub interview_type: InterviewType,

    /// Length in minutes
    pub duration_minutes: u32,
}

impl Interview {
    /// Create an interview
    ///
    /// `duration_minutes` of `None` means the source did not say, and the
    /// [`DEFAULT_INTERVIEW_MINUTES`] default applies. `Some(0)` is kept as-is.
    pub fn new(
        date_time: DateTime<Utc>,
        interview_type: InterviewType,
        duration_minutes: Option<u32>,
    ) -> Self {
        Self {
            date_time,
            interview_type,
            duration_minutes: duration_minutes.unwrap_or(DEFAULT_INTERVIEW_MINUTES),
        }
    }
}

/// Reasons an application is refused by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date is unset (the Unix epoch, i.e. the wire's zero timestamp)
    MissingDate,

    /// Company name is empty
    MissingCompany,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingDate => f.write_str("invalid date"),
            ValidationError::MissingCompany => f.write_str("invalid company name"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A job application, identified by (date, company)
///
/// The identity is not a stored index: lookups compare both fields exactly,
/// so `date` must match to the granularity recorded at ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// When the application was recorded (the confirmation email's sent time)
    pub date: DateTime<Utc>,

    /// Company name
    pub company: String,

    /// Job title
    pub position: String,

    /// Current status
    pub status: Status,

    /// Interviews in caller order
    pub interviews: Vec<Interview>,
}

impl Application {
    /// Create an application without interviews
    pub fn new(
        date: DateTime<Utc>,
        company: impl Into<String>,
        position: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            date,
            company: company.into(),
            position: position.into(),
            status,
            interviews: Vec::new(),
        }
    }

    /// Attach interviews
    pub fn with_interviews(mut self, interviews: Vec<Interview>) -> Self {
        self.interviews = interviews;
        self
    }

    /// Check the fields the store requires
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.date == DateTime::<Utc>::UNIX_EPOCH {
            return Err(ValidationError::MissingDate);
        }
        if self.company.is_empty() {
            return Err(ValidationError::MissingCompany);
        }
        Ok(())
    }

    /// Whether this application has the given identity
    pub fn is_identified_by(&self, date: &DateTime<Utc>, company: &str) -> bool {
        self.date == *date && self.company == company
    }
}
