//! Type conversions between proto and domain types
//!
//! Status and interview type travel as small integers. Timestamps travel as
//! `google.protobuf.Timestamp`; a missing application date becomes the Unix
//! epoch so the store's own validation reports it.

use crate::proto;
use chrono::{DateTime, Utc};
use hirelog_domain::{Application, ApplicationFilter, Interview, InterviewType, Status};
use prost_types::Timestamp;

/// Error type for conversion failures
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    /// Status integer outside the known range
    #[error("Invalid status value: {0}")]
    InvalidStatus(i32),

    /// Interview type integer outside the known range
    #[error("Invalid interview type value: {0}")]
    InvalidInterviewType(i32),

    /// Timestamp that cannot be represented
    #[error("Invalid timestamp: {seconds}s {nanos}ns")]
    InvalidTimestamp {
        /// Seconds since the epoch
        seconds: i64,
        /// Sub-second nanoseconds
        nanos: i32,
    },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Convert a domain timestamp to its wire form
pub fn timestamp_to_proto(time: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: time.timestamp(),
        nanos: time.timestamp_subsec_nanos() as i32,
    }
}

/// Convert a wire timestamp to a domain timestamp
pub fn timestamp_from_proto(ts: &Timestamp) -> Result<DateTime<Utc>, ConversionError> {
    let invalid = || ConversionError::InvalidTimestamp {
        seconds: ts.seconds,
        nanos: ts.nanos,
    };
    let nanos = u32::try_from(ts.nanos).map_err(|_| invalid())?;
    DateTime::from_timestamp(ts.seconds, nanos).ok_or_else(invalid)
}

/// Convert a wire status to a domain status
pub fn status_from_proto(value: i32) -> Result<Status, ConversionError> {
    Status::from_i32(value).ok_or(ConversionError::InvalidStatus(value))
}

/// Convert a domain status to its wire value
pub fn status_to_proto(status: Status) -> proto::StatusType {
    match status {
        Status::Pending => proto::StatusType::Pending,
        Status::Reject => proto::StatusType::Reject,
        Status::Accepted => proto::StatusType::Accepted,
        Status::Applied => proto::StatusType::Applied,
    }
}

/// Convert a wire interview type to a domain interview type
pub fn interview_type_from_proto(value: i32) -> Result<InterviewType, ConversionError> {
    InterviewType::from_i32(value).ok_or(ConversionError::InvalidInterviewType(value))
}

/// Convert a domain interview type to its wire value
pub fn interview_type_to_proto(kind: InterviewType) -> proto::InterviewType {
    match kind {
        InterviewType::Unspecified => proto::InterviewType::Unspecified,
        InterviewType::RecruiterScreen => proto::InterviewType::RecruiterScreen,
        InterviewType::ManagerScreen => proto::InterviewType::ManagerScreen,
        InterviewType::TechCoding => proto::InterviewType::TechCoding,
        InterviewType::TechSystemDesign => proto::InterviewType::TechSystemDesign,
        InterviewType::TeamMatch => proto::InterviewType::TeamMatch,
    }
}

/// Convert proto Interview to domain Interview
///
/// An absent `duration_min` takes the default length.
pub fn interview_from_proto(interview: proto::Interview) -> Result<Interview, ConversionError> {
    let date_time = interview
        .date_time
        .as_ref()
        .ok_or(ConversionError::MissingField("date_time"))
        .and_then(timestamp_from_proto)?;

    Ok(Interview::new(
        date_time,
        interview_type_from_proto(interview.interview_type)?,
        interview.duration_min,
    ))
}

/// Convert domain Interview to proto Interview
pub fn interview_to_proto(interview: Interview) -> proto::Interview {
    proto::Interview {
        date_time: Some(timestamp_to_proto(interview.date_time)),
        interview_type: interview_type_to_proto(interview.interview_type) as i32,
        duration_min: Some(interview.duration_minutes),
    }
}

/// Convert proto Application to domain Application
pub fn application_from_proto(app: proto::Application) -> Result<Application, ConversionError> {
    let date = match app.date.as_ref() {
        Some(ts) => timestamp_from_proto(ts)?,
        None => DateTime::<Utc>::UNIX_EPOCH,
    };

    let interviews = app
        .interviews
        .into_iter()
        .map(interview_from_proto)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Application::new(date, app.company, app.position, status_from_proto(app.status)?)
        .with_interviews(interviews))
}

/// Convert domain Application to proto Application
pub fn application_to_proto(app: Application) -> proto::Application {
    proto::Application {
        date: Some(timestamp_to_proto(app.date)),
        company: app.company,
        position: app.position,
        status: status_to_proto(app.status) as i32,
        interviews: app.interviews.into_iter().map(interview_to_proto).collect(),
    }
}

/// Build a store filter from a list request
pub fn filter_from_proto(req: &proto::ListApplicationsRequest) -> Result<ApplicationFilter, ConversionError> {
    Ok(ApplicationFilter {
        company: req.company.clone(),
        status: req.status.map(status_from_proto).transpose()?,
        start_date: req.start_date.as_ref().map(timestamp_from_proto).transpose()?,
        end_date: req.end_date.as_ref().map(timestamp_from_proto).transpose()?,
    })
}
