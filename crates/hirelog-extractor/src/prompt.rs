//! Instructions and tool schemas sent to the model

use hirelog_domain::Status;
use hirelog_llm::ToolSchema;
use serde::Deserialize;
use serde_json::json;
use std::fmt;

/// Name of the company-only tool
pub const COMPANY_TOOL: &str = "extract_company_name";

/// Name of the status + title tool
pub const DETAILS_TOOL: &str = "extract_application_details";

const SUBJECT_INSTRUCTION: &str = "The text is the subject line of an email about a job application. \
Extract the name of the company the applicant applied to. Return only the company name, \
without job titles, greetings or other words from the subject.";

const SENDER_INSTRUCTION: &str = "The text is the sender of an email about a job application, \
as a display name and address. Extract the name of the company that sent it. \
Return only the company name.";

const DETAILS_INSTRUCTION: &str = "Analyze the email message and extract: 1) whether it is an \
acceptance ('accept'), a rejection ('reject') or a confirmation that the application was \
received ('pending'), 2) the job title or position name mentioned in the email, and 3) the \
company name.";

/// Which part of an email a piece of text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Subject line
    Subject,
    /// Sender display name and address
    Sender,
    /// Body text
    Body,
}

impl MessageKind {
    /// Instruction for extracting a company name from this kind of text
    ///
    /// Bodies are only analysed with the details tool, so they have none.
    pub fn company_instruction(&self) -> Option<&'static str> {
        match self {
            MessageKind::Subject => Some(SUBJECT_INSTRUCTION),
            MessageKind::Sender => Some(SENDER_INSTRUCTION),
            MessageKind::Body => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Subject => "subject",
            MessageKind::Sender => "sender",
            MessageKind::Body => "body",
        };
        f.write_str(name)
    }
}

/// Instruction for the status + title extraction
pub fn details_instruction() -> &'static str {
    DETAILS_INSTRUCTION
}

/// Tool returning only a company name
pub fn company_tool() -> ToolSchema {
    ToolSchema::new(
        COMPANY_TOOL,
        "Extracts the name of the company from text about a job application",
        json!({
            "type": "object",
            "properties": {
                "company_name": {
                    "type": "string",
                    "description": "The name of the company being applied to",
                },
            },
            "required": ["company_name"],
        }),
    )
}

/// Tool returning status, job title and company name
pub fn details_tool() -> ToolSchema {
    ToolSchema::new(
        DETAILS_TOOL,
        "Extracts the application status, job title, and company name from a job application email message",
        json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "description": "The status of the job application: 'accept', 'reject' or 'pending'",
                    "enum": ["accept", "reject", "pending"],
                },
                "job_title": {
                    "type": "string",
                    "description": "The job title or position name mentioned in the email",
                },
                "company_name": {
                    "type": "string",
                    "description": "The name of the company being applied to or mentioned in the email",
                },
            },
            "required": ["status", "job_title", "company_name"],
        }),
    )
}

/// Arguments of the company tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyCandidate {
    /// Extracted name
    #[serde(default)]
    pub company_name: String,
}

/// Arguments of the details tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationDetails {
    /// Status label, one of `accept`, `reject`, `pending`
    #[serde(default)]
    pub status: String,

    /// Job title
    #[serde(default)]
    pub job_title: String,

    /// Company name as mentioned in the body
    #[serde(default)]
    pub company_name: String,
}

/// Map the model's status label to a status; unknown labels give `None`
pub fn status_from_label(label: &str) -> Option<Status> {
    match label.trim().to_lowercase().as_str() {
        "pending" => Some(Status::Pending),
        "reject" => Some(Status::Reject),
        "accept" => Some(Status::Accepted),
        _ => None,
    }
}
