//! Hirelog Classifier
//!
//! Turns raw job-application emails into classified records using an LLM.
//!
//! # Overview
//!
//! For every email in a batch the classifier resolves the company name
//! through a chain of strategies (subject, no-reply sender domain, sender
//! text) and, when the email has a body, extracts the application status and
//! job title from it.
//!
//! # Architecture
//!
//! ```text
//! RawEmailRecord → Classifier → CompanyResolver ─┐
//!                             → ExtractionClient ─┴→ Email (classified)
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use hirelog_domain::{Email, RawEmailRecord};
//! use hirelog_extractor::{Classifier, ClassifierConfig};
//! use hirelog_llm::MockProvider;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(records: Vec<RawEmailRecord>) -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(MockProvider::new(r#"{"company_name":"Stripe"}"#));
//! let classifier = Classifier::new(provider, &ClassifierConfig::default())?;
//!
//! let mut emails = Email::from_records(records);
//! let errors = classifier.classify(&mut emails, &CancellationToken::new()).await;
//!
//! println!("Classified: {}", emails.len());
//! println!("Failures: {}", errors.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod dispatcher;
mod error;
mod filter;
mod prompt;
mod reconcile;
mod resolver;
mod sender;


pub use config::{ClassifierConfig, DEFAULT_DENYLIST, DEFAULT_NOREPLY_PREFIXES};
pub use dispatcher::Classifier;
pub use error::{ClassificationError, ExtractorError};
pub use filter::CompanyFilter;
pub use prompt::{
    company_tool, details_tool, status_from_label, ApplicationDetails, CompanyCandidate, MessageKind,
    COMPANY_TOOL, DETAILS_TOOL,
};
pub use reconcile::reconcile_statuses;
pub use resolver::{CompanyResolver, CompanySource, ResolvedCompany};
pub use sender::{noreply_domain, sender_address};
