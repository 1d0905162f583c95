//! Hirelog Domain Layer
//!
//! This crate contains the data model shared by every other Hirelog crate.
//! It only depends on `chrono` for timestamps and `serde` for the snapshot
//! encoding; everything infrastructural lives elsewhere.
//!
//! ## Key Concepts
//!
//! - **RawEmailRecord**: an immutable email as delivered by the mail collaborator
//! - **Email**: the working record the classifier annotates in place
//! - **Application**: the unit stored long-term, identified by (date, company)
//! - **Interview**: a scheduled interview attached to an application
//! - **Status**: the outcome of an application (pending, rejected, accepted, ...)
//!
//! ## Architecture
//!
//! ```text
//! RawEmailRecord → Email (classified) → Application → ApplicationRepository
//! ```
//!
//! Trait definitions for storage live in [`traits`]; the in-memory
//! implementation lives in `hirelog-store`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod email;
pub mod status;
pub mod traits;

// Re-exports for convenience
pub use application::{Application, Interview, InterviewType, ValidationError};
pub use email::{Email, RawEmailRecord};
pub use status::Status;
pub use traits::{ApplicationFilter, ApplicationRepository, RepositoryErrorKind};
