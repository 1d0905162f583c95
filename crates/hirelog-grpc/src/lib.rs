#![warn(missing_docs)]

//! Hirelog gRPC Service Layer
//!
//! Exposes the application store over gRPC:
//! - ListApplications with company, status and date-range filters
//! - SetApplications for all-or-nothing bulk insertion
//! - SetInterviews to replace the interviews of one application
//! - HealthCheck for instance monitoring
//!
//! The service is generic over [`hirelog_domain::ApplicationRepository`], so
//! any store implementation can be served.

// Include generated protobuf code
pub mod proto {
    //! Generated protobuf types and service definitions
    tonic::include_proto!("hirelog.v1");
}

pub mod conversions;
pub mod server;
pub mod service;

pub use server::{start_server, ServerConfig, ServerError, DEFAULT_PORT};
pub use service::ApplicationsServiceImpl;
