//! gRPC service implementation
//!
//! Implements the Applications trait generated from proto definitions on top
//! of any [`ApplicationRepository`].

use std::sync::Arc;
use std::time::Instant;

use hirelog_domain::{ApplicationRepository, RepositoryErrorKind};
use tonic::{Request, Response, Status};
use tracing::{debug, info, warn};

use crate::conversions::{
    application_from_proto, application_to_proto, filter_from_proto, interview_from_proto,
    timestamp_from_proto, ConversionError,
};
use crate::proto::applications_server::Applications;
use crate::proto::{
    health_check_response, ApplicationsResponse, HealthCheckRequest, HealthCheckResponse,
    ListApplicationsRequest, SetApplicationsRequest, SetInterviewsRequest, SetInterviewsResponse,
};

/// Implementation of the Applications service
pub struct ApplicationsServiceImpl<R: ApplicationRepository> {
    repository: Arc<R>,
    start_time: Instant,
}

impl<R: ApplicationRepository> ApplicationsServiceImpl<R> {
    /// Create a new service instance
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            start_time: Instant::now(),
        }
    }
}

fn invalid_argument(error: ConversionError) -> Status {
    Status::invalid_argument(error.to_string())
}

fn repository_status<R: ApplicationRepository>(error: R::Error) -> Status {
    match R::error_kind(&error) {
        RepositoryErrorKind::InvalidInput => Status::invalid_argument(error.to_string()),
        RepositoryErrorKind::NotFound => Status::not_found(error.to_string()),
        RepositoryErrorKind::Internal => {
            warn!(error = %error, "Repository failure");
            Status::internal(error.to_string())
        }
    }
}

#[tonic::async_trait]
impl<R> Applications for ApplicationsServiceImpl<R>
where
    R: ApplicationRepository + Send + Sync + 'static,
{
    async fn list_applications(
        &self,
        request: Request<ListApplicationsRequest>,
    ) -> Result<Response<ApplicationsResponse>, Status> {
        let req = request.into_inner();
        let filter = filter_from_proto(&req).map_err(invalid_argument)?;

        let applications = if filter.is_empty() {
            self.repository.list(None)
        } else {
            self.repository.list(Some(&filter))
        }
        .map_err(repository_status::<R>)?;

        debug!(count = applications.len(), "Listed applications");
        Ok(Response::new(ApplicationsResponse {
            applications: applications.into_iter().map(application_to_proto).collect(),
        }))
    }

    async fn set_applications(
        &self,
        request: Request<SetApplicationsRequest>,
    ) -> Result<Response<ApplicationsResponse>, Status> {
        let req = request.into_inner();
        let applications = req
            .applications
            .into_iter()
            .map(application_from_proto)
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid_argument)?;

        let count = applications.len();
        self.repository
            .insert(applications.clone())
            .map_err(repository_status::<R>)?;

        info!(count, "Stored applications");
        Ok(Response::new(ApplicationsResponse {
            applications: applications.into_iter().map(application_to_proto).collect(),
        }))
    }

    async fn set_interviews(
        &self,
        request: Request<SetInterviewsRequest>,
    ) -> Result<Response<SetInterviewsResponse>, Status> {
        let req = request.into_inner();
        let date = req
            .date
            .as_ref()
            .ok_or(ConversionError::MissingField("date"))
            .and_then(timestamp_from_proto)
            .map_err(invalid_argument)?;

        let interviews = req
            .interviews
            .into_iter()
            .map(interview_from_proto)
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid_argument)?;

        let application = self
            .repository
            .set_interviews(date, &req.company, interviews)
            .map_err(repository_status::<R>)?;

        info!(
            company = %application.company,
            interviews = application.interviews.len(),
            "Replaced interviews"
        );
        Ok(Response::new(SetInterviewsResponse {
            application: Some(application_to_proto(application)),
        }))
    }

    async fn health_check(
        &self,
        _request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let (status, application_count) = match self.repository.count() {
            Ok(count) => (health_check_response::Status::Healthy, count as u64),
            Err(error) => {
                warn!(error = %error, "Health check could not count applications");
                (health_check_response::Status::Degraded, 0)
            }
        };

        Ok(Response::new(HealthCheckResponse {
            status: status as i32,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            application_count,
        }))
    }
}
