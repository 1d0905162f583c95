//! Classification dispatcher: bounded fan-out over a batch of emails

use crate::config::ClassifierConfig;
use crate::error::{ClassificationError, ExtractorError};
use crate::prompt::{details_instruction, details_tool, status_from_label, ApplicationDetails};
use crate::resolver::{CompanyResolver, CompanySource};
use hirelog_domain::{Email, RawEmailRecord, Status};
use hirelog_llm::{ExtractionClient, LlmProvider, ToolSchema};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Fills in company, status and position for a batch of emails
///
/// At most `max_concurrency` emails are in progress at once. Each email is
/// handled by its own task; results are written back by batch index once the
/// task finishes, so the batch keeps its order whatever the completion order.
#[derive(Debug, Clone)]
pub struct Classifier {
    worker: Worker,
    max_concurrency: usize,
}

#[derive(Debug, Clone)]
struct Worker {
    resolver: Arc<CompanyResolver>,
    client: ExtractionClient,
    tool: ToolSchema,
}

// Field updates produced by one task. `None` leaves the field as it was.
#[derive(Debug, Default)]
struct ItemOutcome {
    company: Option<String>,
    status: Option<Status>,
    position: Option<String>,
    error: Option<ExtractorError>,
}

impl ItemOutcome {
    fn failed(error: ExtractorError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    fn apply(self, email: &mut Email) -> Option<ExtractorError> {
        if let Some(company) = self.company {
            email.company = company;
        }
        if let Some(status) = self.status {
            email.status = status;
        }
        if let Some(position) = self.position {
            email.position = position;
        }
        self.error
    }
}

impl Worker {
    async fn run(&self, record: RawEmailRecord) -> ItemOutcome {
        let resolved = match self.resolver.resolve(&record).await {
            Ok(resolved) => resolved,
            Err(e) => return ItemOutcome::failed(e),
        };

        if !record.has_message() {
            return ItemOutcome {
                company: Some(resolved.name),
                status: Some(Status::Pending),
                ..Default::default()
            };
        }

        let details: ApplicationDetails = match self
            .client
            .extract(details_instruction(), &record.message, &self.tool)
            .await
        {
            Ok(details) => details,
            Err(e) => {
                return ItemOutcome {
                    company: Some(resolved.name),
                    error: Some(e.into()),
                    ..Default::default()
                }
            }
        };

        // A sender domain is usually the applicant-tracking host, so a
        // company named in the body is preferred when it is usable.
        let body_company = details.company_name.trim();
        let company = if resolved.source == CompanySource::SenderDomain && self.resolver.is_valid(body_company) {
            body_company.to_string()
        } else {
            resolved.name
        };

        ItemOutcome {
            company: Some(company),
            status: status_from_label(&details.status),
            position: Some(details.job_title.trim().to_string()),
            error: None,
        }
    }
}

impl Classifier {
    /// Create a classifier
    pub fn new(provider: Arc<dyn LlmProvider>, config: &ClassifierConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let client = ExtractionClient::new(provider).with_timeout(config.extraction_timeout());
        let resolver = CompanyResolver::from_config(client.clone(), config)?;

        Ok(Self {
            worker: Worker {
                resolver: Arc::new(resolver),
                client,
                tool: details_tool(),
            },
            max_concurrency: config.max_concurrency,
        })
    }

    /// Concurrency ceiling
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// The company resolver used for every email
    pub fn resolver(&self) -> &CompanyResolver {
        &self.worker.resolver
    }

    /// Classify `emails` in place and return the per-email failures
    ///
    /// A failure never stops the rest of the batch. If `cancel` fires while
    /// waiting for a slot, that email is reported as an admission failure and
    /// no further emails are started; emails already started run to completion.
    /// The returned errors are ordered by batch index.
    pub async fn classify(&self, emails: &mut [Email], cancel: &CancellationToken) -> Vec<ClassificationError> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();
        let mut errors = Vec::new();
        let mut dispatched = Vec::with_capacity(emails.len());

        for (index, email) in emails.iter().enumerate() {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err("batch cancelled".to_string()),
                permit = Arc::clone(&semaphore).acquire_owned() => permit.map_err(|e| e.to_string()),
            };

            let permit = match permit {
                Ok(permit) => permit,
                Err(reason) => {
                    warn!(index, reason = %reason, "Failed to acquire classification slot");
                    errors.push(ClassificationError {
                        index,
                        subject: email.record.subject.clone(),
                        source: ExtractorError::Admission(reason),
                    });
                    break;
                }
            };

            debug!(index, subject = %email.record.subject, "Classifying email");
            let worker = self.worker.clone();
            let record = email.record.clone();
            dispatched.push(index);
            tasks.spawn(async move {
                let _permit = permit;
                (index, worker.run(record).await)
            });
        }

        let mut finished = vec![false; emails.len()];
        let mut join_failure = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    finished[index] = true;
                    if let Some(source) = outcome.apply(&mut emails[index]) {
                        warn!(index, subject = %emails[index].record.subject, error = %source, "Email classification failed");
                        errors.push(ClassificationError {
                            index,
                            subject: emails[index].record.subject.clone(),
                            source,
                        });
                    }
                }
                Err(e) => {
                    error!(error = %e, "Classification task failed");
                    join_failure = Some(e.to_string());
                }
            }
        }

        for &index in &dispatched {
            if !finished[index] {
                let reason = join_failure.clone().unwrap_or_else(|| "task did not complete".to_string());
                errors.push(ClassificationError {
                    index,
                    subject: emails[index].record.subject.clone(),
                    source: ExtractorError::Worker(reason),
                });
            }
        }

        errors.sort_by_key(|e| e.index);
        info!(
            total = emails.len(),
            dispatched = dispatched.len(),
            failed = errors.len(),
            "Classification batch complete"
        );
        errors
    }
}
