//! Company name resolution
//!
//! Strategies are tried in order of cost, and the first accepted answer wins:
//!
//! 1. Ask the model for a company in the subject line; accept it if it passes
//!    the [`CompanyFilter`].
//! 2. If the sender address starts with a no-reply prefix, take the rest of
//!    the address (a domain) as the company.
//! 3. Ask the model for a company in the full sender text and accept whatever
//!    it returns.

use crate::config::ClassifierConfig;
use crate::error::ExtractorError;
use crate::filter::CompanyFilter;
use crate::prompt::{company_tool, CompanyCandidate, MessageKind};
use crate::sender::noreply_domain;
use hirelog_domain::RawEmailRecord;
use hirelog_llm::{ExtractionClient, ToolSchema};
use tracing::debug;

/// Where a resolved company name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySource {
    /// Extracted from the subject line
    Subject,
    /// Taken from a no-reply sender's domain
    SenderDomain,
    /// Extracted from the full sender text
    SenderText,
}

/// A company name and the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCompany {
    /// Company name
    pub name: String,
    /// Producing strategy
    pub source: CompanySource,
}

impl ResolvedCompany {
    fn new(name: impl Into<String>, source: CompanySource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// Chains extraction strategies to find an email's company
#[derive(Debug, Clone)]
pub struct CompanyResolver {
    client: ExtractionClient,
    filter: CompanyFilter,
    noreply_prefixes: Vec<String>,
    tool: ToolSchema,
}

impl CompanyResolver {
    /// Create a resolver from explicit parts
    pub fn new(client: ExtractionClient, filter: CompanyFilter, noreply_prefixes: Vec<String>) -> Self {
        Self {
            client,
            filter,
            noreply_prefixes,
            tool: company_tool(),
        }
    }

    /// Create a resolver from configuration
    pub fn from_config(client: ExtractionClient, config: &ClassifierConfig) -> Result<Self, ExtractorError> {
        let filter = CompanyFilter::new(config.denylist())
            .map_err(|e| ExtractorError::Config(format!("invalid denylist: {}", e)))?;
        Ok(Self::new(client, filter, config.noreply_prefixes.clone()))
    }

    /// Whether `candidate` passes the validity filter
    pub fn is_valid(&self, candidate: &str) -> bool {
        self.filter.is_valid(candidate)
    }

    /// Ask the model for a company name in `text`
    ///
    /// # Errors
    ///
    /// [`ExtractorError::InvalidMessageType`] for [`MessageKind::Body`], which
    /// has no company instruction; otherwise any extraction error.
    pub async fn extract_company(&self, kind: MessageKind, text: &str) -> Result<String, ExtractorError> {
        let instruction = kind
            .company_instruction()
            .ok_or(ExtractorError::InvalidMessageType(kind))?;

        let candidate: CompanyCandidate = self.client.extract(instruction, text, &self.tool).await?;
        Ok(candidate.company_name.trim().to_string())
    }

    /// Resolve the company of `record`
    pub async fn resolve(&self, record: &RawEmailRecord) -> Result<ResolvedCompany, ExtractorError> {
        let candidate = self.extract_company(MessageKind::Subject, &record.subject).await?;
        if self.is_valid(&candidate) {
            return Ok(ResolvedCompany::new(candidate, CompanySource::Subject));
        }
        debug!(subject = %record.subject, candidate = %candidate, "Subject candidate rejected");

        if let Some(domain) = noreply_domain(&record.full_sender, &self.noreply_prefixes) {
            return Ok(ResolvedCompany::new(domain, CompanySource::SenderDomain));
        }

        let name = self.extract_company(MessageKind::Sender, &record.full_sender).await?;
        Ok(ResolvedCompany::new(name, CompanySource::SenderText))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::COMPANY_TOOL;
    use chrono::{TimeZone, Utc};
    use hirelog_llm::MockProvider;
    use std::sync::Arc;

    fn resolver(provider: MockProvider) -> CompanyResolver {
        let config = ClassifierConfig {
            applicant_names: vec!["Jane".to_string()],
            ..Default::default()
        };
        CompanyResolver::from_config(ExtractionClient::new(Arc::new(provider)), &config).unwrap()
    }

    fn record(subject: &str, sender: &str) -> RawEmailRecord {
        RawEmailRecord::new(Utc.with_ymd_and_hms(2025, 10, 3, 19, 2, 6).unwrap(), subject, sender, "")
    }

    fn company(name: &str) -> String {
        format!(r#"{{"company_name":"{}"}}"#, name)
    }

    #[tokio::test]
    async fn test_valid_subject_short_circuits() {
        let mut provider = MockProvider::default();
        provider.add_response(COMPANY_TOOL, "Thanks for applying to Stripe!", company("Stripe"));
        let resolver = resolver(provider.clone());

        let resolved = resolver
            .resolve(&record("Thanks for applying to Stripe!", "Acme <jobs@acme.com>"))
            .await
            .unwrap();

        assert_eq!(resolved, ResolvedCompany::new("Stripe", CompanySource::Subject));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_noreply_sender_after_rejected_subject() {
        let mut provider = MockProvider::default();
        provider.add_response(COMPANY_TOOL, "Thank you for applying", company("Thank you for applying"));
        let resolver = resolver(provider.clone());

        let resolved = resolver
            .resolve(&record("Thank you for applying", "no-reply@us.greenhouse-mail.io"))
            .await
            .unwrap();

        assert_eq!(resolved.name, "us.greenhouse-mail.io");
        assert_eq!(resolved.source, CompanySource::SenderDomain);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_sender_text_fallback_is_unfiltered() {
        let mut provider = MockProvider::default();
        provider.add_response(COMPANY_TOOL, "Hi Jane", company("Jane"));
        provider.add_response(COMPANY_TOOL, "Senior Recruiting <jobs@acme.com>", company("Senior Recruiting"));
        let resolver = resolver(provider.clone());

        let resolved = resolver
            .resolve(&record("Hi Jane", "Senior Recruiting <jobs@acme.com>"))
            .await
            .unwrap();

        assert_eq!(resolved.name, "Senior Recruiting");
        assert_eq!(resolved.source, CompanySource::SenderText);
        assert_eq!(provider.calls_for(COMPANY_TOOL), 2);
    }

    #[tokio::test]
    async fn test_empty_subject_candidate_falls_through() {
        let mut provider = MockProvider::default();
        provider.add_response(COMPANY_TOOL, "Update", company(""));
        let resolver = resolver(provider);

        let resolved = resolver.resolve(&record("Update", "no-reply@affinity.co")).await.unwrap();
        assert_eq!(resolved.name, "affinity.co");
    }

    #[tokio::test]
    async fn test_subject_error_propagates() {
        let mut provider = MockProvider::default();
        provider.add_error(COMPANY_TOOL, "Broken");
        let resolver = resolver(provider.clone());

        let result = resolver.resolve(&record("Broken", "no-reply@acme.com")).await;
        assert!(matches!(result, Err(ExtractorError::Llm(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_body_kind_is_rejected() {
        let provider = MockProvider::new(company("Acme"));
        let resolver = resolver(provider.clone());

        let result = resolver.extract_company(MessageKind::Body, "Dear applicant").await;
        assert!(matches!(result, Err(ExtractorError::InvalidMessageType(MessageKind::Body))));
        assert_eq!(provider.call_count(), 0);
    }
}
