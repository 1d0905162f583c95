//! Validity filter for company-name candidates

use regex::Regex;

/// Rejects candidates that contain a denylisted word or phrase
///
/// Matching is case-insensitive and whole-word, so `"infra"` rejects
/// `"Infra Team"` but not `"Infrastructure Co"`.
#[derive(Debug, Clone)]
pub struct CompanyFilter {
    pattern: Option<Regex>,
}

impl CompanyFilter {
    /// Build a filter from denylist terms; blank terms are ignored
    pub fn new<I, S>(terms: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = terms
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .map(|term| regex::escape(&term))
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|")))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Whether `candidate` can be accepted as a company name
    pub fn is_valid(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return false;
        }
        match &self.pattern {
            Some(pattern) => !pattern.is_match(&candidate.to_lowercase()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;

    fn filter() -> CompanyFilter {
        let config = ClassifierConfig {
            applicant_names: vec!["Jane".to_string(), "Doe".to_string()],
            ..Default::default()
        };
        CompanyFilter::new(config.denylist()).unwrap()
    }

    #[test]
    fn test_generic_candidates_are_rejected() {
        let filter = filter();
        let candidates = [
            "Jane",
            "Jane Doe",
            "Senior Data Engineer, Core Experience",
            "Senior Go Backend Engineer",
            "Senior Software Development Engineer - ML Platform",
            "Senior Software Engineer (Full Stack, Backend-leaning)",
            "Senior Software Engineer (golang) - Poker",
            "Senior Software Engineer (Kubernetes), Systems",
            "Senior Software Engineer II - Observability",
            "Senior Software Engineer II- Developer Tooling Experience",
            "Senior Software Engineer Python (Django)- Vancouver",
            "Senior Software Engineer, Data Pipelines",
            "Senior Software Engineer, Front-End",
            "Software Engineer – Developer Workflows & Infrastructure Automation",
            "Sr. Software Engineer",
            "Thank you for applying",
            "Thank You For Applying!",
            "Thank You for Your Application",
            "Thank you for your application!",
            "Thank you for your interest!",
            "Thanks for applying, Jane!",
        ];

        for candidate in candidates {
            assert!(!filter.is_valid(candidate), "{} should be rejected", candidate);
        }
    }

    #[test]
    fn test_company_names_are_accepted() {
        let filter = filter();
        for candidate in ["Lyft", "Zapier", "Affinity", "Stripe", "Infrastructure Co", "Janestreet"] {
            assert!(filter.is_valid(candidate), "{} should be accepted", candidate);
        }
    }

    #[test]
    fn test_empty_candidate_is_invalid() {
        assert!(!filter().is_valid(""));
        assert!(!filter().is_valid("   "));
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let filter = CompanyFilter::new(["", "  "]).unwrap();
        assert!(filter.is_valid("Anything"));

        let filter = CompanyFilter::new(["", "acme"]).unwrap();
        assert!(!filter.is_valid("ACME"));
        assert!(filter.is_valid("Stripe"));
    }

    #[test]
    fn test_terms_are_escaped() {
        let filter = CompanyFilter::new(["c++"]).unwrap();
        assert!(filter.is_valid("ccc"));
    }
}
