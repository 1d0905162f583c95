//! Sender parsing

/// The address part of a sender, e.g. `no-reply@ashbyhq.com` for
/// `Zapier Hiring Team <no-reply@ashbyhq.com>`
///
/// A sender without angle brackets is returned trimmed.
pub fn sender_address(full_sender: &str) -> &str {
    let trimmed = full_sender.trim();
    match (trimmed.rfind('<'), trimmed.rfind('>')) {
        (Some(open), Some(close)) if open < close => trimmed[open + 1..close].trim(),
        _ => trimmed,
    }
}

/// Domain of a no-reply sender, or `None` if the address has none of `prefixes`
pub fn noreply_domain<S: AsRef<str>>(full_sender: &str, prefixes: &[S]) -> Option<String> {
    let address = sender_address(full_sender);
    let lowered = address.to_lowercase();

    prefixes.iter().find_map(|prefix| {
        let prefix = prefix.as_ref().to_lowercase();
        if lowered.starts_with(&prefix) {
            let domain = address.get(prefix.len()..)?.trim();
            (!domain.is_empty()).then(|| domain.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_NOREPLY_PREFIXES;

    #[test]
    fn test_sender_address() {
        assert_eq!(sender_address("no-reply@dropbox.com"), "no-reply@dropbox.com");
        assert_eq!(
            sender_address("Zapier Hiring Team <no-reply@ashbyhq.com>"),
            "no-reply@ashbyhq.com"
        );
        assert_eq!(sender_address("  jobs@acme.com "), "jobs@acme.com");
    }

    #[test]
    fn test_noreply_domain() {
        assert_eq!(
            noreply_domain("no-reply@dropbox.com", DEFAULT_NOREPLY_PREFIXES),
            Some("dropbox.com".to_string())
        );
        assert_eq!(
            noreply_domain("gh-no-reply@github.com", DEFAULT_NOREPLY_PREFIXES),
            Some("github.com".to_string())
        );
        assert_eq!(
            noreply_domain("Zapier Hiring Team <no-reply@ashbyhq.com>", DEFAULT_NOREPLY_PREFIXES),
            Some("ashbyhq.com".to_string())
        );
    }

    #[test]
    fn test_regular_sender_has_no_domain() {
        assert_eq!(noreply_domain("jobs@acme.com", DEFAULT_NOREPLY_PREFIXES), None);
        assert_eq!(noreply_domain("Acme <recruiting@acme.com>", DEFAULT_NOREPLY_PREFIXES), None);
        assert_eq!(noreply_domain("no-reply@", DEFAULT_NOREPLY_PREFIXES), None);
    }
}
