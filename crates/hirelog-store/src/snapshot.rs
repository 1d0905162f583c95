//! JSON snapshot of classified emails
//!
//! The snapshot is an array of `{Company, Status, Position, Email: {SentTime,
//! Subject, FullSender, Domain, Msg}}` objects. Older files lack `Position`
//! and `Msg`; both default to empty.

use crate::StoreError;
use hirelog_domain::Email;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a snapshot file
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<Email>, StoreError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let emails: Vec<Email> = serde_json::from_str(&data)?;
    info!(path = %path.display(), count = emails.len(), "Loaded snapshot");
    Ok(emails)
}

/// Write a pretty-printed snapshot file, replacing any existing one
pub fn save_snapshot(path: impl AsRef<Path>, emails: &[Email]) -> Result<(), StoreError> {
    let path = path.as_ref();
    let data = serde_json::to_string_pretty(emails)?;
    fs::write(path, data)?;
    info!(path = %path.display(), count = emails.len(), "Saved snapshot");
    Ok(())
}
