//! CSV export and import
//!
//! One row per email with columns [`CSV_HEADER`]. Timestamps use RFC 2822,
//! e.g. `Fri, 03 Oct 2025 19:02:06 +0000`. The body is not exported.

use crate::StoreError;
use chrono::{DateTime, Utc};
use csv::StringRecord;
use hirelog_domain::{Email, RawEmailRecord, Status};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Column names, in order
pub const CSV_HEADER: [&str; 7] = ["SentTime", "Subject", "FullSender", "Domain", "Company", "Position", "Status"];

/// Write emails as CSV to any writer
pub fn write_csv_to<W: Write>(writer: W, emails: &[Email]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;

    for email in emails {
        let sent_time = email.record.sent_time.to_rfc2822();
        writer.write_record([
            sent_time.as_str(),
            email.record.subject.as_str(),
            email.record.full_sender.as_str(),
            email.record.domain.as_str(),
            email.company.as_str(),
            email.position.as_str(),
            email.status.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write emails to a CSV file, replacing any existing one
pub fn write_csv(path: impl AsRef<Path>, emails: &[Email]) -> Result<(), StoreError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_csv_to(file, emails)?;
    info!(path = %path.display(), count = emails.len(), "Saved CSV export");
    Ok(())
}

/// Read a CSV file written by [`write_csv`]
///
/// Columns are located by header name, so their order does not matter.
/// `SentTime` is required; other missing columns read as empty.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<Email>, StoreError> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_string(), i))
        .collect();

    if !columns.contains_key("SentTime") {
        return Err(StoreError::MissingColumn("SentTime".to_string()));
    }

    let field = |record: &StringRecord, name: &str| -> String {
        columns
            .get(name)
            .and_then(|&i| record.get(i))
            .unwrap_or_default()
            .to_string()
    };

    let mut emails = Vec::new();
    for row in reader.records() {
        let row = row?;
        let sent_time = parse_rfc2822(&field(&row, "SentTime"))?;

        let record = RawEmailRecord::new(
            sent_time,
            field(&row, "Subject"),
            field(&row, "FullSender"),
            field(&row, "Domain"),
        );
        emails.push(Email {
            company: field(&row, "Company"),
            status: Status::parse(&field(&row, "Status")).unwrap_or_default(),
            position: field(&row, "Position"),
            record,
        });
    }
    Ok(emails)
}

// Also accepts a trailing `UTC` zone name, as written by RFC 1123 formatters.
fn parse_rfc2822(value: &str) -> Result<DateTime<Utc>, StoreError> {
    let value = value.trim();
    let normalized = match value.strip_suffix(" UTC") {
        Some(rest) => format!("{} +0000", rest),
        None => value.to_string(),
    };

    DateTime::parse_from_rfc2822(&normalized)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn email() -> Email {
        let mut email = Email::new(
            RawEmailRecord::new(
                Utc.with_ymd_and_hms(2025, 10, 3, 19, 2, 6).unwrap(),
                "Thank you for applying to Samsara, \"Backend\"",
                "Samsara <no-reply@us.greenhouse-mail.io>",
                "us.greenhouse-mail.io",
            )
            .with_message("not exported"),
        );
        email.company = "Samsara".to_string();
        email.position = "Backend Engineer, Data".to_string();
        email.status = Status::Reject;
        email
    }

    #[test]
    fn test_header_and_time_format() {
        let mut buffer = Vec::new();
        write_csv_to(&mut buffer, &[email()]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("SentTime,Subject,FullSender,Domain,Company,Position,Status")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Fri, "), "row was {}", row);
        assert!(row.contains("Oct 2025 19:02:06 +0000\""), "row was {}", row);
        assert!(row.ends_with(",Reject"));
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("applications.csv");

        write_csv(&path, &[email()]).unwrap();
        let emails = read_csv(&path).unwrap();

        let mut expected = email();
        expected.record.message = String::new();
        assert_eq!(emails, vec![expected]);
    }

    #[test]
    fn test_columns_by_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::write(
            &path,
            "Company,SentTime,Subject,FullSender,Domain\nSamsara,\"Fri, 03 Oct 2025 19:02:06 UTC\",Hi,a@b.c,b.c\n",
        )
        .unwrap();

        let emails = read_csv(&path).unwrap();
        assert_eq!(emails[0].company, "Samsara");
        assert_eq!(emails[0].status, Status::Pending);
        assert_eq!(emails[0].position, "");
        assert_eq!(emails[0].record.sent_time, Utc.with_ymd_and_hms(2025, 10, 3, 19, 2, 6).unwrap());
    }

    #[test]
    fn test_bad_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "SentTime,Company\nyesterday,Acme\n").unwrap();

        assert!(matches!(read_csv(&path), Err(StoreError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_missing_sent_time_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nodate.csv");
        std::fs::write(&path, "Company\nAcme\n").unwrap();

        assert!(matches!(read_csv(&path), Err(StoreError::MissingColumn(_))));
    }
}
