//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use hirelog_domain::Email;
use hirelog_extractor::ClassificationError;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format classified emails.
    pub fn format_emails(&self, emails: &[Email]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(emails)?),
            OutputFormat::Table => Ok(self.format_emails_table(emails)),
            OutputFormat::Quiet => Ok(Self::format_emails_quiet(emails)),
        }
    }

    fn format_emails_table(&self, emails: &[Email]) -> String {
        if emails.is_empty() {
            return self.colorize("No emails found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Sent", "Company", "Status", "Position", "Subject"]);

        for email in emails {
            let sent = email.record.sent_time.format("%Y-%m-%d %H:%M").to_string();
            builder.push_record([
                sent.as_str(),
                email.company.as_str(),
                email.status.as_str(),
                email.position.as_str(),
                truncate(&email.record.subject, 60).as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    // One `company<TAB>status` line per email.
    fn format_emails_quiet(emails: &[Email]) -> String {
        emails
            .iter()
            .map(|e| format!("{}\t{}", e.company, e.status))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format per-email failures, one per line.
    pub fn format_errors(&self, errors: &[ClassificationError]) -> String {
        errors
            .iter()
            .map(|e| self.error(&e.to_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Summary line for a classification run.
    pub fn classification_summary(&self, total: usize, failed: usize, applied: usize) -> String {
        let message = format!(
            "Classified {} email(s), {} failed, {} confirmation(s) marked Applied",
            total, failed, applied
        );
        if failed == 0 {
            self.success(&message)
        } else {
            self.warning(&message)
        }
    }

    /// Whether output is machine-readable (JSON or quiet).
    pub fn is_machine_readable(&self) -> bool {
        !matches!(self.format, OutputFormat::Table)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}
