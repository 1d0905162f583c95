//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use hirelog_domain::{Email, RawEmailRecord};
use hirelog_extractor::{reconcile_statuses, ClassificationError, Classifier, ClassifierConfig};
use hirelog_llm::{LlmProvider, OpenAiProvider};
use hirelog_store::{load_raw_records, save_snapshot, write_csv};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Result of classifying one batch.
#[derive(Debug)]
pub struct ClassifyOutcome {
    /// Classified emails, in input order
    pub emails: Vec<Email>,

    /// Per-email failures, ordered by batch index
    pub errors: Vec<ClassificationError>,

    /// Confirmations marked `Applied` by reconciliation
    pub applied: usize,
}

/// Execute the classify command.
pub async fn execute_classify(args: ClassifyArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let records = load_raw_records(&args.input)?;
    if records.is_empty() {
        println!("{}", formatter.warning("No emails to classify."));
        return Ok(());
    }

    let mut classifier_config = config.classifier.clone().with_env_applicant();
    if let Some(concurrency) = args.concurrency {
        classifier_config.max_concurrency = concurrency;
    }
    classifier_config.validate().map_err(CliError::InvalidInput)?;

    let provider = OpenAiProvider::from_env(&config.llm.base_url, &config.llm.model, &config.llm.api_key_env)?;
    info!(model = provider.model(), emails = records.len(), "Classifying emails");

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; finishing emails already in flight");
            on_interrupt.cancel();
        }
    });

    let outcome = classify_records(Arc::new(provider), &classifier_config, records, &cancel).await?;

    println!("{}", formatter.format_emails(&outcome.emails)?);
    if !outcome.errors.is_empty() {
        eprintln!("{}", formatter.format_errors(&outcome.errors));
    }

    if !args.dry_run {
        let (json_path, csv_path) = write_outputs(&args.input, &outcome.emails)?;
        if !formatter.is_machine_readable() {
            println!(
                "{}",
                formatter.success(&format!("Wrote {} and {}", json_path.display(), csv_path.display()))
            );
        }
    }

    if !formatter.is_machine_readable() {
        println!(
            "{}",
            formatter.classification_summary(outcome.emails.len(), outcome.errors.len(), outcome.applied)
        );
    }
    Ok(())
}

/// Classify raw records and reconcile their statuses.
///
/// Per-email failures are returned alongside the partially classified batch.
pub async fn classify_records(
    provider: Arc<dyn LlmProvider>,
    config: &ClassifierConfig,
    records: Vec<RawEmailRecord>,
    cancel: &CancellationToken,
) -> Result<ClassifyOutcome> {
    let classifier = Classifier::new(provider, config)?;

    let mut emails = Email::from_records(records);
    let errors = classifier.classify(&mut emails, cancel).await;
    let applied = reconcile_statuses(&mut emails);

    Ok(ClassifyOutcome {
        emails,
        errors,
        applied,
    })
}

/// `<stem>_llm.json` and `<stem>_llm.csv` next to `input`.
pub fn output_paths(input: &Path) -> (PathBuf, PathBuf) {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "emails".to_string());
    (
        input.with_file_name(format!("{}_llm.json", stem)),
        input.with_file_name(format!("{}_llm.csv", stem)),
    )
}

/// Write the snapshot and CSV outputs for `input`.
pub fn write_outputs(input: &Path, emails: &[Email]) -> Result<(PathBuf, PathBuf)> {
    let (json_path, csv_path) = output_paths(input);
    save_snapshot(&json_path, emails)?;
    write_csv(&csv_path, emails)?;
    Ok((json_path, csv_path))
}
