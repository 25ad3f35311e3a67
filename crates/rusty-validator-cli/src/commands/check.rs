use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use rusty_validator::{
    FieldOutcome, FormReport, ManualScheduler, SubmitEvent, SubmitReport, Validator, ValidatorConfig, ValidatorSettings,
};

use crate::fixture::FormFixture;
use crate::OutputFormat;

/// Validate a form fixture; returns whether it passed
pub fn execute(form: &Path, config: Option<&Path>, submit: bool, format: OutputFormat) -> Result<bool> {
    let settings = match config {
        Some(path) => ValidatorSettings::load(path)?,
        None => ValidatorSettings::default(),
    };

    let config = ValidatorConfig::builder()
        .settings(settings)
        .build()
        .context("Invalid validator settings")?;

    let form = FormFixture::load(form)?.into_form();
    let scheduler = Arc::new(ManualScheduler::new());
    let validator = Validator::attach(Arc::new(form), config)
        .context("Cannot attach validator")?
        .with_scheduler(scheduler.clone());

    tracing::info!(fields = validator.fields().len(), submit, "Checking form");

    if submit {
        let report = settle_submission(&validator, &scheduler);

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                print_report(&report.report);
                println!();
                if report.proceed {
                    println!("Submission: {}", "allowed".green().bold());
                } else {
                    println!("Submission: {}", "blocked".red().bold());
                }
            }
        }

        return Ok(report.proceed);
    }

    let report = validator.run_all_fields();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }

    Ok(!report.has_errors() && !report.has_faults())
}

/// Attempt a submission and settle the flash so markers are in their final state
fn settle_submission(validator: &Validator, scheduler: &ManualScheduler) -> SubmitReport {
    let report = validator.submit_report(&SubmitEvent::default());
    let toggles = scheduler.run_pending();
    tracing::debug!(toggles, "Flash settled");
    report
}

fn print_report(report: &FormReport) {
    for entry in &report.fields {
        match &entry.outcome {
            FieldOutcome::Passed => println!("{} {}", "✓".green(), entry.field),
            FieldOutcome::Skipped => println!("{} {} {}", "-".dimmed(), entry.field, "(skipped)".dimmed()),
            FieldOutcome::Failed { rule, message } => {
                println!("{} {}: {} {}", "✗".red(), entry.field, message, format!("[{}]", rule).dimmed())
            }
        }
    }

    for fault in &report.faults {
        println!("{} {}: {}", "!".yellow().bold(), fault.field, fault.message.yellow());
    }
}
