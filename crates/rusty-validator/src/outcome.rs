// File: rusty-validator/src/outcome.rs
// Purpose: Per-field outcomes and form-level reports

use std::collections::HashMap;

use serde::Serialize;

/// Result of one validation pass over one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FieldOutcome {
    /// The `before` hook declined the pass; nothing changed
    Skipped,
    Passed,
    Failed { rule: String, message: String },
}

impl FieldOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FieldOutcome::Failed { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FieldOutcome::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub field: String,
    #[serde(flatten)]
    pub outcome: FieldOutcome,
}

/// A rule fault that aborted one field's pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFault {
    pub field: String,
    pub message: String,
}

/// Outcome of validating every field once
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub fields: Vec<FieldReport>,
    pub faults: Vec<FieldFault>,
}

impl FormReport {
    /// Whether any field failed in this pass
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|report| report.outcome.is_failed())
    }

    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }

    /// First failing field in field order, with its message
    pub fn first_error(&self) -> Option<(&str, &str)> {
        self.fields.iter().find_map(|report| {
            report
                .outcome
                .message()
                .map(|message| (report.field.as_str(), message))
        })
    }

    /// Failure message per failing field
    pub fn errors(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .filter_map(|report| {
                report
                    .outcome
                    .message()
                    .map(|message| (report.field.clone(), message.to_string()))
            })
            .collect()
    }

    pub fn outcome(&self, field: &str) -> Option<&FieldOutcome> {
        self.fields
            .iter()
            .find(|report| report.field == field)
            .map(|report| &report.outcome)
    }
}

/// Outcome of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitReport {
    pub report: FormReport,
    /// Fields carrying the error marker after the pass, in field order
    pub errored: Vec<String>,
    /// `before_submit && no errored fields && no faults && !is_error`
    pub decision: bool,
    /// `decision && submit(event)`; false means do not submit
    pub proceed: bool,
}
