// File: rusty-validator/src/engine.rs
// Purpose: Attach to a form, dispatch trigger events and gate submissions

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::ValidatorConfig;
use crate::error::{AttachError, RuleError};
use crate::field::Field;
use crate::flash::{self, ImmediateScheduler, Scheduler};
use crate::form::Form;
use crate::hooks::SubmitEvent;
use crate::outcome::{FieldFault, FieldOutcome, FieldReport, FormReport, SubmitReport};
use crate::validator::validate_field;

/// A validator attached to one form.
///
/// The field list is captured at attachment time, in document order.
pub struct Validator {
    form: Arc<dyn Form>,
    fields: Vec<Arc<dyn Field>>,
    config: ValidatorConfig,
    scheduler: Arc<dyn Scheduler>,
}

impl Validator {
    /// Attach to `form`.
    ///
    /// Refuses containers that are not forms and forms without fields.
    pub fn attach(form: Arc<dyn Form>, config: ValidatorConfig) -> Result<Self, AttachError> {
        if !form.is_form() {
            warn!("Refusing to attach validator: container is not a form");
            return Err(AttachError::NotAForm);
        }

        let fields = form.fields();
        if fields.is_empty() {
            warn!("Refusing to attach validator: form has no fields");
            return Err(AttachError::NoFields);
        }

        debug!(fields = fields.len(), "Validator attached");
        Ok(Self {
            form,
            fields,
            config,
            scheduler: Arc::new(ImmediateScheduler),
        })
    }

    /// Use `scheduler` for the error flash
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn fields(&self) -> &[Arc<dyn Field>] {
        &self.fields
    }

    /// First attached field named `name`
    pub fn field(&self, name: &str) -> Option<&Arc<dyn Field>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Validate one field
    pub fn validate(&self, field: &dyn Field) -> Result<FieldOutcome, RuleError> {
        validate_field(field, &self.fields, &self.config)
    }

    /// Validate the attached field named `name`, if there is one
    pub fn validate_named(&self, name: &str) -> Option<Result<FieldOutcome, RuleError>> {
        self.field(name).map(|field| self.validate(field.as_ref()))
    }

    /// Handle an interaction event on `field`.
    ///
    /// Only configured trigger events re-validate, and only that field;
    /// anything else returns `Ok(None)`.
    pub fn handle_event(&self, field: &dyn Field, event: &str) -> Result<Option<FieldOutcome>, RuleError> {
        if !self.config.listens_to(event) {
            return Ok(None);
        }

        debug!(field = field.name(), event, "Trigger event");
        self.validate(field).map(Some)
    }

    /// Validate every field once, in field order.
    ///
    /// A rule fault aborts only the faulting field; the remaining fields are
    /// still validated and the fault is recorded in the report.
    pub fn run_all_fields(&self) -> FormReport {
        let mut report = FormReport::default();

        for field in &self.fields {
            match self.validate(field.as_ref()) {
                Ok(outcome) => report.fields.push(FieldReport {
                    field: field.name().to_string(),
                    outcome,
                }),
                Err(err) => {
                    warn!(field = field.name(), error = %err, "Rule evaluation fault");
                    report.faults.push(FieldFault {
                        field: field.name().to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Handle a submission attempt; `false` means the form must not be submitted
    pub fn attempt_submit(&self, event: &SubmitEvent) -> bool {
        self.submit_report(event).proceed
    }

    /// Handle a submission attempt and report how the decision was reached
    pub fn submit_report(&self, event: &SubmitEvent) -> SubmitReport {
        let report = self.run_all_fields();
        let hooks = self.config.hooks();
        let marker = self.config.error_marker();

        let errored: Vec<Arc<dyn Field>> = self
            .fields
            .iter()
            .filter(|field| field.has_marker(marker))
            .cloned()
            .collect();
        let has_field_errors = !errored.is_empty();

        let decision = (hooks.before_submit)(event)
            && !has_field_errors
            && !report.has_faults()
            && !(hooks.is_error)();

        if has_field_errors {
            self.present_errors(&errored);
        }

        let proceed = decision && (hooks.submit)(event);

        info!(
            errored = errored.len(),
            faults = report.faults.len(),
            decision,
            proceed,
            "Submission attempt"
        );

        SubmitReport {
            report,
            errored: errored.iter().map(|field| field.name().to_string()).collect(),
            decision,
            proceed,
        }
    }

    /// Direct the user to the first errored field and flash the errored set
    fn present_errors(&self, errored: &[Arc<dyn Field>]) {
        if let Some(first) = errored.first() {
            if first.is_visible() {
                first.focus();
            } else {
                self.form
                    .scroll_to(first.offset_top() - self.config.scroll_offset());
            }
        }

        flash::schedule_flash(
            self.scheduler.as_ref(),
            errored,
            self.config.error_marker(),
            self.config.flash(),
        );
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("fields", &self.fields.iter().map(|field| field.name()).collect::<Vec<_>>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
