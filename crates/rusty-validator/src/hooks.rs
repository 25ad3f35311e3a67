// File: rusty-validator/src/hooks.rs
// Purpose: Caller-supplied lifecycle callbacks

//! Hook contract.
//!
//! Per field, in order:
//! - `before(field)` gates the pass; `false` aborts it with nothing else called.
//! - on failure: marker set, `error(field, message)`, then `after(field, false)`.
//! - on success: marker cleared, `success(field)`, then `after(field, true)`.
//!
//! Per submission attempt, evaluated left to right with short-circuit:
//! `before_submit(event)`, then the aggregated field errors, then `is_error()`,
//! and only if all of those allow it, `submit(event)`.

use std::fmt;
use std::sync::Arc;

use crate::field::Field;

pub type FieldGate = Arc<dyn Fn(&dyn Field) -> bool + Send + Sync>;
pub type FormCheck = Arc<dyn Fn() -> bool + Send + Sync>;
pub type ErrorHook = Arc<dyn Fn(&dyn Field, &str) + Send + Sync>;
pub type SuccessHook = Arc<dyn Fn(&dyn Field) + Send + Sync>;
pub type AfterHook = Arc<dyn Fn(&dyn Field, bool) + Send + Sync>;
pub type SubmitGate = Arc<dyn Fn(&SubmitEvent) -> bool + Send + Sync>;

/// A submission attempt as delivered by the event layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    /// Name of the control that triggered submission, if known
    pub submitter: Option<String>,
}

impl SubmitEvent {
    pub fn from_submitter(submitter: impl Into<String>) -> Self {
        Self {
            submitter: Some(submitter.into()),
        }
    }
}

/// The seven lifecycle hooks
#[derive(Clone)]
pub struct Hooks {
    pub before: FieldGate,
    pub is_error: FormCheck,
    pub error: ErrorHook,
    pub success: SuccessHook,
    pub after: AfterHook,
    pub before_submit: SubmitGate,
    pub submit: SubmitGate,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            before: Arc::new(|_: &dyn Field| true),
            is_error: Arc::new(|| false),
            error: Arc::new(|_: &dyn Field, _: &str| {}),
            success: Arc::new(|_: &dyn Field| {}),
            after: Arc::new(|_: &dyn Field, _: bool| {}),
            before_submit: Arc::new(|_: &SubmitEvent| true),
            submit: Arc::new(|_: &SubmitEvent| true),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}
