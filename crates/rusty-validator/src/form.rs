// File: rusty-validator/src/form.rs
// Purpose: Form capability trait and an in-memory form implementation

use std::sync::{Arc, Mutex};

use crate::field::Field;

/// The container a validator attaches to
pub trait Form: Send + Sync {
    /// Whether the container is actually a form
    fn is_form(&self) -> bool {
        true
    }

    /// Contained fields in document order
    fn fields(&self) -> Vec<Arc<dyn Field>>;

    /// Scroll the document so that `top` is at the top of the viewport
    fn scroll_to(&self, top: f64);
}

/// In-memory form over a fixed list of fields.
///
/// Records scroll requests so callers can inspect them.
pub struct HtmlForm {
    fields: Vec<Arc<dyn Field>>,
    is_form: bool,
    scrolled_to: Mutex<Option<f64>>,
}

impl HtmlForm {
    pub fn new<F>(fields: impl IntoIterator<Item = Arc<F>>) -> Self
    where
        F: Field + 'static,
    {
        Self::from_fields(
            fields
                .into_iter()
                .map(|field| field as Arc<dyn Field>)
                .collect(),
        )
    }

    pub fn from_fields(fields: Vec<Arc<dyn Field>>) -> Self {
        Self {
            fields,
            is_form: true,
            scrolled_to: Mutex::new(None),
        }
    }

    /// A container that is not a form, e.g. a plain `<div>`
    pub fn container(fields: Vec<Arc<dyn Field>>) -> Self {
        Self {
            is_form: false,
            ..Self::from_fields(fields)
        }
    }

    /// Last position passed to `scroll_to`
    pub fn scrolled_to(&self) -> Option<f64> {
        *self
            .scrolled_to
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Form for HtmlForm {
    fn is_form(&self) -> bool {
        self.is_form
    }

    fn fields(&self) -> Vec<Arc<dyn Field>> {
        self.fields.clone()
    }

    fn scroll_to(&self, top: f64) {
        *self
            .scrolled_to
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(top);
    }
}
