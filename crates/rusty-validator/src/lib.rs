// File: rusty-validator/src/lib.rs
// Purpose: Main entry point for the rusty-validator library

//! # rusty-validator
//!
//! Declarative field validation for forms. Each field declares the rules it
//! wants as `name -> "arg1,arg2,message"` strings; the engine resolves those
//! names against an ordered rule registry, reports the first failure per field
//! through lifecycle hooks, and gates submission attempts.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rusty_validator::{Field, HtmlForm, InputField, SubmitEvent, Validator, ValidatorConfig};
//!
//! let password = Arc::new(InputField::new("password").with_rule("required", "Password is required"));
//! let confirm = Arc::new(
//!     InputField::new("confirm").with_rule("match", "selector,[name=password],Passwords differ"),
//! );
//!
//! let form = HtmlForm::new(vec![password.clone(), confirm.clone()]);
//! let validator = Validator::attach(Arc::new(form), ValidatorConfig::default()).unwrap();
//!
//! password.set_value("hunter22");
//! confirm.set_value("hunter22");
//! assert!(validator.attempt_submit(&SubmitEvent::default()));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod flash;
pub mod form;
pub mod hooks;
pub mod numeric;
pub mod outcome;
pub mod parser;
pub mod rules;
pub mod selector;
pub mod settings;
pub mod validator;

// Re-export main types
pub use config::{ValidatorConfig, ValidatorConfigBuilder};
pub use engine::Validator;
pub use error::{AttachError, ConfigError, RuleError};
pub use field::{Field, InputField};
pub use flash::{ImmediateScheduler, ManualScheduler, Scheduler};
#[cfg(feature = "tokio")]
pub use flash::TokioScheduler;
pub use form::{Form, HtmlForm};
pub use hooks::{Hooks, SubmitEvent};
pub use outcome::{FieldFault, FieldOutcome, FieldReport, FormReport, SubmitReport};
pub use parser::{ParseFn, RuleSpec};
pub use rules::{Predicate, Registry, RuleContext, RuleDefinition};
pub use settings::{FlashSettings, FormatSettings, ValidatorSettings};
pub use validator::validate_field;

/// Marker applied to errored fields unless configured otherwise
pub const DEFAULT_ERROR_MARKER: &str = "validator-error";
