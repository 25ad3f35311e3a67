// File: rusty-validator/src/validator.rs
// Purpose: Validate a single field against the configured rule registry

//! Field validation.
//!
//! One pass over one field:
//! 1. `before(field)`; `false` aborts with no state change.
//! 2. A declared `required` rule is checked first, even on an empty value.
//! 3. Every other declared rule runs in registry order, skipping empty values
//!    except for `match`. The first failure wins.
//! 4. No failure clears the error marker and reports success.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::error::RuleError;
use crate::field::Field;
use crate::outcome::FieldOutcome;
use crate::rules::{RuleContext, RuleDefinition};

/// Rule checked before all others
pub const REQUIRED_RULE: &str = "required";

/// The one rule that still runs when the value is empty
pub const MATCH_RULE: &str = "match";

/// Run one validation pass over `field`.
///
/// `fields` are the form's fields, used to resolve selector arguments. A rule
/// fault is returned as `Err` before the marker or any post-validation hook
/// is touched.
pub fn validate_field(
    field: &dyn Field,
    fields: &[Arc<dyn Field>],
    config: &ValidatorConfig,
) -> Result<FieldOutcome, RuleError> {
    let hooks = config.hooks();

    if !(hooks.before)(field) {
        trace!(field = field.name(), "Validation skipped by before hook");
        return Ok(FieldOutcome::Skipped);
    }

    let ctx = RuleContext::new(field, fields);
    let value = field.value();

    if let Some(raw) = field.rule(REQUIRED_RULE) {
        if let Some(rule) = config.registry().get(REQUIRED_RULE) {
            let passed = match rule {
                RuleDefinition::Predicate(predicate) => predicate(&ctx, &[])?,
                RuleDefinition::Pattern(regex) => regex.is_match(&value),
            };
            if !passed {
                return Ok(fail(field, config, REQUIRED_RULE, raw));
            }
        }
    }

    for (name, rule) in config.registry().iter() {
        let Some(raw) = field.rule(name) else {
            continue;
        };

        if value.is_empty() && name != MATCH_RULE {
            continue;
        }

        trace!(field = field.name(), rule = name, "Evaluating rule");

        let failure = match rule {
            RuleDefinition::Predicate(predicate) => {
                let spec = config.parse(&raw);
                if predicate(&ctx, &spec.args)? {
                    None
                } else {
                    Some(spec.message)
                }
            }
            // Patterns carry no argument syntax; the whole declaration is the message
            RuleDefinition::Pattern(regex) => (!regex.is_match(&value)).then_some(raw),
        };

        if let Some(message) = failure {
            return Ok(fail(field, config, name, message));
        }
    }

    field.set_marker(config.error_marker(), false);
    (hooks.success)(field);
    (hooks.after)(field, true);

    debug!(field = field.name(), "Field passed");
    Ok(FieldOutcome::Passed)
}

fn fail(field: &dyn Field, config: &ValidatorConfig, rule: &str, message: String) -> FieldOutcome {
    let hooks = config.hooks();

    field.set_marker(config.error_marker(), true);
    (hooks.error)(field, &message);
    (hooks.after)(field, false);

    debug!(field = field.name(), rule, message = %message, "Field failed");
    FieldOutcome::Failed {
        rule: rule.to_string(),
        message,
    }
}
