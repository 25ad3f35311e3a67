//! Integration tests for rusty-validator
//!
//! Cover the full lifecycle through the public API:
//! - Attachment and trigger events
//! - Rule ordering and short-circuit
//! - Selector indirection and `match` on empty values
//! - Submission gating, focus/scroll and the error flash

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::rstest;
use rusty_validator::*;

const MARKER: &str = "validator-error";

fn attach(fields: Vec<Arc<InputField>>) -> Validator {
    attach_with(fields, ValidatorConfig::default())
}

fn attach_with(fields: Vec<Arc<InputField>>, config: ValidatorConfig) -> Validator {
    Validator::attach(Arc::new(HtmlForm::new(fields)), config).unwrap()
}

fn failed(rule: &str, message: &str) -> FieldOutcome {
    FieldOutcome::Failed {
        rule: rule.to_string(),
        message: message.to_string(),
    }
}

// ============================================================================
// Per-field rules
// ============================================================================

#[test]
fn test_required_wins_over_pattern_on_empty_value() {
    let email = Arc::new(
        InputField::new("email")
            .with_rule("email", "Not an email")
            .with_rule("required", "Email is required"),
    );
    let validator = attach(vec![email.clone()]);

    assert_eq!(validator.validate(email.as_ref()).unwrap(), failed("required", "Email is required"));
}

#[test]
fn test_only_first_failing_function_rule_reports() {
    let errors = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = errors.clone();
    let config = ValidatorConfig::builder()
        .error(move |_, message| sink.lock().unwrap().push(message.to_string()))
        .build()
        .unwrap();

    // max precedes range in the registry
    let amount = Arc::new(
        InputField::new("amount")
            .with_value("500")
            .with_rule("range", "1,10,Out of range")
            .with_rule("max", "100,Too large"),
    );
    let validator = attach_with(vec![amount.clone()], config);

    assert_eq!(validator.validate(amount.as_ref()).unwrap(), failed("max", "Too large"));
    assert_eq!(*errors.lock().unwrap(), vec!["Too large"]);
}

#[test]
fn test_match_runs_on_empty_value() {
    let other = Arc::new(InputField::new("other").with_value("filled"));
    let confirm = Arc::new(InputField::new("confirm").with_rule("match", "selector,[name=other],Must match"));
    let validator = attach(vec![other.clone(), confirm.clone()]);

    assert_eq!(validator.validate(confirm.as_ref()).unwrap(), failed("match", "Must match"));

    other.set_value("");
    assert_eq!(validator.validate(confirm.as_ref()).unwrap(), FieldOutcome::Passed);
}

#[test]
fn test_selector_bound_read_at_evaluation_time() {
    let x = Arc::new(InputField::new("x").with_value("10"));
    let y = Arc::new(
        InputField::new("y")
            .with_value("7")
            .with_rule("min", "selector,[name=x],too small"),
    );
    let validator = attach(vec![x.clone(), y.clone()]);

    assert_eq!(validator.validate(y.as_ref()).unwrap(), failed("min", "too small"));

    x.set_value("5");
    assert_eq!(validator.validate(y.as_ref()).unwrap(), FieldOutcome::Passed);
}

#[rstest]
#[case("a,b", true)]
#[case("a", false)]
#[case("b", false)]
fn test_regex_rule_keeps_embedded_commas(#[case] value: &str, #[case] passes: bool) {
    let field = Arc::new(InputField::new("pair").with_value(value).with_rule("regex", "^a,b$,no match"));
    let validator = attach(vec![field.clone()]);

    let outcome = validator.validate(field.as_ref()).unwrap();
    if passes {
        assert_eq!(outcome, FieldOutcome::Passed);
    } else {
        assert_eq!(outcome, failed("regex", "no match"));
    }
}

#[test]
fn test_revalidation_is_idempotent() {
    let field = Arc::new(
        InputField::new("nick")
            .with_value("bad nick")
            .with_rule("nickname", "No spaces"),
    );
    let validator = attach(vec![field.clone()]);

    let outcomes: Vec<FieldOutcome> = (0..3).map(|_| validator.validate(field.as_ref()).unwrap()).collect();
    assert!(outcomes.iter().all(|outcome| *outcome == failed("nickname", "No spaces")));
    assert!(field.has_marker(MARKER));
}

#[test]
fn test_attributes_drive_validation() {
    let field = Arc::new(InputField::from_attributes([
        ("name", "site"),
        ("value", "ftp://example.com"),
        ("data-url", "Enter an http(s) address"),
    ]));
    let validator = attach(vec![field.clone()]);

    assert_eq!(
        validator.validate_named("site").unwrap().unwrap(),
        failed("url", "Enter an http(s) address")
    );
    assert!(validator.validate_named("missing").is_none());
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submission_blocked_by_one_failing_field() {
    let a = Arc::new(InputField::new("a").with_value("abc").with_rule("alpha", "Letters only"));
    let b = Arc::new(InputField::new("b").with_value("12x").with_rule("number", "Numbers only"));
    let c = Arc::new(InputField::new("c").with_value("XYZ").with_rule("upper", "Upper only"));
    let validator = attach(vec![a.clone(), b.clone(), c.clone()]);

    let report = validator.submit_report(&SubmitEvent::default());

    assert!(!report.proceed);
    assert_eq!(report.errored, vec!["b"]);
    assert!(!a.has_marker(MARKER));
    assert!(b.has_marker(MARKER));
    assert!(!c.has_marker(MARKER));
    assert_eq!(b.focus_count(), 1);
}

#[test]
fn test_end_to_end_match_and_required() {
    let val1 = Arc::new(InputField::new("val1").with_rule("required", "val1 is required"));
    let val2 = Arc::new(InputField::new("val2").with_rule("match", "selector,[name=val1],must match val1"));
    let form = Arc::new(HtmlForm::new(vec![val1.clone(), val2.clone()]));
    let validator = Validator::attach(form.clone(), ValidatorConfig::default()).unwrap();

    val1.set_value("x");
    val2.set_value("y");
    assert_eq!(
        validator.handle_event(val2.as_ref(), "keyup").unwrap(),
        Some(failed("match", "must match val1"))
    );

    val2.set_value("x");
    assert_eq!(validator.handle_event(val2.as_ref(), "blur").unwrap(), Some(FieldOutcome::Passed));

    val1.set_value("");
    let report = validator.submit_report(&SubmitEvent::default());
    assert!(!report.proceed);
    assert_eq!(report.report.first_error(), Some(("val1", "val1 is required")));
    assert_eq!(val1.focus_count(), 1);
    assert_eq!(val2.focus_count(), 0);
    assert_eq!(form.scrolled_to(), None);
}

#[test]
fn test_hidden_first_error_scrolls_instead_of_focus() {
    let hidden = Arc::new(
        InputField::new("token")
            .hidden()
            .with_offset_top(400.0)
            .with_rule("required", "Missing token"),
    );
    let visible = Arc::new(InputField::new("name").with_rule("required", "Missing name"));
    let form = Arc::new(HtmlForm::new(vec![hidden.clone(), visible.clone()]));
    let validator = Validator::attach(form.clone(), ValidatorConfig::default()).unwrap();

    assert!(!validator.attempt_submit(&SubmitEvent::default()));
    assert_eq!(form.scrolled_to(), Some(350.0));
    assert_eq!(hidden.focus_count(), 0);
    assert_eq!(visible.focus_count(), 0);
}

#[test]
fn test_submit_hook_order_and_short_circuit() {
    let calls = Arc::new(Mutex::new(Vec::<&'static str>::new()));
    let (c1, c2, c3) = (calls.clone(), calls.clone(), calls.clone());

    let config = ValidatorConfig::builder()
        .before_submit(move |_| {
            c1.lock().unwrap().push("before_submit");
            true
        })
        .is_error(move || {
            c2.lock().unwrap().push("is_error");
            false
        })
        .submit(move |event| {
            c3.lock().unwrap().push("submit");
            event.submitter.as_deref() == Some("save")
        })
        .build()
        .unwrap();

    let field = Arc::new(InputField::new("name").with_value("ok").with_rule("required", "Required"));
    let validator = attach_with(vec![field.clone()], config);

    assert!(validator.attempt_submit(&SubmitEvent::from_submitter("save")));
    assert!(!validator.attempt_submit(&SubmitEvent::from_submitter("draft")));
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["before_submit", "is_error", "submit", "before_submit", "is_error", "submit"]
    );

    calls.lock().unwrap().clear();
    field.set_value("");
    assert!(!validator.attempt_submit(&SubmitEvent::default()));
    assert_eq!(*calls.lock().unwrap(), vec!["before_submit"]);
}

#[rstest]
#[case(false, false, true)]
#[case(true, false, false)]
#[case(false, true, false)]
fn test_submit_gates(#[case] before_submit_blocks: bool, #[case] is_error: bool, #[case] proceeds: bool) {
    let submitted = Arc::new(Mutex::new(false));
    let flag = submitted.clone();

    let config = ValidatorConfig::builder()
        .before_submit(move |_| !before_submit_blocks)
        .is_error(move || is_error)
        .submit(move |_| {
            *flag.lock().unwrap() = true;
            true
        })
        .build()
        .unwrap();

    let field = Arc::new(InputField::new("name").with_value("fine"));
    let validator = attach_with(vec![field], config);

    let report = validator.submit_report(&SubmitEvent::default());
    assert_eq!(report.decision, proceeds);
    assert_eq!(report.proceed, proceeds);
    assert_eq!(*submitted.lock().unwrap(), proceeds);
}

#[test]
fn test_submit_revalidates_every_field() {
    let field = Arc::new(InputField::new("code").with_value("abc").with_rule("minlen", "5,Too short"));
    let validator = attach(vec![field.clone()]);

    // stale marker from an earlier pass must not survive
    field.set_value("abcdef");
    field.set_marker(MARKER, true);
    assert!(validator.attempt_submit(&SubmitEvent::default()));
    assert!(!field.has_marker(MARKER));
}

#[test]
fn test_fault_blocks_submission_but_other_fields_validate() {
    let broken = Arc::new(InputField::new("broken").with_value("x").with_rule("regex", "([,Bad"));
    let other = Arc::new(InputField::new("other").with_rule("required", "Other required"));
    let validator = attach(vec![broken.clone(), other.clone()]);

    let report = validator.submit_report(&SubmitEvent::default());
    assert_eq!(report.report.faults.len(), 1);
    assert_eq!(report.report.faults[0].field, "broken");
    assert_eq!(report.report.outcome("other"), Some(&failed("required", "Other required")));
    assert!(!broken.has_marker(MARKER));
    assert!(!report.proceed);
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_caller_rule_fault_is_reported_and_logged() {
    let config = ValidatorConfig::builder()
        .format(
            "quota",
            RuleDefinition::predicate(|ctx, args| {
                let limit: usize = args
                    .first()
                    .and_then(|arg| arg.parse().ok())
                    .ok_or_else(|| RuleError::custom("quota limit is not a number"))?;
                Ok(ctx.value().len() <= limit)
            }),
        )
        .build()
        .unwrap();

    let storage = Arc::new(InputField::new("storage").with_value("abc").with_rule("quota", "lots,Too big"));
    let name = Arc::new(InputField::new("name").with_value("neo").with_rule("required", "Name required"));
    let validator = attach_with(vec![storage.clone(), name.clone()], config);

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let report = tracing::subscriber::with_default(subscriber, || validator.submit_report(&SubmitEvent::default()));

    assert_eq!(
        report.report.faults,
        vec![FieldFault {
            field: "storage".to_string(),
            message: "quota limit is not a number".to_string(),
        }]
    );
    assert_eq!(report.report.outcome("name"), Some(&FieldOutcome::Passed));
    assert!(!storage.has_marker(MARKER));
    assert!(!report.proceed);

    let output = logs.contents();
    assert!(output.contains("Rule evaluation fault"), "{output}");
    assert!(output.contains("quota limit is not a number"), "{output}");
}

#[test]
fn test_fault_alone_blocks_submission() {
    let broken = Arc::new(InputField::new("broken").with_value("x").with_rule("match", "selector,a > b,Mismatch"));
    let validator = attach(vec![broken]);

    let report = validator.submit_report(&SubmitEvent::default());
    assert!(report.errored.is_empty());
    assert!(!report.decision);
}

// ============================================================================
// Error flash
// ============================================================================

#[test]
fn test_flash_toggles_errored_fields_and_ends_marked() {
    let scheduler = Arc::new(ManualScheduler::new());
    let bad = Arc::new(InputField::new("bad").with_value("?").with_rule("alnum", "Alphanumeric only"));
    let good = Arc::new(InputField::new("good").with_value("ok").with_rule("alnum", "Alphanumeric only"));
    let validator = attach(vec![bad.clone(), good.clone()]).with_scheduler(scheduler.clone());

    assert!(!validator.attempt_submit(&SubmitEvent::default()));
    assert_eq!(scheduler.pending(), 8);

    scheduler.run_until(Duration::from_millis(100));
    assert!(!bad.has_marker(MARKER));
    scheduler.run_until(Duration::from_millis(200));
    assert!(bad.has_marker(MARKER));

    scheduler.run_pending();
    assert!(bad.has_marker(MARKER));
    assert!(!good.has_marker(MARKER));
}

#[test]
fn test_flash_follows_configured_timeline() {
    let scheduler = Arc::new(ManualScheduler::new());
    let config = ValidatorConfig::builder()
        .flash(FlashSettings {
            toggles: 4,
            interval_ms: 50,
        })
        .build()
        .unwrap();
    let field = Arc::new(InputField::new("name").with_rule("required", "Required"));
    let validator = attach_with(vec![field.clone()], config).with_scheduler(scheduler.clone());

    validator.attempt_submit(&SubmitEvent::default());
    assert_eq!(
        scheduler.delays(),
        vec![
            Duration::from_millis(50),
            Duration::from_millis(100),
            Duration::from_millis(150),
            Duration::from_millis(200),
        ]
    );

    scheduler.run_pending();
    assert!(field.has_marker(MARKER));
}

#[test]
fn test_custom_marker() {
    let config = ValidatorConfig::builder().error_marker("is-invalid").build().unwrap();
    let field = Arc::new(InputField::new("name").with_rule("required", "Required"));
    let validator = attach_with(vec![field.clone()], config);

    assert!(!validator.attempt_submit(&SubmitEvent::default()));
    assert!(field.has_marker("is-invalid"));
    assert!(!field.has_marker(MARKER));
}
