// File: rusty-validator/src/rules/functions.rs
// Purpose: Built-in function rules

//! Function rules receive the arguments parsed from the declaration, e.g.
//! `data-length="3,20,Between 3 and 20 characters"` calls `length` with
//! `["3", "20"]`. Bounds are coerced permissively; anything that does not
//! read as a number makes the rule fail rather than fault.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use super::{Predicate, RuleContext};
use crate::error::RuleError;
use crate::numeric::{at_least, at_most, parse_float, parse_int, within};

/// Built-in function rules in catalogue order
pub fn catalogue() -> Vec<(&'static str, Predicate)> {
    vec![
        ("required", Arc::new(required) as Predicate),
        ("regex", Arc::new(pattern) as Predicate),
        ("max", Arc::new(max) as Predicate),
        ("min", Arc::new(min) as Predicate),
        ("range", Arc::new(range) as Predicate),
        ("match", Arc::new(equals) as Predicate),
        ("minlen", Arc::new(minlen) as Predicate),
        ("maxlen", Arc::new(maxlen) as Predicate),
        ("length", Arc::new(length) as Predicate),
    ]
}

fn arg(args: &[String], position: usize) -> Option<&str> {
    args.get(position).map(String::as_str)
}

fn numeric_arg(args: &[String], position: usize) -> f64 {
    arg(args, position).map(parse_float).unwrap_or(f64::NAN)
}

fn length_arg(args: &[String], position: usize) -> f64 {
    arg(args, position).map(parse_int).unwrap_or(f64::NAN)
}

fn trimmed_len(ctx: &RuleContext<'_>) -> f64 {
    ctx.value().trim().chars().count() as f64
}

/// Trimmed value is not empty
pub fn required(ctx: &RuleContext<'_>, _args: &[String]) -> Result<bool, RuleError> {
    Ok(!ctx.value().trim().is_empty())
}

/// Value matches the pattern spelled by the arguments.
///
/// Arguments are re-joined with commas first, so `"^a,b$,message"` tests
/// `^a,b$` rather than `^a`.
pub fn pattern(ctx: &RuleContext<'_>, args: &[String]) -> Result<bool, RuleError> {
    let pattern = compile_literal(&args.join(","))?;
    Ok(pattern.is_match(&ctx.value()))
}

/// Value is at most the bound, or at most another field's value
pub fn max(ctx: &RuleContext<'_>, args: &[String]) -> Result<bool, RuleError> {
    let bound = ctx.resolve(arg(args, 0), arg(args, 1))?;
    Ok(bound.is_some_and(|bound| at_most(parse_float(&ctx.value()), parse_float(&bound))))
}

/// Value is at least the bound, or at least another field's value
pub fn min(ctx: &RuleContext<'_>, args: &[String]) -> Result<bool, RuleError> {
    let bound = ctx.resolve(arg(args, 0), arg(args, 1))?;
    Ok(bound.is_some_and(|bound| at_least(parse_float(&ctx.value()), parse_float(&bound))))
}

/// Value lies within `[min, max]`
pub fn range(ctx: &RuleContext<'_>, args: &[String]) -> Result<bool, RuleError> {
    Ok(within(
        parse_float(&ctx.value()),
        numeric_arg(args, 0),
        numeric_arg(args, 1),
    ))
}

/// Value equals a literal target or another field's value
pub fn equals(ctx: &RuleContext<'_>, args: &[String]) -> Result<bool, RuleError> {
    let target = ctx.resolve(arg(args, 0), arg(args, 1))?;
    Ok(target.is_some_and(|target| target == ctx.value()))
}

pub fn minlen(ctx: &RuleContext<'_>, args: &[String]) -> Result<bool, RuleError> {
    Ok(at_least(trimmed_len(ctx), length_arg(args, 0)))
}

pub fn maxlen(ctx: &RuleContext<'_>, args: &[String]) -> Result<bool, RuleError> {
    Ok(at_most(trimmed_len(ctx), length_arg(args, 0)))
}

pub fn length(ctx: &RuleContext<'_>, args: &[String]) -> Result<bool, RuleError> {
    Ok(within(trimmed_len(ctx), length_arg(args, 0), length_arg(args, 1)))
}

/// Compile a bare pattern or a `/pattern/flags` literal.
///
/// Flags `i`, `m` and `s` are honoured; `g`, `u` and `y` are accepted and
/// have no effect on a single match test.
pub fn compile_literal(source: &str) -> Result<Regex, RuleError> {
    let (pattern, flags) = split_literal(source);
    let mut builder = RegexBuilder::new(pattern);

    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            _ => {}
        }
    }

    builder.build().map_err(|source| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn split_literal(source: &str) -> (&str, &str) {
    if let Some(rest) = source.strip_prefix('/') {
        if let Some(end) = rest.rfind('/') {
            let flags = &rest[end + 1..];
            if flags.chars().all(|c| "gimsuy".contains(c)) {
                return (&rest[..end], flags);
            }
        }
    }
    (source, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, InputField};
    use rstest::rstest;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn check(rule: fn(&RuleContext<'_>, &[String]) -> Result<bool, RuleError>, value: &str, args: &[&str]) -> bool {
        let field = InputField::new("subject").with_value(value);
        let ctx = RuleContext::new(&field, &[]);
        rule(&ctx, &strings(args)).unwrap()
    }

    #[rstest]
    #[case("x", true)]
    #[case("  x ", true)]
    #[case("", false)]
    #[case(" \t\n", false)]
    fn test_required(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(check(required, value, &[]), expected);
    }

    #[test]
    fn test_regex_rejoins_commas() {
        assert!(check(pattern, "a,b", &["^a", "b$"]));
        assert!(!check(pattern, "a", &["^a", "b$"]));
    }

    #[test]
    fn test_regex_literal_flags() {
        assert!(check(pattern, "HELLO", &["/^hello$/i"]));
        assert!(!check(pattern, "HELLO", &["/^hello$/"]));
        assert!(check(pattern, "a/b", &["^a/b$"]));
    }

    #[test]
    fn test_regex_invalid_pattern_faults() {
        let field = InputField::new("subject").with_value("x");
        let ctx = RuleContext::new(&field, &[]);
        let result = pattern(&ctx, &strings(&["(unclosed"]));
        assert!(matches!(result, Err(RuleError::InvalidPattern { .. })));
    }

    #[rstest]
    #[case("10", &["10"], true)]
    #[case("9.5", &["10"], true)]
    #[case("11", &["10"], false)]
    #[case("abc", &["10"], false)]
    #[case("5", &["ten"], false)]
    #[case("5", &[], false)]
    fn test_max(#[case] value: &str, #[case] args: &[&str], #[case] expected: bool) {
        assert_eq!(check(max, value, args), expected);
    }

    #[rstest]
    #[case("18", &["18"], true)]
    #[case("17", &["18"], false)]
    #[case("-1", &["-5"], true)]
    fn test_min(#[case] value: &str, #[case] args: &[&str], #[case] expected: bool) {
        assert_eq!(check(min, value, args), expected);
    }

    #[rstest]
    #[case("1", true)]
    #[case("10", true)]
    #[case("0", false)]
    #[case("10.1", false)]
    #[case("n/a", false)]
    fn test_range(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(check(range, value, &["1", "10"]), expected);
    }

    #[rstest]
    #[case(minlen, " abc ", &["3"], true)]
    #[case(minlen, "ab", &["3"], false)]
    #[case(maxlen, "abcd", &["3"], false)]
    #[case(maxlen, " abc ", &["3"], true)]
    #[case(length, "abc", &["2", "4"], true)]
    #[case(length, "abcde", &["2", "4"], false)]
    #[case(length, "日本語", &["3", "3"], true)]
    #[case(minlen, "abc", &["three"], false)]
    fn test_lengths(
        #[case] rule: fn(&RuleContext<'_>, &[String]) -> Result<bool, RuleError>,
        #[case] value: &str,
        #[case] args: &[&str],
        #[case] expected: bool,
    ) {
        assert_eq!(check(rule, value, args), expected);
    }

    #[test]
    fn test_selector_indirection() {
        let other = Arc::new(InputField::new("limit").with_value("5"));
        let fields: Vec<Arc<dyn Field>> = vec![other.clone()];
        let field = InputField::new("amount").with_value("7");
        let ctx = RuleContext::new(&field, &fields);
        let args = strings(&["selector", "[name=limit]"]);

        assert!(!max(&ctx, &args).unwrap());
        assert!(min(&ctx, &args).unwrap());

        other.set_value("8");
        assert!(max(&ctx, &args).unwrap());
        assert!(!min(&ctx, &args).unwrap());
    }

    #[test]
    fn test_match() {
        let other = Arc::new(InputField::new("password").with_value("secret"));
        let fields: Vec<Arc<dyn Field>> = vec![other.clone()];
        let field = InputField::new("confirm").with_value("secret");
        let ctx = RuleContext::new(&field, &fields);

        assert!(equals(&ctx, &strings(&["selector", "[name=password]"])).unwrap());
        assert!(equals(&ctx, &strings(&["secret"])).unwrap());
        assert!(!equals(&ctx, &strings(&["other"])).unwrap());
        assert!(!equals(&ctx, &strings(&["selector", "[name=missing]"])).unwrap());
        assert!(!equals(&ctx, &[]).unwrap());
    }

    #[test]
    fn test_unsupported_selector_faults() {
        let field = InputField::new("confirm").with_value("x");
        let ctx = RuleContext::new(&field, &[]);
        let result = equals(&ctx, &strings(&["selector", "div > input"]));
        assert!(matches!(result, Err(RuleError::InvalidSelector(_))));
    }
}
