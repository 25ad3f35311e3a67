// File: rusty-validator/src/numeric.rs
// Purpose: Permissive number coercion for bound comparisons

//! Numeric coercion.
//!
//! Form values and rule arguments are strings. Bounds are compared after a
//! permissive prefix parse: leading whitespace is skipped and the longest
//! numeric prefix wins, so `"12px"` reads as `12`. Input with no numeric
//! prefix becomes `NaN`, and every comparison against `NaN` is false.

use once_cell::sync::Lazy;
use regex::Regex;

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?)")
        .unwrap()
});

static INT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+").unwrap());

/// Parses the longest leading float, or `NaN`
pub fn parse_float(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let Some(found) = FLOAT_PREFIX.find(trimmed) else {
        return f64::NAN;
    };

    let text = found.as_str();
    match text.trim_start_matches(['+', '-']) {
        "Infinity" if text.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => text.parse().unwrap_or(f64::NAN),
    }
}

/// Parses the longest leading integer, or `NaN`
pub fn parse_int(input: &str) -> f64 {
    INT_PREFIX
        .find(input.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// `value <= max`, false if either side is `NaN`
pub fn at_most(value: f64, max: f64) -> bool {
    value <= max
}

/// `value >= min`, false if either side is `NaN`
pub fn at_least(value: f64, min: f64) -> bool {
    value >= min
}

/// Inclusive range check, false if any side is `NaN`
pub fn within(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}
