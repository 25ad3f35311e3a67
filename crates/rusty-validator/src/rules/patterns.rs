// File: rusty-validator/src/rules/patterns.rs
// Purpose: Built-in pattern rules

//! Pattern rules are tested against the raw (untrimmed) value. Digit, word
//! and letter classes are ASCII-only, and `i` rules fold ASCII case only.

use once_cell::sync::Lazy;
use regex::Regex;

static ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i-u)^[a-z0-9]+$").unwrap());

static ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i-u)^[a-z]+$").unwrap());

static LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+$").unwrap());

static UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]+$").unwrap());

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)^\w+$").unwrap());

// Optional sign, then any run of digits and dots
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)^[+\-]?[\d.]+$").unwrap());

// Scheme, dotted host with a 2-3 letter TLD, then a restricted path/query charset
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)^https?://([a-z0-9\-]+\.)+[a-z]{2,3}([a-z0-9_~#%&/'+=:?.\-])*$").unwrap()
});

static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)^\d{4}[/\-]\d{1,2}[/\-]\d{1,2}$").unwrap());

static DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}[/\-][0-9]{1,2}[/\-][0-9]{1,2}\s+[0-9]{1,2}(:[0-9]{1,2}){1,2}$").unwrap()
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^\w+([-+.]\w+)*@\w+([-.]\w+)*\.\w+([-.]\w+)*$").unwrap()
});

// 6-30 characters, none of them a line terminator
static PASSWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\n\r\x{2028}\x{2029}]{6,30}$").unwrap());

// No quotes, punctuation that breaks markup or URLs, or whitespace
static NICKNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[^'":;,<>?/\\*=+{}\[\]()^%$#!`\s]+$"#).unwrap()
});

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)^[\d\-]{5,}$").unwrap());

static MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)^\d{8,13}$").unwrap());

/// Built-in pattern rules in catalogue order
pub fn catalogue() -> Vec<(&'static str, Regex)> {
    vec![
        ("alnum", ALNUM.clone()),
        ("alpha", ALPHA.clone()),
        ("lower", LOWER.clone()),
        ("upper", UPPER.clone()),
        ("word", WORD.clone()),
        ("number", NUMBER.clone()),
        ("url", URL.clone()),
        ("date", DATE.clone()),
        ("datetime", DATETIME.clone()),
        ("email", EMAIL.clone()),
        ("password", PASSWORD.clone()),
        ("nickname", NICKNAME.clone()),
        ("phone", PHONE.clone()),
        ("mobile", MOBILE.clone()),
    ]
}
