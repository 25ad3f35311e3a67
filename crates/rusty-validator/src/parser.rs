// File: rusty-validator/src/parser.rs
// Purpose: Turn declared rule strings into positional arguments and a message

//! Rule spec parsing.
//!
//! A declaration such as `"3,20,Between 3 and 20 characters"` becomes
//! `RuleSpec { args: ["3", "20"], message: "Between 3 and 20 characters" }`.
//! Parsing is pure: the same raw string always yields the same spec.

use std::sync::Arc;

/// Pluggable parsing strategy. The engine always calls the configured one.
pub type ParseFn = Arc<dyn Fn(&str) -> RuleSpec + Send + Sync>;

/// Parsed form of a declared rule string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSpec {
    pub message: String,
    pub args: Vec<String>,
}

impl RuleSpec {
    pub fn new(message: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            message: message.into(),
            args,
        }
    }
}

/// Built-in comma-split parser.
///
/// With more than one comma-separated token the last one is the message and
/// the rest are arguments; otherwise the whole string is the message.
pub fn parse(raw: &str) -> RuleSpec {
    let mut tokens: Vec<String> = raw.split(',').map(str::to_string).collect();

    if tokens.len() > 1 {
        // split always yields at least one token
        let message = tokens.pop().unwrap_or_default();
        return RuleSpec::new(message, tokens);
    }

    RuleSpec::new(raw, Vec::new())
}

/// The built-in parser as a configurable strategy
pub fn default_parser() -> ParseFn {
    Arc::new(parse)
}
