// File: rusty-validator/src/rules/mod.rs
// Purpose: Rule definitions and the ordered rule registry

//! Rule registry.
//!
//! A rule is either a fixed pattern tested against the raw value, or a
//! predicate over parsed arguments. The registry keeps insertion order, and
//! that order decides which failure a field reports when several rules would
//! fail: built-ins first in catalogue order, then extensions in merge order.

pub mod functions;
pub mod patterns;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::RuleError;
use crate::field::Field;
use crate::selector::{self, SELECTOR_TOKEN};

/// Function rule: parsed arguments in, pass/fail out
pub type Predicate = Arc<dyn Fn(&RuleContext<'_>, &[String]) -> Result<bool, RuleError> + Send + Sync>;

/// What a predicate can see while it runs: the field under validation and
/// its siblings for selector indirection.
pub struct RuleContext<'a> {
    field: &'a dyn Field,
    fields: &'a [Arc<dyn Field>],
}

impl<'a> RuleContext<'a> {
    pub fn new(field: &'a dyn Field, fields: &'a [Arc<dyn Field>]) -> Self {
        Self { field, fields }
    }

    pub fn field(&self) -> &dyn Field {
        self.field
    }

    /// Current value of the field under validation
    pub fn value(&self) -> String {
        self.field.value()
    }

    /// Current value of the field `selector` points at
    pub fn lookup(&self, selector: &str) -> Result<Option<String>, RuleError> {
        selector::lookup_value(selector, self.fields)
    }

    /// Resolve a bound argument.
    ///
    /// The literal `selector` means "read the value of the field named by the
    /// next argument", evaluated now rather than at declaration time.
    pub fn resolve(&self, arg: Option<&str>, selector_arg: Option<&str>) -> Result<Option<String>, RuleError> {
        match arg {
            Some(SELECTOR_TOKEN) => match selector_arg {
                Some(selector) => self.lookup(selector),
                None => Ok(None),
            },
            other => Ok(other.map(str::to_string)),
        }
    }
}

/// A named check
#[derive(Clone)]
pub enum RuleDefinition {
    /// Tested directly against the raw field value
    Pattern(Regex),
    /// Evaluated with parsed arguments and the field as context
    Predicate(Predicate),
}

impl RuleDefinition {
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(RuleDefinition::Pattern(Regex::new(pattern)?))
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&RuleContext<'_>, &[String]) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        RuleDefinition::Predicate(Arc::new(predicate))
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, RuleDefinition::Pattern(_))
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleDefinition::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            RuleDefinition::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Insertion-ordered mapping from rule name to definition
#[derive(Clone, Default)]
pub struct Registry {
    entries: Vec<(String, RuleDefinition)>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// An empty registry, typically used to collect extensions
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalogue: pattern rules, then function rules
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, regex) in patterns::catalogue() {
            registry.insert(name, RuleDefinition::Pattern(regex));
        }
        for (name, predicate) in functions::catalogue() {
            registry.insert(name, RuleDefinition::Predicate(predicate));
        }
        registry
    }

    /// Add or override a rule. An override keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, rule: RuleDefinition) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = rule,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, rule));
            }
        }
    }

    /// Merge `other` into this registry; its entries win on collision
    pub fn merge(&mut self, other: Registry) {
        for (name, rule) in other.entries {
            self.insert(name, rule);
        }
    }

    pub fn get(&self, name: &str) -> Option<&RuleDefinition> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleDefinition)> {
        self.entries.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}
