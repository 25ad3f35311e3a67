// File: rusty-validator/src/selector.rs
// Purpose: Resolve cross-field references such as `[name=password]`

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RuleError;
use crate::field::Field;

/// Rule argument announcing that the next argument is a selector
pub const SELECTOR_TOKEN: &str = "selector";

static ATTRIBUTE_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[A-Za-z]*\[\s*(name|id)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\]\s"']*))\s*\]$"#).unwrap()
});

static ID_SELECTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#([A-Za-z0-9_:.\-]+)$").unwrap());

static BARE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-\[\]]+$").unwrap());

/// A parsed reference to another field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Name(String),
    Id(String),
}

impl Selector {
    /// Parse `[name=x]`, `input[id='x']`, `#x` or a bare field name
    pub fn parse(input: &str) -> Result<Self, RuleError> {
        let input = input.trim();

        if let Some(caps) = ATTRIBUTE_SELECTOR.captures(input) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            return Ok(match &caps[1] {
                "id" => Selector::Id(value),
                _ => Selector::Name(value),
            });
        }

        if let Some(caps) = ID_SELECTOR.captures(input) {
            return Ok(Selector::Id(caps[1].to_string()));
        }

        if BARE_NAME.is_match(input) {
            return Ok(Selector::Name(input.to_string()));
        }

        Err(RuleError::InvalidSelector(input.to_string()))
    }

    pub fn matches(&self, field: &dyn Field) -> bool {
        match self {
            Selector::Name(name) => field.name() == name,
            Selector::Id(id) => field.id().is_some_and(|field_id| field_id == id),
        }
    }

    /// First field in document order that this selector picks
    pub fn find<'a>(&self, fields: &'a [Arc<dyn Field>]) -> Option<&'a Arc<dyn Field>> {
        fields.iter().find(|field| self.matches(field.as_ref()))
    }
}

/// Current value of the field `selector` points at, if any
pub fn lookup_value(selector: &str, fields: &[Arc<dyn Field>]) -> Result<Option<String>, RuleError> {
    let selector = Selector::parse(selector)?;
    Ok(selector.find(fields).map(|field| field.value()))
}
