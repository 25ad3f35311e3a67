// File: rusty-validator/src/field.rs
// Purpose: Field capability trait and an in-memory input implementation

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// Attribute prefix that carries rule declarations on markup inputs
pub const RULE_ATTRIBUTE_PREFIX: &str = "data-";

/// A single validatable input.
///
/// Implementations are handles onto controls owned elsewhere, so every method
/// takes `&self`. The engine only ever writes the error marker; values are
/// written by whoever owns the control.
pub trait Field: Send + Sync {
    /// Field name, used by `[name=...]` selectors
    fn name(&self) -> &str;

    /// Optional element id, used by `#id` selectors
    fn id(&self) -> Option<&str> {
        None
    }

    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    /// Raw declaration for `rule`. An empty declaration counts as absent.
    fn rule(&self, rule: &str) -> Option<String>;

    fn has_marker(&self, marker: &str) -> bool;

    fn set_marker(&self, marker: &str, on: bool);

    fn focus(&self);

    fn is_visible(&self) -> bool {
        true
    }

    /// Vertical document position, used to scroll hidden fields into view
    fn offset_top(&self) -> f64 {
        0.0
    }
}

#[derive(Debug, Default)]
struct FieldState {
    value: String,
    markers: HashSet<String>,
    focus_count: usize,
}

/// In-memory field backed by a value, declared rules and a marker set
#[derive(Debug)]
pub struct InputField {
    name: String,
    id: Option<String>,
    rules: HashMap<String, String>,
    visible: bool,
    offset_top: f64,
    state: Mutex<FieldState>,
}

impl InputField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            rules: HashMap::new(),
            visible: true,
            offset_top: 0.0,
            state: Mutex::new(FieldState::default()),
        }
    }

    /// Build a field from markup attributes.
    ///
    /// `name` and `id` are read as identity, `value` as the initial value,
    /// `hidden` hides the field and every `data-<rule>` attribute declares a
    /// rule.
    ///
    /// ```
    /// use rusty_validator::{Field, InputField};
    ///
    /// let field = InputField::from_attributes([
    ///     ("name", "email"),
    ///     ("data-required", "Email is required"),
    ///     ("data-email", "Not an email address"),
    /// ]);
    /// assert_eq!(field.rule("required").as_deref(), Some("Email is required"));
    /// ```
    pub fn from_attributes<K, V>(attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut field = Self::new("");
        for (key, value) in attrs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "name" => field.name = value.to_string(),
                "id" => field.id = Some(value.to_string()),
                "value" => field = field.with_value(value),
                "hidden" => field.visible = false,
                _ => {
                    if let Some(rule) = key.strip_prefix(RULE_ATTRIBUTE_PREFIX) {
                        field.rules.insert(rule.to_string(), value.to_string());
                    }
                }
            }
        }
        field
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.lock().value = value.into();
        self
    }

    /// Declare `rule` with its raw `"args...,message"` string
    pub fn with_rule(mut self, rule: impl Into<String>, raw: impl Into<String>) -> Self {
        self.rules.insert(rule.into(), raw.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_offset_top(mut self, offset_top: f64) -> Self {
        self.offset_top = offset_top;
        self
    }

    /// Declared rules, keyed by rule name
    pub fn rules(&self) -> &HashMap<String, String> {
        &self.rules
    }

    /// How many times focus was requested on this field
    pub fn focus_count(&self) -> usize {
        self.lock().focus_count
    }

    /// Render declared rules back as `data-*` attributes, sorted by name
    pub fn render_rule_attrs(&self) -> String {
        let mut names: Vec<&String> = self.rules.keys().collect();
        names.sort();

        names
            .into_iter()
            .map(|name| {
                format!(
                    "{}{}=\"{}\"",
                    RULE_ATTRIBUTE_PREFIX,
                    name,
                    self.rules[name].replace('"', "&quot;")
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn lock(&self) -> MutexGuard<'_, FieldState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Field for InputField {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn value(&self) -> String {
        self.lock().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.lock().value = value.to_string();
    }

    fn rule(&self, rule: &str) -> Option<String> {
        self.rules
            .get(rule)
            .filter(|raw| !raw.is_empty())
            .cloned()
    }

    fn has_marker(&self, marker: &str) -> bool {
        self.lock().markers.contains(marker)
    }

    fn set_marker(&self, marker: &str, on: bool) {
        let mut state = self.lock();
        if on {
            state.markers.insert(marker.to_string());
        } else {
            state.markers.remove(marker);
        }
    }

    fn focus(&self) {
        self.lock().focus_count += 1;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn offset_top(&self) -> f64 {
        self.offset_top
    }
}
