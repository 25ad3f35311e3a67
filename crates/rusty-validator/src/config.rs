// File: rusty-validator/src/config.rs
// Purpose: Immutable validator configuration and its builder

use std::fmt;
use std::sync::Arc;

use regex::RegexBuilder;

use crate::error::ConfigError;
use crate::field::Field;
use crate::hooks::{Hooks, SubmitEvent};
use crate::parser::{self, ParseFn, RuleSpec};
use crate::rules::{Registry, RuleDefinition};
use crate::settings::{FlashSettings, ValidatorSettings};

/// Configuration for one validator attachment.
///
/// Built once through [`ValidatorConfigBuilder`]; nothing can be changed
/// afterwards, including the rule registry.
#[derive(Clone)]
pub struct ValidatorConfig {
    events: Vec<String>,
    error_marker: String,
    scroll_offset: f64,
    flash: FlashSettings,
    parser: ParseFn,
    registry: Registry,
    hooks: Hooks,
}

impl ValidatorConfig {
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::default()
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Whether `event` triggers per-field re-validation
    pub fn listens_to(&self, event: &str) -> bool {
        self.events.iter().any(|name| name == event)
    }

    pub fn error_marker(&self) -> &str {
        &self.error_marker
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn flash(&self) -> FlashSettings {
        self.flash
    }

    /// Parse a raw declaration with the configured parser
    pub fn parse(&self, raw: &str) -> RuleSpec {
        (self.parser)(raw)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        let settings = ValidatorSettings::default();
        Self {
            events: settings.events,
            error_marker: settings.error_marker,
            scroll_offset: settings.scroll_offset,
            flash: settings.flash,
            parser: parser::default_parser(),
            registry: Registry::builtin(),
            hooks: Hooks::default(),
        }
    }
}

impl fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorConfig")
            .field("events", &self.events)
            .field("error_marker", &self.error_marker)
            .field("scroll_offset", &self.scroll_offset)
            .field("flash", &self.flash)
            .field("rules", &self.registry.names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Collects overrides and rule extensions, then merges them onto defaults
#[derive(Default)]
pub struct ValidatorConfigBuilder {
    settings: ValidatorSettings,
    parser: Option<ParseFn>,
    formats: Registry,
    hooks: Hooks,
}

impl ValidatorConfigBuilder {
    /// Start from file-backed settings instead of the defaults
    pub fn settings(mut self, settings: ValidatorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.events = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn error_marker(mut self, marker: impl Into<String>) -> Self {
        self.settings.error_marker = marker.into();
        self
    }

    pub fn scroll_offset(mut self, offset: f64) -> Self {
        self.settings.scroll_offset = offset;
        self
    }

    pub fn flash(mut self, flash: FlashSettings) -> Self {
        self.settings.flash = flash;
        self
    }

    /// Replace the rule spec parser
    pub fn parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&str) -> RuleSpec + Send + Sync + 'static,
    {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Add or override a single rule
    pub fn format(mut self, name: impl Into<String>, rule: RuleDefinition) -> Self {
        self.formats.insert(name, rule);
        self
    }

    /// Add or override a batch of rules, keeping their order
    pub fn formats(mut self, formats: Registry) -> Self {
        self.formats.merge(formats);
        self
    }

    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Field) -> bool + Send + Sync + 'static,
    {
        self.hooks.before = Arc::new(hook);
        self
    }

    pub fn is_error<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.hooks.is_error = Arc::new(hook);
        self
    }

    pub fn error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Field, &str) + Send + Sync + 'static,
    {
        self.hooks.error = Arc::new(hook);
        self
    }

    pub fn success<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Field) + Send + Sync + 'static,
    {
        self.hooks.success = Arc::new(hook);
        self
    }

    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Field, bool) + Send + Sync + 'static,
    {
        self.hooks.after = Arc::new(hook);
        self
    }

    pub fn before_submit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SubmitEvent) -> bool + Send + Sync + 'static,
    {
        self.hooks.before_submit = Arc::new(hook);
        self
    }

    pub fn submit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SubmitEvent) -> bool + Send + Sync + 'static,
    {
        self.hooks.submit = Arc::new(hook);
        self
    }

    /// Merge everything into an immutable configuration.
    ///
    /// Registry order: built-ins, then settings formats, then programmatic
    /// formats. Overrides keep the overridden rule's position.
    pub fn build(self) -> Result<ValidatorConfig, ConfigError> {
        let mut registry = Registry::builtin();

        for format in &self.settings.formats {
            let regex = RegexBuilder::new(&format.pattern)
                .case_insensitive(format.case_insensitive)
                .build()
                .map_err(|source| ConfigError::InvalidFormat {
                    name: format.name.clone(),
                    source,
                })?;
            registry.insert(format.name.clone(), RuleDefinition::Pattern(regex));
        }

        registry.merge(self.formats);

        tracing::debug!(
            rules = registry.len(),
            events = ?self.settings.events,
            "Validator configuration built"
        );

        Ok(ValidatorConfig {
            events: self.settings.events,
            error_marker: self.settings.error_marker,
            scroll_offset: self.settings.scroll_offset,
            flash: self.settings.flash,
            parser: self.parser.unwrap_or_else(parser::default_parser),
            registry,
            hooks: self.hooks,
        })
    }
}
