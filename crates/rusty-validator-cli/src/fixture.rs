// File: rusty-validator-cli/src/fixture.rs
// Purpose: Load form fixtures from TOML

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use rusty_validator::{HtmlForm, InputField};

/// A form described in TOML
#[derive(Debug, Deserialize)]
pub struct FormFixture {
    #[serde(default)]
    pub fields: Vec<FieldFixture>,
}

#[derive(Debug, Deserialize)]
pub struct FieldFixture {
    pub name: String,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub offset_top: f64,

    /// Rule name -> raw declaration
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
}

impl FormFixture {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form fixture: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse form fixture: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn into_form(self) -> HtmlForm {
        HtmlForm::new(self.fields.into_iter().map(|field| Arc::new(field.into_input())))
    }
}

impl FieldFixture {
    fn into_input(self) -> InputField {
        let mut input = InputField::new(self.name)
            .with_value(self.value)
            .with_offset_top(self.offset_top);

        if let Some(id) = self.id {
            input = input.with_id(id);
        }
        if self.hidden {
            input = input.hidden();
        }

        self.rules
            .into_iter()
            .fold(input, |input, (rule, raw)| input.with_rule(rule, raw))
    }
}
