//! Configuration handling for basta templates.
//! A template root carries a `basta.yaml` file declaring which entries are
//! ignored, which variables the templates expect, and the template syntax.
//!
//! ```yaml
//! ignore:
//!   - .git/
//!   - readme.md
//!   - basta.yaml
//! variables:
//!   - name: name
//!     type: string
//!     description: your name so that you can be greeted
//!   - name: greet
//!     type: string
//!     description: your favorite greet expression
//!     default: hello
//! ```

use crate::error::{Error, Result};
use crate::ignore::Matcher;
use crate::renderer::Engine;
use indexmap::IndexSet;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Declared type of a template variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum VariableType {
    #[serde(rename = "string")]
    Str,
    #[serde(rename = "int", alias = "integer")]
    Int,
    #[serde(rename = "bool", alias = "boolean")]
    Bool,
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableType::Str => write!(f, "string"),
            VariableType::Int => write!(f, "int"),
            VariableType::Bool => write!(f, "bool"),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl VariableType {
    /// Converts `value` to this type.
    ///
    /// Strings are accepted for every type so that answers typed on a
    /// terminal and quoted YAML values behave the same.
    pub fn coerce(&self, name: &str, value: &Value) -> Result<Value> {
        let invalid = || Error::InvalidVariableValue {
            name: name.to_string(),
            expected: self.to_string(),
            value: display_value(value),
        };

        match (self, value) {
            (VariableType::Str, Value::String(_)) => Ok(value.clone()),
            (VariableType::Str, Value::Number(n)) => Ok(Value::String(n.to_string())),
            (VariableType::Str, Value::Bool(b)) => Ok(Value::String(b.to_string())),
            (VariableType::Int, Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(value.clone()),
            (VariableType::Int, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| invalid()),
            (VariableType::Bool, Value::Bool(_)) => Ok(value.clone()),
            (VariableType::Bool, Value::String(s)) => {
                match s.trim().to_lowercase().as_str() {
                    "true" | "yes" | "y" => Ok(Value::Bool(true)),
                    "false" | "no" | "n" => Ok(Value::Bool(false)),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }
}

/// A variable the templates of a tree may reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: Option<Value>,
}

/// Parsed contents of a template configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Ignore rules, relative to the template root
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Declared variables, in prompting order
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Template syntax of the tree
    #[serde(default)]
    pub engine: Engine,
}

impl TemplateConfig {
    /// Builds the ignore matcher for a template rooted at `template_root`.
    pub fn matcher<P: AsRef<Path>>(&self, template_root: P) -> Result<Matcher> {
        Matcher::from_rules(template_root, &self.ignore)
    }

    fn validate(&self) -> Result<()> {
        let mut names = IndexSet::new();
        for variable in &self.variables {
            if variable.name.trim().is_empty() {
                return Err(Error::ConfigError("Variable name must not be empty".to_string()));
            }
            if !names.insert(variable.name.as_str()) {
                return Err(Error::ConfigError(format!(
                    "Variable '{}' is declared more than once",
                    variable.name
                )));
            }
            if let Some(default) = &variable.default {
                variable.var_type.coerce(&variable.name, default).map_err(|_| {
                    Error::ConfigError(format!(
                        "Default '{}' of variable '{}' is not a valid {}",
                        display_value(default),
                        variable.name,
                        variable.var_type
                    ))
                })?;
            }
        }
        Ok(())
    }
}

/// Parses and validates configuration content.
///
/// # Errors
/// * `Error::YamlError` if the content is not a valid configuration document
/// * `Error::ConfigError` on empty or duplicate variable names, or ill-typed defaults
pub fn parse_config(content: &str) -> Result<TemplateConfig> {
    let config: TemplateConfig = if content.trim().is_empty() {
        TemplateConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };
    config.validate()?;
    Ok(config)
}

/// Loads the configuration file at `config_path`.
///
/// # Errors
/// * `Error::ConfigError` if the path is not an existing file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<TemplateConfig> {
    let config_path = config_path.as_ref();
    if !config_path.is_file() {
        return Err(Error::ConfigError(format!(
            "Invalid configuration path: {}",
            config_path.display()
        )));
    }

    debug!("Loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(config_path)?;
    parse_config(&content)
}
