//! Collects variable values, either from a YAML answers file or by asking
//! the user, and resolves them against the declared variables.

use crate::config::Variable;
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::Value;
use std::path::Path;

/// Parses the answers document: a flat YAML mapping of name to value.
///
/// An empty document yields no answers.
pub fn parse_answers(content: &str) -> Result<IndexMap<String, Value>> {
    if content.trim().is_empty() {
        return Ok(IndexMap::new());
    }
    let answers: Option<IndexMap<String, Value>> = serde_yaml::from_str(content)?;
    Ok(answers.unwrap_or_default())
}

/// Resolves every declared variable from `provided`, falling back to defaults.
///
/// Values are coerced to the declared type. Provided keys that are not
/// declared are ignored.
///
/// # Errors
/// * `Error::MissingVariable` if a variable has neither a value nor a default
/// * `Error::InvalidVariableValue` if a value does not fit the declared type
pub fn resolve_answers(
    variables: &[Variable],
    provided: &IndexMap<String, Value>,
) -> Result<Value> {
    for key in provided.keys() {
        if !variables.iter().any(|v| &v.name == key) {
            warn!("Ignoring undeclared variable '{}'", key);
        }
    }

    let mut answers = serde_json::Map::new();
    for variable in variables {
        let value = match (provided.get(&variable.name), &variable.default) {
            (Some(value), _) => value,
            (None, Some(default)) => {
                debug!("Using default for '{}'", variable.name);
                default
            }
            (None, None) => {
                return Err(Error::MissingVariable {
                    name: variable.name.clone(),
                })
            }
        };
        let value = variable.var_type.coerce(&variable.name, value)?;
        answers.insert(variable.name.clone(), value);
    }

    Ok(Value::Object(answers))
}

/// Reads answers from a YAML file.
pub fn get_answers_from_file<P: AsRef<Path>>(variables: &[Variable], path: P) -> Result<Value> {
    let path = path.as_ref();
    debug!("Loading answers from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    resolve_answers(variables, &parse_answers(&content)?)
}

/// Asks the user for every declared variable, in declaration order.
pub fn get_answers(prompt: &dyn Prompter, variables: &[Variable]) -> Result<Value> {
    let mut answers = serde_json::Map::new();
    for variable in variables {
        let value = prompt.answer(variable)?;
        let value = variable.var_type.coerce(&variable.name, &value)?;
        answers.insert(variable.name.clone(), value);
    }
    Ok(Value::Object(answers))
}
