//! Interactive collection of variable values.

use crate::config::{Variable, VariableType};
use crate::error::Result;
use dialoguer::{Confirm, Input};
use serde_json::Value;

/// Source of answers for declared variables.
pub trait Prompter {
    /// Returns the value for `variable`; it is coerced to the declared type afterwards.
    fn answer(&self, variable: &Variable) -> Result<Value>;
}

/// Asks on the terminal using `dialoguer`.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_text(variable: &Variable) -> String {
    if variable.description.is_empty() {
        format!("{} ({})", variable.name, variable.var_type)
    } else {
        format!("{} ({}): {}", variable.name, variable.var_type, variable.description)
    }
}

fn default_text(default: &Value) -> String {
    match default {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Prompter for DialoguerPrompter {
    fn answer(&self, variable: &Variable) -> Result<Value> {
        let prompt = prompt_text(variable);

        if variable.var_type == VariableType::Bool {
            let default = variable
                .default
                .as_ref()
                .and_then(|d| variable.var_type.coerce(&variable.name, d).ok())
                .and_then(|d| d.as_bool())
                .unwrap_or(false);
            let answer = Confirm::new().with_prompt(prompt).default(default).interact()?;
            return Ok(Value::Bool(answer));
        }

        let var_type = variable.var_type;
        let name = variable.name.clone();
        let mut input = Input::<String>::new()
            .with_prompt(prompt)
            .validate_with(move |value: &String| -> std::result::Result<(), String> {
                var_type
                    .coerce(&name, &Value::String(value.clone()))
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            });
        if let Some(default) = &variable.default {
            input = input.default(default_text(default));
        }

        Ok(Value::String(input.interact_text()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_text() {
        let mut variable = Variable {
            name: "greet".to_string(),
            var_type: VariableType::Str,
            description: String::new(),
            default: Some(json!("hello")),
        };
        assert_eq!(prompt_text(&variable), "greet (string)");
        variable.description = "your favorite greet expression".to_string();
        assert_eq!(
            prompt_text(&variable),
            "greet (string): your favorite greet expression"
        );
    }

    #[test]
    fn test_default_text() {
        assert_eq!(default_text(&json!("hello")), "hello");
        assert_eq!(default_text(&json!(5)), "5");
    }
}
