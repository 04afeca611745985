use crate::core::generator::iso_timestamp;
use crate::domain::model::{CommandDefinition, RenderedOutput, ResponseKind, ResponseTemplate};
use crate::utils::error::{Result, SimulatorError};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Fixed mock account, matching the twelve-digit AWS convention. Shared by
/// every template so ARNs stay internally consistent within a response.
pub const MOCK_ACCOUNT_ID: &str = "123456789012";
pub const MOCK_REGION: &str = "us-east-1";

/// Variables every template may reference without declaring an identifier.
pub const BUILTIN_VARS: [&str; 5] = ["timestamp", "date", "time", "region", "account_id"];

const PLACEHOLDER_PATTERN: &str = r"\{([a-z][a-z0-9_]*)\}";

/// Expands a command's template by substituting generated identifiers and
/// built-in variables into string leaves. Deterministic for identical inputs.
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn compose(
        command: &CommandDefinition,
        identifiers: &HashMap<String, String>,
        instant: DateTime<Utc>,
    ) -> Result<RenderedOutput> {
        let vars = Self::template_vars(identifiers, instant);

        match (&command.template, command.response_kind) {
            (ResponseTemplate::Json(tree), ResponseKind::Json) => {
                let rendered = Self::substitute_value(tree, &vars, &command.name)?;
                Ok(RenderedOutput::Json(rendered))
            }
            (ResponseTemplate::Text(body), ResponseKind::Text) => {
                let rendered = Self::substitute_str(body, &vars, &command.name)?;
                Ok(RenderedOutput::Text(rendered))
            }
            _ => Err(SimulatorError::TemplateError {
                command: command.name.clone(),
                message: "Template body does not match declared response kind".to_string(),
            }),
        }
    }

    /// Identifier values plus built-ins derived from one instant.
    fn template_vars(
        identifiers: &HashMap<String, String>,
        instant: DateTime<Utc>,
    ) -> HashMap<String, String> {
        let mut vars = identifiers.clone();
        vars.insert("timestamp".to_string(), iso_timestamp(instant));
        vars.insert("date".to_string(), instant.format("%Y-%m-%d").to_string());
        vars.insert("time".to_string(), instant.format("%H:%M:%S").to_string());
        vars.insert("region".to_string(), MOCK_REGION.to_string());
        vars.insert("account_id".to_string(), MOCK_ACCOUNT_ID.to_string());
        vars
    }

    fn substitute_value(
        value: &serde_json::Value,
        vars: &HashMap<String, String>,
        command: &str,
    ) -> Result<serde_json::Value> {
        let rendered = match value {
            serde_json::Value::String(s) => {
                serde_json::Value::String(Self::substitute_str(s, vars, command)?)
            }
            serde_json::Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| Self::substitute_value(item, vars, command))
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(fields) => {
                let mut rendered = serde_json::Map::with_capacity(fields.len());
                for (key, field_value) in fields {
                    rendered.insert(
                        key.clone(),
                        Self::substitute_value(field_value, vars, command)?,
                    );
                }
                serde_json::Value::Object(rendered)
            }
            other => other.clone(),
        };
        Ok(rendered)
    }

    fn substitute_str(
        input: &str,
        vars: &HashMap<String, String>,
        command: &str,
    ) -> Result<String> {
        let mut output = input.to_string();
        for (key, value) in vars {
            let placeholder = format!("{{{}}}", key);
            if output.contains(&placeholder) {
                output = output.replace(&placeholder, value);
            }
        }

        let leftover = Regex::new(PLACEHOLDER_PATTERN).unwrap();
        if let Some(unresolved) = leftover.find(&output) {
            return Err(SimulatorError::TemplateError {
                command: command.to_string(),
                message: format!("Unresolved placeholder {}", unresolved.as_str()),
            });
        }

        Ok(output)
    }

    /// Every placeholder a template references. Catalog validation uses this
    /// to reject templates whose variables no identifier or built-in covers.
    pub fn placeholders(template: &ResponseTemplate) -> HashSet<String> {
        let mut found = HashSet::new();
        match template {
            ResponseTemplate::Json(tree) => Self::collect_value_placeholders(tree, &mut found),
            ResponseTemplate::Text(body) => Self::collect_str_placeholders(body, &mut found),
        }
        found
    }

    fn collect_value_placeholders(value: &serde_json::Value, found: &mut HashSet<String>) {
        match value {
            serde_json::Value::String(s) => Self::collect_str_placeholders(s, found),
            serde_json::Value::Array(items) => {
                for item in items {
                    Self::collect_value_placeholders(item, found);
                }
            }
            serde_json::Value::Object(fields) => {
                for field_value in fields.values() {
                    Self::collect_value_placeholders(field_value, found);
                }
            }
            _ => {}
        }
    }

    fn collect_str_placeholders(input: &str, found: &mut HashSet<String>) {
        let re = Regex::new(PLACEHOLDER_PATTERN).unwrap();
        for captures in re.captures_iter(input) {
            found.insert(captures[1].to_string());
        }
    }
}
