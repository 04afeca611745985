use crate::domain::model::{IdentifierSpec, ResponseKind};
use crate::utils::error::{Result, SimulatorError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_slug, validate_unique, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The embedded default catalog shipped with the crate.
const DEFAULT_CATALOG: &str = include_str!("default_catalog.toml");

/// Declarative service/command catalog. Adding a service or command is a data
/// change here, not a code change; one generic renderer evaluates every
/// template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: CatalogInfo,
    pub services: Vec<ServiceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    pub name: String,
    pub response: ResponseKind,
    #[serde(default)]
    pub identifiers: Vec<IdentifierSpec>,
    pub template: String,
}

impl CatalogConfig {
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CATALOG)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SimulatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SimulatorError::CatalogError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("catalog.name", &self.catalog.name)?;
        validate_non_empty_string("catalog.version", &self.catalog.version)?;

        if self.services.is_empty() {
            return Err(SimulatorError::CatalogError {
                message: "Catalog declares no services".to_string(),
            });
        }
        validate_unique("services", self.services.iter().map(|s| s.id.as_str()))?;

        for service in &self.services {
            validate_slug("services.id", &service.id)?;
            validate_non_empty_string("services.display_name", &service.display_name)?;

            if service.commands.is_empty() {
                return Err(SimulatorError::CatalogError {
                    message: format!("Service '{}' declares no commands", service.id),
                });
            }
            validate_unique(
                &format!("services.{}.commands", service.id),
                service.commands.iter().map(|c| c.name.as_str()),
            )?;

            for command in &service.commands {
                let scope = format!("services.{}.{}", service.id, command.name);
                validate_slug(&format!("{}.name", scope), &command.name)?;
                validate_non_empty_string(&format!("{}.template", scope), &command.template)?;
                validate_unique(
                    &format!("{}.identifiers", scope),
                    command.identifiers.iter().map(|i| i.field.as_str()),
                )?;

                for spec in &command.identifiers {
                    validate_slug(&format!("{}.identifiers.field", scope), &spec.field)?;
                    validate_range(
                        &format!("{}.identifiers.{}.length", scope, spec.field),
                        spec.length,
                        1,
                        64,
                    )?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Charset;

    #[test]
    fn test_builtin_catalog_parses_and_validates() {
        let config = CatalogConfig::builtin().unwrap();
        assert!(config.validate().is_ok());
        assert!(config.services.len() >= 12);
    }

    #[test]
    fn test_builtin_covers_required_service_families() {
        let config = CatalogConfig::builtin().unwrap();
        let ids: Vec<&str> = config.services.iter().map(|s| s.id.as_str()).collect();

        for required in [
            "ec2",
            "s3",
            "rds",
            "lambda",
            "vpc",
            "iam",
            "cloudwatch",
            "sns",
            "sqs",
            "cloudformation",
            "apigateway",
            "dynamodb",
        ] {
            assert!(ids.contains(&required), "missing service '{}'", required);
        }
    }

    #[test]
    fn test_builtin_commands_stay_within_panel_size() {
        let config = CatalogConfig::builtin().unwrap();
        for service in &config.services {
            let count = service.commands.len();
            assert!(
                (2..=6).contains(&count),
                "service '{}' has {} commands",
                service.id,
                count
            );
        }
    }

    #[test]
    fn test_parse_minimal_catalog() {
        let toml_content = r#"
[catalog]
name = "test-catalog"
version = "1.0.0"

[[services]]
id = "demo"
display_name = "Demo Service"

[[services.commands]]
name = "describe-demo"
response = "json"
identifiers = [
    { field = "demo_id", prefix = "demo-", length = 8, charset = "hex" },
]
template = '{"DemoId": "{demo_id}"}'
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let command = &config.services[0].commands[0];
        assert_eq!(command.response, ResponseKind::Json);
        assert_eq!(command.identifiers[0].charset, Charset::Hex);
        assert_eq!(command.identifiers[0].length, 8);
    }

    #[test]
    fn test_duplicate_service_ids_rejected() {
        let toml_content = r#"
[catalog]
name = "test"
version = "1.0"

[[services]]
id = "demo"
display_name = "Demo"

[[services.commands]]
name = "noop"
response = "text"
template = "ok"

[[services]]
id = "demo"
display_name = "Demo Again"

[[services.commands]]
name = "noop"
response = "text"
template = "ok"
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_service_without_commands_rejected() {
        let toml_content = r#"
[catalog]
name = "test"
version = "1.0"

[[services]]
id = "demo"
display_name = "Demo"
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("no commands"));
    }

    #[test]
    fn test_identifier_length_bounds_rejected() {
        let toml_content = r#"
[catalog]
name = "test"
version = "1.0"

[[services]]
id = "demo"
display_name = "Demo"

[[services.commands]]
name = "describe-demo"
response = "json"
identifiers = [
    { field = "demo_id", length = 0, charset = "hex" },
]
template = '{"DemoId": "{demo_id}"}'
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_uppercase_service_id_rejected() {
        let toml_content = r#"
[catalog]
name = "test"
version = "1.0"

[[services]]
id = "EC2"
display_name = "EC2"

[[services.commands]]
name = "noop"
response = "text"
template = "ok"
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }
}
