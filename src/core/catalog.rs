use crate::config::catalog_config::CatalogConfig;
use crate::core::composer::{ResponseComposer, BUILTIN_VARS};
use crate::domain::model::{
    CommandDefinition, ResponseKind, ResponseTemplate, ServiceDefinition,
};
use crate::utils::error::{Result, SimulatorError};
use crate::utils::validation::Validate;
use std::collections::HashMap;
use std::path::Path;

/// Read-only registry of simulated services. Built once from a declarative
/// catalog, never mutated afterwards; share across sessions behind `Arc`.
#[derive(Debug)]
pub struct ServiceCatalog {
    services: Vec<ServiceDefinition>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// The embedded default catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_config(CatalogConfig::builtin()?)
    }

    /// A caller-supplied catalog file, same TOML schema as the builtin one.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_config(CatalogConfig::from_file(path)?)
    }

    pub fn from_config(config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let mut services = Vec::with_capacity(config.services.len());
        let mut index = HashMap::with_capacity(config.services.len());

        for service_config in config.services {
            let mut commands = Vec::with_capacity(service_config.commands.len());
            for command_config in service_config.commands {
                let template = match command_config.response {
                    ResponseKind::Json => {
                        let tree: serde_json::Value = serde_json::from_str(
                            &command_config.template,
                        )
                        .map_err(|e| SimulatorError::CatalogError {
                            message: format!(
                                "Command '{}.{}' declares a JSON response but its template does not parse: {}",
                                service_config.id, command_config.name, e
                            ),
                        })?;
                        ResponseTemplate::Json(tree)
                    }
                    ResponseKind::Text => {
                        ResponseTemplate::Text(command_config.template.trim_end().to_string())
                    }
                };

                let command = CommandDefinition {
                    name: command_config.name,
                    response_kind: command_config.response,
                    identifiers: command_config.identifiers,
                    template,
                };
                Self::check_placeholder_coverage(&service_config.id, &command)?;
                commands.push(command);
            }

            index.insert(service_config.id.clone(), services.len());
            services.push(ServiceDefinition {
                id: service_config.id,
                display_name: service_config.display_name,
                commands,
            });
        }

        tracing::debug!(services = services.len(), "service catalog loaded");
        Ok(Self { services, index })
    }

    /// Every template variable must be covered by a declared identifier or a
    /// built-in, so a loaded catalog cannot fail composition at runtime.
    /// Identifier fields may not shadow built-ins.
    fn check_placeholder_coverage(service_id: &str, command: &CommandDefinition) -> Result<()> {
        let declared: Vec<&str> = command
            .identifiers
            .iter()
            .map(|spec| spec.field.as_str())
            .collect();

        for field in &declared {
            if BUILTIN_VARS.contains(field) {
                return Err(SimulatorError::CatalogError {
                    message: format!(
                        "Command '{}.{}' declares identifier '{}', which shadows a built-in variable",
                        service_id, command.name, field
                    ),
                });
            }
        }

        for placeholder in ResponseComposer::placeholders(&command.template) {
            let covered = declared.contains(&placeholder.as_str())
                || BUILTIN_VARS.contains(&placeholder.as_str());
            if !covered {
                return Err(SimulatorError::CatalogError {
                    message: format!(
                        "Command '{}.{}' references '{{{}}}' but declares no matching identifier",
                        service_id, command.name, placeholder
                    ),
                });
            }
        }
        Ok(())
    }

    /// Fixed catalog order, as declared in the source TOML.
    pub fn list_services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn get_service(&self, id: &str) -> Result<&ServiceDefinition> {
        self.index
            .get(id)
            .map(|&i| &self.services[i])
            .ok_or_else(|| SimulatorError::ServiceNotFound { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = ServiceCatalog::builtin().unwrap();
        assert!(catalog.len() >= 12);
    }

    #[test]
    fn test_every_listed_service_resolves_with_commands() {
        let catalog = ServiceCatalog::builtin().unwrap();
        for service in catalog.list_services() {
            let resolved = catalog.get_service(&service.id).unwrap();
            assert!(
                !resolved.commands.is_empty(),
                "service '{}' has no commands",
                service.id
            );
        }
    }

    #[test]
    fn test_unknown_service_is_not_found() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let err = catalog.get_service("bogus-service").unwrap_err();
        assert!(matches!(
            err,
            SimulatorError::ServiceNotFound { ref id } if id == "bogus-service"
        ));
    }

    #[test]
    fn test_bad_json_template_is_rejected() {
        let toml = r#"
[catalog]
name = "broken"
version = "1.0"

[[services]]
id = "demo"
display_name = "Demo"

[[services.commands]]
name = "describe-demo"
response = "json"
template = "not valid json {"
"#;
        let config = CatalogConfig::from_toml_str(toml).unwrap();
        let err = ServiceCatalog::from_config(config).unwrap_err();
        assert!(matches!(err, SimulatorError::CatalogError { .. }));
    }

    #[test]
    fn test_uncovered_placeholder_is_rejected() {
        let toml = r#"
[catalog]
name = "broken"
version = "1.0"

[[services]]
id = "demo"
display_name = "Demo"

[[services.commands]]
name = "describe-demo"
response = "json"
template = '{"Id": "{never_declared}"}'
"#;
        let config = CatalogConfig::from_toml_str(toml).unwrap();
        let err = ServiceCatalog::from_config(config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("never_declared"));
    }

    #[test]
    fn test_identifier_shadowing_a_builtin_is_rejected() {
        let toml = r#"
[catalog]
name = "broken"
version = "1.0"

[[services]]
id = "demo"
display_name = "Demo"

[[services.commands]]
name = "describe-demo"
response = "json"
identifiers = [
    { field = "timestamp", length = 8, charset = "hex" },
]
template = '{"At": "{timestamp}"}'
"#;
        let config = CatalogConfig::from_toml_str(toml).unwrap();
        let err = ServiceCatalog::from_config(config).unwrap_err();
        assert!(err.to_string().contains("shadows a built-in"));
    }

    #[test]
    fn test_builtin_placeholders_need_no_identifier() {
        let toml = r#"
[catalog]
name = "ok"
version = "1.0"

[[services]]
id = "demo"
display_name = "Demo"

[[services.commands]]
name = "describe-demo"
response = "json"
template = '{"CreateDate": "{timestamp}", "Region": "{region}"}'
"#;
        let config = CatalogConfig::from_toml_str(toml).unwrap();
        assert!(ServiceCatalog::from_config(config).is_ok());
    }
}
