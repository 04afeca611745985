use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Unknown service: {id}")]
    ServiceNotFound { id: String },

    #[error("No service is open; open a service before executing commands")]
    NoServiceOpen,

    #[error("Service '{service}' has no command named '{command}'")]
    UnknownCommand { service: String, command: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Invalid catalog value for '{field}': {value} ({reason})")]
    InvalidCatalogValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Template error in command '{command}': {message}")]
    TemplateError { command: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulatorError>;
