pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::CatalogConfig;
pub use crate::core::catalog::ServiceCatalog;
pub use crate::core::composer::ResponseComposer;
pub use crate::core::generator::{IdentifierGenerator, SystemClock};
pub use crate::core::session::SessionController;
pub use crate::domain::model::{RenderedOutput, ResponseKind};
pub use crate::utils::error::{Result, SimulatorError};

#[cfg(feature = "cli")]
pub use crate::config::{CliCommand, CliConfig};
