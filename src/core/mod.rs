pub mod catalog;
pub mod composer;
pub mod generator;
pub mod session;

pub use crate::domain::model::{
    CommandDefinition, HistoryEntry, RenderedOutput, ResponseKind, ServiceDefinition,
    SessionState,
};
pub use crate::domain::ports::{Clock, IdentifierSource};
pub use crate::utils::error::Result;
