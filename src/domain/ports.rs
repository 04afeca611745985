use crate::domain::model::IdentifierSpec;
use chrono::{DateTime, Utc};

/// Source of mock identifiers. The production implementation draws random
/// suffixes; tests substitute fixed sequences for exact-match assertions.
pub trait IdentifierSource: Send {
    fn generate(&mut self, spec: &IdentifierSpec) -> String;
}

/// Wall-clock seam. The engine's only external input.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}
