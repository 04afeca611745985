use crate::core::catalog::ServiceCatalog;
use crate::core::composer::ResponseComposer;
use crate::core::generator::{iso_timestamp, IdentifierGenerator, SystemClock};
use crate::domain::model::{HistoryEntry, RenderedOutput, ServiceDefinition, SessionState};
use crate::domain::ports::{Clock, IdentifierSource};
use crate::utils::error::{Result, SimulatorError};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-session state machine: `Closed` until a service panel is opened, then
/// `Open(service)` while commands execute against it. Owns its state
/// exclusively; the catalog is shared and read-only, so independent sessions
/// never interfere.
pub struct SessionController<C: Clock = SystemClock, I: IdentifierSource = IdentifierGenerator> {
    catalog: Arc<ServiceCatalog>,
    clock: C,
    identifiers: I,
    state: SessionState,
}

impl SessionController {
    pub fn new(catalog: Arc<ServiceCatalog>) -> Self {
        Self::with_parts(catalog, SystemClock, IdentifierGenerator::new())
    }
}

impl<C: Clock, I: IdentifierSource> SessionController<C, I> {
    pub fn with_parts(catalog: Arc<ServiceCatalog>, clock: C, identifiers: I) -> Self {
        Self {
            catalog,
            clock,
            identifiers,
            state: SessionState::default(),
        }
    }

    /// Opens a service panel. Allowed from any state; opening replaces the
    /// current panel and clears history. Unknown ids leave state untouched.
    pub fn open_service(&mut self, id: &str) -> Result<()> {
        self.catalog.get_service(id)?;

        tracing::debug!(service = id, "opening service panel");
        self.state.open_service = Some(id.to_string());
        self.state.history.clear();
        Ok(())
    }

    /// Executes one command of the open service: generates fresh identifiers,
    /// renders the template, appends to history, returns the output. On any
    /// error the session state is left unchanged.
    pub fn execute_command(&mut self, name: &str) -> Result<RenderedOutput> {
        let service_id = self
            .state
            .open_service
            .clone()
            .ok_or(SimulatorError::NoServiceOpen)?;

        let command = self
            .catalog
            .get_service(&service_id)?
            .command(name)
            .ok_or_else(|| SimulatorError::UnknownCommand {
                service: service_id.clone(),
                command: name.to_string(),
            })?
            .clone();

        let mut identifiers = HashMap::with_capacity(command.identifiers.len());
        for spec in &command.identifiers {
            identifiers.insert(spec.field.clone(), self.identifiers.generate(spec));
        }

        let instant = self.clock.now();
        let output = ResponseComposer::compose(&command, &identifiers, instant)?;

        tracing::debug!(service = %service_id, command = name, "command executed");
        self.state.history.push(HistoryEntry {
            command: name.to_string(),
            output: output.clone(),
            executed_at: iso_timestamp(instant),
        });

        Ok(output)
    }

    /// Returns to the catalog view. Valid from any state; a closed session
    /// retains no command memory.
    pub fn close_service(&mut self) {
        if let Some(service) = self.state.open_service.take() {
            tracing::debug!(%service, "closing service panel");
        }
        self.state.history.clear();
    }

    pub fn open_service_id(&self) -> Option<&str> {
        self.state.open_service.as_deref()
    }

    /// Definition of the currently open service, if any.
    pub fn open_service_def(&self) -> Option<&ServiceDefinition> {
        self.state
            .open_service
            .as_deref()
            .and_then(|id| self.catalog.get_service(id).ok())
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }
}
