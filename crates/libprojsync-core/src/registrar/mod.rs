//! The external project registry, behind a trait so hooks can run without
//! spawning processes.

pub mod command;
pub mod mock;

use tracing::info;

use crate::error::ProjsyncError;

pub use command::CommandRegistrar;
pub use mock::MockRegistrar;

/// Something that can record a project name in an external project list
pub trait ProjectRegistrar {
    /// Register `project`. Must block until the registry has been updated.
    fn register(&self, project: &str) -> Result<(), ProjsyncError>;
}

impl<R: ProjectRegistrar + ?Sized> ProjectRegistrar for &R {
    fn register(&self, project: &str) -> Result<(), ProjsyncError> {
        (**self).register(project)
    }
}

impl<R: ProjectRegistrar + ?Sized> ProjectRegistrar for Box<R> {
    fn register(&self, project: &str) -> Result<(), ProjsyncError> {
        (**self).register(project)
    }
}

/// Logs the command it would run and reports success
#[derive(Debug, Clone)]
pub struct DryRunRegistrar {
    command: CommandRegistrar,
}

impl DryRunRegistrar {
    pub fn new(command: CommandRegistrar) -> Self {
        Self { command }
    }
}

impl ProjectRegistrar for DryRunRegistrar {
    fn register(&self, project: &str) -> Result<(), ProjsyncError> {
        info!(
            command = %self.command.display_command(project),
            "dry run: skipping project registration"
        );
        Ok(())
    }
}
