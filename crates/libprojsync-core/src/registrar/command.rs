use std::ffi::OsString;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use super::ProjectRegistrar;
use crate::error::ProjsyncError;

/// Registers projects by running `<program> [args..] <subcommand> <project>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRegistrar {
    program: String,
    args: Vec<String>,
    subcommand: String,
}

impl CommandRegistrar {
    pub fn new(program: impl Into<String>, subcommand: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            subcommand: subcommand.into(),
        }
    }

    /// Extra arguments placed before the sub-command
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    /// Full argument vector passed to the program for `project`
    pub fn argv(&self, project: &str) -> Vec<OsString> {
        self.args
            .iter()
            .map(OsString::from)
            .chain([OsString::from(&self.subcommand), OsString::from(project)])
            .collect()
    }

    /// Human-readable command line, for logs
    pub fn display_command(&self, project: &str) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(&self.subcommand);
        parts.push(project);
        parts.join(" ")
    }
}

impl ProjectRegistrar for CommandRegistrar {
    fn register(&self, project: &str) -> Result<(), ProjsyncError> {
        debug!(command = %self.display_command(project), "registering project");

        // stdin is null so the tool cannot swallow the host's remaining input
        let output = Command::new(&self.program)
            .args(self.argv(project))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProjsyncError::RegistrarSpawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(program = %self.program, stdout = %stdout.trim(), "discarding project tool output");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            warn!(program = %self.program, project, status = %output.status, "project tool failed");
            return Err(ProjsyncError::RegistrarFailed {
                program: self.program.clone(),
                project: project.to_string(),
                status: output.status,
                stderr,
            });
        }

        Ok(())
    }
}
