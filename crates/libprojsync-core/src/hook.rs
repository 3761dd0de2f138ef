//! The on-add / on-modify hook protocol.
//!
//! The host writes task JSON lines to the hook's stdin and reads exactly one
//! task line back from stdout. The project side effect runs before anything
//! is written, so a failed registration never leaves a task line behind.

use std::fmt;
use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::ProjsyncError;
use crate::registrar::ProjectRegistrar;
use crate::task::TaskRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// One line in: the new task
    OnAdd,
    /// Two lines in: the old task, then the new task
    OnModify,
}

impl HookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::OnAdd => "on-add",
            HookKind::OnModify => "on-modify",
        }
    }

    /// Number of task lines the host sends for this event
    pub fn input_lines(&self) -> usize {
        match self {
            HookKind::OnAdd => 1,
            HookKind::OnModify => 2,
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookKind {
    type Err = ProjsyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-add" => Ok(HookKind::OnAdd),
            "on-modify" => Ok(HookKind::OnModify),
            other => Err(ProjsyncError::InvalidConfig(format!(
                "unknown hook '{}', expected on-add or on-modify",
                other
            ))),
        }
    }
}

/// Result of a successful hook run
#[derive(Debug, Clone, PartialEq)]
pub struct HookOutcome {
    /// Task written back to the host
    pub task: TaskRecord,
    /// Project passed to the registrar, if any
    pub registered: Option<String>,
}

/// Read task line `line` (1-based) of a `kind` event from `input`
pub fn read_task<R: BufRead>(
    input: &mut R,
    kind: HookKind,
    line: usize,
) -> Result<TaskRecord, ProjsyncError> {
    let mut buf = String::new();
    let read = input.read_line(&mut buf).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => ProjsyncError::InvalidEncoding { line },
        _ => ProjsyncError::Io(e),
    })?;
    if read == 0 {
        return Err(ProjsyncError::MissingInput {
            expected: kind.input_lines(),
            line,
        });
    }
    TaskRecord::parse(buf.trim_end_matches(['\n', '\r']), line)
}

/// Runs one hook invocation against a registrar
pub struct HookAdapter<R> {
    registrar: R,
}

impl<R: ProjectRegistrar> HookAdapter<R> {
    pub fn new(registrar: R) -> Self {
        Self { registrar }
    }

    /// Consume the event from `input`, sync the project, echo the task to `output`
    pub fn run<I, O>(
        &self,
        kind: HookKind,
        input: &mut I,
        output: &mut O,
    ) -> Result<HookOutcome, ProjsyncError>
    where
        I: BufRead,
        O: Write,
    {
        let task = match kind {
            HookKind::OnAdd => read_task(input, kind, 1)?,
            HookKind::OnModify => {
                let old = read_task(input, kind, 1)?;
                let new = read_task(input, kind, 2)?;
                if old.project() != new.project() {
                    debug!(
                        from = old.project().unwrap_or(""),
                        to = new.project().unwrap_or(""),
                        "project changed"
                    );
                }
                new
            }
        };

        let registered = self.sync_project(kind, &task)?;

        let line = task.to_line()?;
        output.write_all(line.as_bytes())?;
        output.write_all(b"\n")?;
        output.flush()?;

        Ok(HookOutcome { task, registered })
    }

    fn sync_project(
        &self,
        kind: HookKind,
        task: &TaskRecord,
    ) -> Result<Option<String>, ProjsyncError> {
        let Some(project) = task.project() else {
            debug!(hook = %kind, uuid = task.uuid().unwrap_or("-"), "task has no project");
            return Ok(None);
        };

        self.registrar.register(project)?;
        info!(hook = %kind, project, "project registered");
        Ok(Some(project.to_string()))
    }
}
