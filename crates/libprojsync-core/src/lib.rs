//! Core library for projsync.
//!
//! projsync runs as a task manager's on-add / on-modify hook: it echoes the
//! task back to the host and, when the task names a project, registers that
//! project with an external project tool.

pub mod config;
pub mod error;
pub mod hook;
pub mod host;
pub mod install;
pub mod registrar;
pub mod task;

pub use error::ProjsyncError;
pub use hook::{HookAdapter, HookKind, HookOutcome};
pub use host::HostContext;
pub use registrar::{CommandRegistrar, DryRunRegistrar, MockRegistrar, ProjectRegistrar};
pub use task::TaskRecord;
