use std::process::ExitStatus;

use thiserror::Error;

/// Main error type for projsync operations
#[derive(Debug, Error)]
pub enum ProjsyncError {
    #[error("missing input: expected {expected} task line(s), stream ended before line {line}")]
    MissingInput { expected: usize, line: usize },

    #[error("invalid task on line {line}: {source}")]
    InvalidTaskJson {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid task on line {line}: input is not valid UTF-8")]
    InvalidEncoding { line: usize },

    #[error("invalid task on line {line}: expected a JSON object, got {found}")]
    NotAnObject { line: usize, found: &'static str },

    #[error("invalid task on line {line}: `project` must be a string, got {found}")]
    InvalidProject { line: usize, found: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to run `{program}`: {source}")]
    RegistrarSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` failed to register project '{project}' ({status}){}", stderr_suffix(.stderr))]
    RegistrarFailed {
        program: String,
        project: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("registrar failed for project '{project}': {message}")]
    Registrar { project: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl ProjsyncError {
    /// Stable error code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ProjsyncError::MissingInput { .. } => "missing_input",
            ProjsyncError::InvalidTaskJson { .. }
            | ProjsyncError::InvalidEncoding { .. }
            | ProjsyncError::NotAnObject { .. }
            | ProjsyncError::InvalidProject { .. } => "invalid_task",
            ProjsyncError::InvalidConfig(_) => "invalid_config",
            ProjsyncError::RegistrarSpawn { .. } => "registrar_unavailable",
            ProjsyncError::RegistrarFailed { .. } | ProjsyncError::Registrar { .. } => {
                "registrar_failed"
            }
            ProjsyncError::Io(_) => "io_error",
            ProjsyncError::Json(_) => "internal_error",
            ProjsyncError::TomlParse(_) => "invalid_config",
            ProjsyncError::TomlSerialize(_) => "internal_error",
        }
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            ProjsyncError::MissingInput { .. }
            | ProjsyncError::InvalidTaskJson { .. }
            | ProjsyncError::InvalidEncoding { .. }
            | ProjsyncError::NotAnObject { .. }
            | ProjsyncError::InvalidProject { .. }
            | ProjsyncError::InvalidConfig(_)
            | ProjsyncError::TomlParse(_) => 2,
            ProjsyncError::RegistrarFailed { .. } | ProjsyncError::Registrar { .. } => 3,
            ProjsyncError::RegistrarSpawn { .. } => 4,
            ProjsyncError::Io(_) => 5,
            _ => 1,
        }
    }

    /// Actionable suggestions for fixing the error
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            ProjsyncError::MissingInput { .. } => vec![
                "on-add expects one task line on stdin, on-modify expects two",
            ],
            ProjsyncError::InvalidProject { .. } => vec![
                "Set the task's project to a plain string value",
            ],
            ProjsyncError::RegistrarSpawn { .. } => vec![
                "Check that the project tool is installed and on your PATH",
                "Or set `registrar.program` in the config file",
                "Run 'projsync config path' to see which config file is used",
            ],
            ProjsyncError::RegistrarFailed { .. } => vec![
                "Run the project tool by hand to see its full output",
                "Use 'projsync --dry-run' to bypass the project tool",
            ],
            ProjsyncError::InvalidConfig(_) | ProjsyncError::TomlParse(_) => vec![
                "Run 'projsync config show' to inspect the effective configuration",
            ],
            _ => vec![],
        }
    }

    /// Whether this error came from reading or validating hook input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ProjsyncError::MissingInput { .. }
                | ProjsyncError::InvalidTaskJson { .. }
                | ProjsyncError::InvalidEncoding { .. }
                | ProjsyncError::NotAnObject { .. }
                | ProjsyncError::InvalidProject { .. }
        )
    }
}
