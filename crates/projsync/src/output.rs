//! Machine and human output for the non-hook commands.
//!
//! Hook runs own stdout, so errors always go to stderr, in JSON when `--json`
//! is set.

use libprojsync_core::ProjsyncError;
use serde::Serialize;

use crate::cli::Cli;

/// Bumped whenever the shape of `--json` output changes
pub const SCHEMA_VERSION: u32 = 1;

/// `--json` envelope: `data` on success, `error` on failure
#[derive(Debug, Serialize)]
pub struct JsonResponse<T: Serialize> {
    pub schema_version: u32,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<&'static str>,
}

impl<T: Serialize> JsonResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ok: true,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonResponse<()> {
    pub fn failure(err: &ProjsyncError) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ok: false,
            data: None,
            error: Some(ErrorBody {
                code: err.error_code(),
                message: err.to_string(),
                exit_code: err.exit_code(),
                suggestions: err.suggestions(),
            }),
        }
    }
}

/// Print `data` as a JSON envelope when `--json` is set
pub fn output_success<T: Serialize>(cli: &Cli, data: T) -> Result<(), ProjsyncError> {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonResponse::success(data))?
        );
    }
    Ok(())
}

/// Report `err` on stderr
pub fn output_error(cli: &Cli, err: &ProjsyncError) {
    if cli.json {
        if let Ok(body) = serde_json::to_string_pretty(&JsonResponse::failure(err)) {
            eprintln!("{}", body);
            return;
        }
    }

    eprintln!("error: {}", err);
    let suggestions = err.suggestions();
    if cli.quiet || suggestions.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("Suggestions:");
    for suggestion in suggestions {
        eprintln!("  - {}", suggestion);
    }
}

/// Human-readable line; silent under --json and --quiet
pub fn print_human(cli: &Cli, msg: &str) {
    if !cli.json && !cli.quiet {
        println!("{}", msg);
    }
}
