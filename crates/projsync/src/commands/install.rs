use std::path::PathBuf;

use libprojsync_core::install::{install_hooks, InstallAction, InstalledHook};
use libprojsync_core::ProjsyncError;
use serde::Serialize;

use crate::cli::Cli;
use crate::output::{output_success, print_human};

#[derive(Serialize)]
struct InstallOutput {
    hooks_dir: String,
    binary: String,
    hooks: Vec<InstalledHook>,
}

pub fn run(
    cli: &Cli,
    hooks_dir: Option<PathBuf>,
    binary: Option<String>,
    force: bool,
) -> Result<(), ProjsyncError> {
    let hooks_dir = match hooks_dir {
        Some(dir) => dir,
        None => default_hooks_dir()?,
    };
    let binary = match binary {
        Some(binary) => binary,
        None => std::env::current_exe()?.to_string_lossy().to_string(),
    };

    let hooks = install_hooks(&hooks_dir, &binary, force)?;

    for hook in &hooks {
        print_human(
            cli,
            &format!("{:<9} {}", hook.action.as_str(), hook.path.display()),
        );
    }
    if hooks.iter().any(|h| h.action == InstallAction::Skipped) {
        print_human(cli, "Existing hooks were left in place; re-run with --force to replace them");
    }

    output_success(
        cli,
        InstallOutput {
            hooks_dir: hooks_dir.to_string_lossy().to_string(),
            binary,
            hooks,
        },
    )
}

/// The host's default hooks directory, ~/.task/hooks
fn default_hooks_dir() -> Result<PathBuf, ProjsyncError> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".task").join("hooks"))
        .ok_or_else(|| {
            ProjsyncError::InvalidConfig(
                "cannot determine the hooks directory: HOME is not set, pass --hooks-dir".to_string(),
            )
        })
}
