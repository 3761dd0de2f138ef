//! Hook installation: writes the host's hook scripts.
//!
//! The host discovers hooks by file name prefix (`on-add*`, `on-modify*`)
//! inside its hooks directory and runs them with its `key:value` arguments.
//! Each script forwards those arguments to the matching `projsync` command.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::ProjsyncError;
use crate::hook::HookKind;

/// Hooks written by [`install_hooks`]
pub const HOOKS: [HookKind; 2] = [HookKind::OnAdd, HookKind::OnModify];

/// What happened to one hook file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallAction {
    Created,
    Updated,
    Unchanged,
    /// A different file already exists and `force` was not given
    Skipped,
}

impl InstallAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallAction::Created => "created",
            InstallAction::Updated => "updated",
            InstallAction::Unchanged => "unchanged",
            InstallAction::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledHook {
    pub hook: &'static str,
    pub path: PathBuf,
    pub action: InstallAction,
}

/// File name of the script for `kind`
pub fn script_name(kind: HookKind) -> String {
    format!("{}.projsync", kind.as_str())
}

/// Render the script body for `kind`
pub fn render_script(kind: HookKind, binary_path: &str) -> String {
    format!(
        r#"#!/bin/sh
# projsync {hook} hook: keeps the project list in sync with tasks
if [ -z "${{PROJSYNC_BIN:-}}" ]; then
    PROJSYNC_BIN={binary}
fi
exec "$PROJSYNC_BIN" {hook} "$@"
"#,
        hook = kind.as_str(),
        binary = shell_quote(binary_path),
    )
}

/// Single-quoted sh literal; the shell expands nothing inside it
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Install both hook scripts into `hooks_dir`, creating it if needed.
///
/// Idempotent: identical scripts are left untouched. A foreign file with the
/// same name is only replaced when `force` is set.
pub fn install_hooks(
    hooks_dir: &Path,
    binary_path: &str,
    force: bool,
) -> Result<Vec<InstalledHook>, ProjsyncError> {
    if binary_path.trim().is_empty() {
        return Err(ProjsyncError::InvalidConfig(
            "binary path for hook scripts must not be empty".to_string(),
        ));
    }
    fs::create_dir_all(hooks_dir)?;

    let mut installed = Vec::with_capacity(HOOKS.len());
    for kind in HOOKS {
        let path = hooks_dir.join(script_name(kind));
        let body = render_script(kind, binary_path);

        let action = match fs::read_to_string(&path) {
            Ok(existing) if existing == body => InstallAction::Unchanged,
            Ok(_) if !force => InstallAction::Skipped,
            Ok(_) => InstallAction::Updated,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => InstallAction::Created,
            Err(e) => return Err(e.into()),
        };

        if matches!(action, InstallAction::Created | InstallAction::Updated) {
            fs::write(&path, &body)?;
            make_executable(&path)?;
        }
        debug!(path = %path.display(), action = action.as_str(), "hook script");

        installed.push(InstalledHook {
            hook: kind.as_str(),
            path,
            action,
        });
    }

    Ok(installed)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), ProjsyncError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), ProjsyncError> {
    Ok(())
}
