use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ProjsyncError;
use crate::registrar::CommandRegistrar;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "PROJSYNC_CONFIG";

/// Project tool invoked when nothing else is configured
pub const DEFAULT_PROGRAM: &str = "gtd";

/// Sub-command used to register a project
pub const DEFAULT_SUBCOMMAND: &str = "add";

/// User configuration stored in ~/.config/projsync/config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjsyncConfig {
    /// Default log filter when RUST_LOG is unset (e.g. "warn", "projsync=debug")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub registrar: RegistrarConfig,
}

/// How to reach the external project tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    /// When false, registrations are logged and skipped
    pub enabled: bool,
    pub program: String,
    pub subcommand: String,
    /// Extra arguments placed before the sub-command
    pub args: Vec<String>,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: DEFAULT_PROGRAM.to_string(),
            subcommand: DEFAULT_SUBCOMMAND.to_string(),
            args: Vec::new(),
        }
    }
}

impl ProjsyncConfig {
    /// Build the command registrar this config describes
    pub fn registrar_command(&self) -> Result<CommandRegistrar, ProjsyncError> {
        let registrar = &self.registrar;
        if registrar.program.trim().is_empty() {
            return Err(ProjsyncError::InvalidConfig(
                "registrar.program must not be empty".to_string(),
            ));
        }
        if registrar.subcommand.trim().is_empty() {
            return Err(ProjsyncError::InvalidConfig(
                "registrar.subcommand must not be empty".to_string(),
            ));
        }
        Ok(CommandRegistrar::new(&registrar.program, &registrar.subcommand)
            .with_args(registrar.args.iter().cloned()))
    }
}

/// Load config from `path`. A missing file is not an error.
pub fn load_config(path: &Path) -> Result<Option<ProjsyncConfig>, ProjsyncError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let config: ProjsyncConfig = toml::from_str(&content)?;
    Ok(Some(config))
}

/// Save config to `path`, creating parent directories
pub fn save_config(path: &Path, config: &ProjsyncConfig) -> Result<(), ProjsyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Where the config file lives when no override is given.
///
/// Resolution order:
/// 1. PROJSYNC_CONFIG
/// 2. $XDG_CONFIG_HOME/projsync/config.toml
/// 3. $HOME/.config/projsync/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    config_path_from(|key| std::env::var_os(key).map(PathBuf::from))
}

fn config_path_from<F>(var: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let non_empty = |key: &str| var(key).filter(|p| !p.as_os_str().is_empty());

    if let Some(path) = non_empty(CONFIG_ENV) {
        return Some(path);
    }
    if let Some(dir) = non_empty("XDG_CONFIG_HOME") {
        return Some(dir.join("projsync").join("config.toml"));
    }
    non_empty("HOME").map(|home| home.join(".config").join("projsync").join("config.toml"))
}
