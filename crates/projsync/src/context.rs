use std::path::PathBuf;

use libprojsync_core::config::{default_config_path, load_config, ProjsyncConfig};
use libprojsync_core::{DryRunRegistrar, ProjectRegistrar, ProjsyncError};

use crate::cli::{Cli, Command, ConfigCommand};

/// Where the effective configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// --config flag
    Flag,
    /// PROJSYNC_CONFIG or the per-user default location
    Default,
    /// No file found; built-in defaults
    BuiltIn,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::Flag => "flag",
            ConfigSource::Default => "default",
            ConfigSource::BuiltIn => "built_in",
        }
    }
}

/// Effective settings for one invocation
#[derive(Debug)]
pub struct AppContext {
    pub config_path: Option<PathBuf>,
    pub source: ConfigSource,
    pub config: ProjsyncConfig,
}

impl AppContext {
    /// Resolve configuration from CLI options.
    ///
    /// Resolution order:
    /// 1. --config <path> (must exist, except for `config init`)
    /// 2. PROJSYNC_CONFIG, XDG_CONFIG_HOME or HOME default location
    /// 3. Built-in defaults
    ///
    /// --program and --subcommand override whatever was loaded.
    pub fn resolve(cli: &Cli) -> Result<Self, ProjsyncError> {
        let (config_path, source, config) = if let Some(ref path) = cli.config {
            let config = match load_config(path)? {
                Some(config) => config,
                None if creates_config(cli) => ProjsyncConfig::default(),
                None => {
                    return Err(ProjsyncError::InvalidConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )))
                }
            };
            (Some(path.clone()), ConfigSource::Flag, config)
        } else {
            let path = default_config_path();
            match path.as_deref().map(load_config).transpose()?.flatten() {
                Some(config) => (path, ConfigSource::Default, config),
                None => (path, ConfigSource::BuiltIn, ProjsyncConfig::default()),
            }
        };

        let mut ctx = Self {
            config_path,
            source,
            config,
        };
        ctx.apply_overrides(cli);
        Ok(ctx)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(ref program) = cli.program {
            self.config.registrar.program = program.clone();
        }
        if let Some(ref subcommand) = cli.registrar_subcommand {
            self.config.registrar.subcommand = subcommand.clone();
        }
    }

    /// Registrar for hook runs; a dry run never spawns the project tool
    pub fn registrar(&self, dry_run: bool) -> Result<Box<dyn ProjectRegistrar>, ProjsyncError> {
        let command = self.config.registrar_command()?;
        if dry_run || !self.config.registrar.enabled {
            Ok(Box::new(DryRunRegistrar::new(command)))
        } else {
            Ok(Box::new(command))
        }
    }
}

fn creates_config(cli: &Cli) -> bool {
    matches!(
        cli.command,
        Command::Config {
            cmd: ConfigCommand::Init { .. }
        }
    )
}
