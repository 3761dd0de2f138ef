use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "projsync",
    about = "Task hooks that keep an external project list in sync",
    version
)]
pub struct Cli {
    /// Output in JSON format (non-hook commands and errors)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress human-readable output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Config file (default: $PROJSYNC_CONFIG, then ~/.config/projsync/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project tool to run instead of the configured one
    #[arg(long, global = true)]
    pub program: Option<String>,

    /// Sub-command passed to the project tool (default: add)
    #[arg(long = "subcommand", global = true)]
    pub registrar_subcommand: Option<String>,

    /// Log what would be registered without running the project tool
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log filter (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Hook for new tasks: reads one task line, writes it back
    OnAdd {
        /// Arguments passed by the host (api:2 command:add ...)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        host_args: Vec<String>,
    },

    /// Hook for modified tasks: reads old and new task lines, writes the new one back
    OnModify {
        /// Arguments passed by the host (api:2 command:modify ...)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        host_args: Vec<String>,
    },

    /// Install the hook scripts into the host's hooks directory
    Install {
        /// Hooks directory (default: ~/.task/hooks)
        #[arg(long)]
        hooks_dir: Option<PathBuf>,

        /// Binary the scripts should call (default: this executable)
        #[arg(long)]
        binary: Option<String>,

        /// Replace existing hook files that differ
        #[arg(long)]
        force: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Clone, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path in use
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
