mod cli;
mod commands;
mod context;
mod logging;
mod output;

use clap::Parser;
use cli::{Cli, Command};
use context::AppContext;
use libprojsync_core::{HookKind, ProjsyncError};
use tracing::debug;

fn main() {
    let cli = Cli::parse();

    let ctx = AppContext::resolve(&cli);

    // Logging comes up even when the config is broken, so that error is reported too
    let level = cli
        .log_level
        .clone()
        .or_else(|| ctx.as_ref().ok().and_then(|c| c.config.log_level.clone()));
    logging::init(level.as_deref());

    if let Ok(ctx) = &ctx {
        debug!(
            path = ?ctx.config_path,
            source = ctx.source.as_str(),
            "configuration resolved"
        );
    }

    let result = ctx.and_then(|ctx| run_command(&cli, &ctx));

    if let Err(e) = result {
        output::output_error(&cli, &e);
        std::process::exit(e.exit_code());
    }
}

fn run_command(cli: &Cli, ctx: &AppContext) -> Result<(), ProjsyncError> {
    match &cli.command {
        Command::OnAdd { host_args } => commands::hook::run(cli, ctx, HookKind::OnAdd, host_args),
        Command::OnModify { host_args } => {
            commands::hook::run(cli, ctx, HookKind::OnModify, host_args)
        }
        Command::Install {
            hooks_dir,
            binary,
            force,
        } => commands::install::run(cli, hooks_dir.clone(), binary.clone(), *force),
        Command::Config { cmd } => commands::config::run(cli, ctx, cmd.clone()),
    }
}
