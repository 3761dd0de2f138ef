use libprojsync_core::config::{save_config, ProjsyncConfig};
use libprojsync_core::ProjsyncError;
use serde::Serialize;

use crate::cli::{Cli, ConfigCommand};
use crate::context::AppContext;
use crate::output::{output_success, print_human};

#[derive(Serialize)]
struct ConfigOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    source: &'static str,
    config: &'a ProjsyncConfig,
}

pub fn run(cli: &Cli, ctx: &AppContext, cmd: ConfigCommand) -> Result<(), ProjsyncError> {
    match cmd {
        ConfigCommand::Show => show(cli, ctx),
        ConfigCommand::Path => path(cli, ctx),
        ConfigCommand::Init { force } => init(cli, ctx, force),
    }
}

fn display_path(ctx: &AppContext) -> Option<String> {
    ctx.config_path
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
}

fn show(cli: &Cli, ctx: &AppContext) -> Result<(), ProjsyncError> {
    let rendered = toml::to_string_pretty(&ctx.config)?;
    print_human(
        cli,
        &format!(
            "# source: {} ({})\n{}",
            display_path(ctx).unwrap_or_else(|| "none".to_string()),
            ctx.source.as_str(),
            rendered.trim_end()
        ),
    );
    output_success(
        cli,
        ConfigOutput {
            path: display_path(ctx),
            source: ctx.source.as_str(),
            config: &ctx.config,
        },
    )
}

fn path(cli: &Cli, ctx: &AppContext) -> Result<(), ProjsyncError> {
    let path = display_path(ctx).ok_or_else(no_config_path)?;
    print_human(cli, &path);
    output_success(
        cli,
        serde_json::json!({
            "path": path,
            "exists": ctx.config_path.as_ref().map_or(false, |p| p.exists()),
        }),
    )
}

fn init(cli: &Cli, ctx: &AppContext, force: bool) -> Result<(), ProjsyncError> {
    let path = ctx.config_path.as_ref().ok_or_else(no_config_path)?;
    let existed = path.exists();
    if existed && !force {
        return Err(ProjsyncError::InvalidConfig(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    save_config(path, &ProjsyncConfig::default())?;
    print_human(cli, &format!("Wrote {}", path.display()));
    output_success(
        cli,
        serde_json::json!({
            "path": path.to_string_lossy(),
            "action": if existed { "updated" } else { "created" },
        }),
    )
}

fn no_config_path() -> ProjsyncError {
    ProjsyncError::InvalidConfig(
        "no config path: pass --config or set PROJSYNC_CONFIG or HOME".to_string(),
    )
}
