use std::io;

use libprojsync_core::host::SUPPORTED_API;
use libprojsync_core::{HookAdapter, HookKind, HostContext, ProjsyncError};
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::context::AppContext;

/// Run one hook invocation over stdin/stdout
pub fn run(
    cli: &Cli,
    ctx: &AppContext,
    kind: HookKind,
    host_args: &[String],
) -> Result<(), ProjsyncError> {
    let host = HostContext::parse(host_args);
    if !host.is_empty() {
        debug!(hook = %kind, ?host, "host context");
    }
    if !host.api_supported() {
        warn!(
            api = host.api.as_deref().unwrap_or(""),
            supported = SUPPORTED_API,
            "host declared an unexpected hook API version"
        );
    }

    let adapter = HookAdapter::new(ctx.registrar(cli.dry_run)?);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = adapter.run(kind, &mut stdin.lock(), &mut stdout.lock())?;

    debug!(
        hook = %kind,
        uuid = outcome.task.uuid().unwrap_or("-"),
        registered = outcome.registered.as_deref().unwrap_or("-"),
        "hook finished"
    );
    Ok(())
}
