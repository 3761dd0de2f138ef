//! Arguments the host passes to every hook invocation.
//!
//! Hook API version 2 appends `key:value` tokens such as `api:2`,
//! `command:add` or `rc:/home/me/.taskrc` after the hook path. They only
//! feed diagnostics here.

use serde::Serialize;

/// Hook API version this crate implements
pub const SUPPORTED_API: &str = "2";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
    /// Original command line of the host, as one string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Host sub-command that triggered the hook (add, modify, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HostContext {
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ctx = HostContext::default();
        for token in tokens {
            let Some((key, value)) = token.as_ref().split_once(':') else {
                continue;
            };
            let slot = match key {
                "api" => &mut ctx.api,
                "args" => &mut ctx.args,
                "command" => &mut ctx.command,
                "rc" => &mut ctx.rc,
                "data" => &mut ctx.data,
                "version" => &mut ctx.version,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        ctx
    }

    /// True unless the host declared an API version other than ours
    pub fn api_supported(&self) -> bool {
        self.api.as_deref().map_or(true, |api| api == SUPPORTED_API)
    }

    pub fn is_empty(&self) -> bool {
        *self == HostContext::default()
    }
}
