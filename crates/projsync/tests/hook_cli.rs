//! End-to-end tests for the projsync hooks
//!
//! The project tool is replaced by a small shell script that appends its
//! arguments to a log file, prints some chatter, and exits with a chosen code.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use libprojsync_core::config::{save_config, ProjsyncConfig, RegistrarConfig};
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

struct Fixture {
    dir: TempDir,
    log: PathBuf,
    config: PathBuf,
}

impl Fixture {
    fn new(exit_code: i32) -> Self {
        Self::with_subcommand(exit_code, "add")
    }

    fn with_subcommand(exit_code: i32, subcommand: &str) -> Self {
        let dir = tempdir().unwrap();
        let log = dir.path().join("calls.log");
        let script = dir.path().join("project-tool.sh");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\nprintf '%s\\n' \"$*\" >> '{}'\necho 'project tool chatter'\necho 'tool stderr' >&2\nexit {}\n",
                log.display(),
                exit_code
            ),
        )
        .unwrap();

        // Run through `sh` so the freshly written script never needs exec permission
        let config = dir.path().join("config.toml");
        save_config(
            &config,
            &ProjsyncConfig {
                log_level: None,
                registrar: RegistrarConfig {
                    enabled: true,
                    program: "sh".to_string(),
                    subcommand: subcommand.to_string(),
                    args: vec![script.to_string_lossy().to_string()],
                },
            },
        )
        .unwrap();

        Self { dir, log, config }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("projsync").unwrap();
        cmd.env_remove("RUST_LOG")
            .env("PROJSYNC_CONFIG", &self.config)
            .current_dir(self.dir.path());
        cmd
    }

    fn calls(&self) -> Vec<String> {
        read_lines(&self.log)
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(unix)]
#[test]
fn test_on_add_without_project_passes_through() {
    let fx = Fixture::new(0);
    fx.cmd()
        .arg("on-add")
        .write_stdin("{\"description\":\"buy milk\"}\n")
        .assert()
        .success()
        .stdout("{\"description\":\"buy milk\"}\n");
    assert!(fx.calls().is_empty());
}

#[cfg(unix)]
#[test]
fn test_on_add_with_project_registers_once() {
    let fx = Fixture::new(0);
    let task = r#"{"description":"write report","project":"Q3"}"#;
    fx.cmd()
        .arg("on-add")
        .write_stdin(format!("{task}\n"))
        .assert()
        .success()
        .stdout(format!("{task}\n"))
        .stdout(predicate::str::contains("chatter").not());
    assert_eq!(fx.calls(), vec!["add Q3".to_string()]);
}

#[cfg(unix)]
#[test]
fn test_on_add_accepts_host_arguments() {
    let fx = Fixture::new(0);
    let task = r#"{"uuid":"0b1f","status":"pending","description":"plant bulbs","project":"home.garden"}"#;
    fx.cmd()
        .args([
            "on-add",
            "api:2",
            "args:task add plant bulbs project:home.garden",
            "command:add",
            "rc:/home/me/.taskrc",
            "data:/home/me/.task",
            "version:2.6.2",
        ])
        .write_stdin(format!("{task}\n"))
        .assert()
        .success()
        .stdout(format!("{task}\n"));
    assert_eq!(fx.calls(), vec!["add home.garden".to_string()]);
}

#[cfg(unix)]
#[test]
fn test_on_modify_emits_new_state() {
    let fx = Fixture::new(0);
    let old = r#"{"uuid":"0b1f","description":"report","project":"Q2"}"#;
    let new = r#"{"uuid":"0b1f","description":"report","project":"Q3"}"#;
    fx.cmd()
        .arg("on-modify")
        .write_stdin(format!("{old}\n{new}\n"))
        .assert()
        .success()
        .stdout(format!("{new}\n"));
    assert_eq!(fx.calls(), vec!["add Q3".to_string()]);
}

#[cfg(unix)]
#[test]
fn test_on_modify_ignores_old_project() {
    let fx = Fixture::new(0);
    let old = r#"{"description":"report","project":"Q2"}"#;
    let new = r#"{"description":"report"}"#;
    fx.cmd()
        .arg("on-modify")
        .write_stdin(format!("{old}\n{new}\n"))
        .assert()
        .success()
        .stdout(format!("{new}\n"));
    assert!(fx.calls().is_empty());
}

#[cfg(unix)]
#[test]
fn test_failing_project_tool_fails_hook() {
    let fx = Fixture::new(3);
    fx.cmd()
        .arg("on-add")
        .write_stdin("{\"description\":\"x\",\"project\":\"Q3\"}\n")
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("tool stderr"));
    assert_eq!(fx.calls(), vec!["add Q3".to_string()]);
}

#[cfg(unix)]
#[test]
fn test_failing_project_tool_json_error() {
    let fx = Fixture::new(1);
    fx.cmd()
        .args(["--json", "on-add"])
        .write_stdin("{\"project\":\"Q3\"}\n")
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("\"code\": \"registrar_failed\""));
}

#[cfg(unix)]
#[test]
fn test_failure_without_project_still_succeeds() {
    let fx = Fixture::new(1);
    fx.cmd()
        .arg("on-add")
        .write_stdin("{\"description\":\"no project here\"}\n")
        .assert()
        .success()
        .stdout("{\"description\":\"no project here\"}\n");
    assert!(fx.calls().is_empty());
}

#[cfg(unix)]
#[test]
fn test_dry_run_skips_project_tool() {
    let fx = Fixture::new(1);
    fx.cmd()
        .args(["--dry-run", "on-add"])
        .write_stdin("{\"project\":\"Q3\"}\n")
        .assert()
        .success()
        .stdout("{\"project\":\"Q3\"}\n");
    assert!(fx.calls().is_empty());
}

#[cfg(unix)]
#[test]
fn test_configured_subcommand_is_used() {
    let fx = Fixture::with_subcommand(0, "insert");
    fx.cmd()
        .arg("on-add")
        .write_stdin("{\"project\":\"Q3\"}\n")
        .assert()
        .success();
    assert_eq!(fx.calls(), vec!["insert Q3".to_string()]);

    fx.cmd()
        .args(["--subcommand", "add", "on-add"])
        .write_stdin("{\"project\":\"Q4\"}\n")
        .assert()
        .success();
    assert_eq!(fx.calls(), vec!["insert Q3".to_string(), "add Q4".to_string()]);
}

#[test]
fn test_missing_project_tool() {
    let fx = Fixture::new(0);
    fx.cmd()
        .args(["--program", "/nonexistent/projsync-project-tool", "on-add"])
        .write_stdin("{\"project\":\"Q3\"}\n")
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_invalid_json_is_fatal() {
    let fx = Fixture::new(0);
    fx.cmd()
        .arg("on-add")
        .write_stdin("{\"description\": \n")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid task on line 1"));
    assert!(fx.calls().is_empty());
}

#[test]
fn test_non_string_project_is_fatal() {
    let fx = Fixture::new(0);
    fx.cmd()
        .arg("on-add")
        .write_stdin("{\"description\":\"x\",\"project\":42}\n")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("`project` must be a string"));
}

#[test]
fn test_on_modify_missing_new_state() {
    let fx = Fixture::new(0);
    fx.cmd()
        .arg("on-modify")
        .write_stdin("{\"description\":\"x\"}\n")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing input"));
}

#[test]
fn test_debug_log_reports_config_source() {
    let fx = Fixture::new(0);
    fx.cmd()
        .args(["--log-level", "debug", "--dry-run", "on-add"])
        .write_stdin("{\"description\":\"x\"}\n")
        .assert()
        .success()
        .stdout("{\"description\":\"x\"}\n")
        .stderr(predicate::str::contains("configuration resolved"))
        .stderr(predicate::str::contains("source=\"default\""));
}

#[test]
fn test_invalid_utf8_is_input_error() {
    let fx = Fixture::new(0);
    fx.cmd()
        .arg("on-add")
        .write_stdin(b"{\"description\":\"\xff\"}\n".to_vec())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn test_install_writes_hook_scripts() {
    let fx = Fixture::new(0);
    let hooks_dir = fx.dir.path().join("hooks");
    let hooks_arg = hooks_dir.to_string_lossy().to_string();

    fx.cmd()
        .args(["install", "--hooks-dir", hooks_arg.as_str(), "--binary", "projsync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let on_add = std::fs::read_to_string(hooks_dir.join("on-add.projsync")).unwrap();
    assert!(on_add.contains("exec \"$PROJSYNC_BIN\" on-add \"$@\""));
    assert!(hooks_dir.join("on-modify.projsync").exists());

    fx.cmd()
        .args([
            "--json",
            "install",
            "--hooks-dir",
            hooks_arg.as_str(),
            "--binary",
            "projsync",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ok\": true"))
        .stdout(predicate::str::contains("\"action\": \"unchanged\""));
}

#[test]
fn test_config_show_and_init() {
    let fx = Fixture::new(0);
    fx.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("program = \"sh\""));

    let fresh = fx.dir.path().join("fresh").join("config.toml");
    let fresh_arg = fresh.to_string_lossy().to_string();
    fx.cmd()
        .args(["--config", fresh_arg.as_str(), "config", "init"])
        .assert()
        .success();
    let written = std::fs::read_to_string(&fresh).unwrap();
    assert!(written.contains("program = \"gtd\""));
    assert!(written.contains("subcommand = \"add\""));

    fx.cmd()
        .args(["--config", fresh_arg.as_str(), "config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    fx.cmd()
        .args(["--config", fresh_arg.as_str(), "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
