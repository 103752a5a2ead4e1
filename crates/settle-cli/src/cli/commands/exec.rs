//! `settle exec -- <cmd>` – wait until a command exits 0.

use anyhow::Result;
use settle_core::config::PollConfig;
use settle_core::failure::{BoxError, DomainError, ExecutionError};
use settle_core::poll::Poller;
use std::process::Stdio;
use tokio::process::Command;

pub async fn run_exec(cfg: &PollConfig, command: &[String]) -> Result<bool> {
    let Some((program, args)) = command.split_first() else {
        anyhow::bail!("no command given");
    };
    tracing::info!(
        program = %program,
        timeout_ms = cfg.timeout_ms,
        debounce = cfg.debounce,
        "waiting for command to succeed"
    );

    let settled = Poller::from_config(cfg)
        .run(move || check(program, args))
        .await?;
    if settled {
        println!("settled: {}", command.join(" "));
    } else {
        println!("timed out after {}ms: {}", cfg.timeout_ms, command.join(" "));
    }
    Ok(settled)
}

/// One check: run the command to completion with output discarded.
///
/// A non-zero exit is "not yet"; failing to spawn is an I/O failure; a
/// child killed by a signal never produced an answer and is reported as an
/// execution failure.
pub(crate) async fn check(program: &str, args: &[String]) -> Result<bool, BoxError> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await?;

    match status.code() {
        Some(code) => {
            tracing::trace!(code, "check command exited");
            Ok(code == 0)
        }
        None => Err(ExecutionError::new(DomainError::new(format!(
            "`{program}` terminated by signal"
        )))
        .into()),
    }
}
