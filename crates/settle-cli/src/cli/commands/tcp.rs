//! `settle tcp <host:port>` – wait until an endpoint accepts TCP connections.

use anyhow::Result;
use settle_core::config::PollConfig;
use settle_core::failure::BoxError;
use settle_core::poll::Poller;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;

pub async fn run_tcp(cfg: &PollConfig, addr: &str, connect_timeout_ms: u64) -> Result<bool> {
    let connect_timeout = Duration::from_millis(connect_timeout_ms);
    tracing::info!(
        addr,
        timeout_ms = cfg.timeout_ms,
        debounce = cfg.debounce,
        "waiting for endpoint to accept connections"
    );

    let settled = Poller::from_config(cfg)
        .run(move || check(addr, connect_timeout))
        .await?;
    if settled {
        println!("settled: {addr} accepts connections");
    } else {
        println!("timed out after {}ms: {addr}", cfg.timeout_ms);
    }
    Ok(settled)
}

/// One check: a connect that is refused or slow means "not yet"; any other
/// I/O error (bad address, DNS failure) is a real failure.
pub(crate) async fn check(addr: &str, connect_timeout: Duration) -> Result<bool, BoxError> {
    match tokio::time::timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => Ok(true),
        Ok(Err(e)) if not_ready(&e) => {
            tracing::trace!(addr, error = %e, "endpoint not ready");
            Ok(false)
        }
        Ok(Err(e)) => Err(e.into()),
        Err(_elapsed) => Ok(false),
    }
}

fn not_ready(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::TimedOut
    )
}
