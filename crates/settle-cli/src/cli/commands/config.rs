//! `settle config` – show where the config lives and what it resolves to.

use anyhow::Result;
use settle_core::config::{self, SettleConfig};

pub fn run_config(cfg: &SettleConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
