use anyhow::Context;
use std::env;
use std::path::PathBuf;

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = env::var_os("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home))
}

fn agentlog_home() -> Option<PathBuf> {
    env::var_os("AGENTLOG_HOME").map(PathBuf::from)
}

/// Directory holding `config.toml`. Nothing is created; a missing directory
/// simply means no config.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    if let Some(base) = agentlog_home() {
        return Ok(base.join("config"));
    }

    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Ok(xdg.join("agentlog"));
    }

    Ok(home_dir()?.join(".config").join("agentlog"))
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
