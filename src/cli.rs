use agentlog::config::ColorChoice;
use agentlog::render::Theme;
use clap::Parser;
use std::path::PathBuf;

/// Render a coding agent's session log as markdown in the terminal
#[derive(Debug, Parser)]
#[command(name = "agentlog")]
#[command(version)]
#[command(about = "Render a coding agent's session log as markdown", long_about = None)]
pub struct Args {
    /// Log to read: a file path, `-` for stdin, or an http(s) URL
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Keep polling and rendering new output until the agent finishes
    #[arg(short = 'f', long = "follow")]
    pub follow: bool,

    /// Seconds between polls while following (default: config or 5)
    #[arg(long = "interval", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// When to use colors (default: config or auto)
    #[arg(long = "color", value_enum)]
    pub color: Option<ColorChoice>,

    /// Syntax highlighting theme (default: config or dark)
    #[arg(long = "theme", value_enum)]
    pub theme: Option<Theme>,

    /// Wrap width for rendered markdown (default: terminal width)
    #[arg(long = "width")]
    pub width: Option<usize>,

    /// Print the markdown source instead of rendering it
    #[arg(long = "raw")]
    pub raw: bool,

    /// Bearer token for HTTP sources
    #[arg(long = "token", env = "AGENTLOG_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config file (default: <config dir>/config.toml)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}
