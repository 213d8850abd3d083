mod cli;

use agentlog::log::LogRenderer;
use agentlog::{app, config, paths, source};
use clap::Parser;
use std::io::IsTerminal;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the rendered log, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => paths::config_path()?,
    };
    let cfg = config::Config::load_optional(&config_path)?.unwrap_or_default();
    tracing::debug!(?config_path, interval = ?cfg.poll_interval_secs, color = ?cfg.color, "resolved config");

    let stdout = std::io::stdout();
    let is_terminal = stdout.is_terminal();
    let color = app::resolve_color(
        args.color.or(cfg.color).unwrap_or_default(),
        is_terminal,
        std::env::var_os("NO_COLOR").is_some(),
    );
    let detected_width = if is_terminal {
        crossterm::terminal::size().ok().map(|(cols, _)| cols)
    } else {
        None
    };
    let width = app::resolve_width(args.width.or(cfg.width), detected_width);
    let theme = args.theme.or(cfg.theme).unwrap_or_default();
    let term = app::build_term(color, args.raw, width, theme);

    let http = source::HttpOptions {
        token: args.token.clone().or_else(|| cfg.http.token.clone()),
        user_agent: cfg.http.user_agent.clone(),
    };
    let source = source::LogSource::parse(&args.source, &http)?;
    let interval = Duration::from_secs(
        args.interval
            .or(cfg.poll_interval_secs)
            .unwrap_or(app::DEFAULT_POLL_INTERVAL_SECS),
    );

    let mut renderer = LogRenderer::new(stdout, std::io::stderr(), term);
    app::cmd_view(source, args.follow, interval, &mut renderer).await
}
