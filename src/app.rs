use crate::config::ColorChoice;
use crate::log::{decode_snapshot, Follower, LogRenderer};
use crate::render::{ColorScheme, PlainMarkdown, TermContext, TerminalMarkdown, Theme};
use crate::source::{poller, LogSource};
use std::io::Write;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

const DEFAULT_WIDTH: usize = 80;
const MAX_DETECTED_WIDTH: usize = 120;

pub fn resolve_color(choice: ColorChoice, is_terminal: bool, no_color: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => is_terminal && !no_color,
    }
}

/// An explicit width wins; a detected terminal width is capped to keep
/// prose readable on wide screens.
pub fn resolve_width(explicit: Option<usize>, detected: Option<u16>) -> usize {
    explicit
        .or_else(|| detected.map(|w| (w as usize).min(MAX_DETECTED_WIDTH)))
        .unwrap_or(DEFAULT_WIDTH)
}

pub fn build_term(color: bool, raw: bool, width: usize, theme: Theme) -> TermContext {
    let colors = ColorScheme::new(color);
    if raw {
        return TermContext::new(colors, Box::new(PlainMarkdown));
    }
    TermContext::new(colors, Box::new(TerminalMarkdown::new(width, theme, colors)))
}

/// Renders a log once, or follows it until the agent finishes.
pub async fn cmd_view<W: Write, E: Write>(
    source: LogSource,
    follow: bool,
    interval: Duration,
    renderer: &mut LogRenderer<W, E>,
) -> anyhow::Result<()> {
    if follow {
        if source.is_stdin() {
            anyhow::bail!("cannot follow a log read from stdin");
        }
        tracing::debug!(?source, ?interval, "following log");
        return Follower::new().follow(renderer, poller(source, interval)).await;
    }

    let bytes = source.fetch().await?;
    let finished = renderer.render(decode_snapshot(&bytes).trim())?;
    tracing::debug!(finished, "rendered log");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "data: {\"object\":\"chat.completion.chunk\",\"choices\":[{\"delta\":{\"role\":\"assistant\",\"content\":\"Hello\"}}]}";
    const STOP: &str = "data: {\"object\":\"chat.completion.chunk\",\"choices\":[{\"finish_reason\":\"stop\",\"delta\":{}}]}";

    #[test]
    fn color_resolution() {
        assert!(resolve_color(ColorChoice::Always, false, true));
        assert!(!resolve_color(ColorChoice::Never, true, false));
        assert!(resolve_color(ColorChoice::Auto, true, false));
        assert!(!resolve_color(ColorChoice::Auto, true, true));
        assert!(!resolve_color(ColorChoice::Auto, false, false));
    }

    #[test]
    fn width_resolution() {
        assert_eq!(resolve_width(Some(200), Some(90)), 200);
        assert_eq!(resolve_width(None, Some(90)), 90);
        assert_eq!(resolve_width(None, Some(300)), 120);
        assert_eq!(resolve_width(None, None), 80);
    }

    #[tokio::test]
    async fn view_renders_file_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HELLO}").unwrap();

        let mut renderer = LogRenderer::new(Vec::new(), Vec::new(), build_term(false, true, 80, Theme::None));
        cmd_view(
            LogSource::File(file.path().to_path_buf()),
            false,
            Duration::from_secs(1),
            &mut renderer,
        )
        .await
        .unwrap();

        let (out, _) = renderer.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "\nHello\n\n");
    }

    #[tokio::test]
    async fn follow_stops_at_finish() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HELLO}\n{STOP}").unwrap();

        let mut renderer = LogRenderer::new(Vec::new(), Vec::new(), build_term(false, true, 80, Theme::None));
        cmd_view(
            LogSource::File(file.path().to_path_buf()),
            true,
            Duration::from_millis(10),
            &mut renderer,
        )
        .await
        .unwrap();

        let (out, _) = renderer.into_inner();
        assert!(String::from_utf8(out).unwrap().contains("Hello"));
    }

    #[tokio::test]
    async fn following_stdin_is_rejected() {
        let mut renderer = LogRenderer::new(Vec::new(), Vec::new(), TermContext::plain());
        let err = cmd_view(LogSource::Stdin, true, Duration::from_secs(1), &mut renderer)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }
}
