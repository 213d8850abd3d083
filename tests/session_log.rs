use agentlog::log::{Follower, LogRenderer};
use agentlog::render::{ColorScheme, TermContext, TerminalMarkdown, Theme};

const SESSION: &str = include_str!("fixtures/session.log");

fn render_plain(text: &str) -> (bool, String, String) {
    let mut renderer = LogRenderer::new(Vec::new(), Vec::new(), TermContext::plain());
    let stop = renderer.render(text).expect("render");
    let (out, err) = renderer.into_inner();
    (stop, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

#[test]
fn test_full_session_renders_in_order() {
    let (stop, out, err) = render_plain(SESSION);
    assert!(stop, "session ends with a stop chunk");

    let expected_prefix = concat!(
        "\nI'll start by exploring the repository.\n\n",
        "\nLet me see what is here.\n\n",
        "▶ Bash: List repository files\n",
        "\n```shell\n$ ls\nREADME.md\nsrc\n```\n\n",
        "▶ View src/lib.rs\n",
        "\n```rs\n pub fn widget() {}\npub fn gadget() {}\n```\n\n",
        "▶ Edit: src/lib.rs\n",
        "\n```diff\n-pub fn gadget() {}\n+pub fn gizmo() {}\n```\n\n",
        "▶ Progress update: Rename gadget\n",
        "\n- [x] Rename gadget to gizmo\n\n",
        "\n```json\n{\n  \"pushed\": true\n}\n```\n\n",
        "▶ Get issue from GitHub\n",
        "Input:\n",
    );
    assert!(out.starts_with(expected_prefix), "unexpected output:\n{out}");
    assert!(out.contains("\"issue_number\": 7"));
    assert!(out.contains("Output:\n\n```json\n{\n  \"title\": \"Rename gadget\"\n}\n```\n\n"));
    assert!(out.ends_with("\nAll done.\n\n"));

    assert!(!out.contains("ignored"), "non-chunk objects are skipped");
    assert!(!out.contains("never shown"), "nothing after stop is rendered");
    assert!(!out.contains("broken arguments"));

    assert!(err.contains("failed to parse 'view' tool call arguments"));
    assert_eq!(err.matches("failed to parse").count(), 1);
}

#[test]
fn test_session_renders_through_terminal_markdown() {
    let colors = ColorScheme::new(false);
    let term = TermContext::new(colors, Box::new(TerminalMarkdown::new(80, Theme::None, colors)));
    let mut renderer = LogRenderer::new(Vec::new(), Vec::new(), term);
    assert!(renderer.render(SESSION).unwrap());

    let (out, _) = renderer.into_inner();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("▶ View src/lib.rs\n\n   pub fn widget() {}\n  pub fn gadget() {}\n"));
    assert!(out.contains("  $ ls\n  README.md\n  src\n"));
    assert!(out.contains("• [x] Rename gadget to gizmo"));
    assert!(!out.contains("```"));
}

#[tokio::test]
async fn test_follow_session_grown_line_by_line() {
    let lines: Vec<&str> = SESSION.lines().collect();
    let mut snapshots: Vec<Vec<u8>> = (1..=lines.len())
        .map(|n| format!("{}\n", lines[..n].join("\n")).into_bytes())
        .collect();
    snapshots.reverse();

    let mut followed = LogRenderer::new(Vec::new(), Vec::new(), TermContext::plain());
    Follower::new()
        .follow(&mut followed, || {
            let next = snapshots.pop().ok_or_else(|| anyhow::anyhow!("log ended without stop"));
            std::future::ready(next)
        })
        .await
        .expect("follow");

    let (_, once, _) = render_plain(SESSION);
    let (out, _) = followed.into_inner();
    assert_eq!(String::from_utf8(out).unwrap(), once);
}
